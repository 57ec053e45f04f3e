//! Step-visibility and fee-determination core of the DFSA financial-services licence
//! application wizard, plus the draft lifecycle service built around it.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;

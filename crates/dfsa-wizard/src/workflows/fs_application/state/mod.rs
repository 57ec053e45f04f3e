//! Form state updates: shallow patches, discrete actions, and the cascade both share.

mod action;
mod cascade;
mod patch;

pub use action::{reduce, reduce_on, FormAction};
pub use patch::FormDataPatch;

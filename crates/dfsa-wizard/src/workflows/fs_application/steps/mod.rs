//! Step catalogue, visibility, and wizard navigation.

mod catalog;
mod fields;
mod navigation;
mod visibility;

pub use catalog::{steps_in_stage, StepDefinition, StepId, WizardStage};
pub use fields::{field_visibility, is_field_visible, FieldVisibilityMap};
pub use navigation::{
    can_navigate_to_step, next_step_index, previous_step_index, progress_percent,
    WizardProgress,
};
pub use visibility::{is_step_visible, visible_steps};

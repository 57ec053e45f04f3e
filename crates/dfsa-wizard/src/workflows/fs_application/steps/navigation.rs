use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::catalog::StepId;

/// Where the applicant is in the wizard. Indices refer to the visible-step list at the time of
/// the call, so callers recompute them whenever the list changes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WizardProgress {
    pub current_step_index: usize,
    pub completed_steps: BTreeSet<StepId>,
}

impl WizardProgress {
    pub fn complete(&mut self, step: StepId) {
        self.completed_steps.insert(step);
    }

    pub fn percent(&self, applicable: &[StepId]) -> u8 {
        progress_percent(&self.completed_steps, applicable)
    }

    /// Pull the cursor back inside the list after the visible steps shrank.
    pub fn clamp_to(&mut self, applicable: &[StepId]) {
        let last = applicable.len().saturating_sub(1);
        self.current_step_index = self.current_step_index.min(last);
    }
}

/// Share of applicable steps already completed, rounded to the nearest whole percent.
/// Completed steps that are no longer visible do not count.
pub fn progress_percent(completed: &BTreeSet<StepId>, applicable: &[StepId]) -> u8 {
    if applicable.is_empty() {
        return 0;
    }

    let done = applicable
        .iter()
        .filter(|step| completed.contains(step))
        .count();
    let percent = (done as f64 / applicable.len() as f64 * 100.0).round();
    percent.clamp(0.0, 100.0) as u8
}

/// Going back is always allowed; going forward requires every earlier step to be complete.
pub fn can_navigate_to_step(
    target_index: usize,
    current_index: usize,
    completed: &BTreeSet<StepId>,
    applicable: &[StepId],
) -> bool {
    if target_index <= current_index {
        return true;
    }

    applicable
        .iter()
        .take(target_index)
        .all(|step| completed.contains(step))
}

pub fn next_step_index(current_index: usize, applicable: &[StepId]) -> Option<usize> {
    let next = current_index + 1;
    (next < applicable.len()).then_some(next)
}

pub fn previous_step_index(current_index: usize) -> Option<usize> {
    current_index.checked_sub(1)
}

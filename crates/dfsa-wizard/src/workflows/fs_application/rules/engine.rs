use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::super::domain::FsApplicationFormData;
use super::super::steps::{self, StepId};
use super::condition::{evaluate_condition_group, RuleCondition};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleType {
    Visibility,
    Validation,
    Calculation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleTarget {
    Step,
    Field,
    Section,
}

/// Stored rule. Field targets are addressed as `<step id>.<field id>`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rule {
    pub id: String,
    pub rule_code: String,
    #[serde(default)]
    pub rule_name: String,
    pub rule_type: RuleType,
    pub target_type: RuleTarget,
    pub target_id: String,
    #[serde(default)]
    pub conditions: Vec<RuleCondition>,
    #[serde(default = "active_by_default")]
    pub is_active: bool,
    #[serde(default)]
    pub priority: i32,
}

fn active_by_default() -> bool {
    true
}

impl Rule {
    fn is_active_visibility(&self, target: RuleTarget) -> bool {
        self.is_active && self.rule_type == RuleType::Visibility && self.target_type == target
    }
}

/// Externally maintained visibility rules.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RuleSet {
    rules: Vec<Rule>,
}

impl RuleSet {
    pub fn new(rules: Vec<Rule>) -> Self {
        Self { rules }
    }

    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Steps whose active visibility rule passes, in ascending priority. Targets that do not
    /// name a known step are skipped.
    pub fn visible_steps(&self, data: &Value) -> Vec<StepId> {
        let mut candidates: Vec<&Rule> = self
            .rules
            .iter()
            .filter(|rule| rule.is_active_visibility(RuleTarget::Step))
            .collect();
        candidates.sort_by_key(|rule| rule.priority);

        let mut visible = Vec::new();
        for rule in candidates {
            let Some(step) = StepId::parse(&rule.target_id) else {
                continue;
            };
            if !visible.contains(&step) && evaluate_condition_group(&rule.conditions, data) {
                visible.push(step);
            }
        }
        visible
    }

    pub fn field_visibility(&self, step: StepId, data: &Value) -> BTreeMap<String, bool> {
        let prefix = format!("{}.", step.id());
        self.rules
            .iter()
            .filter(|rule| rule.is_active_visibility(RuleTarget::Field))
            .filter_map(|rule| {
                let field = rule.target_id.strip_prefix(&prefix)?;
                Some((
                    field.to_string(),
                    evaluate_condition_group(&rule.conditions, data),
                ))
            })
            .collect()
    }
}

/// Where step and field visibility come from: the compiled rules or a loaded rule set.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum VisibilityEngine {
    #[default]
    BuiltIn,
    Configured(RuleSet),
}

impl VisibilityEngine {
    /// Visible steps in catalogue order. A configured rule set decides the optional steps only;
    /// the final submission steps are always appended.
    pub fn visible_steps(&self, form: &FsApplicationFormData) -> Vec<StepId> {
        match self {
            Self::BuiltIn => steps::visible_steps(form),
            Self::Configured(rules) => {
                let mut visible: BTreeSet<StepId> =
                    rules.visible_steps(&form_as_value(form)).into_iter().collect();
                visible.extend(StepId::finals());
                visible.into_iter().collect()
            }
        }
    }

    pub fn field_visibility(
        &self,
        step: StepId,
        form: &FsApplicationFormData,
    ) -> BTreeMap<String, bool> {
        match self {
            Self::BuiltIn => steps::field_visibility(step, form)
                .into_iter()
                .map(|(field, visible)| (field.to_string(), visible))
                .collect(),
            Self::Configured(rules) => rules.field_visibility(step, &form_as_value(form)),
        }
    }

    /// Fields hidden on each of `steps`. Steps with nothing hidden are omitted.
    pub fn hidden_fields(
        &self,
        steps: &[StepId],
        form: &FsApplicationFormData,
    ) -> BTreeMap<StepId, Vec<String>> {
        steps
            .iter()
            .filter_map(|&step| {
                let hidden: Vec<String> = self
                    .field_visibility(step, form)
                    .into_iter()
                    .filter_map(|(field, visible)| (!visible).then_some(field))
                    .collect();
                (!hidden.is_empty()).then_some((step, hidden))
            })
            .collect()
    }

    pub fn is_field_visible(
        &self,
        step: StepId,
        field: &str,
        form: &FsApplicationFormData,
    ) -> bool {
        self.field_visibility(step, form)
            .get(field)
            .copied()
            .unwrap_or(true)
    }
}

fn form_as_value(form: &FsApplicationFormData) -> Value {
    serde_json::to_value(form).unwrap_or(Value::Null)
}

//! Data-driven visibility rules evaluated against the serialized form.

mod condition;
mod engine;

pub use condition::{
    evaluate_condition, evaluate_condition_group, value_at_path, RuleCondition, RuleOperator,
};
pub use engine::{Rule, RuleSet, RuleTarget, RuleType, VisibilityEngine};

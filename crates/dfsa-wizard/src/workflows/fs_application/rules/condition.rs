use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleOperator {
    Equals,
    NotEquals,
    IsTrue,
    IsFalse,
    IsEmpty,
    IsNotEmpty,
    LengthGt,
    LengthGte,
    LengthLt,
    LengthEquals,
    Contains,
    NotContains,
    In,
    NotIn,
    Gt,
    Gte,
    Lt,
    Lte,
}

/// One test against a field of the serialized form, addressed by dot path
/// (`activitySelections.A1`, `headOfficeAddress.country`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleCondition {
    pub field_path: String,
    pub operator: RuleOperator,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_id: Option<u32>,
}

impl RuleCondition {
    pub fn new(field_path: impl Into<String>, operator: RuleOperator) -> Self {
        Self {
            field_path: field_path.into(),
            operator,
            value: None,
            group_id: None,
        }
    }

    pub fn with_value(mut self, value: impl Into<Value>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn in_group(mut self, group_id: u32) -> Self {
        self.group_id = Some(group_id);
        self
    }
}

/// Walk `path` through nested objects. Any missing segment or non-object hop yields `None`.
pub fn value_at_path<'a>(root: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.')
        .try_fold(root, |current, segment| current.as_object()?.get(segment))
}

pub fn evaluate_condition(condition: &RuleCondition, data: &Value) -> bool {
    let field = value_at_path(data, &condition.field_path);
    let expected = condition.value.as_ref();

    match condition.operator {
        RuleOperator::Equals => field == expected,
        RuleOperator::NotEquals => field != expected,
        RuleOperator::IsTrue => matches!(field, Some(Value::Bool(true))),
        RuleOperator::IsFalse => matches!(field, Some(Value::Bool(false))),
        RuleOperator::IsEmpty => is_empty(field),
        RuleOperator::IsNotEmpty => !is_empty(field),
        RuleOperator::LengthGt => compare_length(field, expected, |len, bound| len > bound),
        RuleOperator::LengthGte => compare_length(field, expected, |len, bound| len >= bound),
        RuleOperator::LengthLt => compare_length(field, expected, |len, bound| len < bound),
        RuleOperator::LengthEquals => compare_length(field, expected, |len, bound| len == bound),
        RuleOperator::Contains => contains(field, expected).unwrap_or(false),
        RuleOperator::NotContains => contains(field, expected).map_or(true, |found| !found),
        RuleOperator::In => match (field, expected) {
            (Some(field), Some(Value::Array(options))) => options.contains(field),
            _ => false,
        },
        RuleOperator::NotIn => match (field, expected) {
            (Some(field), Some(Value::Array(options))) => !options.contains(field),
            _ => true,
        },
        RuleOperator::Gt => compare_numbers(field, expected, |lhs, rhs| lhs > rhs),
        RuleOperator::Gte => compare_numbers(field, expected, |lhs, rhs| lhs >= rhs),
        RuleOperator::Lt => compare_numbers(field, expected, |lhs, rhs| lhs < rhs),
        RuleOperator::Lte => compare_numbers(field, expected, |lhs, rhs| lhs <= rhs),
    }
}

/// Conditions sharing a group id are ANDed; groups are ORed. An empty list always passes.
/// Conditions without a group id fall into group 0.
pub fn evaluate_condition_group(conditions: &[RuleCondition], data: &Value) -> bool {
    if conditions.is_empty() {
        return true;
    }

    let mut groups: BTreeMap<u32, Vec<&RuleCondition>> = BTreeMap::new();
    for condition in conditions {
        groups
            .entry(condition.group_id.unwrap_or(0))
            .or_default()
            .push(condition);
    }

    groups.values().any(|group| {
        group
            .iter()
            .all(|condition| evaluate_condition(condition, data))
    })
}

fn is_empty(field: Option<&Value>) -> bool {
    match field {
        None | Some(Value::Null) => true,
        Some(Value::String(text)) => text.trim().is_empty(),
        Some(Value::Array(items)) => items.is_empty(),
        Some(Value::Object(entries)) => entries.is_empty(),
        Some(_) => false,
    }
}

fn compare_length(
    field: Option<&Value>,
    expected: Option<&Value>,
    compare: fn(u64, u64) -> bool,
) -> bool {
    match (field, expected.and_then(Value::as_u64)) {
        (Some(Value::Array(items)), Some(bound)) => compare(items.len() as u64, bound),
        _ => false,
    }
}

/// `None` when the field is neither a string nor an array.
fn contains(field: Option<&Value>, expected: Option<&Value>) -> Option<bool> {
    match field? {
        Value::String(text) => Some(
            expected
                .and_then(Value::as_str)
                .map_or(false, |needle| text.contains(needle)),
        ),
        Value::Array(items) => Some(expected.map_or(false, |needle| items.contains(needle))),
        _ => None,
    }
}

fn compare_numbers(
    field: Option<&Value>,
    expected: Option<&Value>,
    compare: fn(f64, f64) -> bool,
) -> bool {
    match (
        field.and_then(Value::as_f64),
        expected.and_then(Value::as_f64),
    ) {
        (Some(lhs), Some(rhs)) => compare(lhs, rhs),
        _ => false,
    }
}

use serde::Serialize;

use crate::form::profile::Field;

/// Condition chips replace the whole field; the condition field is single-valued.
pub const CONDITION_CHIPS: &[&str] = &[
    "None",
    "Diabetes",
    "Hypertension",
    "Thyroid",
    "Asthma",
    "Heart Disease",
];

pub const NEED_CHIPS: &[&str] = &[
    "Maternity coverage",
    "No room rent limit",
    "OPD coverage",
    "Dental & Vision",
    "Mental health",
];

pub const PREFERENCE_CHIPS: &[&str] = &[
    "Wellness rewards",
    "High CSR",
    "Quick claims",
    "Cashless hospitals",
    "No waiting period",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChipAction {
    Replace,
    Append,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChipGroup {
    pub field: Field,
    pub action: ChipAction,
    pub tokens: &'static [&'static str],
}

/// The quick-fill catalog in display order.
pub fn catalog() -> Vec<ChipGroup> {
    vec![
        ChipGroup {
            field: Field::PreExistingConditions,
            action: ChipAction::Replace,
            tokens: CONDITION_CHIPS,
        },
        ChipGroup {
            field: Field::Needs,
            action: ChipAction::Append,
            tokens: NEED_CHIPS,
        },
        ChipGroup {
            field: Field::Preferences,
            action: ChipAction::Append,
            tokens: PREFERENCE_CHIPS,
        },
    ]
}

/// Appends `token` to a comma-separated value unless it is already present.
/// Presence is a plain substring check, so "OPD" counts as present in
/// "OPD coverage".
pub fn append_token(current: &str, token: &str) -> Option<String> {
    if current.contains(token) {
        return None;
    }
    if current.is_empty() {
        Some(token.to_string())
    } else {
        Some(format!("{current}, {token}"))
    }
}

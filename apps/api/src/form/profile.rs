use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::form::FormError;

pub const DEFAULT_AGE: &str = "28";
pub const DEFAULT_CONDITIONS: &str = "None";
pub const DEFAULT_BUDGET: &str = "15000-20000";
pub const DEFAULT_NEED: &str = "No room rent limit";
pub const DEFAULT_PREFERENCE: &str = "Wellness rewards";

/// The user's insurance-preference record. Every field is free text; the only
/// rule enforced here is that none of them is blank at submission time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub age: String,
    pub pre_existing_conditions: String,
    pub budget_range: String,
    pub needs: String,
    pub preferences: String,
}

impl Default for Profile {
    /// Pre-filled so the form can be submitted without any edits.
    fn default() -> Self {
        Profile {
            age: DEFAULT_AGE.to_string(),
            pre_existing_conditions: DEFAULT_CONDITIONS.to_string(),
            budget_range: DEFAULT_BUDGET.to_string(),
            needs: DEFAULT_NEED.to_string(),
            preferences: DEFAULT_PREFERENCE.to_string(),
        }
    }
}

impl Profile {
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Age => &self.age,
            Field::PreExistingConditions => &self.pre_existing_conditions,
            Field::BudgetRange => &self.budget_range,
            Field::Needs => &self.needs,
            Field::Preferences => &self.preferences,
        }
    }

    pub fn get_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::Age => &mut self.age,
            Field::PreExistingConditions => &mut self.pre_existing_conditions,
            Field::BudgetRange => &mut self.budget_range,
            Field::Needs => &mut self.needs,
            Field::Preferences => &mut self.preferences,
        }
    }

    /// Fields whose value is empty or whitespace only, in form order.
    pub fn missing_fields(&self) -> Vec<Field> {
        Field::ALL
            .into_iter()
            .filter(|f| self.get(*f).trim().is_empty())
            .collect()
    }

    /// Required-field precondition for submission.
    pub fn validate(&self) -> Result<(), FormError> {
        let missing = self.missing_fields();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(FormError::MissingFields(missing))
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    Age,
    PreExistingConditions,
    BudgetRange,
    Needs,
    Preferences,
}

impl Field {
    pub const ALL: [Field; 5] = [
        Field::Age,
        Field::PreExistingConditions,
        Field::BudgetRange,
        Field::Needs,
        Field::Preferences,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Field::Age => "age",
            Field::PreExistingConditions => "preExistingConditions",
            Field::BudgetRange => "budgetRange",
            Field::Needs => "needs",
            Field::Preferences => "preferences",
        }
    }

    /// Fields that accumulate comma-separated quick-fill tokens.
    pub fn is_multi_value(self) -> bool {
        matches!(self, Field::Needs | Field::Preferences)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Field {
    type Err = FormError;

    /// Accepts the form names and the backend wire names (`ped`, `budget`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "age" => Ok(Field::Age),
            "preExistingConditions" | "ped" => Ok(Field::PreExistingConditions),
            "budgetRange" | "budget" => Ok(Field::BudgetRange),
            "needs" => Ok(Field::Needs),
            "preferences" => Ok(Field::Preferences),
            other => Err(FormError::UnknownField(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_profile_is_submittable() {
        let profile = Profile::default();
        assert!(profile.validate().is_ok());
        assert_eq!(profile.age, "28");
        assert_eq!(profile.pre_existing_conditions, "None");
    }

    #[test]
    fn test_blank_fields_are_reported_in_order() {
        let mut profile = Profile::default();
        profile.preferences = "   ".to_string();
        profile.age.clear();
        assert_eq!(
            profile.validate(),
            Err(FormError::MissingFields(vec![Field::Age, Field::Preferences]))
        );
    }

    #[test]
    fn test_any_non_empty_text_is_accepted() {
        let profile = Profile {
            age: "not a number".to_string(),
            pre_existing_conditions: "?".to_string(),
            budget_range: "whatever".to_string(),
            needs: "x".to_string(),
            preferences: "y".to_string(),
        };
        assert!(profile.validate().is_ok());
    }

    #[test]
    fn test_field_parses_wire_and_form_names() {
        assert_eq!("ped".parse::<Field>(), Ok(Field::PreExistingConditions));
        assert_eq!(
            "preExistingConditions".parse::<Field>(),
            Ok(Field::PreExistingConditions)
        );
        assert_eq!("budget".parse::<Field>(), Ok(Field::BudgetRange));
        assert_eq!(
            "salary".parse::<Field>(),
            Err(FormError::UnknownField("salary".to_string()))
        );
    }

    #[test]
    fn test_profile_serializes_camel_case() {
        let json = serde_json::to_value(Profile::default()).unwrap();
        assert_eq!(json["preExistingConditions"], "None");
        assert_eq!(json["budgetRange"], "15000-20000");
    }

    #[test]
    fn test_missing_fields_message_lists_names() {
        let err = FormError::MissingFields(vec![Field::Age, Field::Needs]);
        assert_eq!(err.to_string(), "Required fields are empty: age, needs");
    }
}

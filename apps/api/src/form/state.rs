use crate::form::chips;
use crate::form::profile::{Field, Profile};
use crate::form::FormError;

/// Mutable form record behind the recommendation form.
#[derive(Debug, Clone, Default)]
pub struct FormState {
    profile: Profile,
}

impl FormState {
    pub fn new(profile: Profile) -> Self {
        Self { profile }
    }

    /// Snapshot of the form as a fresh profile.
    pub fn current(&self) -> Profile {
        self.profile.clone()
    }

    /// Unconditional replacement of one field.
    pub fn update(&mut self, field: Field, value: impl Into<String>) {
        *self.profile.get_mut(field) = value.into();
    }

    /// Adds a quick-fill token to `needs` or `preferences`.
    /// Returns `Ok(false)` when the token was already present.
    pub fn append_token(&mut self, field: Field, token: &str) -> Result<bool, FormError> {
        if !field.is_multi_value() {
            return Err(FormError::NotMultiValue(field));
        }
        let slot = self.profile.get_mut(field);
        match chips::append_token(slot, token) {
            Some(next) => {
                *slot = next;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty_state() -> FormState {
        let mut state = FormState::default();
        state.update(Field::Needs, "");
        state.update(Field::Preferences, "");
        state
    }

    #[test]
    fn test_append_token_twice_is_idempotent() {
        let mut state = FormState::default();
        assert_eq!(state.append_token(Field::Needs, "Mental health"), Ok(true));
        let after_first = state.current().needs;
        assert_eq!(state.append_token(Field::Needs, "Mental health"), Ok(false));
        assert_eq!(state.current().needs, after_first);
        assert_eq!(after_first, "No room rent limit, Mental health");
    }

    #[test]
    fn test_append_token_sequence_on_empty_field() {
        let mut state = empty_state();
        state.append_token(Field::Needs, "Maternity coverage").unwrap();
        assert_eq!(state.current().needs, "Maternity coverage");
        state.append_token(Field::Needs, "OPD coverage").unwrap();
        assert_eq!(state.current().needs, "Maternity coverage, OPD coverage");
    }

    #[test]
    fn test_append_token_rejects_single_value_fields() {
        let mut state = FormState::default();
        assert_eq!(
            state.append_token(Field::Age, "30"),
            Err(FormError::NotMultiValue(Field::Age))
        );
        assert_eq!(state.current().age, "28");
    }

    #[test]
    fn test_update_replaces_value() {
        let mut state = FormState::default();
        state.update(Field::PreExistingConditions, "Diabetes");
        state.update(Field::PreExistingConditions, "Asthma");
        assert_eq!(state.current().pre_existing_conditions, "Asthma");
    }

    #[test]
    fn test_current_is_a_snapshot() {
        let mut state = FormState::default();
        let before = state.current();
        state.update(Field::BudgetRange, "5000-8000");
        assert_eq!(before.budget_range, "15000-20000");
        assert_eq!(state.current().budget_range, "5000-8000");
    }
}

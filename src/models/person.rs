//! Person model
//!
//! A person owns transactions. Whether they are a minor is derived from their
//! age every time it is asked for and never persisted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::PersonId;

/// Maximum length of a person's name
pub const MAX_NAME_LEN: usize = 100;

/// Accepted age range (inclusive)
pub const MIN_AGE: u32 = 1;
pub const MAX_AGE: u32 = 150;

/// Default age below which a person is treated as a minor
pub const DEFAULT_MINOR_AGE_THRESHOLD: u32 = 18;

/// A person whose transactions are tracked
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Person {
    /// Unique identifier
    pub id: PersonId,

    /// Full name
    pub name: String,

    /// Age in whole years
    pub age: u32,

    /// When the person was created
    pub created_at: DateTime<Utc>,
}

impl Person {
    /// Create a new person
    pub fn new(name: impl Into<String>, age: u32) -> Self {
        Self {
            id: PersonId::new(),
            name: name.into(),
            age,
            created_at: Utc::now(),
        }
    }

    /// Whether this person is a minor under the default threshold
    pub fn is_minor(&self) -> bool {
        self.is_minor_under(DEFAULT_MINOR_AGE_THRESHOLD)
    }

    /// Whether this person is younger than `threshold`
    pub fn is_minor_under(&self, threshold: u32) -> bool {
        self.age < threshold
    }

    /// Validate the person
    pub fn validate(&self) -> Result<(), PersonValidationError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(PersonValidationError::EmptyName);
        }

        let len = name.chars().count();
        if len > MAX_NAME_LEN {
            return Err(PersonValidationError::NameTooLong(len));
        }

        if !(MIN_AGE..=MAX_AGE).contains(&self.age) {
            return Err(PersonValidationError::AgeOutOfRange(self.age));
        }

        Ok(())
    }
}

impl fmt::Display for Person {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Validation errors for people
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersonValidationError {
    EmptyName,
    NameTooLong(usize),
    AgeOutOfRange(u32),
}

impl PersonValidationError {
    /// Name of the offending field
    pub fn field(&self) -> &'static str {
        match self {
            Self::EmptyName | Self::NameTooLong(_) => "name",
            Self::AgeOutOfRange(_) => "age",
        }
    }

    /// The violated constraint, phrased to follow the field name
    pub fn constraint(&self) -> String {
        match self {
            Self::EmptyName => "cannot be empty".to_string(),
            Self::NameTooLong(len) => {
                format!("too long ({} chars, max {})", len, MAX_NAME_LEN)
            }
            Self::AgeOutOfRange(age) => {
                format!("must be between {} and {} (got {})", MIN_AGE, MAX_AGE, age)
            }
        }
    }
}

impl fmt::Display for PersonValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Person {} {}", self.field(), self.constraint())
    }
}

impl std::error::Error for PersonValidationError {}

impl From<PersonValidationError> for crate::error::LedgerError {
    fn from(err: PersonValidationError) -> Self {
        Self::validation(err.field(), err.constraint())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_person() {
        let person = Person::new("Maria Silva", 30);
        assert_eq!(person.name, "Maria Silva");
        assert_eq!(person.age, 30);
        assert!(person.validate().is_ok());
    }

    #[test]
    fn test_is_minor_is_derived_from_age() {
        let mut person = Person::new("Ana", 17);
        assert!(person.is_minor());

        person.age = 18;
        assert!(!person.is_minor());
        assert!(person.is_minor_under(21));
    }

    #[test]
    fn test_name_validation() {
        let mut person = Person::new("   ", 30);
        assert_eq!(person.validate(), Err(PersonValidationError::EmptyName));

        person.name = "a".repeat(101);
        assert_eq!(
            person.validate(),
            Err(PersonValidationError::NameTooLong(101))
        );

        // Multi-byte characters count once each
        person.name = "ç".repeat(100);
        assert!(person.validate().is_ok());
    }

    #[test]
    fn test_age_bounds() {
        assert!(Person::new("Edge", 1).validate().is_ok());
        assert!(Person::new("Edge", 150).validate().is_ok());
        assert_eq!(
            Person::new("Zero", 0).validate(),
            Err(PersonValidationError::AgeOutOfRange(0))
        );
        assert_eq!(
            Person::new("Old", 151).validate(),
            Err(PersonValidationError::AgeOutOfRange(151))
        );
    }

    #[test]
    fn test_validation_error_converts_with_field() {
        let err: crate::error::LedgerError = PersonValidationError::AgeOutOfRange(0).into();
        assert!(matches!(
            err,
            crate::error::LedgerError::Validation { field: "age", .. }
        ));
    }

    #[test]
    fn test_is_minor_not_serialized() {
        let person = Person::new("Ana", 16);
        let json = serde_json::to_value(&person).unwrap();
        assert!(json.get("is_minor").is_none());
    }
}

//! Addition validation.
//!
//! Decides whether a requested addition set is acceptable, independent of
//! pot state. Vocabulary checks accumulate: a rejection carries every
//! offending pair, not only the first. Validation never mutates anything;
//! its result is used only to choose a status code.

use crate::config::AdditionVocabulary;
use crate::core::Additions;
use thiserror::Error;

/// Why an addition set was refused.
///
/// Rejections are protocol outcomes (mapped to 406), not failures.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum Rejection {
    /// RFC 2324 §2.1.1: no decaf. Ever.
    #[error("decaffeinated coffee? What's the point?")]
    DecafUnsupported,

    /// Keys or values outside the configured vocabulary.
    #[error("unsupported additions: {}", unsupported.join("; "))]
    InvalidAddition {
        /// Every offending `key=value` pair, in key order.
        unsupported: Vec<String>,
    },
}

impl Rejection {
    /// Stable machine-readable reason tag.
    pub fn reason(&self) -> &'static str {
        match self {
            Self::DecafUnsupported => "decaf-unsupported",
            Self::InvalidAddition { .. } => "invalid-addition",
        }
    }
}

/// Validates requested additions against the configured vocabulary.
///
/// The decaf refusal dominates all other addition checks; after that,
/// every `key=value` pair must be inside the vocabulary. Additions combine
/// freely otherwise; milk plus whisky is an Irish coffee, not an error.
///
/// # Example
///
/// ```rust
/// use percolate::config::AdditionVocabulary;
/// use percolate::core::Additions;
/// use percolate::validate::AdditionValidator;
///
/// let validator = AdditionValidator::new(AdditionVocabulary::default());
///
/// let irish = Additions::new()
///     .with("milk-type", "Cream")
///     .with("alcohol-type", "Whisky");
/// assert!(validator.validate(&irish).is_ok());
///
/// let decaf = Additions::new().with_decaf(true);
/// assert_eq!(
///     validator.validate(&decaf).unwrap_err().reason(),
///     "decaf-unsupported",
/// );
/// ```
#[derive(Clone, Debug)]
pub struct AdditionValidator {
    vocabulary: AdditionVocabulary,
}

impl AdditionValidator {
    /// Build a validator over one vocabulary.
    pub fn new(vocabulary: AdditionVocabulary) -> Self {
        Self { vocabulary }
    }

    /// The vocabulary this validator enforces.
    pub fn vocabulary(&self) -> &AdditionVocabulary {
        &self.vocabulary
    }

    /// Check an addition set.
    pub fn validate(&self, additions: &Additions) -> Result<(), Rejection> {
        if additions.decaf() {
            return Err(Rejection::DecafUnsupported);
        }

        let unsupported: Vec<String> = additions
            .iter()
            .filter(|(key, value)| !self.vocabulary.allows(key, value))
            .map(|(key, value)| format!("{key}={value}"))
            .collect();

        if unsupported.is_empty() {
            Ok(())
        } else {
            Err(Rejection::InvalidAddition { unsupported })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn validator() -> AdditionValidator {
        AdditionValidator::new(AdditionVocabulary::default())
    }

    #[test]
    fn empty_set_is_acceptable() {
        assert!(validator().validate(&Additions::new()).is_ok());
    }

    #[test]
    fn additions_compose_freely() {
        let additions = Additions::new()
            .with("milk-type", "Whole-milk")
            .with("syrup-type", "Vanilla")
            .with("alcohol-type", "Whisky");
        assert!(validator().validate(&additions).is_ok());
    }

    #[test]
    fn decaf_is_refused() {
        let err = validator()
            .validate(&Additions::new().with_decaf(true))
            .unwrap_err();
        assert_eq!(err, Rejection::DecafUnsupported);
    }

    #[test]
    fn decaf_dominates_vocabulary_violations() {
        let additions = Additions::new()
            .with("milk-type", "Oat")
            .with_decaf(true);
        let err = validator().validate(&additions).unwrap_err();
        assert_eq!(err, Rejection::DecafUnsupported);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = validator()
            .validate(&Additions::new().with("foam-type", "Extra"))
            .unwrap_err();
        assert_eq!(
            err,
            Rejection::InvalidAddition {
                unsupported: vec!["foam-type=Extra".to_string()],
            }
        );
    }

    #[test]
    fn out_of_vocabulary_values_are_rejected() {
        let err = validator()
            .validate(&Additions::new().with("milk-type", "Oat"))
            .unwrap_err();
        assert_eq!(err.reason(), "invalid-addition");
    }

    #[test]
    fn rejection_lists_every_offending_pair() {
        let additions = Additions::new()
            .with("milk-type", "Oat")
            .with("alcohol-type", "Gin")
            .with("syrup-type", "Vanilla");
        let err = validator().validate(&additions).unwrap_err();
        assert_eq!(
            err,
            Rejection::InvalidAddition {
                unsupported: vec![
                    "alcohol-type=Gin".to_string(),
                    "milk-type=Oat".to_string(),
                ],
            }
        );
    }

    #[test]
    fn rejection_messages_read_well() {
        assert_eq!(
            Rejection::DecafUnsupported.to_string(),
            "decaffeinated coffee? What's the point?"
        );
        let rejection = Rejection::InvalidAddition {
            unsupported: vec!["milk-type=Oat".to_string()],
        };
        assert_eq!(
            rejection.to_string(),
            "unsupported additions: milk-type=Oat"
        );
    }
}

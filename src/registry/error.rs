//! Registry errors.

use crate::core::IllegalTransition;
use thiserror::Error;

/// Errors surfaced by pot lookup and state mutation.
///
/// `PotNotFound` is a request-level error, distinct from the protocol's
/// brew statuses; the façade maps it to a plain 404.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("no pot registered with id '{0}'")]
    PotNotFound(String),

    #[error("pot '{pot_id}': {source}")]
    IllegalTransition {
        pot_id: String,
        #[source]
        source: IllegalTransition,
    },
}

impl RegistryError {
    pub(crate) fn illegal(pot_id: &str, source: IllegalTransition) -> Self {
        Self::IllegalTransition {
            pot_id: pot_id.to_string(),
            source,
        }
    }
}

//! Brew verdicts and the status-code mapping table.

use crate::core::{Beverage, PotKind, PotState, StatusCode};
use crate::validate::Rejection;
use serde::Serialize;

/// The brew machine's decision for a single command, before status mapping.
///
/// Verdicts are plain values: 406, 418, and 503 are expected, first-class
/// results of asking a pot to brew, not failures.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BrewVerdict {
    /// Additions accepted and the pot can brew.
    Brewed,
    /// The commanded beverage family does not match the appliance kind.
    WrongAppliance {
        /// What the target actually is.
        kind: PotKind,
    },
    /// The addition set was refused.
    Refused(Rejection),
    /// The pot has nothing left to serve.
    Depleted,
}

impl BrewVerdict {
    /// The verdict → status table, in one place.
    ///
    /// Precedence between verdicts (418 > 406 > 503 > 200) is fixed by the
    /// check order in the brew machine; this table only names the code each
    /// verdict maps to.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Brewed => StatusCode::Ok,
            Self::WrongAppliance { .. } => StatusCode::ImATeapot,
            Self::Refused(_) => StatusCode::NotAcceptable,
            Self::Depleted => StatusCode::ServiceUnavailable,
        }
    }

    /// Body message for this verdict.
    pub fn message(&self, beverage: Beverage) -> String {
        match self {
            Self::Brewed => match beverage {
                Beverage::Coffee => "Coffee is brewing.".to_string(),
                Beverage::Tea => "Tea is steeping.".to_string(),
            },
            Self::WrongAppliance {
                kind: PotKind::Teapot,
            } => "I'm a teapot. The requested entity body is short and stout.".to_string(),
            Self::WrongAppliance {
                kind: PotKind::CoffeePot,
            } => "I'm a coffee pot; tea is out of the question.".to_string(),
            Self::Refused(rejection) => rejection.to_string(),
            Self::Depleted => "Pot is empty. Refill required before brewing.".to_string(),
        }
    }
}

/// The outcome handed back to the façade for a brew command.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct BrewOutcome {
    /// Protocol status for the attempt.
    pub status: StatusCode,
    /// Body message matching the status.
    pub message: String,
    /// Pot state after the attempt (unchanged unless the brew succeeded).
    pub resulting_state: PotState,
    /// Id of the history record appended for this attempt.
    pub brew_id: u64,
    /// Whether this brew started a milk pour (the client must send WHEN).
    pub milk_pouring: bool,
}

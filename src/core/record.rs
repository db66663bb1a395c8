//! Immutable audit records for brew attempts.

use super::additions::Additions;
use super::pot::PotState;
use super::status::StatusCode;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Record of a single brew attempt, successful or refused.
///
/// Records are immutable once created: many per pot, chronological,
/// append-only. Refusals are recorded too; an audit that only remembers
/// the brews that worked is not an audit.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrewRecord {
    /// Per-pot sequential id, 1-based.
    pub id: u64,
    /// The pot this attempt targeted.
    pub pot_id: String,
    /// When the attempt was decided.
    pub timestamp: DateTime<Utc>,
    /// The additions the client asked for.
    pub additions: Additions,
    /// The protocol status the attempt produced.
    pub status: StatusCode,
    /// Pot state after the attempt.
    pub resulting_state: PotState,
}

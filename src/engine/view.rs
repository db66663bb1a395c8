//! Read models returned by query operations.

use crate::core::{Pot, PotKind, PotState};
use serde::{Deserialize, Serialize};

/// Summary of one pot, as returned by `status` and the registry view.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PotSnapshot {
    /// Unique pot id.
    pub pot_id: String,
    /// Appliance kind.
    pub kind: PotKind,
    /// Current state.
    pub state: PotState,
    /// Supported varieties.
    pub varieties: Vec<String>,
    /// Whether a milk pour is in progress.
    pub milk_pouring: bool,
    /// Brew attempts recorded so far, refusals included.
    pub brew_count: usize,
}

impl PotSnapshot {
    pub(crate) fn from_pot(pot: &Pot, brew_count: usize) -> Self {
        Self {
            pot_id: pot.id().to_string(),
            kind: pot.kind(),
            state: pot.state(),
            varieties: pot.varieties().to_vec(),
            milk_pouring: pot.is_pouring_milk(),
            brew_count,
        }
    }
}

/// Acknowledgement for a WHEN (stop-milk) command.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MilkAck {
    /// A pour was in progress and has been stopped.
    Stopped,
    /// Nothing was pouring; acknowledged as a no-op.
    Noop,
}

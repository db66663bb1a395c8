//! Append-only brew log.
//!
//! Records every brew attempt per pot, refusals included, in chronological
//! order. Records are never mutated or deleted. The brew machine calls
//! [`BrewLog::record`] while still holding the target pot's lock, so
//! per-pot order matches decision order.

use crate::core::{Additions, BrewRecord, PotState, StatusCode};
use chrono::Utc;
use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

/// Append-only audit of brew attempts, keyed by pot id.
#[derive(Debug, Default)]
pub struct BrewLog {
    records: Mutex<HashMap<String, Vec<BrewRecord>>>,
}

impl BrewLog {
    /// An empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record for one attempt, assigning the next sequential id.
    ///
    /// Returns the appended record.
    pub fn record(
        &self,
        pot_id: &str,
        additions: Additions,
        status: StatusCode,
        resulting_state: PotState,
    ) -> BrewRecord {
        let mut records = self.records.lock().unwrap_or_else(PoisonError::into_inner);
        let entries = records.entry(pot_id.to_string()).or_default();
        let record = BrewRecord {
            id: entries.len() as u64 + 1,
            pot_id: pot_id.to_string(),
            timestamp: Utc::now(),
            additions,
            status,
            resulting_state,
        };
        entries.push(record.clone());
        record
    }

    /// Chronological records for one pot. Empty when nothing has been
    /// attempted yet; whether the pot exists at all is the registry's call.
    pub fn history_for(&self, pot_id: &str) -> Vec<BrewRecord> {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(pot_id)
            .cloned()
            .unwrap_or_default()
    }

    /// Number of attempts recorded against one pot.
    pub fn count_for(&self, pot_id: &str) -> usize {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(pot_id)
            .map_or(0, Vec::len)
    }
}

//! The canonical in-memory pot collection.
//!
//! Owns every pot for the process lifetime. Each slot guards its pot with
//! its own mutex: the brew machine holds a slot's lock across its whole
//! check-decide-mutate-record sequence, so concurrent brews against one pot
//! serialize while different pots stay independent.

use crate::config::PotSeed;
use crate::core::{Pot, PotState};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

pub mod error;

pub use error::RegistryError;

/// Fixed collection of pots, keyed by id, listed in insertion order.
#[derive(Debug)]
pub struct PotRegistry {
    slots: Vec<Mutex<Pot>>,
    index: HashMap<String, usize>,
}

impl PotRegistry {
    /// Build the registry from seed definitions. All pots start `idle`.
    pub fn from_seeds(seeds: &[PotSeed]) -> Self {
        let mut slots = Vec::with_capacity(seeds.len());
        let mut index = HashMap::with_capacity(seeds.len());
        for seed in seeds {
            let _ = index.insert(seed.id.clone(), slots.len());
            slots.push(Mutex::new(Pot::new(
                seed.id.clone(),
                seed.kind,
                seed.varieties.clone(),
            )));
        }
        Self { slots, index }
    }

    /// Snapshot of one pot.
    pub fn lookup(&self, pot_id: &str) -> Result<Pot, RegistryError> {
        Ok(self.lock(pot_id)?.clone())
    }

    /// Insertion-order snapshots of every pot.
    pub fn list_all(&self) -> Vec<Pot> {
        self.slots.iter().map(|slot| lock_slot(slot).clone()).collect()
    }

    /// Apply a state change to one pot, enforcing the legal-transition
    /// table.
    ///
    /// This is the administrative entry point (preset a pot `empty`, reset
    /// an `empty` pot to `idle`); the brew machine mutates through
    /// [`lock`](Self::lock) instead so its checks and the change share one
    /// critical section.
    pub fn apply_state(&self, pot_id: &str, to: PotState) -> Result<(), RegistryError> {
        let mut pot = self.lock(pot_id)?;
        pot.apply_state(to)
            .map_err(|source| RegistryError::illegal(pot_id, source))
    }

    /// Whether a pot with this id exists.
    pub fn contains(&self, pot_id: &str) -> bool {
        self.index.contains_key(pot_id)
    }

    /// Number of registered pots.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// True when no pots are registered.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Exclusive access to one pot for the duration of a decision.
    pub(crate) fn lock(&self, pot_id: &str) -> Result<MutexGuard<'_, Pot>, RegistryError> {
        let ix = self
            .index
            .get(pot_id)
            .ok_or_else(|| RegistryError::PotNotFound(pot_id.to_string()))?;
        Ok(lock_slot(&self.slots[*ix]))
    }
}

// State changes apply atomically per lock hold, so a poisoned slot still
// contains a consistent pot; recover the guard.
fn lock_slot(slot: &Mutex<Pot>) -> MutexGuard<'_, Pot> {
    slot.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BrewConfig;
    use crate::core::PotKind;

    fn registry() -> PotRegistry {
        PotRegistry::from_seeds(&BrewConfig::default().pots)
    }

    #[test]
    fn seeded_pots_are_listed_in_insertion_order() {
        let registry = registry();
        let ids: Vec<String> = registry
            .list_all()
            .iter()
            .map(|pot| pot.id().to_string())
            .collect();
        assert_eq!(ids, vec!["pot-1", "pot-2", "kettle-1", "kettle-2"]);
        assert_eq!(registry.len(), 4);
        assert!(!registry.is_empty());
    }

    #[test]
    fn lookup_returns_a_snapshot() {
        let registry = registry();
        let pot = registry.lookup("kettle-1").unwrap();
        assert_eq!(pot.kind(), PotKind::Teapot);
        assert_eq!(pot.state(), PotState::Idle);
    }

    #[test]
    fn lookup_of_an_unknown_pot_fails() {
        let err = registry().lookup("samovar-1").unwrap_err();
        assert_eq!(err, RegistryError::PotNotFound("samovar-1".to_string()));
    }

    #[test]
    fn apply_state_moves_a_pot_along_legal_edges() {
        let registry = registry();
        registry.apply_state("pot-2", PotState::Empty).unwrap();
        assert_eq!(
            registry.lookup("pot-2").unwrap().state(),
            PotState::Empty
        );

        registry.apply_state("pot-2", PotState::Idle).unwrap();
        assert_eq!(registry.lookup("pot-2").unwrap().state(), PotState::Idle);
    }

    #[test]
    fn apply_state_rejects_illegal_edges() {
        let registry = registry();
        registry.apply_state("pot-2", PotState::Empty).unwrap();
        let err = registry
            .apply_state("pot-2", PotState::Ready)
            .unwrap_err();
        assert!(matches!(
            err,
            RegistryError::IllegalTransition { pot_id, .. } if pot_id == "pot-2"
        ));
    }

    #[test]
    fn apply_state_on_an_unknown_pot_fails() {
        let err = registry()
            .apply_state("samovar-1", PotState::Empty)
            .unwrap_err();
        assert!(matches!(err, RegistryError::PotNotFound(_)));
    }
}

//! The brew state machine and request-semantics engine.
//!
//! One [`BrewEngine`] owns the registry, the validator, and the history
//! log, and is the only code that mutates pot state. [`BrewEngine::brew`]
//! is the authoritative decision procedure for a BREW command; the fixed
//! precedence among its checks is appliance mismatch (418), then addition
//! refusal (406), then depletion (503), then success (200). The check order
//! lives in the engine's `decide` and the verdict → code table in
//! [`BrewVerdict::status_code`]; revisiting the precedence touches exactly
//! those two places.

mod verdict;
mod view;

pub use verdict::{BrewOutcome, BrewVerdict};
pub use view::{MilkAck, PotSnapshot};

use crate::config::{AdditionVocabulary, BrewConfig};
use crate::core::{Additions, Beverage, BrewRecord, Pot, PotState};
use crate::history::BrewLog;
use crate::registry::{PotRegistry, RegistryError};
use crate::validate::AdditionValidator;
use tracing::{debug, info, warn};

/// The protocol core: registry, validator, and history behind one API.
///
/// Every operation is synchronous and non-blocking; brews against the same
/// pot serialize on that pot's lock, different pots proceed independently.
///
/// # Example
///
/// ```rust
/// use percolate::config::BrewConfig;
/// use percolate::core::{Additions, Beverage, PotState};
/// use percolate::engine::BrewEngine;
///
/// let engine = BrewEngine::new(BrewConfig::default());
///
/// let outcome = engine
///     .brew("pot-1", Beverage::Coffee, Additions::new())
///     .unwrap();
/// assert_eq!(u16::from(outcome.status), 200);
/// assert_eq!(outcome.resulting_state, PotState::Ready);
/// ```
pub struct BrewEngine {
    pots: PotRegistry,
    validator: AdditionValidator,
    log: BrewLog,
}

impl BrewEngine {
    /// Build an engine from configuration. All pots start `idle`.
    pub fn new(config: BrewConfig) -> Self {
        Self {
            pots: PotRegistry::from_seeds(&config.pots),
            validator: AdditionValidator::new(config.vocabulary),
            log: BrewLog::new(),
        }
    }

    /// Decide a BREW command against one pot.
    ///
    /// Holds the pot's lock across the whole check-decide-mutate-record
    /// sequence. Every attempt is appended to the history, refusals
    /// included; only an unknown pot id is an error rather than an outcome.
    pub fn brew(
        &self,
        pot_id: &str,
        beverage: Beverage,
        additions: Additions,
    ) -> Result<BrewOutcome, RegistryError> {
        let mut pot = self.pots.lock(pot_id)?;

        let verdict = self.decide(&pot, beverage, &additions);
        let milk_pouring = matches!(verdict, BrewVerdict::Brewed) && additions.requests_milk();

        if matches!(verdict, BrewVerdict::Brewed) {
            // The brewing phase collapses to ready within the request;
            // both edges stay inside the critical section.
            self.transition(&mut pot, PotState::Brewing)?;
            self.transition(&mut pot, PotState::Ready)?;
            if milk_pouring {
                pot.start_milk_pour();
            }
        }

        let status = verdict.status_code();
        let record = self.log.record(pot_id, additions, status, pot.state());

        match &verdict {
            BrewVerdict::Brewed => info!(
                pot_id,
                beverage = %beverage,
                brew_id = record.id,
                milk_pouring,
                status = u16::from(status),
                "brew accepted"
            ),
            BrewVerdict::WrongAppliance { kind } => warn!(
                pot_id,
                kind = %kind,
                beverage = %beverage,
                status = u16::from(status),
                "appliance mismatch"
            ),
            BrewVerdict::Refused(rejection) => warn!(
                pot_id,
                reason = rejection.reason(),
                status = u16::from(status),
                "additions refused"
            ),
            BrewVerdict::Depleted => warn!(
                pot_id,
                status = u16::from(status),
                "pot empty"
            ),
        }

        Ok(BrewOutcome {
            status,
            message: verdict.message(beverage),
            resulting_state: pot.state(),
            brew_id: record.id,
            milk_pouring,
        })
    }

    /// Current state of one pot.
    pub fn status(&self, pot_id: &str) -> Result<PotSnapshot, RegistryError> {
        let pot = self.pots.lookup(pot_id)?;
        Ok(PotSnapshot::from_pot(&pot, self.log.count_for(pot_id)))
    }

    /// Chronological brew history of one pot.
    pub fn history(&self, pot_id: &str) -> Result<Vec<BrewRecord>, RegistryError> {
        if !self.pots.contains(pot_id) {
            return Err(RegistryError::PotNotFound(pot_id.to_string()));
        }
        Ok(self.log.history_for(pot_id))
    }

    /// The configured addition vocabulary.
    ///
    /// Identical for every pot and independent of pot state; the pot id is
    /// checked for existence only.
    pub fn list_additions(&self, pot_id: &str) -> Result<&AdditionVocabulary, RegistryError> {
        if !self.pots.contains(pot_id) {
            return Err(RegistryError::PotNotFound(pot_id.to_string()));
        }
        Ok(self.validator.vocabulary())
    }

    /// WHEN: stop a milk pour. The client decides when enough is enough.
    ///
    /// A no-op acknowledgement when nothing was pouring.
    pub fn stop_milk(&self, pot_id: &str) -> Result<MilkAck, RegistryError> {
        let mut pot = self.pots.lock(pot_id)?;
        if pot.state() == PotState::Ready && pot.stop_milk_pour() {
            info!(pot_id, "milk pour stopped");
            Ok(MilkAck::Stopped)
        } else {
            debug!(pot_id, state = pot.state().name(), "stop-milk no-op");
            Ok(MilkAck::Noop)
        }
    }

    /// Insertion-order summaries of every pot.
    pub fn registry(&self) -> Vec<PotSnapshot> {
        self.pots
            .list_all()
            .iter()
            .map(|pot| PotSnapshot::from_pot(pot, self.log.count_for(pot.id())))
            .collect()
    }

    /// Administrative state override: preset a pot `empty`, or reset an
    /// `empty` pot to `idle`. Not reachable from the protocol surface.
    pub fn apply_state(&self, pot_id: &str, state: PotState) -> Result<(), RegistryError> {
        self.pots.apply_state(pot_id, state)
    }

    /// The ordered checks behind every brew verdict.
    fn decide(&self, pot: &Pot, beverage: Beverage, additions: &Additions) -> BrewVerdict {
        if pot.kind().brews() != beverage {
            return BrewVerdict::WrongAppliance { kind: pot.kind() };
        }
        if let Err(rejection) = self.validator.validate(additions) {
            return BrewVerdict::Refused(rejection);
        }
        if pot.state().is_depleted() {
            return BrewVerdict::Depleted;
        }
        BrewVerdict::Brewed
    }

    fn transition(&self, pot: &mut Pot, to: PotState) -> Result<(), RegistryError> {
        let pot_id = pot.id().to_string();
        pot.apply_state(to)
            .map_err(|source| RegistryError::illegal(&pot_id, source))
    }
}

impl Default for BrewEngine {
    fn default() -> Self {
        Self::new(BrewConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::StatusCode;

    fn engine() -> BrewEngine {
        BrewEngine::default()
    }

    #[test]
    fn brew_succeeds_on_an_idle_coffee_pot() {
        let engine = engine();
        let outcome = engine
            .brew("pot-1", Beverage::Coffee, Additions::new())
            .unwrap();
        assert_eq!(outcome.status, StatusCode::Ok);
        assert_eq!(outcome.resulting_state, PotState::Ready);
        assert_eq!(outcome.brew_id, 1);
        assert!(!outcome.milk_pouring);
    }

    #[test]
    fn teapot_refuses_a_coffee_command_regardless_of_additions() {
        let engine = engine();
        let outcome = engine
            .brew(
                "kettle-1",
                Beverage::Coffee,
                Additions::new().with("milk-type", "Cream"),
            )
            .unwrap();
        assert_eq!(outcome.status, StatusCode::ImATeapot);
        assert_eq!(outcome.resulting_state, PotState::Idle);
    }

    #[test]
    fn teapot_steeps_tea() {
        let engine = engine();
        let outcome = engine
            .brew("kettle-1", Beverage::Tea, Additions::new())
            .unwrap();
        assert_eq!(outcome.status, StatusCode::Ok);
        assert_eq!(outcome.message, "Tea is steeping.");
    }

    #[test]
    fn coffee_pot_refuses_a_tea_command() {
        let engine = engine();
        let outcome = engine
            .brew("pot-1", Beverage::Tea, Additions::new())
            .unwrap();
        assert_eq!(outcome.status, StatusCode::ImATeapot);
    }

    #[test]
    fn mismatch_dominates_decaf_refusal() {
        let engine = engine();
        let outcome = engine
            .brew("kettle-1", Beverage::Coffee, Additions::new().with_decaf(true))
            .unwrap();
        assert_eq!(outcome.status, StatusCode::ImATeapot);
    }

    #[test]
    fn decaf_refusal_dominates_depletion() {
        let engine = engine();
        engine.apply_state("pot-2", PotState::Empty).unwrap();
        let outcome = engine
            .brew("pot-2", Beverage::Coffee, Additions::new().with_decaf(true))
            .unwrap();
        assert_eq!(outcome.status, StatusCode::NotAcceptable);
        assert_eq!(outcome.resulting_state, PotState::Empty);
    }

    #[test]
    fn empty_pot_is_unavailable_not_a_teapot() {
        let engine = engine();
        engine.apply_state("pot-2", PotState::Empty).unwrap();
        let outcome = engine
            .brew("pot-2", Beverage::Coffee, Additions::new())
            .unwrap();
        assert_eq!(outcome.status, StatusCode::ServiceUnavailable);
        assert_eq!(outcome.resulting_state, PotState::Empty);
    }

    #[test]
    fn milk_addition_starts_a_pour_and_when_stops_it() {
        let engine = engine();
        let outcome = engine
            .brew(
                "pot-1",
                Beverage::Coffee,
                Additions::new().with("milk-type", "Whole-milk"),
            )
            .unwrap();
        assert!(outcome.milk_pouring);
        assert!(engine.status("pot-1").unwrap().milk_pouring);

        assert_eq!(engine.stop_milk("pot-1").unwrap(), MilkAck::Stopped);
        assert!(!engine.status("pot-1").unwrap().milk_pouring);
        assert_eq!(engine.stop_milk("pot-1").unwrap(), MilkAck::Noop);
    }

    #[test]
    fn stop_milk_on_an_idle_pot_is_a_noop() {
        let engine = engine();
        assert_eq!(engine.stop_milk("pot-1").unwrap(), MilkAck::Noop);
    }

    #[test]
    fn every_attempt_lands_in_history() {
        let engine = engine();
        let _ = engine
            .brew("pot-1", Beverage::Coffee, Additions::new())
            .unwrap();
        let _ = engine
            .brew("pot-1", Beverage::Coffee, Additions::new().with_decaf(true))
            .unwrap();

        let history = engine.history("pot-1").unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].status, StatusCode::Ok);
        assert_eq!(history[1].status, StatusCode::NotAcceptable);
        assert_eq!(history[1].id, 2);
    }

    #[test]
    fn unknown_pots_are_errors_not_outcomes() {
        let engine = engine();
        assert!(matches!(
            engine.brew("samovar-1", Beverage::Tea, Additions::new()),
            Err(RegistryError::PotNotFound(_))
        ));
        assert!(engine.status("samovar-1").is_err());
        assert!(engine.history("samovar-1").is_err());
        assert!(engine.list_additions("samovar-1").is_err());
        assert!(engine.stop_milk("samovar-1").is_err());
    }

    #[test]
    fn list_additions_is_state_independent() {
        let engine = engine();
        let before: Vec<String> = engine
            .list_additions("pot-1")
            .unwrap()
            .keys()
            .map(String::from)
            .collect();
        let _ = engine
            .brew("pot-1", Beverage::Coffee, Additions::new())
            .unwrap();
        engine.apply_state("pot-1", PotState::Empty).unwrap();
        let after: Vec<String> = engine
            .list_additions("pot-1")
            .unwrap()
            .keys()
            .map(String::from)
            .collect();
        assert_eq!(before, after);
    }

    #[test]
    fn registry_view_keeps_seed_order() {
        let engine = engine();
        let ids: Vec<String> = engine
            .registry()
            .into_iter()
            .map(|pot| pot.pot_id)
            .collect();
        assert_eq!(ids, vec!["pot-1", "pot-2", "kettle-1", "kettle-2"]);
    }

    #[test]
    fn concurrent_brews_against_one_pot_all_land() {
        use std::sync::Arc;

        let engine = Arc::new(BrewEngine::default());
        let mut handles = Vec::new();
        for _ in 0..8 {
            let engine = Arc::clone(&engine);
            handles.push(std::thread::spawn(move || {
                for _ in 0..25 {
                    let outcome = engine
                        .brew("pot-1", Beverage::Coffee, Additions::new())
                        .unwrap();
                    assert_eq!(outcome.status, StatusCode::Ok);
                }
            }));
        }
        for handle in handles {
            handle.join().unwrap();
        }

        let history = engine.history("pot-1").unwrap();
        assert_eq!(history.len(), 200);
        let ids: Vec<u64> = history.iter().map(|r| r.id).collect();
        assert_eq!(ids, (1..=200).collect::<Vec<u64>>());
    }
}

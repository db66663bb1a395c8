//! Pot identity, appliance kind, and runtime state.
//!
//! Everything here is pure: state predicates and the legal-transition table
//! have no side effects. State mutation funnels through [`Pot::apply_state`]
//! so every change is checked against the same table.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Appliance kind. Immutable after creation.
///
/// The kind determines which brew commands the appliance accepts: a teapot
/// asked to brew coffee answers 418, per RFC 2324 §2.3.2.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PotKind {
    /// A coffee pot (RFC 2324).
    CoffeePot,
    /// A teapot (RFC 7168). Short and stout.
    Teapot,
}

impl PotKind {
    /// Get the kind's name for display/logging.
    pub fn name(&self) -> &str {
        match self {
            Self::CoffeePot => "coffee-pot",
            Self::Teapot => "teapot",
        }
    }

    /// The beverage family this appliance is able to brew.
    pub fn brews(&self) -> Beverage {
        match self {
            Self::CoffeePot => Beverage::Coffee,
            Self::Teapot => Beverage::Tea,
        }
    }
}

impl fmt::Display for PotKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The beverage family a BREW command asks for.
///
/// The request façade derives this from the URI family (`/coffee/...` vs
/// `/tea/...`); the brew machine matches it against the target pot's kind.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Beverage {
    /// Coffee, the reason this protocol exists.
    Coffee,
    /// Tea, admitted by RFC 7168.
    Tea,
}

impl Beverage {
    /// Get the beverage's name for display/logging.
    pub fn name(&self) -> &str {
        match self {
            Self::Coffee => "coffee",
            Self::Tea => "tea",
        }
    }
}

impl fmt::Display for Beverage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Runtime state of a pot.
///
/// `Brewing` is a transient phase: the protocol treats brewing as
/// synchronous, so the brew machine traverses `Brewing` and settles on
/// `Ready` within a single request. `Empty` is terminal until an
/// administrative reset.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PotState {
    /// Ready to start a new brew.
    Idle,
    /// A brew is in progress. Never observable from outside a request.
    Brewing,
    /// Contains a finished beverage; may be re-queried or re-brewed.
    Ready,
    /// Nothing left to serve. 503 until administratively reset.
    Empty,
}

impl PotState {
    /// Get the state's name for display/logging.
    pub fn name(&self) -> &str {
        match self {
            Self::Idle => "idle",
            Self::Brewing => "brewing",
            Self::Ready => "ready",
            Self::Empty => "empty",
        }
    }

    /// Check if the pot has nothing left to brew.
    pub fn is_depleted(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Check if a transition to `to` is a legal edge.
    ///
    /// The table covers the brew cycle (`idle`/`ready` → `brewing` →
    /// `ready`) plus the administrative edges: depletion from any settled
    /// state, and the `empty` → `idle` reset.
    ///
    /// # Example
    ///
    /// ```rust
    /// use percolate::core::PotState;
    ///
    /// assert!(PotState::Idle.can_transition(PotState::Brewing));
    /// assert!(PotState::Brewing.can_transition(PotState::Ready));
    /// assert!(!PotState::Empty.can_transition(PotState::Ready));
    /// ```
    pub fn can_transition(&self, to: PotState) -> bool {
        matches!(
            (self, to),
            (Self::Idle, PotState::Brewing)
                | (Self::Ready, PotState::Brewing)
                | (Self::Brewing, PotState::Ready)
                | (Self::Idle, PotState::Empty)
                | (Self::Ready, PotState::Empty)
                | (Self::Empty, PotState::Idle)
        )
    }
}

impl fmt::Display for PotState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Attempted state change not present in the legal-transition table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("illegal transition {from} -> {to}")]
pub struct IllegalTransition {
    /// State the pot was in.
    pub from: PotState,
    /// State the change asked for.
    pub to: PotState,
}

/// An appliance resource: fixed identity plus the only mutable runtime
/// attributes (state and the milk-pour annotation).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Pot {
    id: String,
    kind: PotKind,
    varieties: Vec<String>,
    state: PotState,
    milk_pouring: bool,
}

impl Pot {
    /// Create a pot in the `idle` state.
    pub fn new(id: impl Into<String>, kind: PotKind, varieties: Vec<String>) -> Self {
        Self {
            id: id.into(),
            kind,
            varieties,
            state: PotState::Idle,
            milk_pouring: false,
        }
    }

    /// The pot's unique id, e.g. `pot-1` or `kettle-1`.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The appliance kind.
    pub fn kind(&self) -> PotKind {
        self.kind
    }

    /// Supported beverage varieties. Never empty.
    pub fn varieties(&self) -> &[String] {
        &self.varieties
    }

    /// Current state.
    pub fn state(&self) -> PotState {
        self.state
    }

    /// Whether a milk pour is in progress (set by a successful brew with a
    /// `milk-type` addition, cleared by WHEN).
    pub fn is_pouring_milk(&self) -> bool {
        self.milk_pouring
    }

    /// Apply a state change, enforcing the legal-transition table.
    ///
    /// Leaving `ready` clears the milk-pour annotation; a pour cannot
    /// outlive the beverage it garnishes.
    pub fn apply_state(&mut self, to: PotState) -> Result<(), IllegalTransition> {
        if !self.state.can_transition(to) {
            return Err(IllegalTransition {
                from: self.state,
                to,
            });
        }
        if self.state == PotState::Ready {
            self.milk_pouring = false;
        }
        self.state = to;
        Ok(())
    }

    /// Mark an active milk pour. Only meaningful on a `ready` pot.
    pub(crate) fn start_milk_pour(&mut self) {
        self.milk_pouring = true;
    }

    /// Clear an active milk pour, returning whether one was in progress.
    pub(crate) fn stop_milk_pour(&mut self) -> bool {
        std::mem::replace(&mut self.milk_pouring, false)
    }
}

//! Percolate: an HTCPCP/1.0 appliance-control server.
//!
//! Implements the Hyper Text Coffee Pot Control Protocol (RFC 2324,
//! extended to tea by RFC 7168) as a pure, synchronous protocol core
//! wrapped by a thin asynchronous HTTP façade. The core decides; the
//! façade parses and renders.
//!
//! # Core Concepts
//!
//! - **Pot**: an appliance resource (coffee pot or teapot) with a fixed
//!   identity and a small state machine: `idle`, `brewing`, `ready`,
//!   `empty`.
//! - **Additions**: requested brew modifiers, validated against a
//!   configured vocabulary. Decaf is refused on principle.
//! - **Outcome**: every protocol-significant result (200, 406, 418, 503)
//!   is a first-class value, not an error. Only an unknown pot id or a
//!   malformed request is an actual error.
//! - **History**: an append-only audit of every brew attempt, refusals
//!   included.
//!
//! # Example
//!
//! ```rust
//! use percolate::config::BrewConfig;
//! use percolate::core::{Additions, Beverage, PotState};
//! use percolate::engine::BrewEngine;
//!
//! let engine = BrewEngine::new(BrewConfig::default());
//!
//! let additions = Additions::new()
//!     .with("milk-type", "Whole-milk")
//!     .with("alcohol-type", "Whisky");
//! let outcome = engine.brew("pot-1", Beverage::Coffee, additions).unwrap();
//!
//! assert_eq!(u16::from(outcome.status), 200);
//! assert_eq!(outcome.resulting_state, PotState::Ready);
//! assert_eq!(engine.status("pot-1").unwrap().state, PotState::Ready);
//! ```

pub mod config;
pub mod core;
pub mod engine;
pub mod history;
pub mod registry;
pub mod server;
pub mod validate;

// Re-export commonly used types
pub use config::BrewConfig;
pub use core::{Additions, Beverage, BrewRecord, Pot, PotKind, PotState, StatusCode};
pub use engine::{BrewEngine, BrewOutcome};
pub use registry::RegistryError;

//! Oracle-gated execution module.
//!
//! A proposal (an id plus an ordered batch of module transactions) is turned
//! into an oracle question. Once the oracle answers yes and the cooldown has
//! passed, the transactions run one by one on the controlled account, each
//! exactly once and strictly in order.
//!
//! Three variants share the same engine (see [`ModuleVariant`]):
//! - **plain**: registry keyed by question id, cooldown from finalization.
//! - **announced**: like plain, but execution waits for a readiness
//!   announcement, which also starts the cooldown.
//! - **bonded**: registry keyed by question hash, question ids commit to a
//!   minimum bond, and the bond on the answer is checked.

pub mod announcement;
pub mod config;
pub mod engine;
pub mod error;
pub mod event;
pub mod gate;
pub mod registry;
pub mod sequencer;
pub mod snapshot;
pub mod variant;

pub use config::{ModuleConfig, DEFAULT_TEMPLATE, MIN_EXPIRATION_WINDOW_SECS};
pub use engine::{OracleModule, ProposalRef};
pub use error::{ConfigError, ErrorKind, ModuleError};
pub use event::ModuleEvent;
pub use registry::{Binding, BoundQuestion, ProposalRegistry, RegistryKey};
pub use sequencer::ExecutedTransactions;
pub use snapshot::ModuleSnapshot;
pub use variant::{CooldownAnchor, ModuleVariant, QuestionIdScheme, RegistryIndex, VariantKind};

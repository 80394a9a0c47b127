//! External collaborators of the module.
//!
//! The module never talks to a chain directly. Everything it needs from the
//! outside world goes through two capability traits:
//! - [`Oracle`] opens questions and reports finalized answers, bonds and
//!   finalization times.
//! - [`Executor`] is the controlled account (the avatar) that performs the
//!   approved calls.
//!
//! Both are synchronous. A failure aborts the calling operation before the
//! module commits any state.

pub mod error;
pub mod executor;
pub mod oracle;

pub use error::{ExecutorError, OracleError};
pub use executor::Executor;
pub use oracle::{Oracle, QuestionRequest};

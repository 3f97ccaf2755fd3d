//! Business logic services.
//!
//! [`PublishService`] is the entry point for every ledger operation; the CLI
//! builds one from configuration and calls it once per command.

mod clock;
mod publish;

pub use clock::{Clock, FixedClock, SystemClock};
pub use publish::{LedgerStatus, MemoSelector, MoveOutcome, MoveRequest, PublishService};

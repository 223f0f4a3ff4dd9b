//! FleetLog domain core.
//!
//! Pure, synchronous state model for the log-collection pipeline: the
//! instance registry (per-log-type collection toggles and usage stats),
//! the issue ledger (severity taxonomy and resolution lifecycle), and the
//! job progress tracker. No I/O and no locking live here; the hosting
//! layer (`fleetlog-api`) decides how the aggregates are shared.

pub mod error;
pub mod format;
pub mod jobs;
pub mod ledger;
pub mod registry;
pub mod settings;
pub mod types;

pub use error::{CoreError, CoreResult};

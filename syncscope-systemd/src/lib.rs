//! systemd adapters for syncscope
//!
//! [`JournalctlReader`] implements [`syncscope_core::JournalSource`] and
//! [`SystemctlProbe`] implements [`syncscope_core::ServiceProbe`]. Both shell
//! out through `tokio::process` with every value passed as its own argument,
//! a cap on captured output and a per-call deadline.

mod command;
pub mod journal;
pub mod systemctl;

pub use command::{OutputLimits, DEFAULT_MAX_OUTPUT_BYTES, DEFAULT_TIMEOUT};
pub use journal::JournalctlReader;
pub use systemctl::SystemctlProbe;

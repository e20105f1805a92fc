//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! access log middleware / handlers / store
//!     → logging.rs (structured log events)
//!     → metrics.rs (counters, histograms)
//! ```

pub mod logging;
pub mod metrics;

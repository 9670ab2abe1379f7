//! Data model and per-pass processing.
//!
//! ## Submodules
//!
//! - [`model`]: [`Host`], [`Service`], [`Health`] and the indexed [`Snapshot`]
//! - [`filter`]: substring filters and detail-line visibility
//! - [`totals`]: per-code totals and priority resolution
//! - [`duration`]: interval parsing and relative-time formatting
//!
//! ## Data Flow
//!
//! ```text
//! RawStatus (status.dat / JSON)
//!        │
//!        ▼
//! Snapshot::from_raw()
//!        │
//!        ├──▶ filter::included()   (drops services, totals included)
//!        │
//!        └──▶ Aggregator           (host/service totals, problem count)
//! ```

pub mod duration;
pub mod filter;
pub mod model;
pub mod totals;

pub use filter::FilterSet;
pub use model::{Health, Host, Service, Snapshot};
pub use totals::{resolve, Aggregator, Counts, Totals};

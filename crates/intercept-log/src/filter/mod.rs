//! Call filtering.
//!
//! A call that has a directive is still subject to the process-wide
//! [`LogFilterConfig`]: a master switch, ignore lists, a minimum level and a
//! collaborator that recognises framework base operations.

mod base_methods;
mod config;
mod engine;

pub use base_methods::{BaseMethodLookup, BaseMethodSet, NoBaseMethods};
pub use config::{FilterOptions, LogFilterConfig};
pub use engine::{FilterDecision, FilterEngine, RejectReason};

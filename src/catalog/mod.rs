//! Catalog domain: package records, the filter and sort stages, summary
//! statistics and the display policies derived from a record.
pub mod domain;
pub mod policies;
pub mod services;

//! Presentation-facing aggregations: per-direction breakdowns, counterpart
//! institutions, and the institution-level network overview.

pub mod institution;
pub mod partners;
pub mod summary;

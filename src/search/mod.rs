//! Filtering for the catalog.
//!
//! A filter screen builds [`filter::FilterCondition`]s, keeps them in a
//! [`controller::FilterController`], and runs them over candidate lists with
//! the [`engine`]. All conditions must match for a destination to stay.
//!
//! When the catalog isn't in memory, [`query`] turns the same conditions into
//! SQL.

pub mod controller;
pub mod engine;
pub mod filter;
pub mod query;
pub mod session;

pub use controller::FilterController;
pub use engine::FilteredView;
pub use filter::{ConditionId, FilterCondition, FilterField, FilterOperator, FilterState};
pub use session::FilterSession;

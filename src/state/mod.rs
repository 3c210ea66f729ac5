//! State module for tracking crawl progress
//!
//! # Components
//!
//! - `VisitState`: Tracks the state of individual identifiers (unseen, claimed, fetched, failed)

mod visit_state;

pub use visit_state::VisitState;

//! Standings, fixture ordering and dashboard statistics.
//!
//! Every function here is pure: it borrows an already fetched snapshot and
//! returns new values without touching the input or any shared state.

mod fixture;
mod normalize;
mod rank;
mod stats;

pub use fixture::*;
pub use normalize::*;
pub use rank::*;
pub use stats::*;

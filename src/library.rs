//! Library persistence: moving fetched tracks out of their temporary
//! directories into the configured destination.

mod store;

pub use store::*;

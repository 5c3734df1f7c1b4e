//! Session model: the search-select-fetch-persist state machine.
//!
//! The `Session` value is owned by the runtime event loop and only mutated
//! through its transition methods, so every reachable state is one the
//! transition table allows.

mod model;

pub use model::*;

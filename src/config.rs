//! Configuration loader and schema types.
//!
//! Settings come from a TOML file layered under `TUNEGRAB__`-prefixed
//! environment variables, with struct defaults underneath. Only the search
//! API key has no usable default.

mod load;
mod schema;

pub use schema::*;

#[cfg(test)]
mod tests;

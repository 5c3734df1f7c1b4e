//! Keyword search against the YouTube Data API.
//!
//! `SearchClient` wraps one blocking HTTP round-trip per query and normalizes
//! the response into `SearchResult` values. Pasted watch URLs bypass the API
//! entirely via `parse_video_ref`.

mod client;

pub use client::*;

#[cfg(test)]
mod tests;

//! Single-track audio playback on a dedicated thread.
//!
//! Commands go to the audio thread over an mpsc channel; playback state
//! comes back through a shared [`PlaybackHandle`] the UI polls each frame.

mod player;
mod sink;
mod thread;
mod types;

pub use player::*;
pub use types::*;

#[cfg(test)]
mod tests;

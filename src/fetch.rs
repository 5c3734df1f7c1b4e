//! Download + transcode of one video's audio track via the external
//! `yt-dlp` tool.
//!
//! Each fetch gets a fresh temporary working directory, so successive fetches
//! can never trample each other's files. The produced file is located by the
//! target extension; anything other than exactly one match is a failure.

mod convert;

pub use convert::*;

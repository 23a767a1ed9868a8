//! speed-reader: paces text one word at a time with the optimal recognition
//! point (ORP) pinned to a fixed column.
//!
//! Text is prepared by an optional enrichment service ([`remote`]) with
//! local whitespace segmentation as the fallback, then played back by a
//! timer-driven state machine ([`playback`]).  [`engine::ReaderEngine`]
//! ties the two together.

pub mod config;
pub mod engine;
pub mod playback;
pub mod remote;
pub mod session;
pub mod terminal;
pub mod text;

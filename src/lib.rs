//! # RustMorseBeacon
//!
//! Morse code beacon engine with double-buffered message playback.
//!
//! ## Architecture
//!
//! Text is encoded once into a packed dot-duration bitmap; playback
//! polls [`MorsePlayer::update`] with elapsed-time deltas and drives a
//! boolean key line through a [`KeySink`]:
//! - The encoder writes only the staged buffer, playback reads only
//!   the live one; the roles swap at message end, the bytes never move
//! - No allocation, no threads, no blocking in the tick path
//!
//! Hardware stays at the edges: the core is `no_std` and fully
//! testable on host.

#![cfg_attr(not(test), no_std)]

pub mod buffer;
pub mod config;
pub mod encoder;
pub mod error;
pub mod logging;
pub mod player;

pub use buffer::MorseBuffer;
pub use config::{PlayerConfig, DEFAULT_DOT_MS};
pub use encoder::{pattern, Element};
pub use error::EncodeError;
pub use logging::BeaconLog;
pub use player::{KeySink, MorsePlayer};

//! typedtext — a line-by-line "typed terminal" text revealer.
//!
//! The pipeline is Script → [`engine::Revealer`] → [`surface::TextSurface`],
//! with [`playback::start`] doing the driving and a [`timer::Timer`] pacing
//! the ticks. [`engine::Engine::compile`] runs the same revealer without
//! waiting and yields a serializable [`types::Timeline`].

pub mod config;
pub mod engine;
pub mod error;
mod menubar;
pub mod playback;
pub mod player;
pub mod surface;
pub mod timer;
pub mod types;

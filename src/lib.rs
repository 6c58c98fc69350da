//! Galactic Defense: a frame-driven 2D arcade shooter core.
//!
//! The library owns the simulation and screen flow. Drawing, sound output,
//! and input polling are left to the host, which talks to the core through
//! [`entities::Drawable`], [`audio::AudioSink`] and [`input`].

pub mod audio;
pub mod compute;
pub mod config;
pub mod entities;
pub mod error;
pub mod geometry;
pub mod input;
pub mod persistence;
pub mod state;

pub use error::{GameError, Result};

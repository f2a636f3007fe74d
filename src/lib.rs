//! Core rules for a terminal Space Invaders clone.
//!
//! Everything in the library is pure simulation: the binary supplies a
//! renderer, an audio sink and an input snapshot each frame.

pub mod collaborators;
pub mod collision;
pub mod config;
pub mod entities;
pub mod formation;
pub mod geometry;
pub mod score;
pub mod session;
pub mod spawner;

//! Traffic Watch Library
//!
//! A cosmetic traffic dashboard: an animated crossroads scene next to a
//! self-expiring incident list. Runs headless or with a Bevy UI.

pub mod simulation;

#[cfg(feature = "ui")]
pub mod ui;

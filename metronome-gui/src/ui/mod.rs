//! # UI Module
//!
//! This module contains all UI components for the Metronome application.

pub mod main_display;
pub mod measure_indicator;

//! Unit tests for the Eco Advisor client
//!
//! This module contains cross-module tests; single-module tests live next to
//! the code they exercise.

pub mod config_tests;
pub mod controller_tests;

//! Service client implementations
//!
//! This module contains the client for the external recommendation service.

pub mod recommender;
mod common;

pub use common::UserAgent;

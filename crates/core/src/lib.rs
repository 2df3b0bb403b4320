//! Curio Core - Shared types library.
//!
//! This crate provides common types used across the Curio components:
//! - `api` - The JSON HTTP API service
//! - `integration-tests` - End-to-end tests against the assembled router
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no store access, no HTTP.
//! The caller identity is an email address everywhere in Curio (there is no
//! separate numeric user id), so [`Email`] is the identity value threaded
//! through every layer rather than a raw string.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;

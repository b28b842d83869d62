//! Artiva Core - Shared types library.
//!
//! This crate provides the record types used across the Artiva components:
//! - `server` - The catalog HTTP backend
//! - `integration-tests` - End-to-end API tests
//!
//! # Architecture
//!
//! The core crate contains only types and the record merge rules - no I/O,
//! no persistence, no HTTP. This keeps it lightweight and allows it to be
//! used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, localized text, slugs, and the
//!   Product/Category/User record types with their draft and patch shapes

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;

//! # teardown-common
//!
//! Shared types, error definitions, configuration models, and constants
//! used across the teardown workspace.
//!
//! This crate is the leaf of the dependency graph. It knows nothing about
//! processes or containers, only about what a stack is made of and how it
//! is configured.

#![cfg_attr(test, allow(clippy::expect_used, clippy::unwrap_used))]

pub mod config;
pub mod constants;
pub mod env_file;
pub mod error;
pub mod types;

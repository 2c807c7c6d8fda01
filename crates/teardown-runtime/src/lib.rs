//! Best-effort teardown of a named set of stack resources.
//!
//! The [`sequencer`] walks a fixed [`plan`] and hands each step to one of
//! two collaborators: a [`backend::ContainerRuntime`] for containers and a
//! [`jobs::JobStopper`] for background jobs. No step can stop the run.

#![cfg_attr(test, allow(clippy::expect_used, clippy::unwrap_used, clippy::panic))]

pub mod backend;
pub mod banner;
pub mod jobs;
pub mod plan;
pub mod report;
pub mod sequencer;

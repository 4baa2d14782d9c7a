//! Centralized constants for the k3rs-upgrade project.
//!
//! All project-wide constant values live here.
//! Change a value in one place and it applies everywhere.

pub mod iam;
pub mod state;

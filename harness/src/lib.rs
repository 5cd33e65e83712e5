//! Thicket Harness: world-level orchestration for the search engine.
//!
//! The harness runs a world through one traversal and driver chosen by a
//! [`SearchPolicyV1`](thicket_search::SearchPolicyV1) and records the run as
//! a deterministic, digestible [`SearchReportV1`](report::SearchReportV1).
//!
//! The harness does NOT implement search logic; it delegates to
//! `thicket_search`. Worlds provide domain functors only; the harness owns
//! metering, rendering and digests.

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod canon;
pub mod contract;
pub mod digest;
pub mod report;
pub mod runner;
pub mod worlds;

pub use contract::{SearchWorldV1, WorldError};
pub use report::{SearchReportV1, TerminationReasonV1};
pub use runner::{run_search, RunError};

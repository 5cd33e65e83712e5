//! Shared fixtures and oracles for the workspace acceptance tests.

pub mod fixtures;
pub mod generated;
pub mod oracle;

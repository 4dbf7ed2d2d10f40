//! CLI command implementations

pub mod list;
pub mod prove_demo;
pub mod run;

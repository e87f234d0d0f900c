//! Command modules for the vext CLI.

pub mod common;
pub mod traits;

pub mod build;
pub mod check;

#[allow(unused_imports)]
pub use build::{run_build, BuildArgs};
#[allow(unused_imports)]
pub use check::{run_check, CheckArgs};

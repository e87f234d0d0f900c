//! Command trait shared by the vext subcommands.

#![allow(dead_code)]

use crate::error::Result;

pub trait Command {
    type Args;
    type Output;

    fn new(args: Self::Args) -> Self;
    fn execute(&self) -> Result<Self::Output>;
    fn name() -> &'static str;
}

pub trait CommandDescription {
    fn description() -> &'static str;
}

//! Settlement optimization: LP formulation, solve, and result reporting.

pub mod instructions;
pub mod settlement;

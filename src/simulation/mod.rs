//! Stress-testing utilities.

pub mod random_debts;

//! Foundational types: participants, debt records, and the dense matrices
//! the settlement pipeline operates on.

pub mod balance;
pub mod debt_matrix;
pub mod debt_record;
pub mod participant;
pub mod payment_matrix;

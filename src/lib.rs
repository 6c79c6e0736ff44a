//! # settle-engine
//!
//! Minimal-transfer debt settlement engine driven by linear programming.
//!
//! Given a dense N×N matrix of pairwise debts, this engine computes a
//! sparse set of settling payments that nets out every participant's
//! balance while minimizing the total volume of money that changes hands.
//!
//! ## Pipeline
//!
//! - **core** — Foundational types: participants, debt records, debt and
//!   payment matrices, net positions
//! - **graph** — Reduction of the dense matrix to the sparse debt edge set
//! - **optimization** — The LP formulation, solve, and payment instructions
//! - **simulation** — Random debt network generation for stress testing

pub mod core;
pub mod graph;
pub mod optimization;
pub mod simulation;

/// Convenience re-exports for common usage.
pub mod prelude {
    pub use crate::core::balance::NetPositions;
    pub use crate::core::debt_matrix::{DebtMatrix, MatrixError};
    pub use crate::core::debt_record::{DebtLog, DebtRecord};
    pub use crate::core::participant::{Participant, Roster};
    pub use crate::core::payment_matrix::PaymentMatrix;
    pub use crate::graph::debt_edges::{extract_edges, DebtEdge};
    pub use crate::optimization::instructions::{payment_instructions, PaymentInstruction};
    pub use crate::optimization::settlement::{SettlementEngine, SettlementResult, SolveError};
}

//! Graph reduction: deriving the sparse debt edge set from the dense matrix.

pub mod debt_edges;

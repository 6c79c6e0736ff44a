use crate::core::balance::NetPositions;
use crate::core::debt_matrix::DebtMatrix;
use crate::core::payment_matrix::PaymentMatrix;
use crate::graph::debt_edges::{extract_edges, DebtEdge};
use good_lp::{
    default_solver, variable, variables, Expression, ResolutionError, Solution, SolverModel,
    Variable,
};
use log::{debug, info};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Solved payment values closer to zero than this are numerical noise and
/// materialize as exactly zero.
const VALUE_TOLERANCE: f64 = 1e-6;

/// Decimal places kept when converting solved values back to amounts.
const AMOUNT_SCALE: u32 = 6;

/// Errors arising from the settlement solve.
///
/// Every failure is terminal for the invocation; the engine never retries.
/// Infeasibility and unboundedness are unreachable for a well-formed debt
/// matrix (paying back the debts exactly is always feasible, and the
/// objective is bounded below by zero), so either status signals malformed
/// input such as non-finite amounts.
#[derive(Debug, Error)]
pub enum SolveError {
    #[error("no optimal solution: the settlement program is infeasible")]
    Infeasible,
    #[error("no optimal solution: the settlement program is unbounded")]
    Unbounded,
    #[error("the solver backend is unavailable or failed: {0}")]
    SolverUnavailable(String),
}

impl From<ResolutionError> for SolveError {
    fn from(error: ResolutionError) -> Self {
        match error {
            ResolutionError::Infeasible => SolveError::Infeasible,
            ResolutionError::Unbounded => SolveError::Unbounded,
            ResolutionError::Other(msg) => SolveError::SolverUnavailable(msg.to_string()),
            ResolutionError::Str(msg) => SolveError::SolverUnavailable(msg),
        }
    }
}

/// Result of a settlement computation.
///
/// Holds the solved payment matrix together with the gross debt total and
/// the net positions the input debts induced, so validity can be checked
/// without re-reading the input.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SettlementResult {
    /// The solved payments: entry (i, j) = amount j should pay i.
    payments: PaymentMatrix,
    /// Gross total of the input debts.
    gross_debt: Decimal,
    /// Net positions induced by the input debts.
    positions: NetPositions,
}

impl SettlementResult {
    fn new(payments: PaymentMatrix, debts: &DebtMatrix) -> Self {
        Self {
            payments,
            gross_debt: debts.gross_total(),
            positions: NetPositions::from_debts(debts),
        }
    }

    /// The solved payment matrix.
    pub fn payments(&self) -> &PaymentMatrix {
        &self.payments
    }

    /// Gross total of the input debts.
    pub fn gross_debt(&self) -> Decimal {
        self.gross_debt
    }

    /// The objective value: total volume of settling payments.
    ///
    /// Never exceeds [`gross_debt`](Self::gross_debt), since paying back
    /// the original debts one-for-one is always feasible.
    pub fn total_settled(&self) -> Decimal {
        self.payments.total_settled()
    }

    /// Payment volume saved relative to paying every debt back directly.
    pub fn savings(&self) -> Decimal {
        self.gross_debt - self.total_settled()
    }

    /// Savings as a percentage of the gross debt total.
    pub fn savings_percent(&self) -> f64 {
        if self.gross_debt == Decimal::ZERO {
            return 0.0;
        }
        let pct = self.savings() * Decimal::from(100) / self.gross_debt;
        pct.to_string().parse::<f64>().unwrap_or(0.0)
    }

    /// Number of non-zero transfers in the solution.
    pub fn transfer_count(&self) -> usize {
        self.payments.transfer_count()
    }

    /// Net positions induced by the input debts.
    pub fn positions(&self) -> &NetPositions {
        &self.positions
    }

    /// Verify the balance-conservation law: the payments must induce the
    /// same net position for every participant as the original debts,
    /// within a tolerance scaled to the gross total.
    pub fn is_valid(&self) -> bool {
        let tolerance = std::cmp::max(self.gross_debt, Decimal::ONE) * dec!(0.000001);
        NetPositions::from_payments(&self.payments).matches(&self.positions, tolerance)
    }
}

impl std::fmt::Display for SettlementResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "=== Settlement Result ===")?;
        writeln!(f, "Gross Debt:     {}", self.gross_debt)?;
        writeln!(f, "Total Settled:  {}", self.total_settled())?;
        writeln!(f, "Savings:        {}", self.savings())?;
        writeln!(f, "Savings %:      {:.1}%", self.savings_percent())?;
        writeln!(f, "Transfers:      {}", self.transfer_count())?;
        writeln!(f, "Valid:          {}", self.is_valid())?;
        Ok(())
    }
}

/// The core settlement engine.
///
/// Formulates the minimal-payment settlement as a linear program and
/// solves it with the compiled-in `good_lp` backend.
pub struct SettlementEngine;

impl SettlementEngine {
    /// Compute the minimal set of settling payments for a debt matrix.
    ///
    /// # Formulation
    ///
    /// One non-negative continuous variable per debt edge (i, j), read as
    /// "amount j pays i". One equality constraint per participant k:
    ///
    /// ```text
    /// (sum of pay vars where k pays) - (sum of pay vars paid to k)
    ///     == (total k owes) - (total owed to k)
    /// ```
    ///
    /// The objective minimizes the sum of all payment variables. Total
    /// volume is a proxy for transfer count: the LP relaxation tends to
    /// produce sparse solutions without guaranteeing minimum cardinality
    /// (that would be a mixed-integer program).
    ///
    /// The system has N equations and one unknown per edge; whenever there
    /// are more edges than participants it is under-determined, which is
    /// exactly what lets the objective pick a sparser payment pattern than
    /// the debts themselves.
    pub fn minimize_payments(debts: &DebtMatrix) -> Result<SettlementResult, SolveError> {
        let n = debts.participant_count();
        let edges = extract_edges(debts);
        info!(
            "settling {} participants over {} debt edges",
            n,
            edges.len()
        );

        // No recorded debt: the trivial all-zero settlement, no solve.
        if edges.is_empty() {
            return Ok(SettlementResult::new(PaymentMatrix::zero(n), debts));
        }

        let mut vars = variables!();
        let pay_vars: Vec<Variable> = edges
            .iter()
            .map(|edge| {
                vars.add(
                    variable()
                        .min(0.0)
                        .name(format!("pay_{}_{}", edge.creditor, edge.debtor)),
                )
            })
            .collect();

        let total_payment: Expression = pay_vars.iter().copied().sum();
        let mut model = vars.minimise(total_payment).using(default_solver);

        for k in 0..n {
            let outflow: Expression = payer_vars(&edges, &pay_vars, k).sum();
            let inflow: Expression = payee_vars(&edges, &pay_vars, k).sum();
            let net = to_f64(debts.owed_by(k) - debts.owed_to(k));
            model = model.with((outflow - inflow).eq(Expression::from_other_affine(net)));
        }
        debug!(
            "settlement program: {} variables, {} balance constraints",
            edges.len(),
            n
        );

        let solution = model.solve()?;

        let mut payments = PaymentMatrix::zero(n);
        for (edge, var) in edges.iter().zip(&pay_vars) {
            let raw = solution.value(*var);
            payments.set(edge.creditor, edge.debtor, clamp_amount(raw));
        }

        let result = SettlementResult::new(payments, debts);
        info!(
            "solver returned OPTIMAL, objective = {}",
            result.total_settled()
        );
        Ok(result)
    }
}

/// Variables on edges where participant `k` is the payer (the debtor side).
fn payer_vars<'a>(
    edges: &'a [DebtEdge],
    pay_vars: &'a [Variable],
    k: usize,
) -> impl Iterator<Item = Variable> + 'a {
    edges
        .iter()
        .zip(pay_vars)
        .filter(move |(edge, _)| edge.debtor == k)
        .map(|(_, var)| *var)
}

/// Variables on edges where participant `k` is the payee (the creditor side).
fn payee_vars<'a>(
    edges: &'a [DebtEdge],
    pay_vars: &'a [Variable],
    k: usize,
) -> impl Iterator<Item = Variable> + 'a {
    edges
        .iter()
        .zip(pay_vars)
        .filter(move |(edge, _)| edge.creditor == k)
        .map(|(_, var)| *var)
}

fn to_f64(amount: Decimal) -> f64 {
    amount.to_f64().unwrap_or(0.0)
}

/// Convert a solved variable value to an amount, treating negative-but-
/// near-zero numerical noise as exactly zero. The absolute value mirrors
/// the per-entry clamping of the materialization contract.
fn clamp_amount(raw: f64) -> Decimal {
    if raw.abs() < VALUE_TOLERANCE {
        Decimal::ZERO
    } else {
        Decimal::from_f64_retain(raw.abs())
            .unwrap_or(Decimal::ZERO)
            .round_dp(AMOUNT_SCALE)
    }
}

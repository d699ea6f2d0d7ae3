//! View projections derived from ledger snapshots.
//!
//! # Responsibility
//! - Build chart-ready parallel series (pie and bar share one shape).
//! - Compute display totals.
//!
//! # Invariants
//! - `labels.len() == amounts.len() == ledger.expenses.len()`.
//! - Empty ledgers produce empty series; no placeholder data is invented.

use crate::model::ledger::Ledger;
use log::warn;
use rust_decimal::Decimal;

/// Parallel label/amount series in expense insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Distribution {
    pub labels: Vec<String>,
    pub amounts: Vec<Decimal>,
}

impl Distribution {
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Renderers show a "no data" message instead of an empty chart.
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// Aggregate totals for the header/summary view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerSummary {
    pub income: Decimal,
    pub total_expenses: Decimal,
    /// `income - total_expenses`.
    pub balance: Decimal,
    pub expense_count: usize,
}

/// Projects expense labels and amounts for distribution charts.
pub fn project_distribution(ledger: &Ledger) -> Distribution {
    let (labels, amounts) = ledger
        .expenses
        .iter()
        .map(|expense| (expense.description.clone(), expense.amount))
        .unzip();
    Distribution { labels, amounts }
}

/// Computes income, expense total and remaining balance.
///
/// Returns `None` when the total or the balance overflows `Decimal`.
pub fn summarize(ledger: &Ledger) -> Option<LedgerSummary> {
    let totals = ledger
        .expenses
        .iter()
        .try_fold(Decimal::ZERO, |total, expense| total.checked_add(expense.amount))
        .and_then(|total| Some((total, ledger.income.checked_sub(total)?)));

    let Some((total_expenses, balance)) = totals else {
        warn!(
            "event=ledger_summary module=projector status=skip reason=overflow expense_count={}",
            ledger.expenses.len()
        );
        return None;
    };

    Some(LedgerSummary {
        income: ledger.income,
        total_expenses,
        balance,
        expense_count: ledger.expenses.len(),
    })
}

//! Ledger store: sole owner and mutator of ledger state.
//!
//! # Responsibility
//! - Hydrate from the repository once, falling back to defaults per field.
//! - Apply income/expense mutations and keep expense ids unique.
//! - Re-persist the whole ledger and notify observers after each mutation.
//!
//! # Invariants
//! - Operations never return errors; rejected input changes nothing, writes
//!   nothing and notifies nobody.
//! - Expense ids are strictly increasing within a store and never reused.
//! - Observers run synchronously, in subscription order, after persistence.

use crate::config::LedgerConfig;
use crate::model::amount::parse_amount;
use crate::model::expense::{Expense, ExpenseId};
use crate::model::ledger::Ledger;
use crate::repo::ledger_repo::LedgerRepository;
use crate::service::id_generator::ExpenseIdGenerator;
use log::{debug, error, info, warn};
use rust_decimal::Decimal;

/// Handle returned by `subscribe`, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Observer = Box<dyn FnMut(&Ledger)>;

/// Single owned ledger instance with explicit lifecycle.
pub struct LedgerStore<R: LedgerRepository> {
    repo: R,
    ledger: Ledger,
    default_income: Decimal,
    ids: ExpenseIdGenerator,
    observers: Vec<(SubscriptionId, Observer)>,
    next_subscription: u64,
}

impl<R: LedgerRepository> LedgerStore<R> {
    /// Loads persisted state, or defaults when absent or unreadable.
    ///
    /// Never fails: repository errors are logged and treated as "nothing
    /// stored".
    pub fn initialize(repo: R, config: &LedgerConfig) -> Self {
        let default_income = config.default_income;
        let stored = match repo.load() {
            Ok(stored) => stored,
            Err(err) => {
                error!(
                    "event=ledger_init module=ledger status=error error_code=load_failed error={}",
                    err
                );
                Default::default()
            }
        };

        let income_restored = stored.income.is_some();
        let ledger = stored.into_ledger(default_income);
        info!(
            "event=ledger_init module=ledger status=ok income_restored={} expense_count={}",
            income_restored,
            ledger.expenses.len()
        );

        Self {
            ids: ExpenseIdGenerator::new(ledger.max_id()),
            repo,
            ledger,
            default_income,
            observers: Vec::new(),
            next_subscription: 0,
        }
    }

    /// Replaces the id generator, e.g. with a fixed clock in tests.
    pub fn with_id_generator(mut self, ids: ExpenseIdGenerator) -> Self {
        self.ids = ids;
        self
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// Owned point-in-time copy.
    pub fn snapshot(&self) -> Ledger {
        self.ledger.clone()
    }

    pub fn income(&self) -> Decimal {
        self.ledger.income
    }

    pub fn expenses(&self) -> &[Expense] {
        &self.ledger.expenses
    }

    pub fn expense(&self, id: ExpenseId) -> Option<&Expense> {
        self.ledger.find(id)
    }

    /// Adds `delta` to income.
    ///
    /// Returns `false` (no change) when `delta` is not numeric or the sum
    /// overflows.
    pub fn add_income(&mut self, delta: &str) -> bool {
        let Some(delta) = parse_amount(delta) else {
            debug!("event=income_add module=ledger status=skip reason=not_numeric");
            return false;
        };
        let Some(income) = self.ledger.income.checked_add(delta) else {
            warn!("event=income_add module=ledger status=skip reason=overflow");
            return false;
        };

        self.ledger.income = income;
        self.commit("income_add");
        true
    }

    /// Appends a new expense and returns its id.
    ///
    /// Returns `None` when `description` is blank or `amount` is not numeric.
    pub fn add_expense(&mut self, description: &str, amount: &str) -> Option<ExpenseId> {
        let Some((description, amount)) = accept_expense_input(description, amount) else {
            debug!("event=expense_add module=ledger status=skip reason=invalid_input");
            return None;
        };

        let id = self.ids.next_id();
        self.ledger
            .expenses
            .push(Expense::new(id, description, amount));
        self.commit("expense_add");
        Some(id)
    }

    /// Replaces description and amount of expense `id` in place.
    ///
    /// Returns `false` when `id` is unknown or the new values are invalid.
    pub fn edit_expense(&mut self, id: ExpenseId, description: &str, amount: &str) -> bool {
        let Some(position) = self.ledger.position(id) else {
            debug!("event=expense_edit module=ledger status=skip reason=not_found id={id}");
            return false;
        };
        let Some((description, amount)) = accept_expense_input(description, amount) else {
            debug!("event=expense_edit module=ledger status=skip reason=invalid_input id={id}");
            return false;
        };

        let expense = &mut self.ledger.expenses[position];
        expense.description = description;
        expense.amount = amount;
        self.commit("expense_edit");
        true
    }

    /// Removes expense `id`; deleting an unknown id is a no-op.
    pub fn delete_expense(&mut self, id: ExpenseId) -> bool {
        let Some(position) = self.ledger.position(id) else {
            debug!("event=expense_delete module=ledger status=skip reason=not_found id={id}");
            return false;
        };

        self.ledger.expenses.remove(position);
        self.commit("expense_delete");
        true
    }

    /// Restores default income and an empty expense list, wiping stored keys.
    ///
    /// The id generator keeps its position, so ids handed out before the
    /// reset are not reissued in this session.
    pub fn reset(&mut self) {
        self.ledger = Ledger::new(self.default_income, Vec::new());
        if let Err(err) = self.repo.clear() {
            error!(
                "event=ledger_reset module=ledger status=error error_code=clear_failed error={}",
                err
            );
        }
        info!("event=ledger_reset module=ledger status=ok");
        self.notify();
    }

    /// Registers `observer` to receive the ledger after every mutation.
    pub fn subscribe(&mut self, observer: impl FnMut(&Ledger) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    /// Removes a subscription; returns whether it was registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(existing, _)| *existing != id);
        self.observers.len() != before
    }

    fn commit(&mut self, event: &str) {
        match self.repo.save(&self.ledger) {
            Ok(()) => info!(
                "event={} module=ledger status=ok expense_count={}",
                event,
                self.ledger.expenses.len()
            ),
            // In-memory state stays authoritative; the next successful save
            // rewrites both keys in full.
            Err(err) => error!(
                "event={} module=ledger status=error error_code=persist_failed error={}",
                event, err
            ),
        }
        self.notify();
    }

    fn notify(&mut self) {
        let ledger = &self.ledger;
        for (_, observer) in &mut self.observers {
            observer(ledger);
        }
    }
}

fn accept_expense_input(description: &str, amount: &str) -> Option<(String, Decimal)> {
    if description.trim().is_empty() {
        return None;
    }
    let amount = parse_amount(amount)?;
    Some((description.to_string(), amount))
}

#[cfg(test)]
mod tests {
    use super::accept_expense_input;
    use rust_decimal::Decimal;

    #[test]
    fn expense_input_requires_description_and_numeric_amount() {
        assert_eq!(
            accept_expense_input("Coffee", "3.50"),
            Some(("Coffee".to_string(), Decimal::new(350, 2)))
        );
        assert_eq!(accept_expense_input("", "3.50"), None);
        assert_eq!(accept_expense_input("Coffee", "abc"), None);
    }
}

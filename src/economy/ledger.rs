use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::LedgerError;
use crate::shared::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Credit,
    Debit,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub amount: Coins,
    pub direction: Direction,
    pub reason: String,
    /// Unix seconds.
    pub timestamp: u64,
}

impl Transaction {
    pub fn signed_amount(&self) -> i64 {
        let amount = i64::try_from(self.amount).unwrap_or(i64::MAX);
        match self.direction {
            Direction::Credit => amount,
            Direction::Debit => -amount,
        }
    }
}

/// Currency balance plus an append-only transaction log.
///
/// `debit` is the only path that lowers the balance and it refuses to go
/// below zero. `reset` is reinitialisation, not a transaction.
#[derive(Resource, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ledger {
    balance: Coins,
    transactions: Vec<Transaction>,
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new(STARTING_BALANCE)
    }
}

impl Ledger {
    pub fn new(initial_balance: Coins) -> Self {
        Self {
            balance: initial_balance,
            transactions: Vec::new(),
        }
    }

    pub fn balance(&self) -> Coins {
        self.balance
    }

    pub fn credit(&mut self, amount: Coins, reason: impl Into<String>) {
        if amount == 0 {
            return;
        }
        let reason = reason.into();
        self.balance = self.balance.saturating_add(amount);
        info!("[Ledger] +{}: {}. Balance: {}", amount, reason, self.balance);
        self.push(amount, Direction::Credit, reason);
    }

    pub fn debit(&mut self, amount: Coins, reason: impl Into<String>) -> Result<(), LedgerError> {
        if amount > self.balance {
            return Err(LedgerError::InsufficientFunds {
                needed: amount,
                available: self.balance,
            });
        }
        if amount == 0 {
            return Ok(());
        }
        let reason = reason.into();
        self.balance -= amount;
        info!("[Ledger] -{}: {}. Balance: {}", amount, reason, self.balance);
        self.push(amount, Direction::Debit, reason);
        Ok(())
    }

    fn push(&mut self, amount: Coins, direction: Direction, reason: String) {
        self.transactions.push(Transaction {
            amount,
            direction,
            reason,
            timestamp: now_unix(),
        });
    }

    /// Insertion order.
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// Most recent first, for display.
    pub fn history(&self) -> impl Iterator<Item = &Transaction> {
        self.transactions.iter().rev()
    }

    pub fn total_earned(&self) -> Coins {
        self.sum(Direction::Credit)
    }

    pub fn total_spent(&self) -> Coins {
        self.sum(Direction::Debit)
    }

    fn sum(&self, direction: Direction) -> Coins {
        self.transactions
            .iter()
            .filter(|t| t.direction == direction)
            .fold(0, |acc: Coins, t| acc.saturating_add(t.amount))
    }

    pub fn reset(&mut self, initial_balance: Coins) {
        self.balance = initial_balance;
        self.transactions.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debit_scenario_from_starting_balance() {
        let mut ledger = Ledger::new(1000);
        let err = ledger.debit(1500, "x").unwrap_err();
        assert_eq!(
            err,
            LedgerError::InsufficientFunds {
                needed: 1500,
                available: 1000
            }
        );
        assert_eq!(ledger.balance(), 1000);
        assert!(ledger.transactions().is_empty());

        ledger.debit(200, "x").unwrap();
        assert_eq!(ledger.balance(), 800);
        assert_eq!(ledger.history().count(), 1);
    }

    #[test]
    fn test_debit_exact_balance_succeeds() {
        let mut ledger = Ledger::new(50);
        assert!(ledger.debit(50, "all in").is_ok());
        assert_eq!(ledger.balance(), 0);
        assert!(ledger.debit(1, "one more").is_err());
    }

    #[test]
    fn test_credit_never_fails_and_logs() {
        let mut ledger = Ledger::new(0);
        ledger.credit(40, "Harvested Tomato");
        ledger.credit(25, "Bonus harvest from Tomato!");
        assert_eq!(ledger.balance(), 65);
        assert_eq!(ledger.transactions().len(), 2);
        assert_eq!(ledger.transactions()[0].direction, Direction::Credit);
    }

    #[test]
    fn test_zero_amounts_are_noops() {
        let mut ledger = Ledger::new(10);
        ledger.credit(0, "nothing");
        assert!(ledger.debit(0, "nothing").is_ok());
        assert_eq!(ledger.balance(), 10);
        assert!(ledger.transactions().is_empty());
    }

    #[test]
    fn test_history_is_most_recent_first() {
        let mut ledger = Ledger::new(100);
        ledger.credit(1, "first");
        ledger.debit(2, "second").unwrap();
        ledger.credit(3, "third");
        let reasons: Vec<&str> = ledger.history().map(|t| t.reason.as_str()).collect();
        assert_eq!(reasons, vec!["third", "second", "first"]);
        assert_eq!(ledger.transactions()[0].reason, "first");
    }

    #[test]
    fn test_totals_and_signed_amounts() {
        let mut ledger = Ledger::new(100);
        ledger.credit(30, "sale");
        ledger.debit(45, "seeds").unwrap();
        assert_eq!(ledger.total_earned(), 30);
        assert_eq!(ledger.total_spent(), 45);
        assert_eq!(ledger.transactions()[1].signed_amount(), -45);
        assert_eq!(ledger.balance(), 85);
    }

    #[test]
    fn test_reset_clears_history() {
        let mut ledger = Ledger::new(100);
        ledger.credit(5, "x");
        ledger.reset(1000);
        assert_eq!(ledger.balance(), 1000);
        assert!(ledger.transactions().is_empty());
    }
}

use std::sync::{Mutex, MutexGuard, PoisonError};

use rust_decimal::{Decimal, prelude::Zero};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    Deposit,
    Withdraw,
    TransferOut,
    TransferIn,
}

/// One entry of an account's audit trail, immutable once appended.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransactionRecord {
    pub kind: TransactionKind,
    /// Positive magnitude of the movement, never a signed delta.
    pub amount: Decimal,
    /// The owning account's balance right after the event was applied.
    pub balance_after: Decimal,
    pub note: String,
}

#[derive(Debug, Error)]
pub enum AccountError {
    #[error("Amount must be positive")]
    InvalidAmount,
    #[error("Account is frozen, no further operations are allowed")]
    AccountFrozen,
    #[error("Receiving account is frozen")]
    CounterpartyFrozen,
    #[error("Insufficient funds")]
    InsufficientFunds,
    #[error("Transfer requires two distinct accounts")]
    InvalidTarget,
    #[error("A previous operation panicked while holding the account lock")]
    LockPoisoned,
}

#[derive(Debug, Default)]
pub(crate) struct AccountState {
    pub(crate) balance: Decimal,
    pub(crate) frozen: bool,
    pub(crate) history: Vec<TransactionRecord>,
}

impl AccountState {
    /// Appends one record snapshotting the balance after the event.
    pub(crate) fn push_record(&mut self, kind: TransactionKind, amount: Decimal, note: String) {
        self.history.push(TransactionRecord {
            kind,
            amount,
            balance_after: self.balance,
            note,
        });
    }
}

/// A single-currency account: balance, freeze flag and append-only history.
/// All state sits behind one mutex, so operations taking `&self` are
/// serialized per account and either commit fully or leave no trace.
#[derive(Debug)]
pub struct Account {
    name: String,
    state: Mutex<AccountState>,
}

impl Account {
    /// Opens an account with balance zero, not frozen and an empty history.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            state: Mutex::new(AccountState::default()),
        }
    }

    /// Display label, only ever used in history notes.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn deposit(&self, amount: Decimal) -> Result<(), AccountError> {
        let mut state = self.lock_state()?;
        if state.frozen {
            return Err(AccountError::AccountFrozen);
        }
        if amount <= Decimal::zero() {
            return Err(AccountError::InvalidAmount);
        }
        state.balance += amount;
        state.push_record(TransactionKind::Deposit, amount, "Deposit successful".into());
        tracing::debug!(account = %self.name, %amount, balance = %state.balance, "deposit applied");
        Ok(())
    }

    pub fn withdraw(&self, amount: Decimal) -> Result<(), AccountError> {
        let mut state = self.lock_state()?;
        if state.frozen {
            return Err(AccountError::AccountFrozen);
        }
        if amount <= Decimal::zero() {
            return Err(AccountError::InvalidAmount);
        }
        if amount > state.balance {
            return Err(AccountError::InsufficientFunds);
        }
        state.balance -= amount;
        state.push_record(TransactionKind::Withdraw, amount, "Withdrawal successful".into());
        tracing::debug!(account = %self.name, %amount, balance = %state.balance, "withdrawal applied");
        Ok(())
    }

    /// Blocks every balance-changing operation until [`Account::unfreeze`].
    /// Balance and history are untouched.
    pub fn freeze(&self) {
        self.read_state().frozen = true;
    }

    pub fn unfreeze(&self) {
        self.read_state().frozen = false;
    }

    pub fn is_frozen(&self) -> bool {
        self.read_state().frozen
    }

    pub fn balance(&self) -> Decimal {
        self.read_state().balance
    }

    /// Snapshot of the audit trail. The copy is independent, mutating it
    /// has no effect on the account's own log.
    pub fn history(&self) -> Vec<TransactionRecord> {
        self.read_state().history.clone()
    }

    /// Mutating operations refuse to touch state a panicked writer left behind.
    pub(crate) fn lock_state(&self) -> Result<MutexGuard<'_, AccountState>, AccountError> {
        self.state.lock().map_err(|_| AccountError::LockPoisoned)
    }

    /// Queries and the freeze switch keep their never-fail contract: they
    /// only read state or flip the `frozen` flag, both fine on a poisoned lock.
    fn read_state(&self) -> MutexGuard<'_, AccountState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

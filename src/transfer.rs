use std::{ptr, sync::MutexGuard};

use rust_decimal::{Decimal, prelude::Zero};

use crate::account::{Account, AccountError, AccountState, TransactionKind};

impl Account {
    /// Moves `amount` to `counterparty` as one indivisible step: validation,
    /// both balance changes and both history records happen while holding
    /// both accounts' locks, so no observer can see a debited initiator next
    /// to an uncredited counterparty.
    pub fn transfer(&self, counterparty: &Account, amount: Decimal) -> Result<(), AccountError> {
        if ptr::eq(self, counterparty) {
            return Err(AccountError::InvalidTarget);
        }
        let (mut from, mut to) = lock_pair(self, counterparty)?;
        if from.frozen {
            return Err(AccountError::AccountFrozen);
        }
        if to.frozen {
            return Err(AccountError::CounterpartyFrozen);
        }
        if amount <= Decimal::zero() {
            return Err(AccountError::InvalidAmount);
        }
        if amount > from.balance {
            return Err(AccountError::InsufficientFunds);
        }
        from.balance -= amount;
        to.balance += amount;
        from.push_record(
            TransactionKind::TransferOut,
            amount,
            format!("Transferred to {}", counterparty.name()),
        );
        to.push_record(
            TransactionKind::TransferIn,
            amount,
            format!("Received from {}", self.name()),
        );
        tracing::debug!(from = %self.name(), to = %counterparty.name(), %amount, "transfer applied");
        Ok(())
    }
}

/// Acquires both locks in stable address order, never call order, so two
/// opposite transfers between the same accounts cannot wait on each other
/// in a cycle.
fn lock_pair<'a>(
    initiator: &'a Account,
    counterparty: &'a Account,
) -> Result<(MutexGuard<'a, AccountState>, MutexGuard<'a, AccountState>), AccountError> {
    if ptr::from_ref(initiator) < ptr::from_ref(counterparty) {
        let from = initiator.lock_state()?;
        let to = counterparty.lock_state()?;
        Ok((from, to))
    } else {
        let to = counterparty.lock_state()?;
        let from = initiator.lock_state()?;
        Ok((from, to))
    }
}

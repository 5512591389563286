//! Runs an operation script against a set of named accounts. The account map
//! lives here, on the caller side; the core itself has no registry.

use std::{
    collections::BTreeMap,
    io::{Read, Write},
};

use anyhow::Result;
use thiserror::Error;

use crate::account::{Account, AccountError};
use csv_parser::{CsvOperationParser, Operation, OperationKind};
use csv_printer::{BalanceSummary, print_balances};

pub mod csv_parser;
pub mod csv_printer;

#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("Account `{0}` has already been opened")]
    DuplicateAccount(String),
    #[error("Unknown account `{0}`")]
    UnknownAccount(String),
    #[error("Amount is required for {op:?}")]
    AmountRequired { op: OperationKind },
    #[error("A counterparty is required for {op:?}")]
    CounterpartyRequired { op: OperationKind },
    #[error(transparent)]
    AccountErr(#[from] AccountError),
}

pub struct Service<'w, R, W: 'w> {
    pub input: R,
    pub output: &'w mut W,
    pub error_printer: Box<dyn FnMut(u64, ScriptError)>,
}

impl<'w, R, W> Service<'w, R, W>
where
    R: Read,
    W: Write + 'w,
{
    pub fn run(mut self) -> Result<()> {
        let parser = CsvOperationParser::new(self.input);

        let mut accounts = BTreeMap::new();

        for (line, row) in parser {
            if let Err(err) = apply_operation(&mut accounts, row) {
                (self.error_printer)(line, err);
            }
        }

        print_balances(
            self.output,
            accounts.values().map(|acc| BalanceSummary {
                account: acc.name().to_owned(),
                balance: acc.balance(),
                frozen: acc.is_frozen(),
            }),
        )
    }
}

fn apply_operation(
    accounts: &mut BTreeMap<String, Account>,
    row: Operation,
) -> Result<(), ScriptError> {
    match row.op {
        OperationKind::Open => {
            if accounts.contains_key(&row.account) {
                return Err(ScriptError::DuplicateAccount(row.account));
            }
            accounts.insert(row.account.clone(), Account::new(row.account));
        }
        OperationKind::Deposit => {
            let amount = row.amount.ok_or(ScriptError::AmountRequired { op: row.op })?;
            lookup(accounts, &row.account)?.deposit(amount)?;
        }
        OperationKind::Withdraw => {
            let amount = row.amount.ok_or(ScriptError::AmountRequired { op: row.op })?;
            lookup(accounts, &row.account)?.withdraw(amount)?;
        }
        OperationKind::Transfer => {
            let amount = row.amount.ok_or(ScriptError::AmountRequired { op: row.op })?;
            let name = row
                .counterparty
                .as_deref()
                .ok_or(ScriptError::CounterpartyRequired { op: row.op })?;
            let initiator = lookup(accounts, &row.account)?;
            let counterparty = lookup(accounts, name)?;
            initiator.transfer(counterparty, amount)?;
        }
        OperationKind::Freeze => lookup(accounts, &row.account)?.freeze(),
        OperationKind::Unfreeze => lookup(accounts, &row.account)?.unfreeze(),
    }
    Ok(())
}

fn lookup<'a>(
    accounts: &'a BTreeMap<String, Account>,
    name: &str,
) -> Result<&'a Account, ScriptError> {
    accounts
        .get(name)
        .ok_or_else(|| ScriptError::UnknownAccount(name.to_owned()))
}

use std::io::Write;

use csv::Writer;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::account::{Account, TransactionKind};

#[derive(Debug, Serialize)]
pub struct BalanceSummary {
    pub account: String,
    pub balance: Decimal,
    pub frozen: bool,
}

/// Writes one `account,balance,frozen` row per account.
pub fn print_balances<W>(
    output: &mut W,
    accounts: impl Iterator<Item = BalanceSummary>,
) -> anyhow::Result<()>
where
    W: Write,
{
    let mut writer = Writer::from_writer(output);
    for row in accounts {
        if let Err(err) = writer.serialize(row) {
            anyhow::bail!("Failed to write to CSV: {err}")
        }
    }
    flush(writer)
}

#[derive(Debug, Serialize)]
struct StatementRow<'a> {
    account: &'a str,
    kind: TransactionKind,
    amount: Decimal,
    balance_after: Decimal,
    note: &'a str,
}

/// Writes an account's full audit trail, one row per transaction record.
pub fn print_statement<W>(output: &mut W, account: &Account) -> anyhow::Result<()>
where
    W: Write,
{
    let mut writer = Writer::from_writer(output);
    for record in account.history() {
        let row = StatementRow {
            account: account.name(),
            kind: record.kind,
            amount: record.amount,
            balance_after: record.balance_after,
            note: &record.note,
        };
        if let Err(err) = writer.serialize(row) {
            anyhow::bail!("Failed to write to CSV: {err}")
        }
    }
    flush(writer)
}

fn flush<W: Write>(mut writer: Writer<W>) -> anyhow::Result<()> {
    // Ensure all data is flushed to the output
    if let Err(err) = writer.flush() {
        anyhow::bail!("Failed to flush CSV writer: {err}")
    }
    Ok(())
}

use std::io::Write;

use crate::fmt::qif_amount;
use crate::models::{AccountType, QifRecord};

/// Write a `!Type:` header followed by one block per record, each ended by `^`.
pub fn write_qif<W: Write>(out: &mut W, account_type: AccountType, records: &[QifRecord]) -> std::io::Result<()> {
    writeln!(out, "!Type:{}", account_type.qif_name())?;
    for record in records {
        write_record(out, record)?;
    }
    out.flush()
}

fn write_record<W: Write>(out: &mut W, record: &QifRecord) -> std::io::Result<()> {
    writeln!(out, "D{}", record.date)?;
    writeln!(out, "T{}", qif_amount(record.amount))?;
    if let Some(number) = &record.number {
        writeln!(out, "N{}", single_line(number))?;
    }
    if let Some(memo) = &record.memo {
        writeln!(out, "M{}", single_line(memo))?;
    }
    if let Some(payee) = &record.payee {
        writeln!(out, "P{}", single_line(payee))?;
    }
    writeln!(out, "^")
}

// A stray line break would start a new QIF field.
fn single_line(value: &str) -> String {
    value.replace(['\r', '\n'], " ")
}

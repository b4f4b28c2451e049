use regex::Regex;
use rust_decimal::Decimal;

use crate::error::{ConvError, Result};
use crate::fmt::{cell_ref, format_date, round_cents, validate_date_format};
use crate::models::{QifRecord, TransactionRow};
use crate::reader::COL_DEBIT;

/// Maps GL transaction rows to QIF records.
///
/// Amounts are `debit - credit` rounded to cents, so debits are inflows and
/// credits outflows. The payee is the text after the first `"] "` in the
/// Person/Item column, up to a `/`, `|` or line break.
pub struct FieldMapper {
    date_format: String,
    payee_re: Regex,
}

impl FieldMapper {
    pub fn new(date_format: &str) -> Result<Self> {
        validate_date_format(date_format)?;
        Ok(Self {
            date_format: date_format.to_string(),
            payee_re: Regex::new(r"\] ([^/|\n]+)").expect("static payee pattern"),
        })
    }

    pub fn map(&self, row: &TransactionRow) -> Result<QifRecord> {
        Ok(QifRecord {
            date: format_date(row.date, &self.date_format)?,
            amount: row_amount(row)?,
            number: Some(row.reference.clone()).filter(|r| !r.is_empty()),
            memo: memo(&row.kind, &row.memo),
            payee: self.payee(&row.person_item),
        })
    }

    fn payee(&self, person_item: &str) -> Option<String> {
        self.payee_re
            .captures(person_item)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().trim().to_string())
            .filter(|p| !p.is_empty())
    }
}

pub fn row_amount(row: &TransactionRow) -> Result<Decimal> {
    let debit = row.debit.unwrap_or(Decimal::ZERO);
    let credit = row.credit.unwrap_or(Decimal::ZERO);
    debit
        .checked_sub(credit)
        .map(round_cents)
        .ok_or_else(|| ConvError::InvalidAmount {
            cell: cell_ref(row.row, COL_DEBIT),
            value: format!("{debit} - {credit} is out of range"),
        })
}

fn memo(kind: &str, text: &str) -> Option<String> {
    let text: String = text.chars().filter(|c| *c != '\n' && *c != '\r').collect();
    let text = text.trim();
    match (kind.is_empty(), text.is_empty()) {
        (true, true) => None,
        (false, true) => Some(kind.to_string()),
        (true, false) => Some(text.to_string()),
        (false, false) => Some(format!("{kind}: {text}")),
    }
}

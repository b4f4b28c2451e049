use std::path::Path;

use rust_decimal::Decimal;

use crate::error::{ConvError, Result};
use crate::fmt::{cell_ref, qif_amount, round_cents};
use crate::mapper::FieldMapper;
use crate::models::{AccountType, TransactionRow};
use crate::qif::write_qif;
use crate::reader::{read_report, ReportLayout, COL_BALANCE};

#[derive(Debug, Clone)]
pub struct ConvertOptions {
    pub account_type: AccountType,
    pub date_format: String,
    pub sheet: Option<String>,
    pub verify_balance: bool,
    pub layout: ReportLayout,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            account_type: AccountType::Bank,
            date_format: "%m/%d/%Y".to_string(),
            sheet: None,
            verify_balance: true,
            layout: ReportLayout::default(),
        }
    }
}

pub struct ConvertResult {
    pub period: Option<String>,
    pub opening_balance: Decimal,
    pub closing_balance: Option<Decimal>,
    pub calculated_balance: Decimal,
    pub records: usize,
}

/// Convert a GL account transactions workbook into a QIF file.
///
/// The output file is only written once the workbook has been read, every
/// row mapped and the balance verified, so a failed run leaves nothing behind.
pub fn gl_to_qif(input: &Path, output: &Path, opts: &ConvertOptions) -> Result<ConvertResult> {
    let mapper = FieldMapper::new(&opts.date_format)?;
    let report = read_report(input, opts.sheet.as_deref(), &opts.layout)?;

    let mut running = report.opening_balance;
    let mut records = Vec::with_capacity(report.rows.len());
    for row in &report.rows {
        let record = mapper.map(row)?;
        running = advance_balance(running, record.amount, row)?;
        if let Some(stated) = row.balance {
            if round_cents(stated) != running {
                tracing::debug!(
                    row = row.row,
                    stated = %stated,
                    running = %running,
                    "balance column differs from running balance"
                );
            }
        }
        records.push(record);
    }

    match report.closing_balance {
        Some(closing) if opts.verify_balance && closing != running => {
            return Err(ConvError::BalanceMismatch {
                calculated: qif_amount(running),
                closing: qif_amount(closing),
            });
        }
        None if opts.verify_balance => {
            tracing::warn!("no closing balance found in report; skipping balance verification");
        }
        _ => {}
    }

    let mut buf = Vec::new();
    write_qif(&mut buf, opts.account_type, &records)?;
    std::fs::write(output, &buf)?;
    tracing::info!(
        input = %input.display(),
        output = %output.display(),
        records = records.len(),
        "wrote QIF file"
    );

    Ok(ConvertResult {
        period: report.period,
        opening_balance: report.opening_balance,
        closing_balance: report.closing_balance,
        calculated_balance: running,
        records: records.len(),
    })
}

fn advance_balance(running: Decimal, amount: Decimal, row: &TransactionRow) -> Result<Decimal> {
    running
        .checked_add(amount)
        .ok_or_else(|| ConvError::InvalidAmount {
            cell: cell_ref(row.row, COL_BALANCE),
            value: format!("running balance {running} + {amount} is out of range"),
        })
}

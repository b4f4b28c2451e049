use std::path::Path;
use std::str::FromStr;

use calamine::{open_workbook_auto, Data, ExcelDateTime, Range, Reader};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{ConvError, Result};
use crate::fmt::{cell_ref, round_cents};
use crate::models::{GlReport, TransactionRow};

// Transaction columns of the GL account report (A..K).
const COL_TYPE: u32 = 0;
const COL_REF: u32 = 1;
const COL_NUMBER: u32 = 2;
const COL_DATE: u32 = 3;
const COL_DIMENSION: u32 = 4;
const COL_PERSON_ITEM: u32 = 6;
const COL_MEMO: u32 = 7;
pub(crate) const COL_DEBIT: u32 = 8;
const COL_CREDIT: u32 = 9;
pub(crate) const COL_BALANCE: u32 = 10;

const REQUIRED_HEADERS: &[(u32, &str)] = &[(COL_DATE, "Date"), (COL_DEBIT, "Debit"), (COL_CREDIT, "Credit")];

/// Row positions (0-based) of the fixed parts of a GL account report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportLayout {
    pub period_row: u32,
    pub period_col: u32,
    pub opening_row: u32,
    pub header_row: u32,
    pub first_data_row: u32,
}

impl Default for ReportLayout {
    fn default() -> Self {
        Self {
            period_row: 3,
            period_col: 1,
            opening_row: 6,
            header_row: 7,
            first_data_row: 8,
        }
    }
}

// ---------------------------------------------------------------------------
// Cell helpers
// ---------------------------------------------------------------------------

/// Non-empty cell at an absolute position. Whitespace-only strings count as empty.
fn cell(range: &Range<Data>, row: u32, col: u32) -> Option<&Data> {
    match range.get_value((row, col)) {
        None | Some(Data::Empty) => None,
        Some(Data::String(s)) if s.trim().is_empty() => None,
        Some(other) => Some(other),
    }
}

fn text_cell(range: &Range<Data>, row: u32, col: u32) -> String {
    match cell(range, row, col) {
        None => String::new(),
        Some(Data::String(s)) => s.trim().to_string(),
        Some(other) => other.to_string(),
    }
}

/// Parse a spreadsheet amount string: thousands separators and
/// parenthesized negatives are accepted. Returns `None` for blank input.
pub fn parse_amount(raw: &str) -> Option<std::result::Result<Decimal, rust_decimal::Error>> {
    let s: String = raw.chars().filter(|c| *c != ',' && !c.is_whitespace()).collect();
    if s.is_empty() {
        return None;
    }
    if let Some(inner) = s.strip_prefix('(').and_then(|v| v.strip_suffix(')')) {
        return Some(Decimal::from_str(inner).map(|d| -d));
    }
    Some(Decimal::from_str(&s))
}

fn amount_cell(range: &Range<Data>, row: u32, col: u32) -> Result<Option<Decimal>> {
    let invalid = |value: String| ConvError::InvalidAmount {
        cell: cell_ref(row, col),
        value,
    };
    match cell(range, row, col) {
        None => Ok(None),
        Some(Data::Int(i)) => Ok(Some(Decimal::from(*i))),
        // f64 Display is the shortest round-tripping form, so 12.3 stays 12.3.
        Some(Data::Float(f)) => Decimal::from_str(&f.to_string())
            .map(Some)
            .map_err(|_| invalid(f.to_string())),
        Some(Data::String(s)) => match parse_amount(s) {
            None => Ok(None),
            Some(Ok(d)) => Ok(Some(d)),
            Some(Err(_)) => Err(invalid(s.clone())),
        },
        Some(other) => Err(invalid(other.to_string())),
    }
}

pub fn excel_serial_to_date(serial: f64) -> Option<NaiveDate> {
    // Excel epoch is 1899-12-30 (accounting for the 1900 leap year bug);
    // serials past 2958465 are beyond 9999-12-31.
    if !(1.0..2_958_466.0).contains(&serial) {
        return None;
    }
    let base = NaiveDate::from_ymd_opt(1899, 12, 30)?;
    base.checked_add_signed(chrono::Duration::days(serial.trunc() as i64))
}

/// Date of a typed Excel date cell, honouring the workbook's 1904 date
/// system. Durations are not dates.
pub fn excel_datetime_to_date(dt: &ExcelDateTime) -> Option<NaiveDate> {
    if dt.is_duration() {
        return None;
    }
    dt.as_datetime().map(|d| d.date())
}

/// Parse a textual date. Month-first is preferred over day-first when a
/// slash-separated date is ambiguous. A trailing time part is ignored.
pub fn parse_date_str(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    let date_part = raw.split(|c: char| c == ' ' || c == 'T').next().unwrap_or(raw);
    ["%Y-%m-%d", "%m/%d/%Y", "%Y/%m/%d"]
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(date_part, fmt).ok())
}

fn date_cell(range: &Range<Data>, row: u32, col: u32) -> Result<Option<NaiveDate>> {
    let Some(data) = cell(range, row, col) else {
        return Ok(None);
    };
    let parsed = match data {
        Data::DateTime(dt) => excel_datetime_to_date(dt),
        Data::Float(f) => excel_serial_to_date(*f),
        Data::Int(i) => excel_serial_to_date(*i as f64),
        Data::String(s) | Data::DateTimeIso(s) => parse_date_str(s),
        _ => None,
    };
    parsed.map(Some).ok_or_else(|| ConvError::InvalidDate {
        cell: cell_ref(row, col),
        value: data.to_string(),
    })
}

/// Balance on a report line: a credit is negative, otherwise the debit.
fn balance_at(range: &Range<Data>, row: u32) -> Result<Option<Decimal>> {
    let credit = amount_cell(range, row, COL_CREDIT)?;
    let debit = amount_cell(range, row, COL_DEBIT)?;
    Ok(match (credit, debit) {
        (Some(c), _) => Some(round_cents(-c)),
        (None, Some(d)) => Some(round_cents(d)),
        (None, None) => None,
    })
}

fn check_headers(range: &Range<Data>, layout: &ReportLayout) -> Result<()> {
    for (col, label) in REQUIRED_HEADERS {
        let found = text_cell(range, layout.header_row, *col);
        if !found.eq_ignore_ascii_case(label) {
            return Err(ConvError::MissingColumn {
                column: label.to_string(),
                cell: cell_ref(layout.header_row, *col),
            });
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Report parsing
// ---------------------------------------------------------------------------

pub fn parse_report(range: &Range<Data>, layout: &ReportLayout) -> Result<GlReport> {
    check_headers(range, layout)?;

    let period = Some(text_cell(range, layout.period_row, layout.period_col)).filter(|p| !p.is_empty());
    let opening_balance = balance_at(range, layout.opening_row)?.unwrap_or(Decimal::ZERO);

    let last_row = range.end().map_or(0, |(r, _)| r);
    let mut rows = Vec::new();
    let mut row = layout.first_data_row;
    while row <= last_row {
        let Some(date) = date_cell(range, row, COL_DATE)? else {
            break;
        };
        let tx = TransactionRow {
            row,
            kind: text_cell(range, row, COL_TYPE),
            reference: text_cell(range, row, COL_REF),
            number: text_cell(range, row, COL_NUMBER),
            date,
            dimension: text_cell(range, row, COL_DIMENSION),
            person_item: text_cell(range, row, COL_PERSON_ITEM),
            memo: text_cell(range, row, COL_MEMO),
            debit: amount_cell(range, row, COL_DEBIT)?,
            credit: amount_cell(range, row, COL_CREDIT)?,
            balance: amount_cell(range, row, COL_BALANCE)?,
        };
        tracing::trace!(
            row,
            date = %tx.date,
            reference = %tx.reference,
            number = %tx.number,
            dimension = %tx.dimension,
            "read transaction row"
        );
        rows.push(tx);
        row += 1;
    }

    // The closing balance sits on the line after the one that ended the block.
    let closing_balance = balance_at(range, row + 1)?;
    tracing::debug!(
        rows = rows.len(),
        end_row = row,
        ?opening_balance,
        ?closing_balance,
        "parsed GL report"
    );

    Ok(GlReport {
        period,
        opening_balance,
        rows,
        closing_balance,
    })
}

/// Open a workbook (.xls or .xlsx) and parse the GL report on `sheet`,
/// or on the first sheet when none is named.
pub fn read_report(path: &Path, sheet: Option<&str>, layout: &ReportLayout) -> Result<GlReport> {
    if !path.is_file() {
        return Err(ConvError::InputNotFound(path.display().to_string()));
    }
    let mut workbook = open_workbook_auto(path)?;
    let sheet_names = workbook.sheet_names();
    let sheet_name = match sheet {
        Some(name) => sheet_names
            .iter()
            .find(|n| n.as_str() == name)
            .cloned()
            .ok_or_else(|| ConvError::UnknownSheet(name.to_string()))?,
        None => sheet_names.first().cloned().ok_or(ConvError::NoSheets)?,
    };
    tracing::debug!(path = %path.display(), sheet = %sheet_name, "reading worksheet");
    let range = workbook.worksheet_range(&sheet_name)?;
    parse_report(&range, layout)
}

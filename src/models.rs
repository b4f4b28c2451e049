use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;

/// One transaction line of a GL account report.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionRow {
    /// 0-based sheet row, kept for diagnostics.
    pub row: u32,
    pub kind: String,
    pub reference: String,
    /// FrontAccounting's internal transaction number (column `#`).
    pub number: String,
    pub date: NaiveDate,
    pub dimension: String,
    pub person_item: String,
    pub memo: String,
    pub debit: Option<Decimal>,
    pub credit: Option<Decimal>,
    pub balance: Option<Decimal>,
}

/// Everything the converter needs from one GL account report.
#[derive(Debug, Clone)]
pub struct GlReport {
    pub period: Option<String>,
    pub opening_balance: Decimal,
    pub rows: Vec<TransactionRow>,
    pub closing_balance: Option<Decimal>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct QifRecord {
    pub date: String,
    pub amount: Decimal,
    pub number: Option<String>,
    pub memo: Option<String>,
    pub payee: Option<String>,
}

/// QIF account type written into the `!Type:` header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AccountType {
    #[default]
    Bank,
    Cash,
    CreditCard,
    Investment,
    OtherAsset,
    OtherLiability,
}

const ALL_ACCOUNT_TYPES: &[AccountType] = &[
    AccountType::Bank,
    AccountType::Cash,
    AccountType::CreditCard,
    AccountType::Investment,
    AccountType::OtherAsset,
    AccountType::OtherLiability,
];

impl AccountType {
    pub fn qif_name(&self) -> &'static str {
        match self {
            Self::Bank => "Bank",
            Self::Cash => "Cash",
            Self::CreditCard => "CCard",
            Self::Investment => "Invst",
            Self::OtherAsset => "Oth A",
            Self::OtherLiability => "Oth L",
        }
    }
}

impl fmt::Display for AccountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.qif_name())
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
#[error("unknown account type '{0}' (expected one of: Bank, Cash, CCard, Invst, Oth A, Oth L)")]
pub struct ParseAccountTypeError(pub String);

impl FromStr for AccountType {
    type Err = ParseAccountTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        ALL_ACCOUNT_TYPES
            .iter()
            .find(|t| t.qif_name().eq_ignore_ascii_case(wanted))
            .copied()
            .ok_or_else(|| ParseAccountTypeError(s.to_string()))
    }
}

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConvError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Input file not found: {0}")]
    InputNotFound(String),

    #[error("Failed to open workbook: {0}")]
    Workbook(#[from] calamine::Error),

    #[error("Sheet not found: {0}")]
    UnknownSheet(String),

    #[error("Workbook has no sheets")]
    NoSheets,

    #[error("Missing expected column '{column}' at {cell}")]
    MissingColumn { column: String, cell: String },

    #[error("Invalid date at {cell}: {value}")]
    InvalidDate { cell: String, value: String },

    #[error("Invalid amount at {cell}: {value}")]
    InvalidAmount { cell: String, value: String },

    #[error("Invalid date format: {0}")]
    InvalidDateFormat(String),

    #[error("Final calculated balance {calculated} does not match closing balance {closing}")]
    BalanceMismatch { calculated: String, closing: String },

    #[error("Settings error: {0}")]
    Settings(String),
}

pub type Result<T> = std::result::Result<T, ConvError>;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CarrierError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Spreadsheet error: {0}")]
    Spreadsheet(#[from] calamine::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{file}: row {row}, column '{column}': cannot convert '{value}' to {expected}")]
    Conversion {
        file: String,
        row: usize,
        column: String,
        value: String,
        expected: &'static str,
    },

    #[error("{file}: missing column '{column}'")]
    MissingColumn { file: String, column: String },

    #[error("{file}: unsupported table format")]
    UnsupportedFormat { file: String },

    #[error("Customer {customer_id} references unknown plan '{plan_name}'")]
    UnknownPlan { customer_id: i64, plan_name: String },

    #[error("Invalid record: {0}")]
    InvalidRecord(String),

    #[error("Query rejected: {0}")]
    QueryRejected(String),

    #[error("Agent error: {0}")]
    Agent(String),
}

pub type CarrierResult<T> = Result<T, CarrierError>;

use std::fmt;

// Hand-written Display/Error impls: `#[derive(thiserror::Error)]` cannot be
// used here because several variants carry a plain-data field named `source`
// (the input source name), which thiserror unconditionally treats as the
// error's cause.
#[derive(Debug)]
pub enum SalesGridError {
    EmptyInput,

    MissingColumn { source: String, column: String },

    DateParse {
        source: String,
        row: usize,
        value: String,
    },

    MeasureParse {
        source: String,
        row: usize,
        column: String,
        value: String,
    },

    Csv(csv::Error),

    IoError(std::io::Error),
}

impl fmt::Display for SalesGridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SalesGridError::EmptyInput => write!(f, "no input sources were supplied"),
            SalesGridError::MissingColumn { source, column } => write!(
                f,
                "required column '{column}' is missing from source '{source}'"
            ),
            SalesGridError::DateParse { source, row, value } => write!(
                f,
                "cannot parse date '{value}' in source '{source}' (row {row}): expected DD/MM/YYYY"
            ),
            SalesGridError::MeasureParse {
                source,
                row,
                column,
                value,
            } => write!(
                f,
                "cannot parse '{value}' in column '{column}' of source '{source}' (row {row}) as a number"
            ),
            SalesGridError::Csv(err) => write!(f, "CSV error: {err}"),
            SalesGridError::IoError(err) => write!(f, "IO error: {err}"),
        }
    }
}

impl std::error::Error for SalesGridError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SalesGridError::Csv(err) => Some(err),
            SalesGridError::IoError(err) => Some(err),
            _ => None,
        }
    }
}

impl From<csv::Error> for SalesGridError {
    fn from(err: csv::Error) -> Self {
        SalesGridError::Csv(err)
    }
}

impl From<std::io::Error> for SalesGridError {
    fn from(err: std::io::Error) -> Self {
        SalesGridError::IoError(err)
    }
}

pub type Result<T> = std::result::Result<T, SalesGridError>;

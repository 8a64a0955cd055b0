use thiserror::Error;

#[derive(Error, Debug)]
pub enum RaffleError {
    #[error("{file} must exist")]
    MissingInputFile { file: String },

    #[error("{file} must not be empty")]
    EmptyInputFile { file: String },

    #[error("{field} is missing in line {line}")]
    MissingField { field: String, line: usize },

    #[error("{field} is empty in line {line}")]
    EmptyField { field: String, line: usize },

    #[error("{field} is not an integer in line {line} (value: {value:?})")]
    InvalidInteger {
        field: String,
        value: String,
        line: usize,
    },

    #[error("{field} is less than {minimum} in line {line} (value: {value})")]
    IntegerBelowMinimum {
        field: String,
        value: i64,
        minimum: i64,
        line: usize,
    },

    #[error("{field} is not formatted correctly in line {line} (value: {value:?})")]
    InvalidBoolean {
        field: String,
        value: String,
        line: usize,
    },

    #[error("Duplicated id {id} in file {file} line {line}")]
    DuplicateId {
        id: String,
        file: String,
        line: usize,
    },

    #[error("number of slots ({slots}) must be at least the number of residents ({residents})")]
    InsufficientSlots { slots: usize, residents: usize },

    #[error("No more {category} slots available")]
    PoolExhausted { category: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Input,
    Validation,
    Capacity,
    Allocation,
    Configuration,
    System,
}

impl RaffleError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            RaffleError::MissingInputFile { .. } | RaffleError::EmptyInputFile { .. } => {
                ErrorKind::Input
            }
            RaffleError::MissingField { .. }
            | RaffleError::EmptyField { .. }
            | RaffleError::InvalidInteger { .. }
            | RaffleError::IntegerBelowMinimum { .. }
            | RaffleError::InvalidBoolean { .. }
            | RaffleError::DuplicateId { .. } => ErrorKind::Validation,
            RaffleError::InsufficientSlots { .. } => ErrorKind::Capacity,
            RaffleError::PoolExhausted { .. } => ErrorKind::Allocation,
            RaffleError::ConfigError { .. } => ErrorKind::Configuration,
            RaffleError::IoError(_) | RaffleError::CsvError(_) => ErrorKind::System,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.kind() {
            ErrorKind::Input => {
                "Check that the residents and slots files exist in the input directory"
            }
            ErrorKind::Validation => "Fix the reported line in the input file and run again",
            ErrorKind::Capacity => "Add slots or remove residents so every resident can get one",
            ErrorKind::Allocation => {
                "Add slots of the exhausted category or lower the requested counts"
            }
            ErrorKind::Configuration => "Check the command line options",
            ErrorKind::System => "Check file permissions and disk space",
        }
    }
}

pub type Result<T> = std::result::Result<T, RaffleError>;

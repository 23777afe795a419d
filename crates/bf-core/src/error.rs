use thiserror::Error;

pub type BfResult<T> = Result<T, BfError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum BfError {
    #[error("Non-finite numeric value for {what}: {value}")]
    NonFinite { what: &'static str, value: f64 },
}

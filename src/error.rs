use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GenerateError {
    #[error("Invalid date {input:?}: expected YYYY-MM-DD")]
    InvalidDate { input: String },
}

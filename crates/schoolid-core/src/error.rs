use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("student number is required")]
    EmptyStudentNumber,
    #[error("student number must be 3 to 10 digits")]
    InvalidStudentNumber,
    #[error("name is required")]
    EmptyName,
}

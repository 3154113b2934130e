use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Invalid domain name: {0}")]
    InvalidDomainName(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Site directory unavailable: {0}")]
    DirectoryUnavailable(String),

    #[error("I/O error: {0}")]
    IoError(String),
}

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConnectError {
    /// The server has no address the CLI could route a connection to.
    #[error("no usable server address: {0}")]
    MissingAddress(String),

    #[error("connection check failed: {0}")]
    NotReachable(String),

    #[error("user home directory not found")]
    HomeNotFound,

    #[error("SSH connection error: {0}")]
    Ssh(String),

    #[error("serial console error: {0}")]
    Console(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, ConnectError>;

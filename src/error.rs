pub type MosaixResult<T> = Result<T, MosaixError>;

#[derive(thiserror::Error, Debug)]
pub enum MosaixError {
    #[error("unsupported host: {0}")]
    UnsupportedHost(String),

    #[error("unsupported source: {0}")]
    UnsupportedSource(String),

    #[error("unsupported options: {0}")]
    UnsupportedOptions(String),

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("validation error: {0}")]
    Validation(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl MosaixError {
    pub fn unsupported_host(msg: impl Into<String>) -> Self {
        Self::UnsupportedHost(msg.into())
    }

    pub fn unsupported_source(msg: impl Into<String>) -> Self {
        Self::UnsupportedSource(msg.into())
    }

    pub fn unsupported_options(msg: impl Into<String>) -> Self {
        Self::UnsupportedOptions(msg.into())
    }

    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FolioError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("content file is invalid: {0}")]
    Content(#[from] toml::de::Error),
    #[error("invalid root margin `{0}`: expected one to four lengths in px or %")]
    InvalidMargin(String),
    #[error("threshold {0} is outside 0.0..=1.0")]
    InvalidThreshold(f32),
}

pub type Result<T> = std::result::Result<T, FolioError>;

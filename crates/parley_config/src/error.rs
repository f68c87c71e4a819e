#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Missing required credential: set the {0} environment variable")]
    MissingCredential(&'static str),

    #[error("Temperature must be between 0.0 and 2.0, got {0}")]
    InvalidTemperature(f32),

    #[error("Invalid setting '{name}': {reason}")]
    InvalidSetting { name: &'static str, reason: String },

    #[error(transparent)]
    Config(#[from] config::ConfigError),
}

pub type Result<T> = std::result::Result<T, Error>;

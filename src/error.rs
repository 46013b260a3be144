use std::time::Duration;

#[derive(Debug, thiserror::Error)]
pub enum DeckError {
    #[error("Location resolution failed: {0}")]
    LocationResolution(String),

    #[error("Forecast data is empty or exhausted")]
    EmptyForecast,

    #[error("Weather provider timed out after {0:?}")]
    ProviderTimeout(Duration),

    #[error("Weather provider unavailable: {0}")]
    ProviderUnavailable(String),

    #[error("Malformed provider response: {0}")]
    MalformedResponse(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl DeckError {
    /// Recoverable errors skip one redraw; the rest are fatal at startup.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, DeckError::LocationResolution(_) | DeckError::Config(_))
    }
}

pub type DeckResult<T> = Result<T, DeckError>;

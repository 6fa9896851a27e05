use thiserror::Error;

/// Outcome of a provider lookup that reached the provider and got a usable answer.
#[derive(Debug, Clone, PartialEq)]
pub enum Lookup<T> {
    Found(T),
    NotFound,
}

impl<T> Lookup<T> {
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Lookup<U> {
        match self {
            Self::Found(value) => Lookup::Found(f(value)),
            Self::NotFound => Lookup::NotFound,
        }
    }

    pub fn found(self) -> Option<T> {
        match self {
            Self::Found(value) => Some(value),
            Self::NotFound => None,
        }
    }
}

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("{provider} is not configured")]
    NotConfigured { provider: &'static str },

    #[error("{provider} request failed: {detail}")]
    Transport {
        provider: &'static str,
        detail: String,
    },

    #[error("{provider} API request failed: {status}")]
    Status { provider: &'static str, status: u16 },

    #[error("{provider} returned an unexpected payload: {detail}")]
    Malformed {
        provider: &'static str,
        detail: String,
    },
}

#[derive(Debug, Error)]
pub enum NavigationError {
    #[error("{field} has no usable coordinates: {value:?}")]
    InvalidLocation { field: &'static str, value: String },

    #[error(transparent)]
    Provider(#[from] ProviderError),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{key} must be a number, got {value:?}")]
    InvalidNumber { key: &'static str, value: String },
}

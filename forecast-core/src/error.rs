use thiserror::Error;

/// Failures a single user action can run into. None of them are fatal; the
/// action can simply be retried.
#[derive(Debug, Error)]
pub enum ForecastError {
    #[error("Please select a location on the map or validate an address first.")]
    MissingLocation,

    #[error("Please select a date and time.")]
    MissingDateTime,

    #[error("Please enter an address.")]
    MissingAddress,

    #[error("Invalid coordinates: latitude must be -90 to 90, longitude must be -180 to 180")]
    InvalidCoordinates,

    /// The HTTP client itself could not be built.
    #[error("Failed to set up HTTP client for {service}: {message}")]
    Client {
        service: &'static str,
        message: String,
    },

    /// The collaborator could not be reached at all.
    #[error("Cannot reach {service}: {message}")]
    Connection {
        service: &'static str,
        message: String,
    },

    /// The forecast backend answered with an error.
    #[error("Error fetching forecast: {0}")]
    Backend(String),

    /// The geocoding provider answered with an error.
    #[error("Address validation failed: {0}")]
    Geocoding(String),

    #[error("Could not find the address. Please try to be more specific.")]
    AddressNotFound,

    #[error("Failed to parse {service} response: {message}")]
    Parse {
        service: &'static str,
        message: String,
    },
}

impl ForecastError {
    /// Whether the error was caught before any request was sent.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            ForecastError::MissingLocation
                | ForecastError::MissingDateTime
                | ForecastError::MissingAddress
                | ForecastError::InvalidCoordinates
        )
    }
}

pub type Result<T> = std::result::Result<T, ForecastError>;

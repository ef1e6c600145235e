use thiserror::Error;

/// Errors returned by the weather collaborator clients.
#[derive(Debug, Error)]
pub enum WeatherError {
    /// Network, TLS, or non-2xx status from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Geocoding returned an empty result set for the location.
    #[error("no geocoding results for location '{0}'")]
    NoResults(String),

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// The response parsed but violated the API contract (e.g. parallel
    /// hourly arrays of different lengths).
    #[error("malformed response from {endpoint}: {reason}")]
    MalformedResponse {
        endpoint: &'static str,
        reason: String,
    },
}

// src/error.rs

use thiserror::Error;

/// Errors produced while turning a connection string into an [`Endpoint`](crate::Endpoint).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive] // Allows adding more variants later without breaking change
pub enum NsqParseError {
  /// The input could not be decomposed as a generic URI reference.
  #[error("Invalid endpoint format '{input}': {reason}")]
  InvalidEndpoint {
    input: String,
    reason: String,
    /// Set when the authority was rejected by the URL parser.
    #[source]
    source: Option<url::ParseError>,
  },

  /// Strict parsing resolved an empty topic.
  #[error("No topic in endpoint: {0}")]
  MissingTopic(String), // Input string
}

impl NsqParseError {
  pub(crate) fn invalid_endpoint(input: &str, reason: impl Into<String>) -> Self {
    NsqParseError::InvalidEndpoint {
      input: input.to_string(),
      reason: reason.into(),
      source: None,
    }
  }

  pub(crate) fn invalid_authority(input: &str, source: url::ParseError) -> Self {
    NsqParseError::InvalidEndpoint {
      input: input.to_string(),
      reason: format!("invalid authority: {}", source),
      source: Some(source),
    }
  }

  pub(crate) fn missing_topic(input: &str) -> Self {
    NsqParseError::MissingTopic(input.to_string())
  }
}

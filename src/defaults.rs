// src/defaults.rs

use once_cell::sync::Lazy;
use tracing::debug;

use crate::endpoint::{parse_raw, Endpoint};
use crate::error::NsqParseError;

/// Transport identifier used when the input carries no scheme.
pub const DEFAULT_SCHEME: &str = "tcp";
/// Broker address used when the input carries no host at all.
pub const DEFAULT_ADDRESS: &str = "localhost:4150";
/// Port appended to a host that was given without one (nsqd's TCP port).
pub const DEFAULT_PORT: u16 = 4150;

pub(crate) static STANDARD_DEFAULTS: Lazy<Defaults> = Lazy::new(Defaults::default);

/// Values used to complete a raw [`Endpoint`].
///
/// Only `scheme` and `address` are ever defaulted. Topic and channel are left
/// exactly as parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Defaults {
  pub scheme: String,
  pub address: String,
  pub port: u16,
}

impl Default for Defaults {
  fn default() -> Self {
    Self {
      scheme: DEFAULT_SCHEME.to_string(),
      address: DEFAULT_ADDRESS.to_string(),
      port: DEFAULT_PORT,
    }
  }
}

impl Defaults {
  pub fn with_scheme(mut self, scheme: impl Into<String>) -> Self {
    self.scheme = scheme.into();
    self
  }

  pub fn with_address(mut self, address: impl Into<String>) -> Self {
    self.address = address.into();
    self
  }

  pub fn with_port(mut self, port: u16) -> Self {
    self.port = port;
    self
  }

  /// Fills an empty scheme and address, and completes a host that has no port.
  pub fn apply(&self, mut endpoint: Endpoint) -> Endpoint {
    if endpoint.scheme.is_empty() {
      debug!(scheme = %self.scheme, "Using default scheme");
      endpoint.scheme = self.scheme.clone();
    }

    if endpoint.address.is_empty() {
      debug!(address = %self.address, "Using default address");
      endpoint.address = self.address.clone();
    } else if !has_port(&endpoint.address) {
      debug!(address = %endpoint.address, port = self.port, "Appending default port");
      endpoint.address = format!("{}:{}", endpoint.address, self.port);
    }

    endpoint
  }

  /// Parses `input` and completes it with these defaults.
  pub fn parse(&self, input: &str) -> Result<Endpoint, NsqParseError> {
    parse_raw(input).map(|endpoint| self.apply(endpoint))
  }

  /// Like [`Defaults::parse`], but an empty topic is an error.
  pub fn parse_strict(&self, input: &str) -> Result<Endpoint, NsqParseError> {
    let endpoint = self.parse(input)?;
    if endpoint.topic.is_empty() {
      return Err(NsqParseError::missing_topic(input));
    }
    Ok(endpoint)
  }
}

/// Whether `address` already ends in a port.
///
/// For bracketed IPv6 literals only a `:` after the closing `]` counts.
pub(crate) fn has_port(address: &str) -> bool {
  match address.rfind(']') {
    Some(close) => address[close + 1..].starts_with(':'),
    None => address.contains(':'),
  }
}

// src/channel.rs

use std::borrow::Cow;

use rand::Rng;
use tracing::debug;

use crate::endpoint::Endpoint;

const EPHEMERAL_CHARSET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

/// Number of random characters in front of [`EPHEMERAL_SUFFIX`].
pub const EPHEMERAL_NAME_LEN: usize = 8;
/// nsqd does not persist channels whose name ends with this suffix.
pub const EPHEMERAL_SUFFIX: &str = "#ephemeral";

/// Generates a fresh ephemeral channel name using the thread-local generator.
pub fn ephemeral_channel() -> String {
  ephemeral_channel_with(&mut rand::rng())
}

/// Generates an ephemeral channel name, e.g. `k3x0q9za#ephemeral`, from `rng`.
pub fn ephemeral_channel_with<R: Rng + ?Sized>(rng: &mut R) -> String {
  let mut name = String::with_capacity(EPHEMERAL_NAME_LEN + EPHEMERAL_SUFFIX.len());
  for _ in 0..EPHEMERAL_NAME_LEN {
    let idx = rng.random_range(0..EPHEMERAL_CHARSET.len());
    name.push(EPHEMERAL_CHARSET[idx] as char);
  }
  name.push_str(EPHEMERAL_SUFFIX);
  name
}

impl Endpoint {
  /// The channel a consumer should subscribe to.
  ///
  /// Returns the parsed channel, or a new ephemeral name when none was given.
  /// The generated name is not stored on the endpoint, so every call without a
  /// channel yields a different one.
  pub fn effective_channel(&self) -> Cow<'_, str> {
    if self.channel.is_empty() {
      let name = ephemeral_channel();
      debug!(topic = %self.topic, channel = %name, "Generated ephemeral channel");
      Cow::Owned(name)
    } else {
      Cow::Borrowed(&self.channel)
    }
  }
}

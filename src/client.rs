// src/client.rs

use tracing::debug;

use crate::endpoint::Endpoint;

/// The NSQ client library an [`Endpoint`] is handed to.
///
/// This crate only parses; building and connecting consumers and producers is
/// left to an implementation of this trait. Endpoint fields are passed through
/// verbatim.
pub trait NsqClient {
  /// Client-wide settings shared by consumers and producers.
  type Config;
  type Consumer;
  type Producer;
  type Error;

  /// Builds a consumer subscribed to `topic` on `channel`.
  fn new_consumer(
    &self,
    topic: &str,
    channel: &str,
    config: &Self::Config,
  ) -> Result<Self::Consumer, Self::Error>;

  /// Builds a producer publishing to the nsqd at `address`.
  fn new_producer(&self, address: &str, config: &Self::Config) -> Result<Self::Producer, Self::Error>;

  /// Connects `consumer` directly to the nsqd at `address`.
  fn connect_to_nsqd(&self, consumer: &mut Self::Consumer, address: &str) -> Result<(), Self::Error>;
}

impl Endpoint {
  /// Builds a consumer for this endpoint's topic.
  ///
  /// Without a parsed channel an ephemeral one is generated, see
  /// [`Endpoint::effective_channel`].
  pub fn consumer<C: NsqClient>(&self, client: &C, config: &C::Config) -> Result<C::Consumer, C::Error> {
    let channel = self.effective_channel();
    debug!(topic = %self.topic, channel = %channel, "Creating consumer");
    client.new_consumer(&self.topic, &channel, config)
  }

  /// Connects a consumer to this endpoint's address.
  // TODO: nsqlookupd discovery and multiple addresses per endpoint.
  pub fn connect_consumer<C: NsqClient>(&self, client: &C, consumer: &mut C::Consumer) -> Result<(), C::Error> {
    debug!(address = %self.address, "Connecting consumer to nsqd");
    client.connect_to_nsqd(consumer, &self.address)
  }

  /// Builds a producer for this endpoint's address.
  pub fn producer<C: NsqClient>(&self, client: &C, config: &C::Config) -> Result<C::Producer, C::Error> {
    debug!(address = %self.address, "Creating producer");
    client.new_producer(&self.address, config)
  }
}

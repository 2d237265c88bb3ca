// tests/common.rs
#![allow(dead_code)] // Not every test binary uses every helper

use tracing_subscriber::{EnvFilter, FmtSubscriber};

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

// Can be overridden by RUST_LOG env variable
pub fn setup_tracing() {
  TRACING_INIT.call_once(|| {
    let default_filter = "nsqparse=trace,warn";
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let subscriber = FmtSubscriber::builder()
      .with_max_level(tracing::Level::TRACE)
      .with_env_filter(env_filter)
      .with_target(true)
      .with_line_number(true)
      .with_test_writer() // Write to test output capture
      .finish();

    tracing::subscriber::set_global_default(subscriber).expect("Failed to set global tracing subscriber");
  });
}

/// Asserts every field of `endpoint`, naming the input in the failure message.
pub fn assert_endpoint(input: &str, endpoint: &nsqparse::Endpoint, scheme: &str, address: &str, topic: &str, channel: &str) {
  assert_eq!(endpoint.scheme, scheme, "scheme of {}", input);
  assert_eq!(endpoint.address, address, "address of {}", input);
  assert_eq!(endpoint.topic, topic, "topic of {}", input);
  assert_eq!(endpoint.channel, channel, "channel of {}", input);
}

//! nsqparse - Parse connection strings for NSQ consumers and producers.
//!
//! A connection string names an nsqd address, a topic and optionally a channel:
//!
//! ```text
//! tcp://nsq.server:1234/coolthings/mine
//! nsqd://[fd00::12a5]/v6
//! server:999/woot
//! /solo
//! ```
//!
//! Missing parts are filled from [`Defaults`]: scheme `tcp`, address
//! `localhost:4150`, and port `4150` for a host given without one.
//!
//! ```rust
//! let endpoint = nsqparse::parse_strict("server/woot").unwrap();
//! assert_eq!(endpoint.scheme, "tcp");
//! assert_eq!(endpoint.address, "server:4150");
//! assert_eq!(endpoint.topic, "woot");
//! assert_eq!(endpoint.channel, "");
//! ```

/// Ephemeral channel names.
pub mod channel;
/// Seam to the NSQ client that builds consumers and producers.
pub mod client;
/// Default scheme, address and port.
pub mod defaults;
/// The `Endpoint` record and the parsers producing it.
pub mod endpoint;
/// Custom error types.
pub mod error;

pub use channel::{ephemeral_channel, ephemeral_channel_with};
pub use client::NsqClient;
pub use defaults::{Defaults, DEFAULT_ADDRESS, DEFAULT_PORT, DEFAULT_SCHEME};
pub use endpoint::{parse_raw, parse_strict, parse_with_defaults, Endpoint};
pub use error::NsqParseError;

use nsqparse::{parse_strict, NsqClient};

use std::cell::RefCell;

mod common;

#[derive(Debug, Default)]
struct RecordingConfig {
  max_in_flight: usize,
}

#[derive(Debug)]
struct RecordingConsumer {
  topic: String,
  channel: String,
  max_in_flight: usize,
  connected_to: Option<String>,
}

#[derive(Debug)]
struct RecordingProducer {
  address: String,
}

/// Stands in for a real NSQ client and records what it was asked to build.
#[derive(Default)]
struct RecordingClient {
  refuse_connections: bool,
  calls: RefCell<Vec<String>>,
}

impl NsqClient for RecordingClient {
  type Config = RecordingConfig;
  type Consumer = RecordingConsumer;
  type Producer = RecordingProducer;
  type Error = String;

  fn new_consumer(&self, topic: &str, channel: &str, config: &Self::Config) -> Result<Self::Consumer, Self::Error> {
    self.calls.borrow_mut().push(format!("consumer {} {}", topic, channel));
    Ok(RecordingConsumer {
      topic: topic.to_string(),
      channel: channel.to_string(),
      max_in_flight: config.max_in_flight,
      connected_to: None,
    })
  }

  fn new_producer(&self, address: &str, _config: &Self::Config) -> Result<Self::Producer, Self::Error> {
    self.calls.borrow_mut().push(format!("producer {}", address));
    Ok(RecordingProducer {
      address: address.to_string(),
    })
  }

  fn connect_to_nsqd(&self, consumer: &mut Self::Consumer, address: &str) -> Result<(), Self::Error> {
    self.calls.borrow_mut().push(format!("connect {}", address));
    if self.refuse_connections {
      return Err(format!("connection refused: {}", address));
    }
    consumer.connected_to = Some(address.to_string());
    Ok(())
  }
}

#[test]
fn test_consumer_uses_parsed_topic_and_channel() {
  common::setup_tracing();
  let endpoint = parse_strict("tcp://nsq.server:1234/coolthings/mine").unwrap();
  let client = RecordingClient::default();
  let config = RecordingConfig { max_in_flight: 8 };

  let mut consumer = endpoint.consumer(&client, &config).unwrap();
  assert_eq!(consumer.topic, "coolthings");
  assert_eq!(consumer.channel, "mine");
  assert_eq!(consumer.max_in_flight, 8);

  endpoint.connect_consumer(&client, &mut consumer).unwrap();
  assert_eq!(consumer.connected_to.as_deref(), Some("nsq.server:1234"));
  assert_eq!(
    *client.calls.borrow(),
    vec!["consumer coolthings mine".to_string(), "connect nsq.server:1234".to_string()]
  );
}

#[test]
fn test_consumer_without_channel_gets_ephemeral_one() {
  common::setup_tracing();
  let endpoint = parse_strict("server/woot").unwrap();
  let client = RecordingClient::default();

  let consumer = endpoint.consumer(&client, &RecordingConfig::default()).unwrap();
  assert_eq!(consumer.topic, "woot");
  assert!(consumer.channel.ends_with("#ephemeral"));
  assert_eq!(consumer.channel.len(), 8 + "#ephemeral".len());
  assert!(endpoint.channel.is_empty());
}

#[test]
fn test_producer_uses_completed_address() {
  let endpoint = parse_strict("nsqd://[fd00::12a5]/v6").unwrap();
  let client = RecordingClient::default();

  let producer = endpoint.producer(&client, &RecordingConfig::default()).unwrap();
  assert_eq!(producer.address, "[fd00::12a5]:4150");
}

#[test]
fn test_connect_errors_are_passed_through() {
  let endpoint = parse_strict("/solo").unwrap();
  let client = RecordingClient {
    refuse_connections: true,
    ..RecordingClient::default()
  };

  let mut consumer = endpoint.consumer(&client, &RecordingConfig::default()).unwrap();
  let err = endpoint.connect_consumer(&client, &mut consumer).unwrap_err();
  assert_eq!(err, "connection refused: localhost:4150");
  assert!(consumer.connected_to.is_none());
}

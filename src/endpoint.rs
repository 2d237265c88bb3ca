// src/endpoint.rs

use std::borrow::Cow;
use std::fmt;
use std::net::Ipv4Addr;
use std::str::FromStr;

use percent_encoding::percent_decode_str;
use tracing::trace;
use url::Url;

use crate::defaults::STANDARD_DEFAULTS;
use crate::error::NsqParseError;

/// Non-special scheme the authority is checked under, so `url` applies no
/// scheme-specific defaults to it.
const AUTHORITY_CHECK_SCHEME: &str = "nsq";

/// A parsed NSQ endpoint.
///
/// Produced fresh by every parse call. Before defaults are applied `scheme` and
/// `address` may be empty; afterwards they never are. An empty `channel` means
/// an ephemeral one is generated when a consumer is built.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Endpoint {
  pub scheme: String,
  pub address: String,
  pub topic: String,
  pub channel: String,
}

/// Generic decomposition of a URI reference. Text is kept as written, apart
/// from the lowercased scheme and the percent-decoded path.
#[derive(Debug, Default, PartialEq, Eq)]
struct Parts<'a> {
  scheme: String,
  /// `host[:port]` with any user info removed. `None` when absent or empty.
  authority: Option<&'a str>,
  /// Everything after `scheme:` when no `/` follows the colon.
  opaque: &'a str,
  path: Cow<'a, str>,
}

/// Splits off a leading `scheme:`. Input that does not start with a valid
/// scheme has none; a bare leading `:` is an error.
fn split_scheme(raw: &str) -> Result<(String, &str), &'static str> {
  for (i, b) in raw.bytes().enumerate() {
    match b {
      b'a'..=b'z' | b'A'..=b'Z' => {}
      b'0'..=b'9' | b'+' | b'-' | b'.' if i > 0 => {}
      b':' if i == 0 => return Err("missing protocol scheme"),
      b':' => return Ok((raw[..i].to_ascii_lowercase(), &raw[i + 1..])),
      _ => break,
    }
  }
  Ok((String::new(), raw))
}

/// Every `%` must start a two-digit hex escape.
fn has_valid_escapes(raw: &str) -> bool {
  raw
    .split('%')
    .skip(1)
    .all(|chunk| chunk.len() >= 2 && chunk.as_bytes()[..2].iter().all(u8::is_ascii_hexdigit))
}

/// `10.9.8.7:4160`, the one colon-bearing first segment accepted without a scheme.
fn is_ipv4_with_port(segment: &str) -> bool {
  segment.rsplit_once(':').map_or(false, |(host, port)| {
    host.parse::<Ipv4Addr>().is_ok() && !port.is_empty() && port.bytes().all(|b| b.is_ascii_digit())
  })
}

fn decompose(input: &str) -> Result<Parts<'_>, NsqParseError> {
  let invalid = |reason: &str| NsqParseError::invalid_endpoint(input, reason);

  if input.bytes().any(|b| b.is_ascii_control()) {
    return Err(invalid("invalid control character"));
  }

  let rest = input.split_once('#').map_or(input, |(before, _)| before);
  let (scheme, rest) = split_scheme(rest).map_err(invalid)?;
  let rest = rest.split_once('?').map_or(rest, |(before, _)| before);

  if !scheme.is_empty() && !rest.starts_with('/') {
    return Ok(Parts {
      scheme,
      opaque: rest,
      ..Parts::default()
    });
  }

  if scheme.is_empty() {
    let first = rest.split('/').next().unwrap_or_default();
    if first.contains(':') && !is_ipv4_with_port(first) {
      return Err(invalid("first path segment cannot contain colon"));
    }
  }

  let (authority, path) = if rest.starts_with("//") && (!scheme.is_empty() || !rest.starts_with("///")) {
    let after = &rest[2..];
    let end = after.find('/').unwrap_or(after.len());
    (Some(&after[..end]), &after[end..])
  } else {
    (None, rest)
  };

  let authority = authority
    .map(|raw| raw.rsplit_once('@').map_or(raw, |(_, host)| host))
    .filter(|host| !host.is_empty());
  if let Some(host) = authority {
    Url::parse(&format!("{}://{}/", AUTHORITY_CHECK_SCHEME, host))
      .map_err(|source| NsqParseError::invalid_authority(input, source))?;
  }

  if !has_valid_escapes(path) {
    return Err(invalid("invalid URL escape"));
  }
  let path = percent_decode_str(path)
    .decode_utf8()
    .map_err(|_| invalid("escaped path is not valid UTF-8"))?;

  Ok(Parts {
    scheme,
    authority,
    opaque: "",
    path,
  })
}

fn next_segment<'a>(segments: &mut impl Iterator<Item = &'a str>) -> String {
  segments.next().unwrap_or_default().to_string()
}

/// Parses an endpoint string without filling in any defaults.
///
/// Three shapes are recognised:
/// - `scheme://host[:port]/topic/channel`: the authority, as written, becomes
///   the address.
/// - `scheme:host/topic/channel` (no `//`): the scheme is folded into the
///   address (`scheme:host`) and the scheme field is left empty. This is what
///   makes `server:999/woot` mean host `server`, port `999`.
/// - a path such as `/topic` or `host/topic/channel`: the first segment is the
///   address.
///
/// Paths are percent-decoded; `.` and `..` segments are kept as they are.
/// Segments past the channel are ignored.
pub fn parse_raw(input: &str) -> Result<Endpoint, NsqParseError> {
  let parts = decompose(input.trim())?;
  let mut endpoint = Endpoint::default();

  if let Some(authority) = parts.authority {
    trace!(input, "Parsing authority-form endpoint");
    endpoint.scheme = parts.scheme;
    endpoint.address = authority.to_string();

    let mut segments = parts.path.trim_matches('/').split('/');
    endpoint.topic = next_segment(&mut segments);
    endpoint.channel = next_segment(&mut segments);
  } else if !parts.opaque.is_empty() {
    trace!(input, "Parsing opaque-form endpoint");
    let mut segments = parts.opaque.trim_end_matches('/').split('/');
    endpoint.address = format!("{}:{}", parts.scheme, next_segment(&mut segments));
    endpoint.topic = next_segment(&mut segments);
    endpoint.channel = next_segment(&mut segments);
  } else {
    trace!(input, "Parsing path-form endpoint");
    endpoint.scheme = parts.scheme;

    let mut segments = parts.path.trim_end_matches('/').split('/');
    endpoint.address = next_segment(&mut segments);
    endpoint.topic = next_segment(&mut segments);
    endpoint.channel = next_segment(&mut segments);
  }

  Ok(endpoint)
}

/// Parses an endpoint string and fills in the default scheme, address and port.
pub fn parse_with_defaults(input: &str) -> Result<Endpoint, NsqParseError> {
  STANDARD_DEFAULTS.parse(input)
}

/// Like [`parse_with_defaults`], but fails with
/// [`NsqParseError::MissingTopic`] when no topic was given.
pub fn parse_strict(input: &str) -> Result<Endpoint, NsqParseError> {
  STANDARD_DEFAULTS.parse_strict(input)
}

impl Endpoint {
  /// Same as [`parse_raw`].
  pub fn parse_raw(input: &str) -> Result<Self, NsqParseError> {
    parse_raw(input)
  }

  /// Same as [`parse_with_defaults`].
  pub fn parse(input: &str) -> Result<Self, NsqParseError> {
    parse_with_defaults(input)
  }

  /// Same as [`parse_strict`].
  pub fn parse_strict(input: &str) -> Result<Self, NsqParseError> {
    parse_strict(input)
  }
}

impl FromStr for Endpoint {
  type Err = NsqParseError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    parse_with_defaults(s)
  }
}

/// Canonical `scheme://address/topic/channel` form. Empty trailing parts are
/// left out. Parsing the output of a defaulted endpoint with a topic gives the
/// same endpoint back.
impl fmt::Display for Endpoint {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}://{}", self.scheme, self.address)?;
    if !self.topic.is_empty() || !self.channel.is_empty() {
      write!(f, "/{}", self.topic)?;
    }
    if !self.channel.is_empty() {
      write!(f, "/{}", self.channel)?;
    }
    Ok(())
  }
}

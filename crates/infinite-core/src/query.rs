//! Read queries resolved from `/api/latest` and `/api/hubble` parameters.

/// Smallest page the time-ordered query returns.
pub const MIN_LIMIT: u32 = 1;
/// Largest page the time-ordered query returns.
pub const MAX_LIMIT: u32 = 100;
/// Page size used when none is configured.
pub const DEFAULT_LIMIT: u32 = 5;
/// Hubble page size used when none is configured.
pub const HUBBLE_DEFAULT_LIMIT: u32 = 12;

/// A single read against the content store. The two arms never combine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LatestQuery {
  /// Point lookup by primary key.
  ByDate(String),
  /// The `n` most recent records, newest first.
  Latest(u32),
}

impl LatestQuery {
  /// Build a query from raw request parameters.
  ///
  /// A non-empty `date` selects the point lookup and `limit` is ignored.
  /// Otherwise `limit` is resolved with [`effective_limit`].
  pub fn from_params(
    date: Option<&str>,
    limit: Option<&str>,
    default_limit: u32,
  ) -> Self {
    match date.filter(|d| !d.is_empty()) {
      Some(d) => Self::ByDate(d.to_owned()),
      None => Self::Latest(effective_limit(limit, default_limit)),
    }
  }
}

/// A page of the Hubble partition, optionally narrowed to one `guid`.
///
/// The `guid` filter applies to the page already read, so an item older than
/// the newest `limit` items is not found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HubbleQuery {
  pub limit: u32,
  pub guid:  Option<String>,
}

impl HubbleQuery {
  pub fn from_params(limit: Option<&str>, guid: Option<&str>, default_limit: u32) -> Self {
    Self {
      limit: effective_limit(limit, default_limit),
      guid:  guid.filter(|g| !g.is_empty()).map(str::to_owned),
    }
  }
}

/// Resolve the page size for a raw `limit` parameter.
///
/// Missing or non-numeric input falls back to `default_limit`. The result is
/// always clamped to `[MIN_LIMIT, MAX_LIMIT]`.
pub fn effective_limit(raw: Option<&str>, default_limit: u32) -> u32 {
  let requested = raw
    .and_then(parse_int_prefix)
    .unwrap_or(i64::from(default_limit));
  requested.clamp(i64::from(MIN_LIMIT), i64::from(MAX_LIMIT)) as u32
}

/// Read a leading decimal integer: surrounding whitespace and an optional
/// sign are accepted, anything after the digits is ignored. Saturates on
/// overflow. `None` when no digit follows the sign.
fn parse_int_prefix(raw: &str) -> Option<i64> {
  let s = raw.trim();
  let (negative, rest) = match s.as_bytes().first() {
    Some(b'-') => (true, &s[1..]),
    Some(b'+') => (false, &s[1..]),
    _ => (false, s),
  };

  let digits: Vec<i64> = rest
    .bytes()
    .take_while(u8::is_ascii_digit)
    .map(|b| i64::from(b - b'0'))
    .collect();
  if digits.is_empty() {
    return None;
  }

  let magnitude = digits
    .into_iter()
    .fold(0_i64, |acc, d| acc.saturating_mul(10).saturating_add(d));
  Some(if negative { -magnitude } else { magnitude })
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn missing_limit_uses_default() {
    assert_eq!(effective_limit(None, DEFAULT_LIMIT), 5);
    assert_eq!(effective_limit(None, 12), 12);
  }

  #[test]
  fn non_numeric_limit_uses_default() {
    assert_eq!(effective_limit(Some("abc"), DEFAULT_LIMIT), 5);
    assert_eq!(effective_limit(Some(""), DEFAULT_LIMIT), 5);
    assert_eq!(effective_limit(Some("-"), DEFAULT_LIMIT), 5);
  }

  #[test]
  fn limit_is_clamped() {
    assert_eq!(effective_limit(Some("500"), DEFAULT_LIMIT), 100);
    assert_eq!(effective_limit(Some("0"), DEFAULT_LIMIT), 1);
    assert_eq!(effective_limit(Some("-7"), DEFAULT_LIMIT), 1);
    assert_eq!(
      effective_limit(Some("99999999999999999999999"), DEFAULT_LIMIT),
      100
    );
  }

  #[test]
  fn limit_reads_leading_integer() {
    assert_eq!(effective_limit(Some(" 12 "), DEFAULT_LIMIT), 12);
    assert_eq!(effective_limit(Some("12abc"), DEFAULT_LIMIT), 12);
    assert_eq!(effective_limit(Some("3.9"), DEFAULT_LIMIT), 3);
    assert_eq!(effective_limit(Some("+8"), DEFAULT_LIMIT), 8);
  }

  #[test]
  fn out_of_range_default_is_clamped_too() {
    assert_eq!(effective_limit(None, 0), 1);
    assert_eq!(effective_limit(Some("x"), 1000), 100);
  }

  #[test]
  fn date_selects_point_lookup_and_ignores_limit() {
    assert_eq!(
      LatestQuery::from_params(Some("2025-01-03"), Some("50"), DEFAULT_LIMIT),
      LatestQuery::ByDate("2025-01-03".into())
    );
  }

  #[test]
  fn empty_date_falls_back_to_latest() {
    assert_eq!(
      LatestQuery::from_params(Some(""), Some("3"), DEFAULT_LIMIT),
      LatestQuery::Latest(3)
    );
    assert_eq!(
      LatestQuery::from_params(None, None, DEFAULT_LIMIT),
      LatestQuery::Latest(5)
    );
  }

  #[test]
  fn hubble_query_defaults_and_guid() {
    assert_eq!(
      HubbleQuery::from_params(None, None, HUBBLE_DEFAULT_LIMIT),
      HubbleQuery { limit: 12, guid: None }
    );
    assert_eq!(
      HubbleQuery::from_params(Some("250"), Some("potw2450a"), HUBBLE_DEFAULT_LIMIT),
      HubbleQuery { limit: 100, guid: Some("potw2450a".into()) }
    );
    assert_eq!(
      HubbleQuery::from_params(Some("3"), Some(""), HUBBLE_DEFAULT_LIMIT).guid,
      None
    );
  }
}

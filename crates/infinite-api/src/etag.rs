//! Weak ETag computation for `/api/latest` result sets.
//!
//! The validator covers the set of dates in a result and its length. Dates are
//! sorted before hashing, so the order records come back in does not matter.
//! The first 64 bits of a SHA-256 digest over the comma-joined dates keep the
//! tag short; it guards cache freshness only, not integrity.

use infinite_core::record::ContentRecord;
use sha2::{Digest, Sha256};

/// Compute the weak ETag for a result set, e.g. `W/"3f1c09d2b7a4e811-3"`.
pub fn compute_etag(records: &[ContentRecord]) -> String {
  let mut dates: Vec<&str> = records
    .iter()
    .map(|r| r.date.as_str())
    .filter(|d| !d.is_empty())
    .collect();
  compute_etag_from_dates(&mut dates, records.len())
}

/// Compute the ETag directly from dates and a result count.
///
/// The slice is sorted in-place for determinism.
pub fn compute_etag_from_dates(dates: &mut [&str], count: usize) -> String {
  dates.sort_unstable();
  let canonical = dates.join(",");
  let digest = Sha256::digest(canonical.as_bytes());
  format!("W/\"{}-{count}\"", hex::encode(&digest[..8]))
}

#[cfg(test)]
mod tests {
  use super::*;

  fn record(date: &str) -> ContentRecord {
    ContentRecord {
      date:            date.to_owned(),
      title_sk:        None,
      image_url:       None,
      hd_image_url:    None,
      cached_image:    None,
      media_type:      None,
      seo_keywords:    vec![],
      slovak_article:  None,
      content_quality: None,
    }
  }

  #[test]
  fn result_order_does_not_matter() {
    let newest_first = [record("2025-01-05"), record("2025-01-04"), record("2025-01-03")];
    let oldest_first = [record("2025-01-03"), record("2025-01-04"), record("2025-01-05")];
    assert_eq!(compute_etag(&newest_first), compute_etag(&oldest_first));
  }

  #[test]
  fn computing_twice_is_stable() {
    let records = [record("2025-01-01"), record("2025-01-02")];
    assert_eq!(compute_etag(&records), compute_etag(&records));
  }

  #[test]
  fn different_dates_change_etag() {
    let a = [record("2025-01-01")];
    let b = [record("2025-01-02")];
    assert_ne!(compute_etag(&a), compute_etag(&b));
  }

  #[test]
  fn count_is_part_of_the_tag() {
    let mut dates = ["2025-01-01"];
    let one = compute_etag_from_dates(&mut dates, 1);
    let two = compute_etag_from_dates(&mut dates, 2);
    assert_ne!(one, two);
    assert!(one.ends_with("-1\""), "{one}");
  }

  #[test]
  fn weak_validator_format() {
    let tag = compute_etag(&[record("2025-01-05")]);
    assert!(tag.starts_with("W/\""), "{tag}");
    assert!(tag.ends_with('"'), "{tag}");
    let inner = &tag[3..tag.len() - 1];
    let (hash, count) = inner.split_once('-').unwrap();
    assert_eq!(hash.len(), 16);
    assert!(hash.chars().all(|c| c.is_ascii_hexdigit()));
    assert_eq!(count, "1");
  }

  #[test]
  fn empty_result_has_a_tag() {
    assert_eq!(compute_etag(&[]), "W/\"e3b0c44298fc1c14-0\"");
  }
}

//! Content records: the public, normalized shape of one day's entry.
//!
//! A record is keyed by its calendar `date`. Ingestion writes it as a raw
//! [`Item`]; readers project that item into a [`ContentRecord`] with
//! [`ContentRecord::from_item`]. Projection renames stored attributes
//! (`slovakTitle` → `titleSk`), defaults list fields to empty, omits absent
//! optional fields and coerces numeric attributes.

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::{
  Error, Result,
  attribute::{AttributeValue, Item, string_attr},
};

// ─── Stored attribute names ──────────────────────────────────────────────────

pub const ATTR_PARTITION: &str = "pk";
pub const ATTR_DATE: &str = "date";
pub const ATTR_TITLE: &str = "slovakTitle";
pub const ATTR_ARTICLE: &str = "slovakArticle";
pub const ATTR_IMAGE_URL: &str = "imageUrl";
pub const ATTR_HD_IMAGE_URL: &str = "hdImageUrl";
pub const ATTR_CACHED_IMAGE: &str = "cachedImage";
pub const ATTR_MEDIA_TYPE: &str = "mediaType";
pub const ATTR_SEO_KEYWORDS: &str = "seoKeywords";
pub const ATTR_CONTENT_QUALITY: &str = "contentQuality";

/// Format of the `date` key. Lexicographic order equals calendar order.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

// ─── Media type ──────────────────────────────────────────────────────────────

/// The upstream media kind of a record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum MediaType {
  Image,
  Video,
  /// Any other upstream kind, kept verbatim.
  Other(String),
}

impl MediaType {
  pub fn as_str(&self) -> &str {
    match self {
      Self::Image => "image",
      Self::Video => "video",
      Self::Other(s) => s,
    }
  }
}

impl From<String> for MediaType {
  fn from(s: String) -> Self {
    match s.as_str() {
      "image" => Self::Image,
      "video" => Self::Video,
      _ => Self::Other(s),
    }
  }
}

impl From<MediaType> for String {
  fn from(m: MediaType) -> Self {
    match m {
      MediaType::Other(s) => s,
      other => other.as_str().to_owned(),
    }
  }
}

// ─── Cached image ────────────────────────────────────────────────────────────

/// A locally mirrored copy of the record's image.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CachedImage {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub bucket:       Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub key:          Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub url:          Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub content_type: Option<String>,
  /// The upstream URL the copy was made from.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub original_url: Option<String>,
}

impl CachedImage {
  fn from_map(map: &Item) -> Self {
    let get = |name: &str| string_attr(map, name).map(str::to_owned);
    Self {
      bucket:       get("bucket"),
      key:          get("key"),
      url:          get("url"),
      content_type: get("contentType"),
      original_url: get("originalUrl"),
    }
  }

  fn to_map(&self) -> Item {
    let mut map = Item::new();
    let fields = [
      ("bucket", &self.bucket),
      ("key", &self.key),
      ("url", &self.url),
      ("contentType", &self.content_type),
      ("originalUrl", &self.original_url),
    ];
    for (name, value) in fields {
      if let Some(v) = value {
        map.insert(name.to_owned(), AttributeValue::S(v.clone()));
      }
    }
    map
  }
}

// ─── ContentRecord ───────────────────────────────────────────────────────────

/// One day's content: APOD imagery plus the Slovak article written for it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentRecord {
  /// ISO calendar date; the record's sole identity.
  pub date:            String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub title_sk:        Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub image_url:       Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub hd_image_url:    Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub cached_image:    Option<CachedImage>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub media_type:      Option<MediaType>,
  /// Insertion order is preserved; duplicates are allowed.
  #[serde(default)]
  pub seo_keywords:    Vec<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub slovak_article:  Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub content_quality: Option<f64>,
}

impl ContentRecord {
  /// Project a raw stored item into the public record shape.
  ///
  /// Fails when the item has no string `date` or when a numeric attribute
  /// does not hold a finite number.
  pub fn from_item(item: &Item) -> Result<Self> {
    let date = string_attr(item, ATTR_DATE)
      .ok_or(Error::MissingAttribute(ATTR_DATE))?
      .to_owned();
    let text = |name: &str| string_attr(item, name).map(str::to_owned);

    let seo_keywords = item
      .get(ATTR_SEO_KEYWORDS)
      .and_then(AttributeValue::as_l)
      .map(|list| {
        list
          .iter()
          .filter_map(AttributeValue::as_s)
          .filter(|s| !s.is_empty())
          .map(str::to_owned)
          .collect()
      })
      .unwrap_or_default();

    let content_quality = item
      .get(ATTR_CONTENT_QUALITY)
      .and_then(AttributeValue::as_n)
      .map(|n| parse_number(ATTR_CONTENT_QUALITY, n))
      .transpose()?;

    Ok(Self {
      date,
      title_sk: text(ATTR_TITLE),
      image_url: text(ATTR_IMAGE_URL),
      hd_image_url: text(ATTR_HD_IMAGE_URL),
      cached_image: item
        .get(ATTR_CACHED_IMAGE)
        .and_then(AttributeValue::as_m)
        .map(CachedImage::from_map),
      media_type: text(ATTR_MEDIA_TYPE).map(MediaType::from),
      seo_keywords,
      slovak_article: text(ATTR_ARTICLE),
      content_quality,
    })
  }

  /// Marshal the record into a stored item placed in `partition` of the
  /// time-ordered index. Inverse of [`ContentRecord::from_item`] for every
  /// projected attribute.
  pub fn to_item(&self, partition: &str) -> Item {
    let mut item = Item::new();
    item.insert(ATTR_PARTITION.to_owned(), partition.into());
    item.insert(ATTR_DATE.to_owned(), self.date.as_str().into());

    let texts = [
      (ATTR_TITLE, &self.title_sk),
      (ATTR_IMAGE_URL, &self.image_url),
      (ATTR_HD_IMAGE_URL, &self.hd_image_url),
      (ATTR_ARTICLE, &self.slovak_article),
    ];
    for (name, value) in texts {
      if let Some(v) = value {
        item.insert(name.to_owned(), v.as_str().into());
      }
    }

    if let Some(media) = &self.media_type {
      item.insert(ATTR_MEDIA_TYPE.to_owned(), media.as_str().into());
    }
    if let Some(cached) = &self.cached_image {
      item.insert(ATTR_CACHED_IMAGE.to_owned(), AttributeValue::M(cached.to_map()));
    }
    item.insert(
      ATTR_SEO_KEYWORDS.to_owned(),
      AttributeValue::L(
        self.seo_keywords.iter().map(|k| k.as_str().into()).collect(),
      ),
    );
    if let Some(q) = self.content_quality {
      item.insert(ATTR_CONTENT_QUALITY.to_owned(), AttributeValue::number(q));
    }
    item
  }
}

fn parse_number(attribute: &'static str, raw: &str) -> Result<f64> {
  raw
    .trim()
    .parse::<f64>()
    .ok()
    .filter(|n| n.is_finite())
    .ok_or_else(|| Error::InvalidNumber {
      attribute,
      value: raw.to_owned(),
    })
}

/// Parse a record key, accepting only the canonical `YYYY-MM-DD` form.
pub fn parse_date(s: &str) -> Result<NaiveDate> {
  NaiveDate::parse_from_str(s, DATE_FORMAT)
    .ok()
    .filter(|d| d.format(DATE_FORMAT).to_string() == s)
    .ok_or_else(|| Error::InvalidDate(s.to_owned()))
}

/// Validate a store key. APOD records are keyed by canonical `YYYY-MM-DD`
/// dates; feeds that publish at a time of day (Hubble) use a UTC RFC 3339
/// timestamp ending in `Z`, which still sorts chronologically as a string.
pub fn validate_key(s: &str) -> Result<()> {
  if parse_date(s).is_ok() {
    return Ok(());
  }
  DateTime::parse_from_rfc3339(s)
    .ok()
    .filter(|_| s.ends_with('Z'))
    .map(|_| ())
    .ok_or_else(|| Error::InvalidKey(s.to_owned()))
}

#[cfg(test)]
mod tests {
  use super::*;

  fn raw_item() -> Item {
    let raw = r#"{
      "pk":            { "S": "LATEST" },
      "date":          { "S": "2025-01-05" },
      "slovakTitle":   { "S": "Hmlovina Orol" },
      "slovakArticle": { "S": "Dnešný snímok ukazuje..." },
      "imageUrl":      { "S": "https://apod.nasa.gov/apod/image/eagle.jpg" },
      "hdImageUrl":    { "S": "https://apod.nasa.gov/apod/image/eagle_hd.jpg" },
      "mediaType":     { "S": "image" },
      "cachedImage":   { "M": {
        "bucket":      { "S": "infinite-images" },
        "key":         { "S": "apod/2025-01-05.jpg" },
        "url":         { "S": "https://cdn.example/apod/2025-01-05.jpg" },
        "contentType": { "S": "image/jpeg" },
        "originalUrl": { "S": "https://apod.nasa.gov/apod/image/eagle.jpg" }
      } },
      "seoKeywords":   { "L": [
        { "S": "hmlovina" }, { "S": "" }, { "N": "3" }, { "S": "vesmír" }, { "S": "hmlovina" }
      ] },
      "contentQuality": { "N": "87.5" },
      "originalTitle": { "S": "The Eagle Nebula" }
    }"#;
    serde_json::from_str(raw).unwrap()
  }

  #[test]
  fn projects_full_item() {
    let record = ContentRecord::from_item(&raw_item()).unwrap();
    assert_eq!(record.date, "2025-01-05");
    assert_eq!(record.title_sk.as_deref(), Some("Hmlovina Orol"));
    assert_eq!(record.media_type, Some(MediaType::Image));
    assert_eq!(record.content_quality, Some(87.5));

    let cached = record.cached_image.as_ref().unwrap();
    assert_eq!(cached.bucket.as_deref(), Some("infinite-images"));
    assert_eq!(cached.content_type.as_deref(), Some("image/jpeg"));
  }

  #[test]
  fn keywords_keep_order_and_duplicates_but_drop_non_strings() {
    let record = ContentRecord::from_item(&raw_item()).unwrap();
    assert_eq!(record.seo_keywords, vec!["hmlovina", "vesmír", "hmlovina"]);
  }

  #[test]
  fn minimal_item_omits_absent_fields() {
    let mut item = Item::new();
    item.insert(ATTR_DATE.into(), "2025-01-01".into());

    let record = ContentRecord::from_item(&item).unwrap();
    assert!(record.seo_keywords.is_empty());

    let json = serde_json::to_value(&record).unwrap();
    let obj = json.as_object().unwrap();
    assert_eq!(obj.len(), 2, "unexpected keys: {obj:?}");
    assert_eq!(json["date"], "2025-01-01");
    assert_eq!(json["seoKeywords"], serde_json::json!([]));
    assert!(!obj.contains_key("cachedImage"));
    assert!(!obj.contains_key("contentQuality"));
  }

  #[test]
  fn json_uses_public_field_names() {
    let record = ContentRecord::from_item(&raw_item()).unwrap();
    let json = serde_json::to_value(&record).unwrap();
    assert_eq!(json["titleSk"], "Hmlovina Orol");
    assert_eq!(json["hdImageUrl"], "https://apod.nasa.gov/apod/image/eagle_hd.jpg");
    assert_eq!(json["mediaType"], "image");
    assert_eq!(json["cachedImage"]["originalUrl"], "https://apod.nasa.gov/apod/image/eagle.jpg");
    assert!(json.get("originalTitle").is_none());
    assert!(json.get("slovakTitle").is_none());
  }

  #[test]
  fn missing_date_is_malformed() {
    let mut item = raw_item();
    item.remove(ATTR_DATE);
    assert!(matches!(
      ContentRecord::from_item(&item),
      Err(Error::MissingAttribute("date"))
    ));
  }

  #[test]
  fn non_numeric_quality_is_malformed() {
    let mut item = raw_item();
    item.insert(ATTR_CONTENT_QUALITY.into(), AttributeValue::N("high".into()));
    assert!(matches!(
      ContentRecord::from_item(&item),
      Err(Error::InvalidNumber { attribute: "contentQuality", .. })
    ));
  }

  #[test]
  fn unknown_media_type_is_kept_verbatim() {
    let mut item = raw_item();
    item.insert(ATTR_MEDIA_TYPE.into(), "other".into());
    let record = ContentRecord::from_item(&item).unwrap();
    assert_eq!(record.media_type, Some(MediaType::Other("other".into())));
    assert_eq!(serde_json::to_value(&record).unwrap()["mediaType"], "other");
  }

  #[test]
  fn to_item_projects_back_to_the_same_record() {
    let record = ContentRecord::from_item(&raw_item()).unwrap();
    let item = record.to_item("LATEST");
    assert_eq!(string_attr(&item, ATTR_PARTITION), Some("LATEST"));
    assert_eq!(string_attr(&item, ATTR_TITLE), Some("Hmlovina Orol"));
    assert_eq!(ContentRecord::from_item(&item).unwrap(), record);
  }

  #[test]
  fn parse_date_accepts_only_canonical_form() {
    assert!(parse_date("2025-01-05").is_ok());
    assert!(parse_date("2025-1-5").is_err());
    assert!(parse_date("2025-02-30").is_err());
    assert!(parse_date("05.01.2025").is_err());
  }

  #[test]
  fn keys_are_dates_or_utc_timestamps() {
    assert!(validate_key("2025-01-05").is_ok());
    assert!(validate_key("2024-12-16T06:00:00.000Z").is_ok());
    assert!(validate_key("2024-12-16T06:00:00Z").is_ok());
    assert!(matches!(
      validate_key("2024-12-16T07:00:00+01:00"),
      Err(Error::InvalidKey(_))
    ));
    assert!(matches!(validate_key("5.1.2025"), Err(Error::InvalidKey(_))));
  }
}

//! Hubble picture-of-the-week records, read from their own index partition.
//!
//! Hubble items share the content table with APOD records but carry the feed's
//! own fields. They are keyed by their UTC publication timestamp.

use serde::Serialize;
use serde_json::Value;

use crate::{
  Result,
  attribute::{AttributeValue, Item, string_attr},
};

/// Partition value Hubble items are indexed under.
pub const HUBBLE_PARTITION: &str = "HUBBLE";

// ─── Stored attribute names ──────────────────────────────────────────────────

pub const ATTR_GUID: &str = "guid";
pub const ATTR_HEADLINE: &str = "headline";
pub const ATTR_ORIGINAL_TITLE: &str = "originalTitle";
pub const ATTR_IMAGE_VARIANTS: &str = "imageVariants";
pub const ATTR_SEO_ARTICLE: &str = "seoArticle";

// ─── HubbleRecord ────────────────────────────────────────────────────────────

/// Public shape of one Hubble item.
///
/// Field names follow the feed (`image_main`, `credit_raw`) alongside the
/// generated SEO fields (`headlineEN`, `seoKeywords`).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HubbleRecord {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub guid:            Option<String>,
  /// The generated headline, else the feed title.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub title:           Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub link:            Option<String>,
  #[serde(rename = "pubDate", skip_serializing_if = "Option::is_none")]
  pub pub_date:        Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub description:     Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub excerpt:         Option<String>,
  pub category:        Vec<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub image_main:      Option<String>,
  /// Smaller renditions as stored, e.g. `{url, type, width, height}`.
  pub image_variants:  Vec<Value>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub credit_raw:      Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub copyright_raw:   Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub credit_fallback: Option<String>,
  pub keywords:        Vec<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub headline:        Option<String>,
  #[serde(rename = "headlineEN", skip_serializing_if = "Option::is_none")]
  pub headline_en:     Option<String>,
  #[serde(rename = "slovakArticle", skip_serializing_if = "Option::is_none")]
  pub slovak_article:  Option<String>,
  #[serde(rename = "seoKeywords", skip_serializing_if = "Option::is_none")]
  pub seo_keywords:    Option<Vec<String>>,
  #[serde(rename = "contentQuality", skip_serializing_if = "Option::is_none")]
  pub content_quality: Option<Value>,
  #[serde(rename = "seoArticle", skip_serializing_if = "Option::is_none")]
  pub seo_article:     Option<Value>,
}

impl HubbleRecord {
  /// Project a raw stored item. Fails only when a numeric attribute does not
  /// hold a number.
  pub fn from_item(item: &Item) -> Result<Self> {
    let text = |name: &str| string_attr(item, name).map(str::to_owned);
    let strings = |name: &str| {
      item
        .get(name)
        .and_then(AttributeValue::as_l)
        .map(|list| {
          list
            .iter()
            .filter_map(AttributeValue::as_s)
            .map(str::to_owned)
            .collect::<Vec<_>>()
        })
    };
    let json = |name: &'static str| {
      item.get(name).map(|v| v.to_json(name)).transpose()
    };

    let headline = text(ATTR_HEADLINE);
    let image_variants = match json(ATTR_IMAGE_VARIANTS)? {
      Some(Value::Array(variants)) => variants,
      _ => Vec::new(),
    };

    Ok(Self {
      guid: text(ATTR_GUID),
      title: headline.clone().or_else(|| text(ATTR_ORIGINAL_TITLE)),
      link: text("link"),
      pub_date: text("pubDate"),
      description: text("originalDescription"),
      excerpt: text("originalExcerpt"),
      category: strings("category").unwrap_or_default(),
      image_main: text("imageUrl"),
      image_variants,
      credit_raw: text("creditRaw"),
      copyright_raw: text("copyrightRaw"),
      credit_fallback: text("creditFallback"),
      keywords: strings("keywords").unwrap_or_default(),
      headline,
      headline_en: text("headlineEN"),
      slovak_article: text("slovakArticle"),
      seo_keywords: strings("seoKeywords"),
      content_quality: json("contentQuality")?,
      seo_article: json(ATTR_SEO_ARTICLE)?,
    })
  }
}

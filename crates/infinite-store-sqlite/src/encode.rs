//! Encoding between stored items and the `item_json` column.
//!
//! Items are kept whole as compact JSON in their attribute-value shape, so
//! attributes the projection does not read survive a round trip untouched.

use infinite_core::attribute::Item;

use crate::Result;

pub fn encode_item(item: &Item) -> Result<String> {
  Ok(serde_json::to_string(item)?)
}

pub fn decode_item(s: &str) -> Result<Item> { Ok(serde_json::from_str(s)?) }

//! The `ContentStore` trait.
//!
//! The trait is implemented by storage backends (e.g. `infinite-store-sqlite`).
//! The API layer depends on this abstraction, not on any concrete backend.

use std::future::Future;

use crate::attribute::Item;

/// Abstraction over the key-value table holding one item per key.
///
/// Items are keyed by their `date` string attribute. Items carrying a `pk`
/// attribute are also entered in a time-ordered secondary index, partitioned
/// by `pk` and sorted by `date`.
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes (e.g. tokio with `axum`).
pub trait ContentStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Point lookup by primary key. Returns `None` if no item has this date.
  fn get_item<'a>(
    &'a self,
    date: &'a str,
  ) -> impl Future<Output = Result<Option<Item>, Self::Error>> + Send + 'a;

  /// Query the time-ordered index for the `limit` most recent items in the
  /// configured partition, newest first.
  fn query_latest(
    &self,
    limit: u32,
  ) -> impl Future<Output = Result<Vec<Item>, Self::Error>> + Send + '_;

  /// Like [`ContentStore::query_latest`], for an explicit `partition`.
  fn query_partition<'a>(
    &'a self,
    partition: &'a str,
    limit: u32,
  ) -> impl Future<Output = Result<Vec<Item>, Self::Error>> + Send + 'a;

  /// Create or fully overwrite the item keyed by its `date` attribute.
  ///
  /// The primary write and the index entry become visible together.
  fn put_item(
    &self,
    item: Item,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;
}

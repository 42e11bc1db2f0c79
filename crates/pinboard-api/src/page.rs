//! Page/limit slicing applied to list results after the store returns them.

use serde::Deserialize;

/// Number of items in one page.
pub const PAGE_SIZE: usize = 1000;

/// `?page=<n>&limit=<n>`, both optional. `page` is zero-based; the page is
/// cut first, then `limit` truncates what is left.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct Page {
  pub page:  Option<usize>,
  pub limit: Option<usize>,
}

impl Page {
  pub fn apply<T>(&self, mut items: Vec<T>) -> Vec<T> {
    if let Some(page) = self.page {
      let start = page.saturating_mul(PAGE_SIZE).min(items.len());
      let end = start.saturating_add(PAGE_SIZE).min(items.len());
      items.truncate(end);
      items.drain(..start);
    }
    if let Some(limit) = self.limit {
      items.truncate(limit);
    }
    items
  }
}

/// `?type=<kind>`. Empty or absent means every kind.
#[derive(Debug, Default, Deserialize)]
pub struct TypeFilter {
  #[serde(rename = "type", default)]
  pub kind: String,
}

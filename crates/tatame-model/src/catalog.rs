//! Storefront catalog entities.

use serde::{Deserialize, Serialize};

/// A storefront product. Static catalog data, read-only from the core's
/// perspective; stock bookkeeping lives outside this system.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    pub price: f64,
    pub category: String,
    pub stock: u32,
    pub image_url: String,
}

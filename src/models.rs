// Core data structures for the dealfeed service

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One normalized storefront deal
///
/// Every field that the upstream API may omit degrades to a documented
/// default during normalization; a `Deal` never fails to build.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Deal {
    /// Upstream product id
    pub id: Option<u64>,

    /// Product name
    pub name: Option<String>,

    /// Discount percentage, 0 when absent or unparseable
    pub discount_percent: u32,

    /// Original price, passed through upstream-formatted
    pub initial: Option<Value>,

    /// Discounted price, passed through upstream-formatted
    #[serde(rename = "final")]
    pub final_price: Option<Value>,

    /// Currency code, fixed fallback when upstream omits it
    pub currency: String,

    /// Capsule image URL, placeholder when upstream has no image
    pub large_capsule: String,

    /// Store page URL derived from the id, else upstream-provided
    pub store_link: Option<String>,
}

/// Complete published result set plus its fetch timestamp
///
/// A snapshot is immutable once published: the cache replaces it wholesale,
/// never field by field, so readers cannot observe mismatched `items` and
/// `fetched_at`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub items: Vec<Deal>,
    /// Unix timestamp of the publish, 0 before the first successful fetch
    pub fetched_at: i64,
}

impl Snapshot {
    /// Empty snapshot served before the first successful fetch
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            fetched_at: 0,
        }
    }

    /// Create a snapshot stamped with the current time
    pub fn new(items: Vec<Deal>) -> Self {
        Self {
            items,
            fetched_at: chrono::Utc::now().timestamp(),
        }
    }
}

impl Default for Snapshot {
    fn default() -> Self {
        Self::empty()
    }
}

// ============================================================================
// Raw upstream types
// ============================================================================

/// Top-level featured-categories payload from the storefront
///
/// Only the two sections this service consumes are decoded; the upstream
/// response carries many more keys which serde ignores.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FeaturedCategories {
    #[serde(default)]
    pub specials: Option<Section>,
    #[serde(default)]
    pub new_releases: Option<Section>,
}

/// One section of the featured-categories payload
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Section {
    #[serde(default)]
    pub items: Vec<RawItem>,
}

/// Raw product record as the storefront ships it
///
/// Every field is optional: per-field anomalies are never an error, the
/// normalizer maps each absence to its default. `discount_percent` and the
/// price fields are kept as loose JSON values because upstream is not
/// consistent about numbers vs. strings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawItem {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub discount_percent: Option<Value>,
    #[serde(default)]
    pub original_price: Option<Value>,
    #[serde(default)]
    pub final_price: Option<Value>,
    /// New-releases fallback for `original_price`
    #[serde(default)]
    pub initial: Option<Value>,
    /// New-releases fallback for `final_price`
    #[serde(default, rename = "final")]
    pub final_fallback: Option<Value>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub large_capsule_image: Option<String>,
    #[serde(default)]
    pub header_image: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

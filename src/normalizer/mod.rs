//! Normalization of raw storefront records into [`Deal`]s
//!
//! The two upstream sections ship slightly different field names for the
//! same data, so every record is mapped through one function that makes
//! each fallback an explicit branch. No field absence is ever an error:
//! every missing input degrades to a documented default.

use crate::models::{Deal, RawItem};
use serde_json::Value;

/// Store page URL built from a product id
pub const STORE_APP_URL: &str = "https://store.steampowered.com/app/";

/// Capsule image used when upstream provides none
pub const PLACEHOLDER_CAPSULE: &str =
    "https://store.cloudflare.steamstatic.com/public/images/v6/game_placeholder.png";

/// Currency code used when upstream omits one
///
/// Upstream reuses this fixed code regardless of the configured country;
/// preserved as-is rather than derived from the region.
pub const DEFAULT_CURRENCY: &str = "UAH";

/// Which upstream section a record came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    /// Currently discounted products
    Specials,
    /// Recently published products, not necessarily discounted
    NewReleases,
}

/// Map one raw record into a normalized [`Deal`]
pub fn normalize(raw: &RawItem, source: Source) -> Deal {
    let initial = match source {
        Source::Specials => raw.original_price.clone(),
        Source::NewReleases => raw.original_price.clone().or_else(|| raw.initial.clone()),
    };

    let final_price = match source {
        Source::Specials => raw.final_price.clone(),
        Source::NewReleases => raw
            .final_price
            .clone()
            .or_else(|| raw.final_fallback.clone()),
    };

    Deal {
        id: raw.id,
        name: raw.name.clone(),
        discount_percent: parse_discount(raw.discount_percent.as_ref()),
        initial,
        final_price,
        currency: raw
            .currency
            .clone()
            .unwrap_or_else(|| DEFAULT_CURRENCY.to_string()),
        large_capsule: capsule_url(raw),
        store_link: store_link(raw),
    }
}

/// Parse a discount value, absorbing every anomaly to 0
fn parse_discount(value: Option<&Value>) -> u32 {
    match value {
        Some(Value::Number(n)) => n
            .as_u64()
            .and_then(|n| u32::try_from(n).ok())
            .unwrap_or(0),
        Some(Value::String(s)) => s.trim().parse().unwrap_or(0),
        _ => 0,
    }
}

/// First non-empty image field wins, placeholder last
fn capsule_url(raw: &RawItem) -> String {
    non_empty(raw.large_capsule_image.as_deref())
        .or_else(|| non_empty(raw.header_image.as_deref()))
        .unwrap_or(PLACEHOLDER_CAPSULE)
        .to_string()
}

/// Canonical store URL from the id, else the upstream link, else nothing
fn store_link(raw: &RawItem) -> Option<String> {
    match raw.id {
        Some(id) => Some(format!("{STORE_APP_URL}{id}")),
        None => raw.url.clone(),
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw(value: serde_json::Value) -> RawItem {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_missing_discount_defaults_to_zero() {
        let deal = normalize(&raw(json!({ "id": 1, "name": "A" })), Source::Specials);
        assert_eq!(deal.discount_percent, 0);
    }

    #[test]
    fn test_non_numeric_discount_defaults_to_zero() {
        let deal = normalize(
            &raw(json!({ "id": 1, "discount_percent": "half off" })),
            Source::Specials,
        );
        assert_eq!(deal.discount_percent, 0);
    }

    #[test]
    fn test_numeric_string_discount_is_parsed() {
        let deal = normalize(
            &raw(json!({ "id": 1, "discount_percent": "25" })),
            Source::NewReleases,
        );
        assert_eq!(deal.discount_percent, 25);
    }

    #[test]
    fn test_numeric_discount_is_kept() {
        let deal = normalize(
            &raw(json!({ "id": 1, "discount_percent": 75 })),
            Source::Specials,
        );
        assert_eq!(deal.discount_percent, 75);
    }

    #[test]
    fn test_store_link_from_id_wins_over_url() {
        let deal = normalize(
            &raw(json!({ "id": 440, "url": "https://example.com/other" })),
            Source::Specials,
        );
        assert_eq!(
            deal.store_link.as_deref(),
            Some("https://store.steampowered.com/app/440")
        );
    }

    #[test]
    fn test_store_link_falls_back_to_url() {
        let deal = normalize(
            &raw(json!({ "url": "https://example.com/bundle" })),
            Source::NewReleases,
        );
        assert_eq!(deal.store_link.as_deref(), Some("https://example.com/bundle"));
    }

    #[test]
    fn test_store_link_absent_entirely() {
        let deal = normalize(&raw(json!({ "name": "Mystery" })), Source::NewReleases);
        assert!(deal.store_link.is_none());
    }

    #[test]
    fn test_capsule_fallback_chain() {
        let with_capsule = normalize(
            &raw(json!({ "large_capsule_image": "https://cdn/a.jpg", "header_image": "https://cdn/b.jpg" })),
            Source::Specials,
        );
        assert_eq!(with_capsule.large_capsule, "https://cdn/a.jpg");

        let with_header = normalize(
            &raw(json!({ "large_capsule_image": "", "header_image": "https://cdn/b.jpg" })),
            Source::Specials,
        );
        assert_eq!(with_header.large_capsule, "https://cdn/b.jpg");

        let bare = normalize(&raw(json!({})), Source::Specials);
        assert_eq!(bare.large_capsule, PLACEHOLDER_CAPSULE);
    }

    #[test]
    fn test_currency_default() {
        let deal = normalize(&raw(json!({ "id": 1 })), Source::Specials);
        assert_eq!(deal.currency, "UAH");

        let deal = normalize(&raw(json!({ "id": 1, "currency": "EUR" })), Source::Specials);
        assert_eq!(deal.currency, "EUR");
    }

    #[test]
    fn test_specials_prices_use_primary_fields_only() {
        let deal = normalize(
            &raw(json!({ "id": 1, "initial": 1000, "final": 500 })),
            Source::Specials,
        );
        assert!(deal.initial.is_none());
        assert!(deal.final_price.is_none());
    }

    #[test]
    fn test_new_release_price_fallback() {
        let deal = normalize(
            &raw(json!({ "id": 1, "initial": 1000, "final": 500 })),
            Source::NewReleases,
        );
        assert_eq!(deal.initial, Some(json!(1000)));
        assert_eq!(deal.final_price, Some(json!(500)));

        let primary = normalize(
            &raw(json!({ "id": 1, "original_price": 2000, "final_price": 999, "initial": 1 })),
            Source::NewReleases,
        );
        assert_eq!(primary.initial, Some(json!(2000)));
        assert_eq!(primary.final_price, Some(json!(999)));
    }

    #[test]
    fn test_missing_prices_are_null_not_error() {
        let deal = normalize(&raw(json!({ "id": 1 })), Source::NewReleases);
        assert!(deal.initial.is_none());
        assert!(deal.final_price.is_none());
    }
}

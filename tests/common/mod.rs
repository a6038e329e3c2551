//! Common test utilities

use dealfeed::config::Config;
use dealfeed::fetcher::StoreFetcher;
use serde_json::{json, Value};

/// Build a fetcher pointed at a mock server
pub fn test_fetcher(base_url: &str) -> StoreFetcher {
    let config = Config::default();
    let endpoint = format!("{base_url}/api/featuredcategories/");
    StoreFetcher::with_endpoint(&config.upstream, &endpoint).unwrap()
}

/// A featured-categories payload with both sections populated
#[allow(dead_code)]
pub fn sample_payload() -> Value {
    json!({
        "specials": {
            "items": [
                {
                    "id": 440,
                    "name": "Team Game",
                    "discount_percent": 50,
                    "original_price": 1999,
                    "final_price": 999,
                    "currency": "UAH",
                    "large_capsule_image": "https://cdn.example/440.jpg"
                },
                {
                    "id": 570,
                    "name": "Arena Game",
                    "discount_percent": 10,
                    "original_price": 2999,
                    "final_price": 2699,
                    "currency": "UAH",
                    "header_image": "https://cdn.example/570_header.jpg"
                }
            ]
        },
        "new_releases": {
            "items": [
                {
                    "id": 999,
                    "name": "Fresh Release",
                    "initial": 4999,
                    "final": 4999
                }
            ]
        }
    })
}

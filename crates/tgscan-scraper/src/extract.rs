//! Ordered field probes over raw item documents.
//!
//! The upstream API has renamed and re-nested several fields across app
//! releases. Each field is resolved by trying a fixed list of probes in
//! priority order; the first probe returning `Some` wins.

use serde_json::Value;

/// A single lookup strategy. Returns `None` when its path is absent or null.
pub type Probe<T> = fn(&Value) -> Option<T>;

/// Latitude/longitude pair of a store.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

/// Location probes, applied to the item's `store` sub-document.
pub const LOCATION_PROBES: &[Probe<Coordinates>] = &[
    |store| coordinates_at(store.get("location")?),
    |store| coordinates_at(store.get("location")?.get("location")?),
    |store| coordinates_at(store.get("store_location")?),
    |store| coordinates_at(store.get("store_location")?.get("location")?),
];

/// Keys under `item` holding the discounted price, newest name first.
pub const PRICE_KEYS: &[&str] = &["price_including_taxes", "item_price", "price"];

/// Keys under `item` holding the pre-discount value.
pub const ORIGINAL_PRICE_KEYS: &[&str] = &["value_including_taxes", "item_value", "value"];

/// Keys under `item` holding dietary/info tags.
pub const TAG_KEYS: &[&str] = &["diet_tags", "item_tags"];

/// Cover image probes, applied to the whole raw item: item-level picture
/// first, then store-level pictures.
pub const IMAGE_PROBES: &[Probe<String>] = &[
    |raw| picture_url(raw.get("item")?.get("cover_picture")?),
    |raw| picture_url(raw.get("store")?.get("cover_picture")?),
    |raw| picture_url(raw.get("store")?.get("logo_picture")?),
];

/// Runs `probes` against `value` in order and returns the first hit.
pub fn first_match<T>(value: &Value, probes: &[Probe<T>]) -> Option<T> {
    probes.iter().find_map(|probe| probe(value))
}

/// Returns the first non-null child of `value` among `keys`.
pub fn first_key<'a>(value: &'a Value, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .filter_map(|key| value.get(*key))
        .find(|child| !child.is_null())
}

/// Resolves store coordinates via [`LOCATION_PROBES`].
#[must_use]
pub fn resolve_location(store: &Value) -> Option<Coordinates> {
    first_match(store, LOCATION_PROBES)
}

/// Resolves the cover image URL via [`IMAGE_PROBES`].
#[must_use]
pub fn resolve_cover_image(raw: &Value) -> Option<String> {
    first_match(raw, IMAGE_PROBES)
}

fn coordinates_at(node: &Value) -> Option<Coordinates> {
    Some(Coordinates {
        lat: number_at(node, "latitude")?,
        lng: number_at(node, "longitude")?,
    })
}

fn picture_url(node: &Value) -> Option<String> {
    node.get("current_url")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|url| !url.is_empty())
        .map(str::to_string)
}

/// Reads `key` as a float, accepting numeric strings.
pub(crate) fn number_at(node: &Value, key: &str) -> Option<f64> {
    let number = match node.get(key)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    number.filter(|n| n.is_finite())
}

/// Reads a string or integer identifier as a `String`.
pub(crate) fn value_as_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.trim().to_string()).filter(|s| !s.is_empty()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn location_prefers_direct_location() {
        let store = json!({
            "location": { "latitude": 40.71, "longitude": -74.0 },
            "store_location": { "latitude": 1.0, "longitude": 2.0 }
        });
        assert_eq!(
            resolve_location(&store),
            Some(Coordinates {
                lat: 40.71,
                lng: -74.0
            })
        );
    }

    #[test]
    fn location_falls_back_to_nested_location() {
        let store = json!({
            "location": { "address": {}, "location": { "latitude": 40.68, "longitude": -73.94 } }
        });
        assert_eq!(
            resolve_location(&store),
            Some(Coordinates {
                lat: 40.68,
                lng: -73.94
            })
        );
    }

    #[test]
    fn location_falls_back_to_store_location_variants() {
        let flat = json!({ "store_location": { "latitude": 40.5, "longitude": -74.1 } });
        let nested = json!({
            "store_location": { "location": { "latitude": 40.6, "longitude": -74.2 } }
        });
        assert_eq!(resolve_location(&flat).map(|c| c.lat), Some(40.5));
        assert_eq!(resolve_location(&nested).map(|c| c.lng), Some(-74.2));
    }

    #[test]
    fn location_skips_half_filled_pairs() {
        let store = json!({
            "location": { "latitude": 40.7, "longitude": null },
            "store_location": { "latitude": 40.8, "longitude": -73.9 }
        });
        assert_eq!(
            resolve_location(&store),
            Some(Coordinates {
                lat: 40.8,
                lng: -73.9
            })
        );
    }

    #[test]
    fn location_accepts_numeric_strings() {
        let store = json!({ "location": { "latitude": "40.75", "longitude": "-73.99" } });
        assert_eq!(resolve_location(&store).map(|c| c.lat), Some(40.75));
    }

    #[test]
    fn location_absent_yields_none() {
        assert_eq!(resolve_location(&json!({ "store_name": "Nowhere" })), None);
    }

    #[test]
    fn first_key_skips_null_values() {
        let item = json!({ "price_including_taxes": null, "item_price": { "minor_units": 300 } });
        let found = first_key(&item, PRICE_KEYS).unwrap();
        assert_eq!(found["minor_units"], 300);
    }

    #[test]
    fn cover_image_falls_back_to_store_picture() {
        let raw = json!({
            "item": { "cover_picture": { "current_url": "" } },
            "store": { "cover_picture": { "current_url": "https://img.example.com/store.jpg" } }
        });
        assert_eq!(
            resolve_cover_image(&raw).as_deref(),
            Some("https://img.example.com/store.jpg")
        );
    }

    #[test]
    fn cover_image_none_when_no_pictures() {
        assert_eq!(resolve_cover_image(&json!({ "item": {}, "store": {} })), None);
    }

    #[test]
    fn value_as_string_handles_numbers_and_blanks() {
        assert_eq!(value_as_string(&json!(98_765)).as_deref(), Some("98765"));
        assert_eq!(value_as_string(&json!(" 123 ")).as_deref(), Some("123"));
        assert_eq!(value_as_string(&json!("")), None);
        assert_eq!(value_as_string(&json!(null)), None);
    }
}

//! Normalization from raw marketplace items to [`tgscan_core::StoreRecord`].
//!
//! Path fallbacks live in [`crate::extract`]; this module decides which
//! fields are required and how defaults apply.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde_json::Value;
use tgscan_core::StoreRecord;

use crate::error::ScraperError;
use crate::extract::{
    first_key, number_at, resolve_cover_image, resolve_location, value_as_string,
    ORIGINAL_PRICE_KEYS, PRICE_KEYS, TAG_KEYS,
};

const DEFAULT_CURRENCY: &str = "USD";
const DEFAULT_CATEGORY: &str = "Unknown";
const UNKNOWN_ITEM_ID: &str = "<unknown>";

/// Normalizes one raw item into a [`StoreRecord`].
///
/// Required: `item.item_id`, a store name, store coordinates, and
/// `items_available`. Everything else falls back to a default.
///
/// # Errors
///
/// Returns [`ScraperError::Normalization`] when a required field is missing
/// or any present field has an unexpected type. Callers drop the item.
pub fn normalize_item(raw: &Value) -> Result<StoreRecord, ScraperError> {
    let item = raw.get("item").filter(|v| v.is_object());
    let id = item
        .and_then(|i| i.get("item_id"))
        .and_then(value_as_string);

    let Some(id) = id else {
        return Err(fail(UNKNOWN_ITEM_ID, "missing item.item_id"));
    };
    let Some(item) = item else {
        return Err(fail(&id, "missing item object"));
    };

    let store = raw
        .get("store")
        .filter(|v| v.is_object())
        .ok_or_else(|| fail(&id, "missing store object"))?;

    let name = ["store_name", "display_name"]
        .iter()
        .find_map(|key| store.get(*key).and_then(Value::as_str))
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .ok_or_else(|| fail(&id, "missing store name"))?
        .to_string();

    let coordinates =
        resolve_location(store).ok_or_else(|| fail(&id, "no store coordinates"))?;

    let available = raw
        .get("items_available")
        .ok_or_else(|| fail(&id, "missing items_available"))
        .and_then(|v| as_count(v).ok_or_else(|| fail(&id, "items_available is not a count")))?;

    let (price, currency) = money(item, PRICE_KEYS, &id)?;
    let (original_price, _) = money(item, ORIGINAL_PRICE_KEYS, &id)?;

    let (rating, ratings_count) = rating(item, &id)?;

    let category = item
        .get("item_category")
        .and_then(Value::as_str)
        .filter(|c| !c.is_empty())
        .unwrap_or(DEFAULT_CATEGORY)
        .to_string();

    let pickup = raw.get("pickup_interval").filter(|v| !v.is_null());
    let pickup_start = pickup
        .map(|p| timestamp(p.get("start"), &id, "pickup_interval.start"))
        .transpose()?
        .flatten();
    let pickup_end = pickup
        .map(|p| timestamp(p.get("end"), &id, "pickup_interval.end"))
        .transpose()?
        .flatten();

    let tags = tags(item, &id)?;

    Ok(StoreRecord {
        id,
        name,
        lat: coordinates.lat,
        lng: coordinates.lng,
        available,
        rating,
        ratings_count,
        price,
        original_price,
        currency: currency.unwrap_or_else(|| DEFAULT_CURRENCY.to_string()),
        category,
        pickup_start,
        pickup_end,
        tags,
        cover_image: resolve_cover_image(raw),
    })
}

fn fail(item_id: &str, reason: impl Into<String>) -> ScraperError {
    ScraperError::Normalization {
        item_id: item_id.to_owned(),
        reason: reason.into(),
    }
}

fn as_count(value: &Value) -> Option<u32> {
    value.as_u64().and_then(|n| u32::try_from(n).ok())
}

/// Reads a money object (`{code, minor_units}`) from the first present key.
///
/// Minor units are cents: `550` becomes `5.50`. A missing object or missing
/// `minor_units` yields zero.
fn money(
    item: &Value,
    keys: &[&str],
    item_id: &str,
) -> Result<(Decimal, Option<String>), ScraperError> {
    let Some(node) = first_key(item, keys) else {
        return Ok((Decimal::ZERO, None));
    };

    let minor_units = match node.get("minor_units") {
        None | Some(Value::Null) => 0,
        Some(v) => v
            .as_i64()
            .ok_or_else(|| fail(item_id, format!("minor_units is not an integer: {v}")))?,
    };

    let code = node
        .get("code")
        .and_then(Value::as_str)
        .filter(|c| !c.is_empty())
        .map(str::to_string);

    Ok((Decimal::new(minor_units, 2), code))
}

fn rating(item: &Value, item_id: &str) -> Result<(f64, u32), ScraperError> {
    let Some(node) = item
        .get("average_overall_rating")
        .filter(|v| !v.is_null())
    else {
        return Ok((0.0, 0));
    };

    let average = number_at(node, "average_overall_rating").unwrap_or(0.0);
    let count = match node.get("rating_count") {
        None | Some(Value::Null) => 0,
        Some(v) => {
            as_count(v).ok_or_else(|| fail(item_id, "rating_count is not a count"))?
        }
    };
    Ok((average, count))
}

fn timestamp(
    value: Option<&Value>,
    item_id: &str,
    field: &str,
) -> Result<Option<DateTime<Utc>>, ScraperError> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => DateTime::parse_from_rfc3339(s)
            .map(|dt| Some(dt.with_timezone(&Utc)))
            .map_err(|e| fail(item_id, format!("{field} is not RFC 3339: {e}"))),
        Some(other) => Err(fail(item_id, format!("{field} is not a string: {other}"))),
    }
}

/// Collects tag labels. Entries are `{"text": ...}` objects or bare strings.
fn tags(item: &Value, item_id: &str) -> Result<Vec<String>, ScraperError> {
    let Some(node) = first_key(item, TAG_KEYS) else {
        return Ok(Vec::new());
    };
    let entries = node
        .as_array()
        .ok_or_else(|| fail(item_id, "tags is not a list"))?;

    entries
        .iter()
        .map(|entry| {
            entry
                .as_str()
                .or_else(|| entry.get("text").and_then(Value::as_str))
                .map(str::to_string)
                .ok_or_else(|| fail(item_id, format!("tag entry has no text: {entry}")))
        })
        .collect()
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;

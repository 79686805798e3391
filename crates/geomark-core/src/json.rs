#![forbid(unsafe_code)]

//! JSON ingestion for raw upstream items.
//!
//! The upstream API is inconsistent about shapes: facility coordinates
//! arrive as top-level `lat`/`lng` (sometimes as numeric strings), or
//! nested as `location: {lat, lon}`; region summaries carry a GeoJSON
//! `geometry` object and `<category>Count` fields; names arrive as
//! `name` or `yadmNm`. This module accepts all of them and degrades to
//! the fail-soft defaults for anything missing or malformed.

use serde_json::Value;

use crate::category::Category;
use crate::geo::{Geometry, Ring};
use crate::record::{RawItem, RecordId};

/// Parse one raw item from a JSON object.
///
/// Returns `None` only when no identity can be extracted (`id` missing
/// or not a string/number); every other defect degrades field-by-field.
#[must_use]
pub fn raw_item_from_json(value: &Value) -> Option<RawItem> {
    let id = record_id(value.get("id")?)?;
    let mut item = RawItem::new(id);

    if let Some(name) = string_field(value, "name").or_else(|| string_field(value, "yadmNm")) {
        item = item.with_name(name);
    }

    if let Some((lat, lng)) = coordinate(value) {
        item = item.with_coordinate(lat, lng);
    }

    if let Some(geometry) = value.get("geometry").and_then(geometry_from_json) {
        item = item.with_geometry(geometry);
    }

    if let Some(category) = value
        .get("category")
        .and_then(Value::as_str)
        .and_then(Category::from_key)
    {
        item = item.with_category(category);
    }

    for category in Category::ALL {
        let key = format!("{}Count", category.key());
        if let Some(n) = value.get(&key).and_then(count) {
            item = item.with_count(category, n);
        }
    }

    if let Some(selected) = value.get("selected").and_then(Value::as_bool) {
        item = item.with_selected(selected);
    }

    Some(item)
}

/// Parse a whole payload array, skipping items without identity.
#[must_use]
pub fn raw_items_from_json(value: &Value) -> Vec<RawItem> {
    match value.as_array() {
        Some(items) => items.iter().filter_map(raw_item_from_json).collect(),
        None => Vec::new(),
    }
}

fn record_id(value: &Value) -> Option<RecordId> {
    match value {
        Value::String(s) if !s.is_empty() => Some(RecordId::new(s.clone())),
        Value::Number(n) => Some(RecordId::new(n.to_string())),
        _ => None,
    }
}

fn string_field(value: &Value, key: &str) -> Option<String> {
    value.get(key).and_then(Value::as_str).map(str::to_string)
}

/// A number, or a string that parses as one (the upstream sends both).
fn number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn count(value: &Value) -> Option<u32> {
    let n = number(value)?;
    if n.is_finite() && n >= 0.0 {
        Some(n as u32)
    } else {
        None
    }
}

fn coordinate(value: &Value) -> Option<(f64, f64)> {
    let top = |lat_key: &str, lng_key: &str, v: &Value| -> Option<(f64, f64)> {
        let lat = number(v.get(lat_key)?)?;
        let lng = number(v.get(lng_key)?)?;
        Some((lat, lng))
    };

    top("lat", "lng", value).or_else(|| {
        let location = value.get("location")?;
        top("lat", "lon", location)
    })
}

fn geometry_from_json(value: &Value) -> Option<Geometry> {
    let kind = value.get("type")?.as_str()?;
    let coordinates = value.get("coordinates")?;
    match kind {
        // A GeoJSON polygon is a ring list; only the outer ring is
        // modeled (holes are dropped).
        "Polygon" => {
            let rings = rings(coordinates)?;
            rings.into_iter().next().map(Geometry::Polygon)
        }
        "MultiPolygon" => {
            let parts = coordinates
                .as_array()?
                .iter()
                .map(rings)
                .collect::<Option<Vec<_>>>()?;
            Some(Geometry::MultiPolygon(parts))
        }
        _ => None,
    }
}

fn rings(value: &Value) -> Option<Vec<Ring>> {
    value.as_array()?.iter().map(ring).collect()
}

fn ring(value: &Value) -> Option<Ring> {
    value
        .as_array()?
        .iter()
        .map(|vertex| {
            let pair = vertex.as_array()?;
            if pair.len() < 2 {
                return None;
            }
            let lng = number(&pair[0])?;
            let lat = number(&pair[1])?;
            Some((lng, lat))
        })
        .collect()
}

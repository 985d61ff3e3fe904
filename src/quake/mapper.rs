//! Flattens the nested upstream document into client-facing records.

use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::MappingError;

use super::types::{IntensityArea, SimplifiedEarthquake, UpstreamEarthquake};

/// Path of the record list inside the upstream document.
pub const RECORDS_PATH: &str = "records.Earthquake";

/// Map an upstream document to at most `limit` simplified records.
///
/// A document without a record list maps to an empty list. A record list
/// that is not an array, or any record that cannot be read, fails the whole
/// call; partial results are never returned.
pub fn map_to_simplified(
    doc: &Value,
    limit: usize,
) -> Result<Vec<SimplifiedEarthquake>, MappingError> {
    let records = match doc.get("records").and_then(|r| r.get("Earthquake")) {
        None | Some(Value::Null) => {
            debug!("No {} in document", RECORDS_PATH);
            return Ok(Vec::new());
        }
        Some(Value::Array(records)) => records,
        Some(_) => return Err(MappingError::NotAList { path: RECORDS_PATH }),
    };

    records
        .iter()
        .take(limit)
        .enumerate()
        .map(|(index, record)| {
            UpstreamEarthquake::deserialize(record)
                .map(simplify)
                .map_err(|e| MappingError::BadRecord {
                    index,
                    reason: e.to_string(),
                })
        })
        .collect()
}

/// Mapping with the fail-safe policy: any shape error yields an empty list.
pub fn map_to_simplified_or_empty(doc: &Value, limit: usize) -> Vec<SimplifiedEarthquake> {
    map_to_simplified(doc, limit).unwrap_or_else(|e| {
        warn!(error = %e, "Discarding malformed earthquake document");
        Vec::new()
    })
}

fn simplify(eq: UpstreamEarthquake) -> SimplifiedEarthquake {
    let info = eq.earthquake_info.unwrap_or_default();
    let magnitude = info.earthquake_magnitude.unwrap_or_default();

    let intensity_areas = eq
        .intensity
        .and_then(|i| i.shaking_area)
        .unwrap_or_default()
        .into_iter()
        .map(|area| IntensityArea {
            county_name: area.county_name,
            area_desc: area.area_desc,
            area_intensity: area.area_intensity,
        })
        .collect();

    SimplifiedEarthquake {
        earthquake_no: eq.earthquake_no,
        report_image_uri: eq.report_image_uri,
        report_content: eq.report_content,
        origin_time: info.origin_time,
        magnitude_value: magnitude.magnitude_value,
        magnitude_type: magnitude.magnitude_type,
        epicenter_location: info.epicenter.and_then(|e| e.location),
        focal_depth: info.focal_depth,
        intensity_areas,
    }
}

//! Earthquake report types, both as the upstream feed sends them and as
//! the browser client receives them.

use std::fmt;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use strum::{Display, EnumString};

/// Where a feed response was loaded from.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, Default,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum FeedSource {
    /// Live CWA open-data API.
    Api,
    /// Bundled sample fixture.
    #[default]
    Sample,
}

/// A JSON number or string, kept exactly as sent.
///
/// The upstream sends report numbers as integers (`113001`) and intensity
/// levels as text (`"4級"`), but neither is guaranteed, so both shapes are
/// accepted and echoed back unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    /// Numeric value.
    Number(serde_json::Number),
    /// Textual value.
    Text(String),
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Number(n) => write!(f, "{}", n),
            Scalar::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for Scalar {
    fn from(value: i64) -> Self {
        Scalar::Number(value.into())
    }
}

impl From<i32> for Scalar {
    fn from(value: i32) -> Self {
        Scalar::Number(value.into())
    }
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Scalar::Text(value.to_string())
    }
}

// === Upstream (CWA E-A0015-001) ===

/// Decode an optional field, treating a value of the wrong shape as absent.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| serde_json::from_value(v).ok()))
}

/// One earthquake report from `records.Earthquake`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct UpstreamEarthquake {
    /// Report number.
    #[serde(rename = "EarthquakeNo")]
    pub earthquake_no: Option<Scalar>,
    /// Report image URL.
    #[serde(rename = "ReportImageURI")]
    pub report_image_uri: Option<String>,
    /// Human-readable summary.
    #[serde(rename = "ReportContent")]
    pub report_content: Option<String>,
    /// Origin, epicenter and magnitude.
    #[serde(rename = "EarthquakeInfo")]
    pub earthquake_info: Option<EarthquakeInfo>,
    /// Shaking observations.
    #[serde(rename = "Intensity")]
    pub intensity: Option<Intensity>,
}

/// `EarthquakeInfo` block.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct EarthquakeInfo {
    /// Origin time, `YYYY-MM-DD hh:mm:ss` local time.
    #[serde(rename = "OriginTime")]
    pub origin_time: Option<String>,
    /// Focal depth in km.
    #[serde(rename = "FocalDepth", deserialize_with = "lenient")]
    pub focal_depth: Option<f64>,
    /// Epicenter description.
    #[serde(rename = "Epicenter", deserialize_with = "lenient")]
    pub epicenter: Option<Epicenter>,
    /// Magnitude.
    #[serde(rename = "EarthquakeMagnitude")]
    pub earthquake_magnitude: Option<EarthquakeMagnitude>,
}

/// `Epicenter` block.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Epicenter {
    /// Location text.
    #[serde(rename = "Location")]
    pub location: Option<String>,
}

/// `EarthquakeMagnitude` block.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct EarthquakeMagnitude {
    /// Magnitude scale name.
    #[serde(rename = "MagnitudeType")]
    pub magnitude_type: Option<String>,
    /// Magnitude value.
    #[serde(rename = "MagnitudeValue")]
    pub magnitude_value: Option<f64>,
}

/// `Intensity` block.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Intensity {
    /// County-level shaking areas.
    #[serde(rename = "ShakingArea")]
    pub shaking_area: Option<Vec<UpstreamShakingArea>>,
}

/// One `ShakingArea` entry. Station lists are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct UpstreamShakingArea {
    /// County name.
    #[serde(rename = "CountyName")]
    pub county_name: Option<String>,
    /// Area description.
    #[serde(rename = "AreaDesc")]
    pub area_desc: Option<String>,
    /// Intensity level.
    #[serde(rename = "AreaIntensity")]
    pub area_intensity: Option<Scalar>,
}

// === Client-facing ===

/// County-level intensity observation attached to one report.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IntensityArea {
    /// County name.
    #[serde(rename = "CountyName")]
    pub county_name: Option<String>,
    /// Area description.
    #[serde(rename = "AreaDesc")]
    pub area_desc: Option<String>,
    /// Intensity level.
    #[serde(rename = "AreaIntensity")]
    pub area_intensity: Option<Scalar>,
}

impl IntensityArea {
    /// Create an area from its three display fields.
    pub fn new(
        county_name: impl Into<String>,
        area_desc: impl Into<String>,
        area_intensity: impl Into<Scalar>,
    ) -> Self {
        Self {
            county_name: Some(county_name.into()),
            area_desc: Some(area_desc.into()),
            area_intensity: Some(area_intensity.into()),
        }
    }
}

/// Flattened earthquake report served to the browser client.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SimplifiedEarthquake {
    /// Report number.
    #[serde(rename = "EarthquakeNo")]
    pub earthquake_no: Option<Scalar>,
    /// Report image URL.
    #[serde(rename = "ReportImageURI")]
    pub report_image_uri: Option<String>,
    /// Summary text.
    #[serde(rename = "ReportContent")]
    pub report_content: Option<String>,
    /// Origin time.
    #[serde(rename = "OriginTime")]
    pub origin_time: Option<String>,
    /// Magnitude value.
    #[serde(rename = "MagnitudeValue")]
    pub magnitude_value: Option<f64>,
    /// Magnitude scale name.
    #[serde(rename = "MagnitudeType")]
    pub magnitude_type: Option<String>,
    /// Epicenter location text.
    #[serde(rename = "EpicenterLocation")]
    pub epicenter_location: Option<String>,
    /// Focal depth in km.
    #[serde(rename = "FocalDepth")]
    pub focal_depth: Option<f64>,
    /// Shaking areas in upstream order, duplicates included.
    #[serde(rename = "IntensityAreas")]
    pub intensity_areas: Vec<IntensityArea>,
}

/// Success body of `GET /api/earthquakes`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EarthquakeFeed {
    /// Where the data came from.
    pub source: FeedSource,
    /// Number of records in `data`.
    pub count: usize,
    /// Simplified reports in upstream order.
    pub data: Vec<SimplifiedEarthquake>,
}

impl EarthquakeFeed {
    /// Wrap mapped records, deriving the count.
    pub fn new(source: FeedSource, data: Vec<SimplifiedEarthquake>) -> Self {
        Self {
            source,
            count: data.len(),
            data,
        }
    }
}

//! Headless view model for the list/detail earthquake page.
//!
//! The browser shell only paints what this produces: selectable list items
//! and the detail panel for the active one.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::quake::types::{EarthquakeFeed, FeedSource, IntensityArea, SimplifiedEarthquake};

use super::dedupe::{dedupe_areas, sort_by_intensity};

/// Shown in place of the detail panel when loading fails.
pub const FAILURE_MESSAGE: &str = "載入資料失敗";
/// Shown when the feed holds no reports.
pub const EMPTY_MESSAGE: &str = "沒有任何地震資料。";
/// Shown in the detail panel when a report has no intensity areas.
pub const NO_AREAS_NOTE: &str = "此筆資料無震度分布資訊。";
/// Placeholder for a missing magnitude in list labels.
pub const MISSING_MAGNITUDE: &str = "?";

/// Order of the intensity grid.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, Default,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum AreaOrder {
    /// As delivered by the feed.
    #[default]
    Upstream,
    /// Strongest shaking first.
    Intensity,
}

/// One selectable entry in the report list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListItem {
    /// Report number.
    pub id: String,
    /// `"{id}｜芮氏規模 {magnitude}｜{origin time}"`.
    pub label: String,
    /// Whether this entry is the active one.
    pub selected: bool,
}

/// Detail panel for the active report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetailView {
    /// Report number.
    pub id: String,
    /// Origin time, empty when absent.
    pub origin_time: String,
    /// Summary text, empty when absent.
    pub summary: String,
    /// Magnitude scale and value, e.g. `"芮氏規模 4.5"`.
    pub magnitude: String,
    /// Epicenter location, when known.
    pub epicenter: Option<String>,
    /// Focal depth in km, when known.
    pub focal_depth: Option<f64>,
    /// Report image, when present.
    pub image_uri: Option<String>,
    /// Deduplicated intensity grid.
    pub areas: Vec<IntensityArea>,
    /// Note shown instead of an empty grid.
    pub areas_note: Option<String>,
}

/// Everything the page needs to paint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    /// Data source caption.
    pub source_label: Option<String>,
    /// Report list.
    pub items: Vec<ListItem>,
    /// Index of the active item.
    pub selected: Option<usize>,
    /// Detail panel for the active item.
    pub detail: Option<DetailView>,
    /// Status message (empty feed or failure).
    pub message: Option<String>,
}

impl DashboardView {
    /// Render a feed with `selected` active, falling back to the first report.
    pub fn from_feed(feed: EarthquakeFeed, selected: Option<usize>, order: AreaOrder) -> Self {
        let mut dashboard = Dashboard::new(feed, order);
        if let Some(index) = selected {
            dashboard.select(index);
        }
        dashboard.view()
    }

    /// View shown when the fetch-and-render sequence failed.
    pub fn failure() -> Self {
        Self {
            source_label: None,
            items: Vec::new(),
            selected: None,
            detail: None,
            message: Some(FAILURE_MESSAGE.to_string()),
        }
    }
}

/// Stateful list/detail model over one loaded feed.
#[derive(Debug, Clone)]
pub struct Dashboard {
    source: FeedSource,
    records: Vec<SimplifiedEarthquake>,
    order: AreaOrder,
    selected: usize,
}

impl Dashboard {
    /// Build a dashboard with the first report selected.
    pub fn new(feed: EarthquakeFeed, order: AreaOrder) -> Self {
        Self {
            source: feed.source,
            records: feed.data,
            order,
            selected: 0,
        }
    }

    /// Make `index` the active report. Out-of-range indices are ignored.
    pub fn select(&mut self, index: usize) -> bool {
        if index < self.records.len() {
            self.selected = index;
            true
        } else {
            false
        }
    }

    /// Index of the active report, if there are any reports.
    pub fn selected(&self) -> Option<usize> {
        (!self.records.is_empty()).then_some(self.selected)
    }

    /// Render the current state.
    pub fn view(&self) -> DashboardView {
        let selected = self.selected();
        let items = self
            .records
            .iter()
            .enumerate()
            .map(|(idx, record)| ListItem {
                id: display_id(record),
                label: list_label(record),
                selected: Some(idx) == selected,
            })
            .collect();

        DashboardView {
            source_label: Some(source_label(self.source, self.records.len())),
            items,
            selected,
            detail: selected.map(|idx| detail(&self.records[idx], self.order)),
            message: self
                .records
                .is_empty()
                .then(|| EMPTY_MESSAGE.to_string()),
        }
    }
}

/// Caption describing where the data came from.
pub fn source_label(source: FeedSource, count: usize) -> String {
    match source {
        FeedSource::Api => format!("資料來源：中央氣象署 API（最近 {} 筆）", count),
        FeedSource::Sample => "資料來源：範例資料".to_string(),
    }
}

/// List entry text for one report.
pub fn list_label(record: &SimplifiedEarthquake) -> String {
    let magnitude = record
        .magnitude_value
        .map(|m| m.to_string())
        .unwrap_or_else(|| MISSING_MAGNITUDE.to_string());
    format!(
        "{}｜芮氏規模 {}｜{}",
        display_id(record),
        magnitude,
        record.origin_time.as_deref().unwrap_or("")
    )
}

/// Detail panel for one report.
pub fn detail(record: &SimplifiedEarthquake, order: AreaOrder) -> DetailView {
    let mut areas = dedupe_areas(&record.intensity_areas);
    if order == AreaOrder::Intensity {
        sort_by_intensity(&mut areas);
    }

    let magnitude = format!(
        "{} {}",
        record.magnitude_type.as_deref().unwrap_or(""),
        record
            .magnitude_value
            .map(|m| m.to_string())
            .unwrap_or_default()
    )
    .trim()
    .to_string();

    DetailView {
        id: display_id(record),
        origin_time: record.origin_time.clone().unwrap_or_default(),
        summary: record.report_content.clone().unwrap_or_default(),
        magnitude,
        epicenter: record.epicenter_location.clone(),
        focal_depth: record.focal_depth,
        image_uri: record
            .report_image_uri
            .clone()
            .filter(|uri| !uri.is_empty()),
        areas_note: areas.is_empty().then(|| NO_AREAS_NOTE.to_string()),
        areas,
    }
}

fn display_id(record: &SimplifiedEarthquake) -> String {
    record
        .earthquake_no
        .as_ref()
        .map(|id| id.to_string())
        .unwrap_or_default()
}

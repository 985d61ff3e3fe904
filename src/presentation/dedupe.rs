//! Display-side cleanup of intensity areas.

use std::cmp::Reverse;
use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::quake::types::{IntensityArea, Scalar};

/// First run of digits in an intensity label such as `"5弱"`.
static LEVEL_DIGITS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+").expect("valid regex"));

type AreaKey<'a> = (Option<&'a str>, Option<&'a str>, Option<&'a Scalar>);

fn key(area: &IntensityArea) -> AreaKey<'_> {
    (
        area.county_name.as_deref(),
        area.area_desc.as_deref(),
        area.area_intensity.as_ref(),
    )
}

/// Drop repeated areas, keeping the first occurrence of each
/// `(county, description, intensity)` triple in its original position.
pub fn dedupe_areas(areas: &[IntensityArea]) -> Vec<IntensityArea> {
    let mut seen: HashSet<AreaKey<'_>> = HashSet::with_capacity(areas.len());
    areas
        .iter()
        .filter(|area| seen.insert(key(*area)))
        .cloned()
        .collect()
}

/// Numeric intensity level; missing or non-numeric labels count as 0.
pub fn intensity_level(area: &IntensityArea) -> u32 {
    area.area_intensity
        .as_ref()
        .map(|level| level.to_string())
        .and_then(|text| {
            LEVEL_DIGITS
                .find(&text)
                .and_then(|m| m.as_str().parse().ok())
        })
        .unwrap_or(0)
}

/// Strongest shaking first, then county name. Ties keep their order.
pub fn sort_by_intensity(areas: &mut [IntensityArea]) {
    areas.sort_by(|a, b| {
        let ka = (Reverse(intensity_level(a)), a.county_name.as_deref().unwrap_or(""));
        let kb = (Reverse(intensity_level(b)), b.county_name.as_deref().unwrap_or(""));
        ka.cmp(&kb)
    });
}

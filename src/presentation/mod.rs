//! Presentation layer for the browser client.
//!
//! This module handles:
//! - Display-time deduplication and ordering of intensity areas
//! - The list/detail view model the page paints

pub mod dedupe;
pub mod view;

pub use dedupe::{dedupe_areas, sort_by_intensity};
pub use view::{AreaOrder, Dashboard, DashboardView, DetailView, ListItem};

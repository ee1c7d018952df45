// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! List presentation: rendered workout list, sort toggle, and map markers.
//!
//! Everything here is derived from the store's current contents; nothing
//! in this module mutates the store.

use crate::models::{Coordinates, WorkoutKind, WorkoutRecord};
use crate::time_utils::format_utc_rfc3339;
use serde::Serialize;
use std::fmt::Write as _;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Label for weather codes missing from the table.
pub const NO_WEATHER_DETAILS: &str = "No Details About the Weather";

/// WMO weather interpretation codes as reported by open-meteo.
const WEATHER_LABELS: &[(u16, &str)] = &[
    (0, "Clear Sky"),
    (1, "Mainly Clear"),
    (2, "Partly Cloudy"),
    (3, "Overcast"),
    (45, "Foggy"),
    (48, "Depositing Rime Fog"),
    (51, "Light Drizzle"),
    (53, "Moderate Drizzle"),
    (55, "Dense Intensity of Drizzle"),
    (56, "Light Freezing Drizzle"),
    (57, "Dense Intensity of Freezing Drizzle"),
    (61, "Slight Rain"),
    (63, "Moderate Rain"),
    (65, "Heavy Intensity of Rain"),
    (66, "Light Freezing Rain"),
    (67, "Heavy Intensity of Freezing Rain"),
    (71, "Slight Snow Fall"),
    (73, "Moderate Snow Fall"),
    (75, "Heavy Intensity of Snow Fall"),
    (77, "Snow Grains"),
    (80, "Slight Rain Showers"),
    (81, "Moderate Rain Showers"),
    (82, "Violent Rain Showers"),
    (85, "Slight Snow Showers"),
    (86, "Heavy Snow Showers"),
    // Hail is only reported for Central Europe
    (95, "Slight or Moderate Thunderstorm"),
    (96, "Thunderstorm with Slight Hail"),
    (99, "Thunderstorm with Heavy Hail"),
];

/// Human label for a weather code.
pub fn weather_label(code: u16) -> &'static str {
    WEATHER_LABELS
        .binary_search_by_key(&code, |&(c, _)| c)
        .map(|i| WEATHER_LABELS[i].1)
        .unwrap_or(NO_WEATHER_DETAILS)
}

/// One row of the rendered workout list.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct WorkoutListItem {
    pub id: String,
    pub kind: WorkoutKind,
    pub icon: &'static str,
    pub description: String,
    pub weather: &'static str,
    pub local_time: String,
    pub distance: f64,
    pub duration: f64,
    pub windspeed: f64,
    pub temperature: f64,
    pub rating: f64,
    pub created_at: String,
}

impl WorkoutListItem {
    pub fn from_record(record: &WorkoutRecord) -> Self {
        Self {
            id: record.id.clone(),
            kind: record.kind,
            icon: record.kind.meta().emoji,
            description: record.description.clone(),
            weather: weather_label(record.weather.weathercode),
            local_time: record.local_time.clone(),
            distance: record.distance,
            duration: record.duration,
            windspeed: record.weather.windspeed,
            temperature: record.weather.temperature,
            rating: record.rating,
            created_at: format_utc_rfc3339(record.created_at),
        }
    }

    /// Render as a `<li>` entry for the workout sidebar.
    pub fn to_html(&self) -> String {
        let mut html = String::new();
        let kind = self.kind.label();
        let _ = write!(
            html,
            r#"<li class="workout workout--{kind}" data-id="{id}">
  <h2 class="workout__title">{description}</h2>
  <h2 class="workout__title">{weather} at {local_time} Local Time</h2>
"#,
            id = escape_html(&self.id),
            description = escape_html(&self.description),
            weather = escape_html(self.weather),
            local_time = escape_html(&self.local_time),
        );
        for (icon, value, unit) in [
            (self.icon, self.distance, "km"),
            ("⏱️", self.duration, "min"),
            ("💨", self.windspeed, "km/h"),
            ("🌡️", self.temperature, "°C"),
            ("👍🏻", self.rating, "/ 10"),
        ] {
            let _ = write!(
                html,
                r#"  <div class="workout__details">
    <span class="workout__icon">{icon}</span>
    <span class="workout__value">{value}</span>
    <span class="workout__unit">{unit}</span>
  </div>
"#
            );
        }
        html.push_str(
            r#"  <div class="btn__edit--delete">
    <button class="btn__edit">Edit</button>
    <button class="btn__delete--one">Delete</button>
  </div>
</li>
"#,
        );
        html
    }
}

/// Render the list, most recently appended workout first.
pub fn render(records: &[WorkoutRecord]) -> Vec<WorkoutListItem> {
    records.iter().rev().map(WorkoutListItem::from_record).collect()
}

/// Render the list highest rating first.
///
/// This is a stable ascending sort shown in reverse, so among equal ratings
/// the later-added workout comes first.
pub fn render_by_rating(records: &[WorkoutRecord]) -> Vec<WorkoutListItem> {
    let mut sorted: Vec<&WorkoutRecord> = records.iter().collect();
    sorted.sort_by(|a, b| a.rating.total_cmp(&b.rating));
    sorted.into_iter().rev().map(WorkoutListItem::from_record).collect()
}

/// Concatenate rendered items into one HTML fragment.
pub fn render_html(items: &[WorkoutListItem]) -> String {
    items.iter().map(WorkoutListItem::to_html).collect()
}

/// Which ordering the list is currently shown in.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ListView {
    sorted: bool,
}

impl ListView {
    pub fn is_sorted(&self) -> bool {
        self.sorted
    }

    /// Render in the current ordering.
    pub fn current(&self, records: &[WorkoutRecord]) -> Vec<WorkoutListItem> {
        if self.sorted {
            render_by_rating(records)
        } else {
            render(records)
        }
    }

    /// Flip between insertion and rating order, then render.
    pub fn sort_toggle(&mut self, records: &[WorkoutRecord]) -> Vec<WorkoutListItem> {
        self.sorted = !self.sorted;
        tracing::debug!(sorted = self.sorted, "Toggled workout sort");
        self.current(records)
    }

    /// Back to insertion order.
    pub fn reset(&mut self) {
        self.sorted = false;
    }
}

/// Map marker with popup content for one workout.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Marker {
    pub id: String,
    #[cfg_attr(feature = "binding-generation", ts(type = "[number, number]"))]
    pub coords: Coordinates,
    pub popup_content: String,
    pub class_name: String,
}

impl Marker {
    pub fn from_record(record: &WorkoutRecord) -> Self {
        let meta = record.kind.meta();
        Self {
            id: record.id.clone(),
            coords: record.coords,
            popup_content: format!("{} {}", meta.emoji, record.description),
            class_name: format!("{}-popup", meta.label),
        }
    }
}

pub fn markers(records: &[WorkoutRecord]) -> Vec<Marker> {
    records.iter().map(Marker::from_record).collect()
}

/// Where the map should be centered.
///
/// `center` is `None` when no position is known; the client then shows no map.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct MapView {
    #[cfg_attr(feature = "binding-generation", ts(type = "[number, number] | null"))]
    pub center: Option<Coordinates>,
    pub zoom: u8,
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{LocationData, WeatherData, WorkoutFields};
    use chrono::{Duration, TimeZone, Utc};

    fn record(n: i64, rating: f64, city: &str) -> WorkoutRecord {
        WorkoutRecord::new_at(
            if n % 2 == 0 {
                WorkoutKind::Running
            } else {
                WorkoutKind::Walking
            },
            Coordinates::new(40.0, -3.7),
            WorkoutFields {
                distance: 4.0,
                duration: 25.0,
                rating,
            },
            LocationData {
                city: city.to_string(),
                country: "Spain".to_string(),
                timezone: Some("Europe/Madrid".to_string()),
            },
            WeatherData {
                temperature: 22.0,
                weathercode: 61,
                windspeed: 7.0,
            },
            Utc.with_ymd_and_hms(2024, 3, 10, 9, 0, 0).unwrap() + Duration::seconds(n),
        )
    }

    fn ids(items: &[WorkoutListItem]) -> Vec<String> {
        items.iter().map(|i| i.id.clone()).collect()
    }

    #[test]
    fn test_weather_labels() {
        assert_eq!(weather_label(0), "Clear Sky");
        assert_eq!(weather_label(61), "Slight Rain");
        assert_eq!(weather_label(99), "Thunderstorm with Heavy Hail");
        assert_eq!(weather_label(4), NO_WEATHER_DETAILS);
        assert_eq!(weather_label(1000), NO_WEATHER_DETAILS);
        assert!(WEATHER_LABELS.windows(2).all(|w| w[0].0 < w[1].0));
    }

    #[test]
    fn test_render_newest_first() {
        let records = vec![record(0, 5.0, "Madrid"), record(1, 2.0, "Toledo")];
        let items = render(&records);
        assert_eq!(ids(&items), vec![records[1].id.clone(), records[0].id.clone()]);
        assert_eq!(items[0].weather, "Slight Rain");
    }

    #[test]
    fn test_sort_toggle_twice_restores_order() {
        let records = vec![
            record(0, 7.0, "Madrid"),
            record(1, 2.0, "Toledo"),
            record(2, 9.0, "Segovia"),
            record(3, 2.0, "Avila"),
        ];
        let mut view = ListView::default();
        let original = view.current(&records);

        let sorted = view.sort_toggle(&records);
        let ratings: Vec<f64> = sorted.iter().map(|i| i.rating).collect();
        assert_eq!(ratings, vec![9.0, 7.0, 2.0, 2.0]);
        assert_eq!(sorted[0].id, records[2].id);
        // Avila was added after Toledo, so it is shown first
        assert_eq!(sorted[2].id, records[3].id);
        assert_eq!(sorted[3].id, records[1].id);
        assert!(view.is_sorted());

        let restored = view.sort_toggle(&records);
        assert_eq!(restored, original);
        assert!(!view.is_sorted());
    }

    #[test]
    fn test_html_is_escaped() {
        let r = record(0, 5.0, "<script>alert(1)</script>");
        let html = WorkoutListItem::from_record(&r).to_html();
        assert!(html.contains("&lt;script&gt;"));
        assert!(!html.contains("<script>"));
        assert!(html.contains(r#"class="workout workout--running""#));
        assert!(html.contains("Slight Rain at 10:00 Local Time"));
    }

    #[test]
    fn test_marker_popup() {
        let r = record(1, 5.0, "Toledo");
        let marker = Marker::from_record(&r);
        assert_eq!(marker.class_name, "walking-popup");
        assert!(marker.popup_content.ends_with("Walking in Toledo, Spain on March 10, 2024"));
    }
}

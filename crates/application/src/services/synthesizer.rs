//! Fallback forecast synthesizer
//!
//! When only current conditions are available, this module derives a
//! plausible 5-day forecast so downstream code never has to special-case a
//! missing forecast. Output is deterministic given the input document and
//! the fallback anchor date. Astro fields are fixed placeholders, not
//! authoritative estimates.

use std::collections::BTreeMap;

use chrono::{Days, NaiveDate};
use domain::{Astro, ForecastDay, HourlyEntry, WeatherDocument};

/// Value offsets applied positionally to days 0..4
///
/// The offsets perturb the computed values only; calendar dates always run
/// consecutively from the anchor.
pub const FORECAST_OFFSETS: [f64; 5] = [-2.0, -1.0, 0.0, 1.0, 2.0];

const DEFAULT_TEMPERATURE: f64 = 20.0;
const DEFAULT_WIND_SPEED: f64 = 10.0;
const DEFAULT_HUMIDITY: f64 = 60.0;
const DEFAULT_DESCRIPTION: &str = "Partly cloudy";

/// Synthesize a 5-day forecast map from current conditions
///
/// The first day anchors to the location's local date when the document
/// carries a parseable `localtime`, else to `fallback_anchor`.
pub fn synthesize(
    document: &WeatherDocument,
    fallback_anchor: NaiveDate,
) -> BTreeMap<String, ForecastDay> {
    let current = document.current.clone().unwrap_or_default();

    let base_temp = current.temperature.unwrap_or(DEFAULT_TEMPERATURE);
    let base_wind = current.wind_speed.unwrap_or(DEFAULT_WIND_SPEED);
    let base_humidity = current.humidity.unwrap_or(DEFAULT_HUMIDITY);
    let description = current
        .description()
        .unwrap_or(DEFAULT_DESCRIPTION)
        .to_string();
    let anchor = anchor_date(document, fallback_anchor);

    let mut forecast = BTreeMap::new();
    for (index, offset) in FORECAST_OFFSETS.into_iter().enumerate() {
        let date = anchor
            .checked_add_days(Days::new(index as u64))
            .unwrap_or(anchor);
        let iso = date.format("%Y-%m-%d").to_string();

        let max_temp = (base_temp + offset + 3.0).round();
        let min_temp = (base_temp + offset - 3.0).round();
        let avg_temp = ((max_temp + min_temp) / 2.0).round();
        let chance_of_rain = (base_humidity + offset * 5.0).clamp(10.0, 90.0);

        let hourly = HourlyEntry {
            time: Some("1200".to_string()),
            temperature: Some(avg_temp),
            weather_descriptions: vec![description.clone()],
            wind_speed: Some((base_wind + offset).round().max(5.0)),
            wind_dir: Some(current.wind_dir.clone().unwrap_or_else(|| "N".to_string())),
            pressure: Some(current.pressure.unwrap_or(1012.0)),
            humidity: Some((base_humidity + offset * 3.0).round().clamp(20.0, 100.0)),
            visibility: Some(current.visibility.unwrap_or(10.0)),
            chanceofrain: Some(format!("{}", chance_of_rain.round())),
        };

        forecast.insert(
            iso.clone(),
            ForecastDay {
                date: Some(iso),
                maxtemp: Some(max_temp),
                mintemp: Some(min_temp),
                avgtemp: Some(avg_temp),
                sunhour: Some("9.5".to_string()),
                astro: Some(placeholder_astro()),
                hourly: vec![hourly],
            },
        );
    }
    forecast
}

/// Local date from the document's `localtime`, else the fallback
fn anchor_date(document: &WeatherDocument, fallback: NaiveDate) -> NaiveDate {
    document
        .location
        .as_ref()
        .and_then(|loc| loc.localtime.as_deref())
        .and_then(|localtime| localtime.split_whitespace().next())
        .and_then(|date| NaiveDate::parse_from_str(date, "%Y-%m-%d").ok())
        .unwrap_or(fallback)
}

fn placeholder_astro() -> Astro {
    Astro {
        sunrise: Some("06:45 AM".to_string()),
        sunset: Some("07:10 PM".to_string()),
        moonrise: Some("11:00 PM".to_string()),
        moonset: Some("11:00 AM".to_string()),
        moon_phase: Some("Waning Gibbous".to_string()),
        moon_illumination: Some("65".to_string()),
    }
}

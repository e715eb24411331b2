//! Semi-structured upstream weather payloads
//!
//! The upstream API is loosely typed: numbers arrive as numbers or numeric
//! strings depending on the endpoint and plan. Rather than trusting that
//! shape throughout the system, the payload is validated into these types at
//! the boundary with explicit optional fields and tolerant deserializers.
//! Non-numeric values become `None` and are subject to the documented
//! defaulting rules in the synthesizer and presentation layers.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Full weather payload for one location query
///
/// `forecast` is keyed by ISO date (`YYYY-MM-DD`); a `BTreeMap` keeps the
/// days in calendar order. Hourly entries within a day are not guaranteed
/// sorted by the source; consumers treat the first entry as representative.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WeatherDocument {
    /// Resolved location metadata, including the local time string
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<LocationInfo>,

    /// Current observed conditions
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current: Option<CurrentConditions>,

    /// Daily forecast keyed by ISO date
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub forecast: BTreeMap<String, ForecastDay>,
}

/// Location metadata from the upstream response
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LocationInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    /// Local time as `YYYY-MM-DD HH:MM`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub localtime: Option<String>,
}

/// Current observed conditions
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    #[serde(default, deserialize_with = "loose_number")]
    pub temperature: Option<f64>,
    #[serde(default, deserialize_with = "loose_number")]
    pub feelslike: Option<f64>,
    #[serde(default, deserialize_with = "loose_number")]
    pub wind_speed: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wind_dir: Option<String>,
    #[serde(default, deserialize_with = "loose_number")]
    pub humidity: Option<f64>,
    #[serde(default, deserialize_with = "loose_number")]
    pub pressure: Option<f64>,
    #[serde(default, deserialize_with = "loose_number")]
    pub visibility: Option<f64>,
    #[serde(default, deserialize_with = "loose_number")]
    pub precip: Option<f64>,
    #[serde(default, deserialize_with = "loose_number")]
    pub uv_index: Option<f64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub weather_descriptions: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub weather_icons: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub air_quality: Option<AirQuality>,
    /// Some plans include astro data on the current block
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub astro: Option<Astro>,
}

impl CurrentConditions {
    /// First weather description, if any
    pub fn description(&self) -> Option<&str> {
        self.weather_descriptions.first().map(String::as_str)
    }
}

/// Air quality readings; the upstream serializes these as strings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AirQuality {
    #[serde(default, deserialize_with = "loose_number")]
    pub pm2_5: Option<f64>,
    #[serde(default, deserialize_with = "loose_number")]
    pub pm10: Option<f64>,
    #[serde(default, deserialize_with = "loose_number")]
    pub o3: Option<f64>,
    #[serde(
        default,
        rename = "us-epa-index",
        deserialize_with = "loose_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub us_epa_index: Option<f64>,
}

/// Sunrise/sunset and moon data for a day
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Astro {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sunrise: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sunset: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub moonrise: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub moonset: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub moon_phase: Option<String>,
    #[serde(default, deserialize_with = "loose_string")]
    pub moon_illumination: Option<String>,
}

/// One forecast day
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ForecastDay {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, deserialize_with = "loose_number")]
    pub maxtemp: Option<f64>,
    #[serde(default, deserialize_with = "loose_number")]
    pub mintemp: Option<f64>,
    #[serde(default, deserialize_with = "loose_number")]
    pub avgtemp: Option<f64>,
    #[serde(default, deserialize_with = "loose_string")]
    pub sunhour: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub astro: Option<Astro>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub hourly: Vec<HourlyEntry>,
}

impl ForecastDay {
    /// Representative hourly entry (first by source order)
    pub fn representative_hour(&self) -> Option<&HourlyEntry> {
        self.hourly.first()
    }
}

/// One hourly forecast entry
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HourlyEntry {
    #[serde(default, deserialize_with = "loose_string")]
    pub time: Option<String>,
    #[serde(default, deserialize_with = "loose_number")]
    pub temperature: Option<f64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub weather_descriptions: Vec<String>,
    #[serde(default, deserialize_with = "loose_number")]
    pub wind_speed: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wind_dir: Option<String>,
    #[serde(default, deserialize_with = "loose_number")]
    pub pressure: Option<f64>,
    #[serde(default, deserialize_with = "loose_number")]
    pub humidity: Option<f64>,
    #[serde(default, deserialize_with = "loose_number")]
    pub visibility: Option<f64>,
    #[serde(default, deserialize_with = "loose_string")]
    pub chanceofrain: Option<String>,
}

/// Accept a number or a numeric string; anything else becomes `None`
fn loose_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| match v {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }))
}

/// Accept a string or a number, normalized to a string
fn loose_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| match v {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }))
}

//! Presentation formatting helpers
//!
//! Pure functions turning raw document values into display strings. Metric is
//! the source unit system; imperial values are derived at display time.
//! Missing or unparseable values render as "--" rather than erroring.

use chrono::{DateTime, NaiveDateTime, Utc};

/// Unit system for rendered values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Units {
    #[default]
    Imperial,
    Metric,
}

impl Units {
    /// Toggle label, e.g. "°F"
    pub const fn degrees_label(self) -> &'static str {
        match self {
            Self::Imperial => "°F",
            Self::Metric => "°C",
        }
    }
}

/// Rounded display temperature, converted from Celsius when imperial
pub fn format_temperature(value: Option<f64>, units: Units) -> Option<i64> {
    let celsius = value?;
    if !celsius.is_finite() {
        return None;
    }
    let shown = match units {
        Units::Imperial => celsius * 9.0 / 5.0 + 32.0,
        Units::Metric => celsius,
    };
    Some(shown.round() as i64)
}

/// Wind speed with unit suffix, from km/h
pub fn format_wind_speed(speed_kph: Option<f64>, units: Units) -> String {
    match speed_kph {
        Some(speed) if speed.is_finite() => match units {
            Units::Imperial => format!("{} mph", (speed / 1.609).round()),
            Units::Metric => format!("{} km/h", speed.round()),
        },
        _ => "--".to_string(),
    }
}

/// Visibility with unit suffix, from kilometres
pub fn format_visibility(visibility_km: Option<f64>, units: Units) -> String {
    match visibility_km {
        Some(visibility) if visibility.is_finite() => match units {
            Units::Imperial => format!("{} mi", (visibility / 1.609).round()),
            Units::Metric => format!("{} km", visibility.round()),
        },
        _ => "--".to_string(),
    }
}

/// Precipitation with unit suffix, from millimetres
pub fn format_precipitation(value_mm: Option<f64>, units: Units) -> String {
    match value_mm {
        Some(value) if value.is_finite() => match units {
            Units::Imperial => format!("{:.2} in", value / 25.4),
            Units::Metric => format!("{value:.1} mm"),
        },
        _ => "--".to_string(),
    }
}

/// Coarse age of a fetch, relative to `now`
///
/// Under a minute reads "Just now", then rounded minutes and hours; a day or
/// older falls back to a short date like "Jun 12".
pub fn format_relative_time(now: DateTime<Utc>, timestamp: Option<DateTime<Utc>>) -> String {
    let Some(timestamp) = timestamp else {
        return "—".to_string();
    };
    let elapsed = now.signed_duration_since(timestamp);
    let seconds = elapsed.num_seconds();
    if seconds < 60 {
        return "Just now".to_string();
    }
    if seconds < 3_600 {
        return format!("{} min ago", (seconds as f64 / 60.0).round());
    }
    if seconds < 86_400 {
        return format!("{} hr ago", (seconds as f64 / 3_600.0).round());
    }
    timestamp.format("%b %-d").to_string()
}

/// Weekday/time labels from a document `localtime` like "2025-06-12 14:30"
///
/// Unparseable input yields empty labels so callers can render blanks.
pub fn local_date_labels(localtime: Option<&str>) -> (String, String) {
    let Some(parsed) = localtime
        .and_then(|raw| NaiveDateTime::parse_from_str(raw.trim(), "%Y-%m-%d %H:%M").ok())
    else {
        return (String::new(), String::new());
    };
    (
        parsed.format("%A, %B %-d").to_string(),
        parsed.format("%-I:%M %p").to_string(),
    )
}

/// Status word for a US EPA air quality index
pub fn air_quality_status(index: Option<i64>) -> &'static str {
    match index {
        Some(1) => "Good",
        Some(2) => "Moderate",
        Some(3) => "Sensitive",
        Some(4) => "Unhealthy",
        Some(5) => "Very unhealthy",
        Some(6) => "Hazardous",
        _ => "Unknown",
    }
}

/// UV index with a Low/High qualifier, "--" when absent
pub fn uv_index_label(uv_index: Option<f64>) -> String {
    match uv_index {
        Some(value) if value.is_finite() => {
            let qualifier = if value < 3.0 { "(Low)" } else { "(High)" };
            if value.fract() == 0.0 {
                format!("{} {qualifier}", value as i64)
            } else {
                format!("{value} {qualifier}")
            }
        },
        _ => "--".to_string(),
    }
}

/// Coarse condition bucket used to pick a forecast glyph
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConditionKind {
    Rain,
    Cloud,
    Clear,
}

impl ConditionKind {
    /// Classify a free-text condition description
    pub fn classify(condition: &str) -> Self {
        let normalized = condition.to_lowercase();
        if normalized.contains("rain") {
            Self::Rain
        } else if normalized.contains("cloud") {
            Self::Cloud
        } else {
            Self::Clear
        }
    }
}

/// Data provider attribution line
pub const fn provider_label(is_sample: bool) -> &'static str {
    if is_sample {
        "Weather data provided by sample Weatherstack payload"
    } else {
        "Weather data provided by Weatherstack"
    }
}

/// Connectivity summary for the status bar
pub const fn status_detail(is_sample: bool, is_forecast_sample: bool) -> &'static str {
    if is_sample {
        "Offline (sample)"
    } else if is_forecast_sample {
        "Partial (forecast sample)"
    } else {
        "Online"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    #[test]
    fn temperature_converts_to_fahrenheit() {
        assert_eq!(format_temperature(Some(22.0), Units::Imperial), Some(72));
        assert_eq!(format_temperature(Some(22.0), Units::Metric), Some(22));
        assert_eq!(format_temperature(Some(-40.0), Units::Imperial), Some(-40));
    }

    #[test]
    fn temperature_missing_is_none() {
        assert_eq!(format_temperature(None, Units::Metric), None);
        assert_eq!(format_temperature(Some(f64::NAN), Units::Metric), None);
    }

    #[test]
    fn wind_speed_converts_and_falls_back() {
        assert_eq!(format_wind_speed(Some(16.0), Units::Metric), "16 km/h");
        assert_eq!(format_wind_speed(Some(16.0), Units::Imperial), "10 mph");
        assert_eq!(format_wind_speed(None, Units::Metric), "--");
    }

    #[test]
    fn visibility_converts_and_falls_back() {
        assert_eq!(format_visibility(Some(16.0), Units::Metric), "16 km");
        assert_eq!(format_visibility(Some(16.0), Units::Imperial), "10 mi");
        assert_eq!(format_visibility(None, Units::Imperial), "--");
    }

    #[test]
    fn precipitation_keeps_decimals() {
        assert_eq!(format_precipitation(Some(2.0), Units::Metric), "2.0 mm");
        assert_eq!(format_precipitation(Some(25.4), Units::Imperial), "1.00 in");
        assert_eq!(format_precipitation(None, Units::Metric), "--");
    }

    #[test]
    fn relative_time_buckets() {
        let now = Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap();
        assert_eq!(format_relative_time(now, None), "—");
        assert_eq!(
            format_relative_time(now, Some(now - Duration::seconds(30))),
            "Just now"
        );
        assert_eq!(
            format_relative_time(now, Some(now - Duration::seconds(90))),
            "2 min ago"
        );
        assert_eq!(
            format_relative_time(now, Some(now - Duration::minutes(20))),
            "20 min ago"
        );
        assert_eq!(
            format_relative_time(now, Some(now - Duration::hours(3))),
            "3 hr ago"
        );
        assert_eq!(
            format_relative_time(now, Some(now - Duration::days(2))),
            "Feb 27"
        );
    }

    #[test]
    fn local_labels_from_localtime() {
        let (date_label, time_label) = local_date_labels(Some("2025-06-12 14:30"));
        assert_eq!(date_label, "Thursday, June 12");
        assert_eq!(time_label, "2:30 PM");
    }

    #[test]
    fn local_labels_blank_when_unparseable() {
        assert_eq!(local_date_labels(None), (String::new(), String::new()));
        assert_eq!(
            local_date_labels(Some("later today")),
            (String::new(), String::new())
        );
    }

    #[test]
    fn air_quality_status_map() {
        assert_eq!(air_quality_status(Some(1)), "Good");
        assert_eq!(air_quality_status(Some(3)), "Sensitive");
        assert_eq!(air_quality_status(Some(6)), "Hazardous");
        assert_eq!(air_quality_status(Some(9)), "Unknown");
        assert_eq!(air_quality_status(None), "Unknown");
    }

    #[test]
    fn uv_label_thresholds() {
        assert_eq!(uv_index_label(Some(2.0)), "2 (Low)");
        assert_eq!(uv_index_label(Some(3.0)), "3 (High)");
        assert_eq!(uv_index_label(Some(7.5)), "7.5 (High)");
        assert_eq!(uv_index_label(None), "--");
    }

    #[test]
    fn condition_classification() {
        assert_eq!(
            ConditionKind::classify("Patchy rain possible"),
            ConditionKind::Rain
        );
        assert_eq!(ConditionKind::classify("Partly Cloudy"), ConditionKind::Cloud);
        assert_eq!(ConditionKind::classify("Sunny"), ConditionKind::Clear);
    }

    #[test]
    fn status_strings() {
        assert_eq!(
            provider_label(false),
            "Weather data provided by Weatherstack"
        );
        assert_eq!(
            provider_label(true),
            "Weather data provided by sample Weatherstack payload"
        );
        assert_eq!(status_detail(false, false), "Online");
        assert_eq!(status_detail(false, true), "Partial (forecast sample)");
        assert_eq!(status_detail(true, true), "Offline (sample)");
    }
}

//! Dashboard rendering
//!
//! Turns an acquired weather document into the text dashboard: current
//! conditions, a 5-day forecast strip, air quality, a details card, and a
//! status line. All value formatting goes through the display helpers so
//! the CLI and any other frontend agree on the numbers.

use std::fmt::Write as _;

use application::AcquiredWeather;
use application::services::display::{
    ConditionKind, Units, air_quality_status, format_precipitation, format_relative_time,
    format_temperature, format_visibility, format_wind_speed, local_date_labels, provider_label,
    status_detail, uv_index_label,
};
use chrono::{DateTime, NaiveDate, Utc};
use domain::{CurrentConditions, ForecastDay, Location};

/// Render the full dashboard for one location
pub fn render_dashboard(
    acquired: &AcquiredWeather,
    location: &Location,
    units: Units,
    now: DateTime<Utc>,
) -> String {
    let mut out = String::new();
    let document = &acquired.payload;
    let current = document.current.clone().unwrap_or_default();

    let localtime = document
        .location
        .as_ref()
        .and_then(|l| l.localtime.as_deref());
    let (date_label, time_label) = local_date_labels(localtime);

    writeln!(out, "{}", location.label).ok();
    if !date_label.is_empty() {
        writeln!(out, "{date_label} · {time_label}").ok();
    }
    writeln!(out).ok();

    writeln!(out, "{}", current_line(&current, units)).ok();
    writeln!(out).ok();

    writeln!(out, "Forecast:").ok();
    for day in document.forecast.values().take(5) {
        writeln!(out, "  {}", forecast_line(day, units)).ok();
    }
    writeln!(out).ok();

    if let Some(air_quality) = &current.air_quality {
        let index = air_quality.us_epa_index.and_then(integral_index);
        writeln!(out, "Air quality:").ok();
        writeln!(
            out,
            "  Index {} · {}",
            index.map_or_else(|| "--".to_string(), |i| i.to_string()),
            air_quality_status(index)
        )
        .ok();
        writeln!(
            out,
            "  PM2.5 {}  PM10 {}  O3 {}",
            metric(air_quality.pm2_5),
            metric(air_quality.pm10),
            metric(air_quality.o3)
        )
        .ok();
        writeln!(out).ok();
    }

    writeln!(out, "Details:").ok();
    for (label, value) in detail_rows(document, &current, units) {
        writeln!(out, "  {label:<16}{value}").ok();
    }
    writeln!(out).ok();

    writeln!(
        out,
        "{} · {} · Updated {}",
        provider_label(acquired.is_sample),
        status_detail(acquired.is_sample, acquired.is_forecast_sample),
        format_relative_time(now, Some(acquired.fetched_at))
    )
    .ok();

    if let Some(warning) = &acquired.warning {
        writeln!(out, "Warning: {warning}").ok();
    }

    out
}

fn current_line(current: &CurrentConditions, units: Units) -> String {
    let temperature = degrees(format_temperature(current.temperature, units), units);
    let feels_like = format_temperature(current.feelslike, units)
        .map_or_else(|| "--".to_string(), |v| v.to_string());
    let description = current.description().unwrap_or("--");
    format!("{temperature} {description} (Feels like {feels_like}°)")
}

fn forecast_line(day: &ForecastDay, units: Units) -> String {
    let weekday = day
        .date
        .as_deref()
        .and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok())
        .map_or_else(|| "---".to_string(), |d| d.format("%a").to_string());

    let condition = day
        .representative_hour()
        .and_then(|h| h.weather_descriptions.first())
        .map_or("", String::as_str);

    let high = format_temperature(day.maxtemp, units)
        .map_or_else(|| "--".to_string(), |v| v.to_string());
    let low = format_temperature(day.mintemp, units)
        .map_or_else(|| "--".to_string(), |v| v.to_string());

    format!("{weekday} {} {high}°/{low}°", glyph(condition))
}

fn detail_rows(
    document: &domain::WeatherDocument,
    current: &CurrentConditions,
    units: Units,
) -> Vec<(&'static str, String)> {
    let today = document.forecast.values().next();
    let astro = today.and_then(|d| d.astro.as_ref());
    let chance_of_rain = today
        .and_then(ForecastDay::representative_hour)
        .and_then(|h| h.chanceofrain.clone());

    let mut rows = vec![
        (
            "Wind",
            format!(
                "{} {}",
                format_wind_speed(current.wind_speed, units),
                current.wind_dir.as_deref().unwrap_or("")
            )
            .trim_end()
            .to_string(),
        ),
        ("Humidity", percentage(current.humidity)),
        ("Visibility", format_visibility(current.visibility, units)),
        (
            "Pressure",
            current
                .pressure
                .map_or_else(|| "--".to_string(), |p| format!("{p} hPa")),
        ),
        ("UV Index", uv_index_label(current.uv_index)),
        (
            "Precipitation",
            format_precipitation(current.precip, units),
        ),
    ];

    if let Some(astro) = astro {
        rows.push(("Sunrise", astro.sunrise.clone().unwrap_or_default()));
        rows.push(("Sunset", astro.sunset.clone().unwrap_or_default()));
        rows.push(("Moon phase", astro.moon_phase.clone().unwrap_or_default()));
    }
    if let Some(chance) = chance_of_rain {
        rows.push(("Chance of rain", format!("{chance}%")));
    }

    rows
}

fn degrees(value: Option<i64>, units: Units) -> String {
    value.map_or_else(
        || format!("--{}", units.degrees_label()),
        |v| format!("{v}{}", units.degrees_label()),
    )
}

/// The EPA scale is integer-keyed; fractional readings have no bucket
fn integral_index(value: f64) -> Option<i64> {
    (value.is_finite() && value.fract() == 0.0).then_some(value as i64)
}

fn percentage(value: Option<f64>) -> String {
    value.map_or_else(|| "--".to_string(), |v| format!("{v}%"))
}

fn metric(value: Option<f64>) -> String {
    value.map_or_else(|| "--".to_string(), |v| v.to_string())
}

fn glyph(condition: &str) -> &'static str {
    match ConditionKind::classify(condition) {
        ConditionKind::Rain => "🌧",
        ConditionKind::Cloud => "☁",
        ConditionKind::Clear => "☀",
    }
}

use std::fmt;

use chrono::{DateTime, TimeZone};
use serde::{Deserialize, Serialize};

use crate::FetchError;

const ABSOLUTE_ZERO_C: f64 = 273.15;

/// Value shown in a row that has not been filled yet.
pub const PLACEHOLDER: &str = "--";

/// Current conditions for one city, already converted for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReport {
    pub climate: String,
    pub description: String,
    pub temperature_c: f64,
    pub pressure_hpa: f64,
    pub latitude: f64,
    pub longitude: f64,
    pub humidity_pct: f64,
    /// Local wall-clock time, `HH:MM`.
    pub sunrise: String,
    /// Local wall-clock time, `HH:MM`.
    pub sunset: String,
}

/// Outcome of one lookup. Errors of every kind collapse into `Failure`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum WeatherQueryResult {
    Success(WeatherReport),
    Failure { message: String },
}

impl WeatherQueryResult {
    pub fn is_success(&self) -> bool {
        matches!(self, WeatherQueryResult::Success(_))
    }

    pub fn report(&self) -> Option<&WeatherReport> {
        match self {
            WeatherQueryResult::Success(report) => Some(report),
            WeatherQueryResult::Failure { .. } => None,
        }
    }

    /// One `(field, text)` pair per output row, in display order.
    ///
    /// A failure puts its message in the `Climate` row and leaves the rest
    /// as [`PLACEHOLDER`].
    pub fn display_fields(&self) -> Vec<(DisplayField, String)> {
        match self {
            WeatherQueryResult::Success(report) => report.display_fields(),
            WeatherQueryResult::Failure { message } => DisplayField::all()
                .iter()
                .map(|field| {
                    let text = match field {
                        DisplayField::Climate => message.clone(),
                        _ => PLACEHOLDER.to_string(),
                    };
                    (*field, text)
                })
                .collect(),
        }
    }
}

impl From<Result<WeatherReport, FetchError>> for WeatherQueryResult {
    fn from(result: Result<WeatherReport, FetchError>) -> Self {
        match result {
            Ok(report) => WeatherQueryResult::Success(report),
            Err(err) => WeatherQueryResult::Failure { message: err.to_string() },
        }
    }
}

impl WeatherReport {
    pub fn display_fields(&self) -> Vec<(DisplayField, String)> {
        DisplayField::all()
            .iter()
            .map(|field| (*field, self.display_value(*field)))
            .collect()
    }

    pub fn display_value(&self, field: DisplayField) -> String {
        match field {
            DisplayField::Climate => self.climate.clone(),
            DisplayField::Description => self.description.clone(),
            DisplayField::Temperature => format_temperature(self.temperature_c),
            DisplayField::Pressure => format!("{} hPa", self.pressure_hpa),
            DisplayField::Latitude => self.latitude.to_string(),
            DisplayField::Longitude => self.longitude.to_string(),
            DisplayField::Humidity => format!("{}%", self.humidity_pct),
            DisplayField::Sunrise => self.sunrise.clone(),
            DisplayField::Sunset => self.sunset.clone(),
        }
    }
}

/// Rows of the output grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DisplayField {
    Climate,
    Description,
    Temperature,
    Pressure,
    Latitude,
    Longitude,
    Humidity,
    Sunrise,
    Sunset,
}

impl DisplayField {
    pub fn label(&self) -> &'static str {
        match self {
            DisplayField::Climate => "Climate",
            DisplayField::Description => "Description",
            DisplayField::Temperature => "Temperature (°C)",
            DisplayField::Pressure => "Pressure",
            DisplayField::Latitude => "Latitude",
            DisplayField::Longitude => "Longitude",
            DisplayField::Humidity => "Humidity",
            DisplayField::Sunrise => "Sunrise Time",
            DisplayField::Sunset => "Sunset Time",
        }
    }

    pub const fn all() -> &'static [DisplayField] {
        &[
            DisplayField::Climate,
            DisplayField::Description,
            DisplayField::Temperature,
            DisplayField::Pressure,
            DisplayField::Latitude,
            DisplayField::Longitude,
            DisplayField::Humidity,
            DisplayField::Sunrise,
            DisplayField::Sunset,
        ]
    }
}

impl fmt::Display for DisplayField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Kelvin to Celsius, rounded to two decimal places.
pub fn kelvin_to_celsius(kelvin: f64) -> f64 {
    ((kelvin - ABSOLUTE_ZERO_C) * 100.0).round() / 100.0
}

/// `26.85°C`, `0.0°C`: shortest form, but always at least one decimal.
pub fn format_temperature(celsius: f64) -> String {
    // -0.0 after rounding a value just below freezing
    let celsius = if celsius == 0.0 { 0.0 } else { celsius };

    if celsius.fract() == 0.0 {
        format!("{celsius:.1}°C")
    } else {
        format!("{celsius}°C")
    }
}

/// Render a Unix timestamp as `HH:MM` wall-clock time in `tz`.
pub fn format_clock<Tz>(timestamp: i64, tz: &Tz) -> Result<String, FetchError>
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    let utc = DateTime::from_timestamp(timestamp, 0)
        .ok_or_else(|| FetchError::Parse(format!("timestamp {timestamp} is out of range")))?;

    Ok(utc.with_timezone(tz).format("%H:%M").to_string())
}

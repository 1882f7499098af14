use std::fmt;

use chrono::{Local, TimeZone};

use crate::{
    City, FetchError, Selection, WeatherProvider, WeatherQueryResult, WeatherReport,
    model::{format_clock, kelvin_to_celsius},
    provider::openweather::{OwCurrentResponse, OwEnvelope},
};

/// The fetch-and-render flow: selection in, display-ready result out.
///
/// Sunrise and sunset are rendered in `Tz`, the machine's local zone unless
/// built with [`WeatherService::with_timezone`].
pub struct WeatherService<Tz: TimeZone = Local> {
    provider: Box<dyn WeatherProvider>,
    tz: Tz,
}

impl WeatherService<Local> {
    pub fn new(provider: Box<dyn WeatherProvider>) -> Self {
        Self::with_timezone(provider, Local)
    }
}

impl<Tz> WeatherService<Tz>
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    pub fn with_timezone(provider: Box<dyn WeatherProvider>, tz: Tz) -> Self {
        Self { provider, tz }
    }

    /// Look up current conditions, folding any error into
    /// [`WeatherQueryResult::Failure`].
    pub async fn fetch_weather(&self, selection: Selection) -> WeatherQueryResult {
        self.try_fetch_weather(selection).await.into()
    }

    pub async fn try_fetch_weather(&self, selection: Selection) -> Result<WeatherReport, FetchError> {
        let city = match selection {
            Selection::Placeholder => return Err(FetchError::NoCitySelected),
            Selection::City(city) => city,
        };

        let body = self.provider.current_conditions(city).await?;

        self.parse_report(city, &body).map_err(|err| {
            tracing::warn!(%city, error = %err, "weather lookup failed");
            err
        })
    }

    fn parse_report(&self, city: City, body: &str) -> Result<WeatherReport, FetchError> {
        let envelope: OwEnvelope = serde_json::from_str(body)?;
        if !envelope.cod.is_ok() {
            let message = envelope
                .message
                .unwrap_or_else(|| format!("request failed with code {}", envelope.cod));
            return Err(FetchError::Provider { message });
        }

        let parsed: OwCurrentResponse = serde_json::from_str(body)?;

        let conditions = parsed
            .weather
            .first()
            .ok_or_else(|| FetchError::Parse("response contained no weather conditions".into()))?;

        let report = WeatherReport {
            climate: conditions.main.clone(),
            description: conditions.description.clone(),
            temperature_c: kelvin_to_celsius(parsed.main.temp),
            pressure_hpa: parsed.main.pressure,
            latitude: parsed.coord.lat,
            longitude: parsed.coord.lon,
            humidity_pct: parsed.main.humidity,
            sunrise: format_clock(parsed.sys.sunrise, &self.tz)?,
            sunset: format_clock(parsed.sys.sunset, &self.tz)?,
        };

        tracing::debug!(%city, climate = %report.climate, temperature_c = report.temperature_c, "weather lookup succeeded");
        Ok(report)
    }
}

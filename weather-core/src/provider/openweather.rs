use async_trait::async_trait;
use reqwest::{Client, Request};
use serde::Deserialize;

use crate::{City, FetchError};

use super::WeatherProvider;

pub const DEFAULT_ENDPOINT: &str = "https://api.openweathermap.org/data/2.5/weather";

/// OpenWeather "current weather" endpoint, default (Kelvin) units.
#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    endpoint: String,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn new(api_key: String) -> Self {
        Self::with_endpoint(api_key, DEFAULT_ENDPOINT.to_string())
    }

    pub fn with_endpoint(api_key: String, endpoint: String) -> Self {
        Self {
            api_key,
            endpoint,
            http: Client::new(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn request(&self, city: City) -> Result<Request, FetchError> {
        let request = self
            .http
            .get(&self.endpoint)
            .query(&[("q", city.as_str()), ("appid", self.api_key.as_str())])
            .build()?;

        Ok(request)
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    async fn current_conditions(&self, city: City) -> Result<String, FetchError> {
        let request = self.request(city)?;
        tracing::debug!(%city, endpoint = %self.endpoint, "requesting current conditions");

        let res = self.http.execute(request).await.map_err(|err| {
            tracing::warn!(%city, error = %err, "OpenWeather request failed");
            FetchError::from(err)
        })?;

        // Error bodies carry `cod` and `message`, so the body is returned
        // whatever the HTTP status.
        let status = res.status();
        let body = res.text().await?;
        tracing::debug!(%city, %status, body = %truncate_body(&body), "OpenWeather responded");

        Ok(body)
    }
}

/// Status code embedded in every OpenWeather body. Success bodies use a
/// number, error bodies usually a string.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub(crate) enum OwCode {
    Number(i64),
    Text(String),
}

impl OwCode {
    pub(crate) fn is_ok(&self) -> bool {
        match self {
            OwCode::Number(code) => *code == 200,
            OwCode::Text(code) => code.trim() == "200",
        }
    }
}

impl std::fmt::Display for OwCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OwCode::Number(code) => write!(f, "{code}"),
            OwCode::Text(code) => f.write_str(code),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct OwEnvelope {
    pub(crate) cod: OwCode,
    pub(crate) message: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct OwCoord {
    pub(crate) lat: f64,
    pub(crate) lon: f64,
}

#[derive(Debug, Deserialize)]
pub(crate) struct OwWeather {
    pub(crate) main: String,
    pub(crate) description: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct OwMain {
    pub(crate) temp: f64,
    pub(crate) pressure: f64,
    pub(crate) humidity: f64,
}

#[derive(Debug, Deserialize)]
pub(crate) struct OwSys {
    pub(crate) sunrise: i64,
    pub(crate) sunset: i64,
}

#[derive(Debug, Deserialize)]
pub(crate) struct OwCurrentResponse {
    pub(crate) coord: OwCoord,
    pub(crate) weather: Vec<OwWeather>,
    pub(crate) main: OwMain,
    pub(crate) sys: OwSys,
}

fn truncate_body(body: &str) -> &str {
    const MAX: usize = 200;
    if body.len() <= MAX {
        return body;
    }

    let mut end = MAX;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    &body[..end]
}

use std::fmt::Display;

use chrono::{DateTime, TimeZone};
use weather_core::{DisplayField, WeatherQueryResult};

const TITLE: &str = "Weather App";

/// Title, clock, then one `Label: value` row per field.
pub fn screen<Tz>(result: &WeatherQueryResult, now: DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let mut out = format!("{TITLE}\n{}\n\n", now.format("%H:%M:%S"));
    out.push_str(&rows(result));
    out
}

pub fn rows(result: &WeatherQueryResult) -> String {
    let width = DisplayField::all()
        .iter()
        .map(|field| field.label().chars().count())
        .max()
        .unwrap_or(0);

    result
        .display_fields()
        .into_iter()
        .map(|(field, value)| {
            let label = format!("{}:", field.label());
            format!("{label:>w$} {value}", w = width + 1)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use weather_core::WeatherReport;

    fn report() -> WeatherQueryResult {
        WeatherQueryResult::Success(WeatherReport {
            climate: "Clear".into(),
            description: "clear sky".into(),
            temperature_c: 0.0,
            pressure_hpa: 1009.0,
            latitude: 28.6667,
            longitude: 77.2167,
            humidity_pct: 40.0,
            sunrise: "06:45".into(),
            sunset: "17:29".into(),
        })
    }

    #[test]
    fn rows_are_right_aligned_labels() {
        let text = rows(&report());
        let lines: Vec<_> = text.lines().collect();

        assert_eq!(lines.len(), DisplayField::all().len());
        assert_eq!(lines[0], "         Climate: Clear");
        assert_eq!(lines[2], "Temperature (°C): 0.0°C");
        assert_eq!(lines[3], "        Pressure: 1009 hPa");
        assert_eq!(lines[8], "     Sunset Time: 17:29");
    }

    #[test]
    fn failure_shows_message_and_placeholders() {
        let result = WeatherQueryResult::Failure { message: "Please select a city.".into() };
        let text = rows(&result);

        assert!(text.starts_with("         Climate: Please select a city."));
        assert!(text.lines().skip(1).all(|line| line.ends_with(" --")));
    }

    #[test]
    fn screen_has_title_and_clock() {
        let now = Utc.with_ymd_and_hms(2024, 3, 1, 9, 5, 7).unwrap();
        let text = screen(&report(), now);

        assert!(text.starts_with("Weather App\n09:05:07\n\n"));
    }
}

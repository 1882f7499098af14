use std::{convert::TryFrom, fmt};

use serde::Serialize;

use crate::FetchError;

/// Text shown by the selector before the user picks anything.
pub const SENTINEL: &str = "Select a City";

/// Cities offered by the selector, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum City {
    Mumbai,
    Delhi,
    Bangalore,
    Kolkata,
    Chennai,
    Hyderabad,
    Ahmedabad,
    Pune,
    Jaipur,
    Surat,
    Varanasi,
    Lucknow,
    Nagpur,
}

impl City {
    /// Name as sent to the provider in the `q` parameter.
    pub fn as_str(&self) -> &'static str {
        match self {
            City::Mumbai => "Mumbai",
            City::Delhi => "Delhi",
            City::Bangalore => "Bangalore",
            City::Kolkata => "Kolkata",
            City::Chennai => "Chennai",
            City::Hyderabad => "Hyderabad",
            City::Ahmedabad => "Ahmedabad",
            City::Pune => "Pune",
            City::Jaipur => "Jaipur",
            City::Surat => "Surat",
            City::Varanasi => "Varanasi",
            City::Lucknow => "Lucknow",
            City::Nagpur => "Nagpur",
        }
    }

    pub const fn all() -> &'static [City] {
        &[
            City::Mumbai,
            City::Delhi,
            City::Bangalore,
            City::Kolkata,
            City::Chennai,
            City::Hyderabad,
            City::Ahmedabad,
            City::Pune,
            City::Jaipur,
            City::Surat,
            City::Varanasi,
            City::Lucknow,
            City::Nagpur,
        ]
    }

    pub fn names() -> Vec<&'static str> {
        Self::all().iter().map(City::as_str).collect()
    }
}

impl fmt::Display for City {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for City {
    type Error = FetchError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let wanted = value.trim();

        City::all()
            .iter()
            .copied()
            .find(|city| city.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| FetchError::UnknownCity(value.to_string()))
    }
}

/// Current state of the city selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    Placeholder,
    City(City),
}

impl Selection {
    /// Entries in the order the selector lists them: placeholder first.
    pub fn options() -> Vec<Selection> {
        std::iter::once(Selection::Placeholder)
            .chain(City::all().iter().copied().map(Selection::City))
            .collect()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Selection::Placeholder => SENTINEL,
            Selection::City(city) => city.as_str(),
        }
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<City> for Selection {
    fn from(city: City) -> Self {
        Selection::City(city)
    }
}

impl TryFrom<&str> for Selection {
    type Error = FetchError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        if value.trim() == SENTINEL {
            return Ok(Selection::Placeholder);
        }

        City::try_from(value).map(Selection::City)
    }
}

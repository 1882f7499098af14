//! Core library for the `weather` app.
//!
//! This crate defines:
//! - The supported cities and the selector's placeholder entry
//! - Configuration & credentials handling
//! - The OpenWeather current-conditions provider
//! - The fetch flow that turns a selection into display-ready rows
//!
//! It is used by `weather-cli`, but any front-end can drive
//! [`WeatherService`] and render [`WeatherQueryResult::display_fields`].

pub mod city;
pub mod config;
pub mod error;
pub mod model;
pub mod provider;
pub mod service;

pub use city::{City, SENTINEL, Selection};
pub use config::Config;
pub use error::FetchError;
pub use model::{DisplayField, WeatherQueryResult, WeatherReport};
pub use provider::{OpenWeatherProvider, WeatherProvider};
pub use service::WeatherService;

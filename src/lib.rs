//! Desktop panel and client library for a life-expectancy prediction API.
/// Application directory resolution.
pub mod app_dirs;
/// TOML settings: API connection and form layout.
pub mod config;
/// Desktop front end.
pub mod egui_app;
/// Form binding and controller operations.
pub mod form;
mod http_client;
/// Tracing subscriber setup.
pub mod logging;
/// Prediction service wire types and client.
pub mod prediction_api;

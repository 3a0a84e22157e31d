//! Desktop front end: controller with background jobs plus the egui renderer.

pub mod controller;
mod jobs;
pub mod style;
pub mod ui;

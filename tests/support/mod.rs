#![allow(dead_code)]

pub mod lifepanel_env;
pub mod mock_api;

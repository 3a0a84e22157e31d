//! Panel configuration persisted as TOML under the `.lifepanel` directory.

mod errors;
mod io;
mod layout;
mod types;

pub use errors::ConfigError;
pub use io::{CONFIG_FILE_NAME, config_path, load_or_default, load_settings_from, save, save_to_path};
pub use layout::{COUNTRY_SELECT_ID, YEAR_INPUT_ID};
pub use types::{
    API_BASE_ENV, ApiSettings, DEFAULT_API_BASE, FieldKind, FieldSpec, FormLayout, PanelSettings,
};

pub mod error;
pub mod settings;

pub use error::ConfigError;
pub use settings::{Settings, SwitchSettings};

/// Reads and validates a settings file.
pub fn load_settings(path: &std::path::Path) -> Result<Settings, ConfigError> {
    let settings = Settings::from_path(path)?;
    settings.validate()?;
    Ok(settings)
}

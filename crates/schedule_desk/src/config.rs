use crate::error::{DeskError, Result};
use area_schedule::{DEFAULT_OUTPUT_FILE, Variant};
use std::{env, path::PathBuf};

const ENV_OUTPUT_NAME: &str = "SCHEDULE_DESK_OUTPUT";
const ENV_CONFIG_PATH: &str = "SCHEDULE_DESK_CONFIG";

#[derive(Debug, Clone)]
pub struct Config {
    /// initial value of the output filename field
    pub output_name: String,
    pub schedule: area_schedule::Config,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_name: DEFAULT_OUTPUT_FILE.to_string(),
            schedule: area_schedule::Config::for_variant(Variant::Combined),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(name) = lookup(ENV_OUTPUT_NAME)
            && !name.trim().is_empty()
        {
            config.output_name = name.trim().to_string();
        }

        if let Some(path) = lookup(ENV_CONFIG_PATH)
            && !path.trim().is_empty()
        {
            let path = PathBuf::from(path.trim());

            // Reject early instead of failing on the first generate
            if !path.is_file() {
                return Err(DeskError::InvalidConfiguration(format!(
                    "Config path is not a file: {}",
                    path.display()
                )));
            }
            config.schedule = area_schedule::Config::load_from_file(&path, Variant::Combined)?;
        }

        Ok(config)
    }
}

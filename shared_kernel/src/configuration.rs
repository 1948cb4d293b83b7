use anyhow::Context;
use serde::de::DeserializeOwned;
use std::path::PathBuf;

const CONFIG_DIR_VAR: &str = "APP_CONFIG_DIR";
const ENVIRONMENT_VAR: &str = "APP_ENVIRONMENT";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Local,
    Production,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Local => "local",
            Environment::Production => "production",
        }
    }
}

impl TryFrom<String> for Environment {
    type Error = anyhow::Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.to_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "production" => Ok(Self::Production),
            other => anyhow::bail!(
                "{other} is not a supported environment. Use either `local` or `production`"
            ),
        }
    }
}

fn configuration_directory() -> anyhow::Result<PathBuf> {
    if let Ok(dir) = std::env::var(CONFIG_DIR_VAR) {
        return Ok(PathBuf::from(dir));
    }
    let base_path = std::env::current_dir().context("Failed to determine the current directory")?;
    Ok(base_path.join("configuration"))
}

/// Loads `base.yaml`, then the file named after `APP_ENVIRONMENT` (if any),
/// then `APP_`-prefixed environment variables, e.g. `APP_DATABASE__PORT=5433`.
pub fn config<Settings: DeserializeOwned>() -> anyhow::Result<Settings> {
    let configuration_directory = configuration_directory()?;
    let base_file = if cfg!(test) { "test.yaml" } else { "base.yaml" };

    let mut builder = config::Config::builder()
        .add_source(config::File::from(configuration_directory.join(base_file)));

    if let Ok(environment) = std::env::var(ENVIRONMENT_VAR) {
        let environment = Environment::try_from(environment)?;
        builder = builder.add_source(
            config::File::from(
                configuration_directory.join(format!("{}.yaml", environment.as_str())),
            )
            .required(false),
        );
    }

    let settings = builder
        .add_source(
            config::Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()
        .context("Failed to build configuration")?;

    settings
        .try_deserialize::<Settings>()
        .context("Failed to deserialize settings")
}

#[cfg(test)]
mod tests {
    use super::Environment;

    #[test]
    fn test_environment_is_parsed_case_insensitively() {
        let environment = Environment::try_from("LOCAL".to_string()).unwrap();
        assert_eq!(environment, Environment::Local);
        assert_eq!(environment.as_str(), "local");
    }

    #[test]
    fn test_unknown_environment_is_rejected() {
        let result = Environment::try_from("staging".to_string());
        assert!(result.is_err())
    }
}

use crate::args::CliOptions;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Markdown,
    Json,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub output: OutputFormat,
    /// Replaces the server URL when building endpoint URLs
    pub base_uri: Option<String>,
    /// Substituted for `{version}` in server URLs
    pub api_version: Option<String>,
    pub log_level: String,
    pub expand: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            output: OutputFormat::Markdown,
            base_uri: None,
            api_version: None,
            log_level: "warn".to_string(),
            expand: false,
        }
    }
}

impl Settings {
    /// Load `amflens.{toml,json,yaml}` from the working directory and
    /// `AMFLENS_*` environment variables.
    pub fn load() -> anyhow::Result<Self> {
        Self::load_from(Path::new("amflens"))
    }

    /// Like [`Settings::load`], with the config file looked up at `base`
    /// (extension optional).
    pub fn load_from(base: &Path) -> anyhow::Result<Self> {
        let mut config = config::Config::builder();

        config = config.add_source(config::Config::try_from(&Settings::default())?);

        config = config.add_source(
            config::File::with_name(&base.to_string_lossy()).required(false),
        );

        config = config.add_source(
            config::Environment::with_prefix("AMFLENS")
                .prefix_separator("_")
                .try_parsing(true),
        );

        let config = config.build()?;
        let settings: Settings = config.try_deserialize()?;

        Ok(settings)
    }

    /// Command line flags win over configuration.
    pub fn apply(&mut self, options: &CliOptions) {
        if options.json {
            self.output = OutputFormat::Json;
        }
        if options.expand {
            self.expand = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args::View;
    use std::fs;

    #[test]
    fn defaults_without_a_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::load_from(&dir.path().join("amflens")).unwrap();
        assert_eq!(settings.output, OutputFormat::Markdown);
        assert_eq!(settings.log_level, "warn");
        assert!(settings.base_uri.is_none());
    }

    #[test]
    fn reads_a_toml_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("amflens.toml"),
            "output = \"json\"\nbase_uri = \"http://localhost:3000\"\napi_version = \"v2\"\n",
        )
        .unwrap();
        let settings = Settings::load_from(&dir.path().join("amflens")).unwrap();
        assert_eq!(settings.output, OutputFormat::Json);
        assert_eq!(settings.base_uri.as_deref(), Some("http://localhost:3000"));
        assert_eq!(settings.api_version.as_deref(), Some("v2"));
        assert!(!settings.expand);
    }

    #[test]
    fn flags_override_configuration() {
        let mut settings = Settings::default();
        settings.apply(&CliOptions {
            input: "api.json".to_string(),
            view: View::Full,
            json: true,
            expand: true,
        });
        assert_eq!(settings.output, OutputFormat::Json);
        assert!(settings.expand);
    }
}

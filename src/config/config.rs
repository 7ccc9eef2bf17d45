use crate::Result;
use camino::{Utf8Path, Utf8PathBuf};
use ohno::{IntoAppError, app_err};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::io;

/// The default configuration YAML content, embedded from `default_config.yml`
pub const DEFAULT_CONFIG_YAML: &str = include_str!("../../default_config.yml");

/// File names probed, in order, when no explicit configuration path is given
pub const CONFIG_FILE_CANDIDATES: [&str; 4] = ["criteria.toml", "criteria.yml", "criteria.yaml", "criteria.json"];

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Source display name to platform source id
    #[serde(default)]
    pub sources: BTreeMap<String, String>,
}

impl Config {
    /// Load configuration from a file or use defaults
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed
    pub fn load(base_dir: &Utf8Path, config_path: Option<&Utf8PathBuf>) -> Result<(Self, Vec<String>)> {
        let (final_path, text) = if let Some(path) = config_path {
            let text = fs::read_to_string(path).into_app_err_with(|| format!("reading criteria configuration from {path}"))?;
            (path.clone(), text)
        } else {
            let mut found = None;
            for path in CONFIG_FILE_CANDIDATES.iter().map(|name| base_dir.join(name)) {
                match fs::read_to_string(&path) {
                    Ok(text) => {
                        found = Some((path, text));
                        break;
                    }
                    Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                    Err(e) => return Err(e).into_app_err_with(|| format!("reading criteria configuration from {path}")),
                }
            }

            let Some(result) = found else {
                return Ok((Self::default(), Vec::new()));
            };
            result
        };

        let config = Self::parse(&final_path, &text)?;
        let mut warnings = Vec::new();
        config.validate(&mut warnings);
        Ok((config, warnings))
    }

    fn parse(path: &Utf8Path, text: &str) -> Result<Self> {
        let extension = path.extension().unwrap_or_default();
        let config = match extension {
            "toml" => toml::from_str(text).into_app_err_with(|| format!("parsing TOML configuration from {path}"))?,
            "yml" | "yaml" => serde_yaml::from_str(text).into_app_err_with(|| format!("parsing YAML configuration from {path}"))?,
            "json" => serde_json::from_str(text).into_app_err_with(|| format!("parsing JSON configuration from {path}"))?,
            _ => return Err(app_err!("unsupported configuration file extension: {extension}")),
        };

        Ok(config)
    }

    /// Save configuration to a file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written or serialization fails
    pub fn save(&self, output_path: &Utf8Path) -> Result<()> {
        let extension = output_path.extension().unwrap_or_default();
        let text = match extension {
            "toml" => toml::to_string_pretty(self)
                .into_app_err_with(|| format!("serializing configuration to TOML for saving to {output_path}"))?,
            "yml" | "yaml" => serde_yaml::to_string(self)
                .into_app_err_with(|| format!("serializing configuration to YAML for saving to {output_path}"))?,
            "json" => serde_json::to_string_pretty(self)
                .into_app_err_with(|| format!("serializing configuration to JSON for saving to {output_path}"))?,
            _ => return Err(app_err!("unsupported configuration file extension: {extension}")),
        };

        fs::write(output_path, text).into_app_err_with(|| format!("writing configuration to {output_path}"))?;
        Ok(())
    }

    /// Save the default configuration to a file
    ///
    /// YAML output is the embedded `default_config.yml` verbatim, comments included. Other
    /// formats are serialized from the parsed default.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written
    pub fn save_default(output_path: &Utf8Path) -> Result<()> {
        let extension = output_path.extension().unwrap_or_default();
        if matches!(extension, "yml" | "yaml") {
            fs::write(output_path, DEFAULT_CONFIG_YAML).into_app_err_with(|| format!("writing default configuration to {output_path}"))?;
            return Ok(());
        }

        let config: Self = serde_yaml::from_str(DEFAULT_CONFIG_YAML).into_app_err("parsing the embedded default configuration")?;
        config.save(output_path)
    }

    /// Detect entries that would make name or id lookups misbehave
    fn validate(&self, warnings: &mut Vec<String>) {
        let mut names_by_id: BTreeMap<&str, Vec<&str>> = BTreeMap::new();

        for (name, id) in &self.sources {
            if name.trim().is_empty() {
                warnings.push(format!("source id '{id}' is mapped from a blank name"));
            }

            if id.trim().is_empty() {
                warnings.push(format!("source '{name}' has a blank id"));
                continue;
            }

            names_by_id.entry(id.as_str()).or_default().push(name);
        }

        for (id, names) in names_by_id {
            if names.len() > 1 {
                warnings.push(format!(
                    "source id '{id}' is shared by {}, rendering will always use '{}'",
                    names.iter().map(|name| format!("'{name}'")).collect::<Vec<_>>().join(", "),
                    names[0]
                ));
            }
        }
    }
}

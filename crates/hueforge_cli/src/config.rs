//! Hueforge configuration file handling

use anyhow::{Context, Result};
use hueforge_theme::{ColorMode, ColorPalette, NeutralPalette, PaletteStore};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// File looked up in the working directory when `--config` is not given
pub const CONFIG_FILE_NAME: &str = "hueforge.toml";

/// Top-level Hueforge configuration (hueforge.toml)
#[derive(Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct HueforgeConfig {
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub defaults: DefaultsConfig,
    #[serde(default)]
    pub log: LogConfig,
    #[serde(default)]
    pub palettes: PalettesConfig,
}

/// Output formatting
#[derive(Debug, PartialEq, Deserialize, Serialize)]
pub struct OutputConfig {
    /// Pretty-print compiled JSON
    #[serde(default = "default_true")]
    pub pretty: bool,
}

fn default_true() -> bool {
    true
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { pretty: true }
    }
}

/// Fallbacks for values a theme file or the command line leave open
#[derive(Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct DefaultsConfig {
    /// Mode for themes that do not set one, and for `hueforge tokens`
    #[serde(default)]
    pub mode: Option<ColorMode>,
}

#[derive(Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct LogConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset and no `-v` is given
    #[serde(default)]
    pub level: Option<String>,
}

/// Extra palette records, merged over the built-ins
#[derive(Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct PalettesConfig {
    #[serde(default)]
    pub color: Vec<ColorPalette>,
    #[serde(default)]
    pub neutral: Vec<NeutralPalette>,
}

impl PalettesConfig {
    /// Load palette records from a JSON file (`{"color": [...], "neutral": [...]}`)
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse palettes in {}", path.display()))
    }

    /// Insert every record into `store`, replacing same-id palettes.
    pub fn merge_into(&self, store: &mut PaletteStore) {
        for palette in &self.color {
            if let Some(old) = store.insert_color(palette.clone()) {
                tracing::debug!(id = %old.id, "color palette overridden by config");
            }
        }
        for palette in &self.neutral {
            if !palette.is_complete() {
                tracing::warn!(
                    id = %palette.id,
                    shades = palette.colors.len(),
                    "neutral palette is short; missing shades will use fallbacks"
                );
            }
            if let Some(old) = store.insert_neutral(palette.clone()) {
                tracing::debug!(id = %old.id, "neutral palette overridden by config");
            }
        }
    }
}

impl HueforgeConfig {
    /// Load configuration.
    ///
    /// An explicit path must exist. Without one, `hueforge.toml` in the
    /// working directory is used if present, otherwise defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config_path = match path {
            Some(path) => {
                let config_path = if path.is_dir() {
                    path.join(CONFIG_FILE_NAME)
                } else {
                    path.to_path_buf()
                };
                if !config_path.exists() {
                    anyhow::bail!("No config file found at {}", config_path.display());
                }
                config_path
            }
            None => {
                let config_path = PathBuf::from(CONFIG_FILE_NAME);
                if !config_path.exists() {
                    return Ok(Self::default());
                }
                config_path
            }
        };

        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read {}", config_path.display()))?;

        Self::from_toml_str(&content)
            .with_context(|| format!("Failed to parse {}", config_path.display()))
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Built-in palettes plus the ones declared in `[[palettes.*]]`
    pub fn palette_store(&self) -> PaletteStore {
        let mut store = PaletteStore::with_builtins();
        self.palettes.merge_into(&mut store);
        store
    }

    /// Serialize to TOML string
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize config")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hueforge_theme::PaletteSource;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_file_means_defaults() {
        let config = HueforgeConfig::from_toml_str("").unwrap();
        assert_eq!(config, HueforgeConfig::default());
        assert!(config.output.pretty);
        assert_eq!(config.defaults.mode, None);
    }

    #[test]
    fn parses_every_section() {
        let config = HueforgeConfig::from_toml_str(
            r##"
            [output]
            pretty = false

            [defaults]
            mode = "dark"

            [log]
            level = "hueforge_theme=debug"

            [[palettes.color]]
            id = "brand"
            name = "Brand"
            colors = ["#FF5500", "#0055FF"]

            [[palettes.neutral]]
            id = "warm"
            name = "Warm"
            colors = ["#FFFFFF", "#FAF9F8"]
            "##,
        )
        .unwrap();

        assert!(!config.output.pretty);
        assert_eq!(config.defaults.mode, Some(ColorMode::Dark));
        assert_eq!(config.log.level.as_deref(), Some("hueforge_theme=debug"));
        assert_eq!(config.palettes.color[0].colors, vec!["#FF5500", "#0055FF"]);
        assert!(!config.palettes.neutral[0].is_built_in);
    }

    #[test]
    fn config_palettes_extend_builtins() {
        let config = HueforgeConfig::from_toml_str(
            r##"
            [[palettes.color]]
            id = "default"
            name = "Overridden"
            colors = ["#000000"]
            "##,
        )
        .unwrap();
        let store = config.palette_store();

        assert_eq!(store.color_palette("default").unwrap().name, "Overridden");
        assert!(store.neutral_palette("slate").is_some());
    }

    #[test]
    fn unknown_mode_is_rejected() {
        assert!(HueforgeConfig::from_toml_str("[defaults]\nmode = \"sepia\"").is_err());
    }

    #[test]
    fn toml_round_trip() {
        let mut config = HueforgeConfig::default();
        config.defaults.mode = Some(ColorMode::Dark);
        let text = config.to_toml().unwrap();
        assert_eq!(HueforgeConfig::from_toml_str(&text).unwrap(), config);
    }
}

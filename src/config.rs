use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{KtError, Result};
use crate::utils::fs::read_config_file;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub conversion: ConversionConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

impl Config {
    /// Load configuration: defaults, then a config file, then `KT_*` env overrides.
    ///
    /// An explicit path (or `KT_CONFIG`) replaces the global
    /// `<config_dir>/khan-timeback/config.toml` lookup.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        let mut config = Self::default();

        let explicit = explicit_path
            .map(PathBuf::from)
            .or_else(|| std::env::var("KT_CONFIG").ok().map(PathBuf::from));

        if let Some(path) = explicit {
            if let Some(patch) = Self::load_patch(&path)? {
                config.merge_patch(patch);
            }
        } else if let Some(global) = Self::load_global()? {
            config.merge_patch(global);
        }

        config.apply_env_overrides()?;
        config.validate()?;

        Ok(config)
    }

    fn load_global() -> Result<Option<ConfigPatch>> {
        let Some(dir) = dirs::config_dir() else {
            return Ok(None);
        };
        Self::load_patch(&dir.join("khan-timeback/config.toml"))
    }

    fn load_patch(path: &Path) -> Result<Option<ConfigPatch>> {
        let Some(raw) = read_config_file(path)? else {
            return Ok(None);
        };
        let patch = toml::from_str(&raw)
            .map_err(|err| KtError::Config(format!("parse config {}: {err}", path.display())))?;
        Ok(Some(patch))
    }

    fn merge_patch(&mut self, patch: ConfigPatch) {
        if let Some(patch) = patch.conversion {
            self.conversion.merge(patch);
        }
        if let Some(patch) = patch.output {
            self.output.merge(patch);
        }
    }

    fn apply_env_overrides(&mut self) -> Result<()> {
        if let Some(value) = env_string("KT_ORG_ID") {
            self.conversion.org_id = value;
        }
        if let Some(value) = env_string("KT_SCHOOL_YEAR") {
            self.conversion.school_year = value;
        }
        if let Some(value) = env_string("KT_CONTENT_BASE_URL") {
            self.conversion.content_base_url = value;
        }
        if let Some(value) = env_string("KT_CONVERTED_FROM") {
            self.conversion.converted_from = value;
        }
        if let Some(value) = env_bool("KT_LINK_SYLLABUS_COURSE") {
            self.conversion.link_syllabus_course = value;
        }

        if let Some(value) = env_string("KT_FORMAT_VERSION") {
            self.output.format_version = value;
        }
        if let Some(value) = env_usize("KT_OUTPUT_INDENT")? {
            self.output.indent = value;
        }

        Ok(())
    }

    /// Reject settings that would produce structurally invalid documents.
    pub fn validate(&self) -> Result<()> {
        let required = [
            ("conversion.org_id", &self.conversion.org_id),
            ("conversion.school_year", &self.conversion.school_year),
            ("conversion.content_base_url", &self.conversion.content_base_url),
            ("output.format_version", &self.output.format_version),
        ];
        for (key, value) in required {
            if value.trim().is_empty() {
                return Err(KtError::MissingConfig(key.to_string()));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversionConfig {
    /// Organization that owns every converted course.
    #[serde(default)]
    pub org_id: String,
    /// Academic session referenced by every converted course.
    #[serde(default)]
    pub school_year: String,
    /// Host prefixed to item canonical paths.
    #[serde(default)]
    pub content_base_url: String,
    /// Provenance label stored in course metadata.
    #[serde(default)]
    pub converted_from: String,
    /// Reuse the course id for the syllabus course summary.
    #[serde(default)]
    pub link_syllabus_course: bool,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            org_id: "khan-academy-converted".to_string(),
            school_year: "2024-2025".to_string(),
            content_base_url: "https://www.khanacademy.org".to_string(),
            converted_from: "Khan Academy".to_string(),
            link_syllabus_course: false,
        }
    }
}

impl ConversionConfig {
    fn merge(&mut self, patch: ConversionPatch) {
        if let Some(value) = patch.org_id {
            self.org_id = value;
        }
        if let Some(value) = patch.school_year {
            self.school_year = value;
        }
        if let Some(value) = patch.content_base_url {
            self.content_base_url = value;
        }
        if let Some(value) = patch.converted_from {
            self.converted_from = value;
        }
        if let Some(value) = patch.link_syllabus_course {
            self.link_syllabus_course = value;
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub format_version: String,
    #[serde(default)]
    pub indent: usize,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format_version: "1.0".to_string(),
            indent: 2,
        }
    }
}

impl OutputConfig {
    fn merge(&mut self, patch: OutputPatch) {
        if let Some(value) = patch.format_version {
            self.format_version = value;
        }
        if let Some(value) = patch.indent {
            self.indent = value;
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
struct ConfigPatch {
    pub conversion: Option<ConversionPatch>,
    pub output: Option<OutputPatch>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct ConversionPatch {
    pub org_id: Option<String>,
    pub school_year: Option<String>,
    pub content_base_url: Option<String>,
    pub converted_from: Option<String>,
    pub link_syllabus_course: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct OutputPatch {
    pub format_version: Option<String>,
    pub indent: Option<usize>,
}

fn env_string(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

fn env_bool(key: &str) -> Option<bool> {
    std::env::var(key).ok().map(|value| {
        matches!(
            value.to_lowercase().as_str(),
            "1" | "true" | "yes" | "on"
        )
    })
}

fn env_usize(key: &str) -> Result<Option<usize>> {
    match std::env::var(key) {
        Ok(value) => value.parse::<usize>().map(Some).map_err(|err| {
            KtError::Config(format!("invalid {key} value {value}: {err}"))
        }),
        Err(_) => Ok(None),
    }
}

use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;
use serde::Serialize;

use crate::AcfvError;
use crate::AcfvResult;

/// Supported config file locations in discovery order (highest precedence
/// first).
pub const CONFIG_FILE_CANDIDATES: [&str; 3] = ["acfv.toml", ".acfv.toml", ".config/acfv.toml"];

/// Configuration loaded from an `acfv.toml` file.
///
/// ```toml
/// [site]
/// data = "site.json"
///
/// [render]
/// minify = true
/// locale = "de_DE"
/// date_format = "j. F Y"
///
/// [maps]
/// api_key = "AIza..."
/// script_url = "/assets/maps.min.js"
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct AcfvConfig {
	pub site: SiteConfig,
	pub render: RenderConfig,
	pub maps: MapsConfig,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct SiteConfig {
	/// Path of the JSON site document, relative to the project root.
	pub data: Option<PathBuf>,
}

/// Options that change the produced markup.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct RenderConfig {
	/// Strip `\t`, `\n` and `\r` from skeletons before values are
	/// inserted.
	pub minify: bool,
	/// Locale used when formatting dates, e.g. `en_US` or `fr_FR`.
	pub locale: String,
	/// Date format (PHP `date()` tokens) used for the post date and modified
	/// date pseudo-fields.
	pub date_format: String,
}

impl Default for RenderConfig {
	fn default() -> Self {
		Self {
			minify: true,
			locale: "en_US".to_string(),
			date_format: "F j, Y".to_string(),
		}
	}
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct MapsConfig {
	/// Google Maps key. Map scripts are only printed when it is set.
	pub api_key: Option<String>,
	/// Script that initialises the rendered maps.
	pub script_url: String,
}

impl Default for MapsConfig {
	fn default() -> Self {
		Self {
			api_key: None,
			script_url: "maps.min.js".to_string(),
		}
	}
}

impl AcfvConfig {
	/// Resolve the first config file candidate that exists under `root`.
	pub fn resolve_path(root: &Path) -> Option<PathBuf> {
		CONFIG_FILE_CANDIDATES
			.iter()
			.map(|candidate| root.join(candidate))
			.find(|path| path.is_file())
	}

	/// Load the config from the first discovered config file at `root`.
	/// Returns `None` if no config file exists.
	pub fn load(root: &Path) -> AcfvResult<Option<AcfvConfig>> {
		let Some(config_path) = Self::resolve_path(root) else {
			return Ok(None);
		};

		let content = std::fs::read_to_string(&config_path)?;
		let config: AcfvConfig =
			toml::from_str(&content).map_err(|e| AcfvError::ConfigParse(e.to_string()))?;

		tracing::debug!(path = %config_path.display(), "loaded config");

		Ok(Some(config))
	}

	/// Absolute path of the configured site document, if any.
	pub fn site_path(&self, root: &Path) -> Option<PathBuf> {
		self.site.data.as_ref().map(|data| root.join(data))
	}
}

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use arc_swap::ArcSwap;
use askamy_llm::{DEFAULT_MODEL_ID, DEFAULT_REGION, InferenceConfig};
use figment::{
    Figment,
    providers::{Env, Format, Json, Serialized},
};
use gpui::*;
use gpui_component::{Theme, ThemeMode};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use snafu::{ResultExt, Snafu};

pub const SETTINGS_DIRECTORY_NAME: &str = "askamy";
pub const SETTINGS_FILE_NAME: &str = "settings.json";
pub const ENV_PREFIX: &str = "ASKAMY_";
/// Standard variable holding a Bedrock API key, consulted when settings carry none.
pub const BEDROCK_API_KEY_ENV: &str = "AWS_BEARER_TOKEN_BEDROCK";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WidgetSettings {
    #[serde(default = "default_region")]
    pub region: String,
    #[serde(default)]
    pub endpoint: String,
    #[serde(default = "default_model_id")]
    pub model_id: String,
    #[serde(default)]
    pub api_key: String,
    #[serde(default)]
    pub welcome_image: Option<PathBuf>,
    #[serde(default)]
    pub avatar_image: Option<PathBuf>,
    #[serde(
        default = "default_theme_mode",
        serialize_with = "serialize_theme_mode",
        deserialize_with = "deserialize_theme_mode"
    )]
    pub theme_mode: ThemeMode,
}

impl Default for WidgetSettings {
    fn default() -> Self {
        Self {
            region: default_region(),
            endpoint: String::new(),
            model_id: default_model_id(),
            api_key: String::new(),
            welcome_image: None,
            avatar_image: None,
            theme_mode: default_theme_mode(),
        }
    }
}

impl WidgetSettings {
    /// Builds the client configuration, or `None` when no API key is available.
    pub fn to_inference_config(&self) -> Option<InferenceConfig> {
        if !self.is_valid() {
            return None;
        }

        Some(
            InferenceConfig::new(&self.region, &self.model_id, &self.api_key)
                .with_endpoint(&self.endpoint),
        )
    }

    pub fn is_valid(&self) -> bool {
        !self.api_key.trim().is_empty()
    }

    pub fn normalized(mut self) -> Self {
        self.region = if self.region.trim().is_empty() {
            default_region()
        } else {
            self.region.trim().to_string()
        };
        self.model_id = if self.model_id.trim().is_empty() {
            default_model_id()
        } else {
            self.model_id.trim().to_string()
        };
        self.endpoint = self.endpoint.trim().to_string();
        self.api_key = self.api_key.trim().to_string();
        self.welcome_image = self
            .welcome_image
            .filter(|path| !path.as_os_str().is_empty());
        self.avatar_image = self.avatar_image.filter(|path| !path.as_os_str().is_empty());
        self
    }

    /// Fills a missing API key from [`BEDROCK_API_KEY_ENV`].
    pub fn with_api_key_fallback(mut self, fallback: Option<String>) -> Self {
        if self.api_key.is_empty()
            && let Some(api_key) = fallback
        {
            self.api_key = api_key.trim().to_string();
        }
        self
    }

    pub fn apply_theme(&self, window: Option<&mut Window>, cx: &mut App) {
        Theme::change(self.theme_mode, window, cx);
    }
}

pub struct SettingsStore {
    settings: Arc<ArcSwap<WidgetSettings>>,
    config_path: PathBuf,
}

impl SettingsStore {
    pub fn default_config_dir() -> PathBuf {
        dirs::config_dir()
            .map(|path| path.join(SETTINGS_DIRECTORY_NAME))
            .unwrap_or_else(|| PathBuf::from(".askamy"))
    }

    pub fn default_config_path() -> PathBuf {
        Self::default_config_dir().join(SETTINGS_FILE_NAME)
    }

    pub fn new(config_path: PathBuf) -> Self {
        let settings = Self::load_from_disk(&config_path)
            .with_api_key_fallback(std::env::var(BEDROCK_API_KEY_ENV).ok());
        Self {
            settings: Arc::new(ArcSwap::from_pointee(settings)),
            config_path,
        }
    }

    pub fn load() -> Self {
        Self::new(Self::default_config_path())
    }

    pub fn settings(&self) -> Arc<WidgetSettings> {
        self.settings.load_full()
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Re-reads the settings file, keeping the previous settings if it cannot be parsed.
    pub fn reload(&self) -> Result<Arc<WidgetSettings>, SettingsError> {
        let settings = Self::extract(&self.config_path)?
            .with_api_key_fallback(std::env::var(BEDROCK_API_KEY_ENV).ok());
        let settings = Arc::new(settings);
        self.settings.store(settings.clone());
        tracing::info!("reloaded settings from {:?}", self.config_path);
        Ok(settings)
    }

    fn load_from_disk(path: &Path) -> WidgetSettings {
        if !path.exists() {
            tracing::info!("settings file not found at {:?}, using defaults", path);
        }

        match Self::extract(path) {
            Ok(settings) => settings,
            Err(error) => {
                tracing::warn!("{}. using defaults", error);
                WidgetSettings::default()
            }
        }
    }

    fn extract(path: &Path) -> Result<WidgetSettings, SettingsError> {
        // A missing file is not an error: figment's JSON provider then contributes nothing.
        let figment = Figment::from(Serialized::defaults(WidgetSettings::default()))
            .merge(Json::file(path))
            .merge(Serialized::defaults(Self::env_overrides()));

        let settings = figment
            .extract::<WidgetSettings>()
            .context(ExtractSettingsSnafu {
                stage: "extract-settings",
                path: path.to_path_buf(),
            })?;

        Ok(settings.normalized())
    }

    /// `ASKAMY_*` variables, kept as raw strings.
    ///
    /// Merging `Env` directly would parse `ASKAMY_API_KEY=012345` into the number 12345.
    fn env_overrides() -> BTreeMap<String, String> {
        Env::prefixed(ENV_PREFIX)
            .iter()
            .map(|(key, value)| (key.as_str().to_string(), value))
            .collect()
    }
}

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum SettingsError {
    #[snafu(display("failed to parse settings from {path:?} on `{stage}`: {source}"))]
    ExtractSettings {
        stage: &'static str,
        path: PathBuf,
        source: figment::Error,
    },
}

fn default_region() -> String {
    DEFAULT_REGION.to_string()
}

fn default_model_id() -> String {
    DEFAULT_MODEL_ID.to_string()
}

fn default_theme_mode() -> ThemeMode {
    ThemeMode::Light
}

fn serialize_theme_mode<S>(value: &ThemeMode, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(value.name())
}

fn deserialize_theme_mode<'de, D>(deserializer: D) -> Result<ThemeMode, D::Error>
where
    D: Deserializer<'de>,
{
    let value = String::deserialize(deserializer)?;
    Ok(parse_theme_mode(&value))
}

fn parse_theme_mode(value: &str) -> ThemeMode {
    if value.trim().eq_ignore_ascii_case("dark") {
        ThemeMode::Dark
    } else {
        ThemeMode::Light
    }
}

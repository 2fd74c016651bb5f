//! # Preferences
//!
//! The user's background choice, speed and per-effect parameters.
//!
//! Preferences persist two ways:
//!
//! - a JSON file ([`Preferences::load_from_file`], [`Preferences::save_to_file`])
//! - a flat string key-value store ([`PreferenceStore`]), the shape a
//!   host app's settings usually take. Keys are `background`, `speed`,
//!   `seed` and `param.<name>`.

use std::collections::{BTreeMap, HashMap};
use std::io::ErrorKind;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::background::Background;
use crate::descriptor::ShaderDescriptor;
use crate::effects::{Effect, ShaderKind};
use crate::error::{BackdropError, Result};

const KEY_BACKGROUND: &str = "background";
const KEY_SPEED: &str = "speed";
const KEY_SEED: &str = "seed";
const PARAM_PREFIX: &str = "param.";

/// Persisted background settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preferences {
    /// Background key, e.g. `shader:palette` (see [`Background`]).
    pub background: String,
    /// Speed modifier override; `None` keeps the shader's default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speed: Option<f32>,
    #[serde(default)]
    pub seed: f32,
    /// Effect parameters by name, in their string form.
    #[serde(default)]
    pub params: BTreeMap<String, String>,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            background: Background::default().to_string(),
            speed: None,
            seed: 0.0,
            params: BTreeMap::new(),
        }
    }
}

impl Preferences {
    /// Load from a JSON file. A missing file yields the defaults.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no preferences file, using defaults");
                return Ok(Self::default());
            }
            Err(e) => return Err(e.into()),
        };
        let prefs: Self = serde_json::from_str(&content)
            .map_err(|e| BackdropError::Config(format!("{}: {}", path.display(), e)))?;
        tracing::debug!(path = %path.display(), background = %prefs.background, "loaded preferences");
        Ok(prefs)
    }

    /// Write to a JSON file. The file is replaced atomically: a sibling
    /// temp file is written first, then renamed over the target.
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| BackdropError::Config(e.to_string()))?;

        let mut tmp = path.as_os_str().to_owned();
        tmp.push(".tmp");
        std::fs::write(&tmp, content)?;
        std::fs::rename(&tmp, path)?;
        tracing::debug!(path = %path.display(), "saved preferences");
        Ok(())
    }

    /// Read from a key-value store. Absent keys keep their defaults.
    pub fn from_store(store: &dyn PreferenceStore) -> Result<Self> {
        let mut prefs = Self::default();
        if let Some(bg) = store.get(KEY_BACKGROUND) {
            prefs.background = bg;
        }
        if let Some(speed) = store.get(KEY_SPEED) {
            let speed = speed
                .parse::<f32>()
                .map_err(|_| BackdropError::Config(format!("Invalid speed '{}'", speed)))?;
            prefs.speed = Some(speed);
        }
        if let Some(seed) = store.get(KEY_SEED) {
            prefs.seed = seed
                .parse::<f32>()
                .map_err(|_| BackdropError::Config(format!("Invalid seed '{}'", seed)))?;
        }
        for key in store.keys() {
            let Some(name) = key.strip_prefix(PARAM_PREFIX) else {
                continue;
            };
            if let Some(value) = store.get(&key) {
                prefs.params.insert(name.to_string(), value);
            }
        }
        Ok(prefs)
    }

    /// Write every field to a key-value store.
    pub fn write_to_store(&self, store: &mut dyn PreferenceStore) {
        store.set(KEY_BACKGROUND, &self.background);
        if let Some(speed) = self.speed {
            store.set(KEY_SPEED, &speed.to_string());
        }
        store.set(KEY_SEED, &self.seed.to_string());
        for (name, value) in &self.params {
            store.set(&format!("{}{}", PARAM_PREFIX, name), value);
        }
    }

    /// Build the background these preferences describe.
    ///
    /// For shader backgrounds the stored parameters, speed and seed are
    /// applied to a fresh effect. Parameters are ignored for solid and
    /// gradient backgrounds.
    pub fn background(&self) -> Result<Background> {
        self.build_background(ShaderKind::build)
    }

    /// Like [`Preferences::background`], but shader parameters start from
    /// random values before the stored ones are applied.
    pub fn randomized_background(&self) -> Result<Background> {
        self.build_background(ShaderKind::build_random)
    }

    fn build_background(&self, build: fn(ShaderKind) -> Box<dyn Effect>) -> Result<Background> {
        let kind = match self.background.parse::<Background>()? {
            Background::Shader(descriptor) => descriptor.kind(),
            other => return Ok(other),
        };

        let mut effect = build(kind);
        for (name, value) in &self.params {
            effect
                .set_param(name, value)
                .map_err(BackdropError::InvalidParam)?;
        }
        let mut descriptor = ShaderDescriptor::with_effect(kind, effect).seed(self.seed);
        if let Some(speed) = self.speed {
            descriptor = descriptor.speed(speed);
        }
        Ok(Background::Shader(descriptor))
    }
}

/// A flat string-keyed settings store.
pub trait PreferenceStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str);
    /// All keys currently set.
    fn keys(&self) -> Vec<String>;
}

/// In-memory [`PreferenceStore`].
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.values.insert(key.to_string(), value.to_string());
    }

    fn keys(&self) -> Vec<String> {
        self.values.keys().cloned().collect()
    }
}

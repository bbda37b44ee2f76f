use serde::{Deserialize, Serialize};

use crate::parse::DEFAULT_MAX_DEPTH;

/// Embedded default configuration.
const DEFAULT_CONFIG: &str = include_str!("../config.default.toml");

/// Location of the user overlay.
const OVERLAY_PATH: &str = "~/.config/argv-tokenizer/config.toml";

// ── Final (merged) config types ──

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub features: Features,
    #[serde(default)]
    pub limits: Limits,
}

/// Which standard context sets get registered.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Features {
    /// `$(...)` command substitution placeholders.
    #[serde(default = "enabled")]
    pub interpolation: bool,
    /// Bare `\X` and the restricted `\X` inside double quotes.
    #[serde(default = "enabled")]
    pub backslash_escapes: bool,
    /// `$'...'` strings and their escape table.
    #[serde(default = "enabled")]
    pub ansi_c_quoting: bool,
}

impl Default for Features {
    fn default() -> Self {
        Self {
            interpolation: true,
            backslash_escapes: true,
            ansi_c_quoting: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Limits {
    /// Deepest allowed nesting of contexts within one parse.
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

fn enabled() -> bool {
    true
}

fn default_max_depth() -> usize {
    DEFAULT_MAX_DEPTH
}

// ── Overlay types (user config that merges with defaults) ──

#[derive(Debug, Deserialize, Default)]
struct ConfigOverlay {
    #[serde(default)]
    features: FeaturesOverlay,
    #[serde(default)]
    limits: LimitsOverlay,
}

#[derive(Debug, Deserialize, Default)]
struct FeaturesOverlay {
    interpolation: Option<bool>,
    backslash_escapes: Option<bool>,
    ansi_c_quoting: Option<bool>,
}

#[derive(Debug, Deserialize, Default)]
struct LimitsOverlay {
    max_depth: Option<usize>,
}

impl Config {
    /// Load the default embedded configuration.
    pub fn default_config() -> Self {
        toml::from_str(DEFAULT_CONFIG).expect("embedded default config must parse")
    }

    /// Load configuration with resolution order:
    /// 1. Start with embedded defaults
    /// 2. Merge user overlay from ~/.config/argv-tokenizer/config.toml (if exists)
    ///
    /// Every overlay key is optional; keys that are present override.
    pub fn load() -> Self {
        let mut config = Self::default_config();
        if let Some(overlay) = Self::load_overlay() {
            config.apply_overlay(overlay);
        }
        config
    }

    /// Try to load the user overlay.
    fn load_overlay() -> Option<ConfigOverlay> {
        let path = shellexpand::tilde(OVERLAY_PATH);
        let content = std::fs::read_to_string(path.as_ref()).ok()?;
        match toml::from_str(&content) {
            Ok(overlay) => Some(overlay),
            Err(e) => {
                eprintln!("argv-tokenizer: config parse error: {e}");
                None
            }
        }
    }

    /// Apply an overlay on top of this config.
    fn apply_overlay(&mut self, overlay: ConfigOverlay) {
        let f = overlay.features;
        if let Some(v) = f.interpolation {
            self.features.interpolation = v;
        }
        if let Some(v) = f.backslash_escapes {
            self.features.backslash_escapes = v;
        }
        if let Some(v) = f.ansi_c_quoting {
            self.features.ansi_c_quoting = v;
        }

        if let Some(v) = overlay.limits.max_depth {
            self.limits.max_depth = v;
        }
    }

    /// Apply an overlay from a TOML string. Used for testing.
    #[cfg(test)]
    fn apply_overlay_str(&mut self, toml_str: &str) {
        let overlay: ConfigOverlay = toml::from_str(toml_str).unwrap();
        self.apply_overlay(overlay);
    }
}

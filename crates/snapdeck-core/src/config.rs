use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::motion::ReducedMotion;

/// Environment variable consulted once at startup when `motion.reduced = "auto"`
pub const REDUCED_MOTION_ENV: &str = "SNAPDECK_REDUCED_MOTION";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub motion: MotionConfig,
    #[serde(default)]
    pub navigation: NavigationConfig,
    #[serde(default)]
    pub animation: AnimationConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub keymap: KeymapConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Log file used while the terminal UI owns the screen
    #[serde(default = "default_log_file")]
    pub log_file: PathBuf,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_file: default_log_file(),
        }
    }
}

/// Reduced-motion preference source
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReducedMotionSetting {
    /// Follow the platform signal (environment variable)
    #[default]
    Auto,
    /// Always skip entrance animations
    Always,
    /// Always animate
    Never,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MotionConfig {
    #[serde(default)]
    pub reduced: ReducedMotionSetting,
}

impl MotionConfig {
    /// Resolve the process-wide reduced-motion flag. Call once at startup.
    pub fn resolve(&self) -> ReducedMotion {
        match self.reduced {
            ReducedMotionSetting::Always => ReducedMotion::new(true),
            ReducedMotionSetting::Never => ReducedMotion::new(false),
            ReducedMotionSetting::Auto => {
                let value = std::env::var(REDUCED_MOTION_ENV).unwrap_or_default();
                ReducedMotion::new(is_truthy(&value))
            }
        }
    }
}

fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_lowercase().as_str(),
        "1" | "true" | "yes" | "reduce"
    )
}

/// Timing and threshold knobs of the navigation state machine.
///
/// `suppression_ms` and `settle_ms` are heuristics tuned by feel, not derived
/// from the entrance animation's measured duration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NavigationConfig {
    /// Wheel input is ignored for this long after a transition starts
    #[serde(default = "default_suppression_ms")]
    pub suppression_ms: u64,
    /// Extra delay after the entrance animation before the lock is released
    #[serde(default = "default_settle_ms")]
    pub settle_ms: u64,
    /// Wheel deltas below this magnitude are noise
    #[serde(default = "default_wheel_threshold")]
    pub wheel_threshold: f64,
    /// Minimum vertical displacement for a swipe
    #[serde(default = "default_swipe_threshold")]
    pub swipe_threshold: f64,
    /// Intersection ratio at which a section counts as visible
    #[serde(default = "default_visibility_threshold")]
    pub visibility_threshold: f64,
    /// Upper bound on waiting for an entrance animation (0 = wait forever)
    #[serde(default)]
    pub transition_timeout_ms: u64,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            suppression_ms: default_suppression_ms(),
            settle_ms: default_settle_ms(),
            wheel_threshold: default_wheel_threshold(),
            swipe_threshold: default_swipe_threshold(),
            visibility_threshold: default_visibility_threshold(),
            transition_timeout_ms: 0,
        }
    }
}

impl NavigationConfig {
    pub fn suppression(&self) -> Duration {
        Duration::from_millis(self.suppression_ms)
    }

    pub fn settle(&self) -> Duration {
        Duration::from_millis(self.settle_ms)
    }

    pub fn transition_timeout(&self) -> Option<Duration> {
        (self.transition_timeout_ms > 0).then(|| Duration::from_millis(self.transition_timeout_ms))
    }
}

/// Entrance animation plan. Times are in seconds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnimationConfig {
    #[serde(default = "default_fade_duration")]
    pub fade_duration: f64,
    #[serde(default = "default_stagger_duration")]
    pub stagger_duration: f64,
    /// Offset between consecutive children of a stagger group
    #[serde(default = "default_stagger_each")]
    pub stagger_each: f64,
    /// Timeline position at which stagger groups start
    #[serde(default = "default_stagger_position")]
    pub stagger_position: f64,
    /// Vertical offset of the hidden pose
    #[serde(default = "default_hidden_offset")]
    pub hidden_offset: f64,
    #[serde(default = "default_animation_easing")]
    pub easing: EasingType,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            fade_duration: default_fade_duration(),
            stagger_duration: default_stagger_duration(),
            stagger_each: default_stagger_each(),
            stagger_position: default_stagger_position(),
            hidden_offset: default_hidden_offset(),
            easing: default_animation_easing(),
        }
    }
}

/// Easing curve applied to tweens and scroll animations
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EasingType {
    /// Jump to the end value
    None,
    Linear,
    /// 1 - (1-t)^2
    Quadratic,
    /// 1 - (1-t)^3
    #[default]
    Cubic,
    /// 1 - (1-t)^5
    Quintic,
    /// Exponential ease-out
    EaseOut,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrollConfig {
    /// Animate viewport scrolling between sections
    #[serde(default = "default_true")]
    pub smooth_enabled: bool,
    #[serde(default = "default_scroll_duration")]
    pub animation_duration_ms: u64,
    #[serde(default)]
    pub easing: EasingType,
    /// Lines moved per native scroll step (reduced motion only)
    #[serde(default = "default_scroll_lines")]
    pub scroll_lines: u16,
    /// Frame rate while an animation is running
    #[serde(default = "default_animation_fps")]
    pub animation_fps: u32,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            smooth_enabled: default_true(),
            animation_duration_ms: default_scroll_duration(),
            easing: EasingType::default(),
            scroll_lines: default_scroll_lines(),
            animation_fps: default_animation_fps(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Tick rate in milliseconds
    #[serde(default = "default_tick_rate")]
    pub tick_rate_ms: u64,
    /// Wheel delta reported per mouse wheel notch
    #[serde(default = "default_wheel_delta")]
    pub wheel_delta: f64,
    /// Touch units per terminal row dragged
    #[serde(default = "default_touch_row_units")]
    pub touch_row_units: f64,
    #[serde(default = "default_true")]
    pub show_status_bar: bool,
    #[serde(default)]
    pub theme: ThemeConfig,
    #[serde(default)]
    pub scroll: ScrollConfig,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: default_tick_rate(),
            wheel_delta: default_wheel_delta(),
            touch_row_units: default_touch_row_units(),
            show_status_bar: default_true(),
            theme: ThemeConfig::default(),
            scroll: ScrollConfig::default(),
        }
    }
}

/// Theme configuration
/// Can be specified as a simple string (theme name) or as a full struct with overrides
#[derive(Debug, Clone, Serialize)]
pub struct ThemeConfig {
    /// Theme name (e.g., "gruvbox-dark", "nord")
    pub name: String,
    /// Optional color overrides
    pub colors: ThemeColorOverrides,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            name: default_theme_name(),
            colors: ThemeColorOverrides::default(),
        }
    }
}

// Accept either a string or a table
impl<'de> Deserialize<'de> for ThemeConfig {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::de::{self, MapAccess, Visitor};
        use std::fmt;

        struct ThemeConfigVisitor;

        impl<'de> Visitor<'de> for ThemeConfigVisitor {
            type Value = ThemeConfig;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a string (theme name) or a map with 'name' and optional 'colors'")
            }

            fn visit_str<E>(self, value: &str) -> Result<ThemeConfig, E>
            where
                E: de::Error,
            {
                Ok(ThemeConfig {
                    name: value.to_string(),
                    colors: ThemeColorOverrides::default(),
                })
            }

            fn visit_map<M>(self, mut map: M) -> Result<ThemeConfig, M::Error>
            where
                M: MapAccess<'de>,
            {
                let mut name: Option<String> = None;
                let mut colors: Option<ThemeColorOverrides> = None;

                while let Some(key) = map.next_key::<String>()? {
                    match key.as_str() {
                        "name" => name = Some(map.next_value()?),
                        "colors" => colors = Some(map.next_value()?),
                        _ => {
                            let _: serde::de::IgnoredAny = map.next_value()?;
                        }
                    }
                }

                Ok(ThemeConfig {
                    name: name.unwrap_or_else(default_theme_name),
                    colors: colors.unwrap_or_default(),
                })
            }
        }

        deserializer.deserialize_any(ThemeConfigVisitor)
    }
}

/// Optional color overrides, each a hex string ("#ff0000" or "ff0000")
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ThemeColorOverrides {
    /// Section background
    pub bg0: Option<String>,
    /// Status bar background
    pub bg1: Option<String>,
    /// Body text
    pub fg0: Option<String>,
    /// Titles
    pub fg1: Option<String>,
    /// Inactive dots and hints
    pub grey: Option<String>,
    /// Active dot and buttons
    pub accent: Option<String>,
}

/// Keymap configuration using Vim-style notation
/// Format: "j", "<Down>", "<C-n>" (Ctrl+n), "<S-Tab>", "<Space>", "<PageDown>"
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeymapConfig {
    /// Go to the next section
    #[serde(default = "default_key_next")]
    pub next: Vec<String>,
    /// Go to the previous section
    #[serde(default = "default_key_previous")]
    pub previous: Vec<String>,
    /// Go to the first section
    #[serde(default = "default_key_first")]
    pub first: Vec<String>,
    /// Go to the last section
    #[serde(default = "default_key_last")]
    pub last: Vec<String>,
    /// Follow the "more" affordance
    #[serde(default = "default_key_more")]
    pub more: Vec<String>,
    #[serde(default = "default_key_help")]
    pub help: Vec<String>,
    #[serde(default = "default_key_quit")]
    pub quit: Vec<String>,
}

impl Default for KeymapConfig {
    fn default() -> Self {
        Self {
            next: default_key_next(),
            previous: default_key_previous(),
            first: default_key_first(),
            last: default_key_last(),
            more: default_key_more(),
            help: default_key_help(),
            quit: default_key_quit(),
        }
    }
}

fn keys(list: &[&str]) -> Vec<String> {
    list.iter().map(|k| k.to_string()).collect()
}

fn default_key_next() -> Vec<String> { keys(&["<Down>", "<PageDown>", "<Space>", "j"]) }
fn default_key_previous() -> Vec<String> { keys(&["<Up>", "<PageUp>", "k"]) }
fn default_key_first() -> Vec<String> { keys(&["<Home>", "g"]) }
fn default_key_last() -> Vec<String> { keys(&["<End>", "G"]) }
fn default_key_more() -> Vec<String> { keys(&["m"]) }
fn default_key_help() -> Vec<String> { keys(&["?"]) }
fn default_key_quit() -> Vec<String> { keys(&["q", "<Esc>"]) }

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_file() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("snapdeck")
        .join("snapdeck.log")
}

fn default_true() -> bool {
    true
}

fn default_suppression_ms() -> u64 {
    450
}

fn default_settle_ms() -> u64 {
    100 // keeps overscroll from re-triggering right after the animation
}

fn default_wheel_threshold() -> f64 {
    10.0
}

fn default_swipe_threshold() -> f64 {
    50.0
}

fn default_visibility_threshold() -> f64 {
    0.6
}

fn default_fade_duration() -> f64 {
    0.6
}

fn default_stagger_duration() -> f64 {
    0.45
}

fn default_stagger_each() -> f64 {
    0.06
}

fn default_stagger_position() -> f64 {
    0.05
}

fn default_hidden_offset() -> f64 {
    12.0
}

fn default_animation_easing() -> EasingType {
    EasingType::Quadratic
}

fn default_scroll_duration() -> u64 {
    400
}

fn default_scroll_lines() -> u16 {
    1
}

fn default_animation_fps() -> u32 {
    60
}

fn default_tick_rate() -> u64 {
    100
}

fn default_wheel_delta() -> f64 {
    100.0
}

fn default_touch_row_units() -> f64 {
    16.0
}

fn default_theme_name() -> String {
    "gruvbox-dark".to_string()
}

impl AppConfig {
    /// Load configuration from file or return defaults
    pub fn load() -> crate::Result<Self> {
        let config_path = Self::config_path();

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            Self::from_toml(&content)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse configuration from TOML text
    pub fn from_toml(content: &str) -> crate::Result<Self> {
        toml::from_str(content).map_err(|e| crate::Error::Config(e.to_string()))
    }

    /// Save configuration to file
    pub fn save(&self) -> crate::Result<()> {
        let config_path = Self::config_path();

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| crate::Error::Config(e.to_string()))?;
        std::fs::write(&config_path, content)?;

        Ok(())
    }

    /// Get the configuration file path
    /// Always uses ~/.config/snapdeck/config.toml on all platforms
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("snapdeck")
            .join("config.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_navigation_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.navigation.suppression(), Duration::from_millis(450));
        assert_eq!(config.navigation.settle(), Duration::from_millis(100));
        assert_eq!(config.navigation.transition_timeout(), None);
        assert_eq!(config.navigation.visibility_threshold, 0.6);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = AppConfig::from_toml(
            r#"
            [navigation]
            settle_ms = 250

            [ui]
            theme = "nord"
            "#,
        )
        .unwrap();

        assert_eq!(config.navigation.settle_ms, 250);
        assert_eq!(config.navigation.suppression_ms, 450);
        assert_eq!(config.ui.theme.name, "nord");
        assert_eq!(config.animation.easing, EasingType::Quadratic);
        assert_eq!(config.keymap.next[0], "<Down>");
    }

    #[test]
    fn test_theme_table_form() {
        let config = AppConfig::from_toml(
            r##"
            [ui.theme]
            name = "nord"
            colors = { accent = "#ff0000" }
            "##,
        )
        .unwrap();
        assert_eq!(config.ui.theme.colors.accent.as_deref(), Some("#ff0000"));
    }

    #[test]
    fn test_reduced_motion_overrides() {
        let always = MotionConfig { reduced: ReducedMotionSetting::Always };
        assert!(always.resolve().is_reduced());
        let never = MotionConfig { reduced: ReducedMotionSetting::Never };
        assert!(!never.resolve().is_reduced());
    }

    #[test]
    fn test_truthy_values() {
        assert!(is_truthy("1"));
        assert!(is_truthy(" Reduce "));
        assert!(!is_truthy(""));
        assert!(!is_truthy("no-preference"));
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let err = AppConfig::from_toml("[navigation\n").unwrap_err();
        assert!(matches!(err, crate::Error::Config(_)));
    }
}

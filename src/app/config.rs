//! Configuration Management

use crate::signal::{CarryResponse, ResponseCurve};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Main configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server settings
    pub server: ServerConfig,
    /// Absolute trackpad positioning settings
    pub trackpad: TrackpadConfig,
    /// Named velocity channels, keyed by channel name
    #[serde(default = "default_channels")]
    pub channels: BTreeMap<String, ChannelConfig>,
    /// Gesture recognition settings
    #[serde(default)]
    pub gesture: GestureConfig,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind address for the UDP listener
    pub bind: String,
    /// UDP port
    pub port: u16,
    /// Message queue size (must be a power of 2)
    pub queue_size: usize,
    /// Dispatch tick rate (Hz)
    pub tick_hz: u32,
}

/// Absolute trackpad positioning
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackpadConfig {
    /// Speed multiplier around screen center
    pub speed: f64,
    /// Position response curve
    pub curve: ResponseCurve,
}

/// One velocity channel
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChannelConfig {
    /// Velocity gain (pixels per tick at full deflection)
    pub gain: f64,
    /// Power-law exponent (odd, >= 1)
    pub exponent: u32,
    /// Deadzone radius in [0, 1)
    pub deadzone: f64,
    /// How carry motion through this channel translates
    #[serde(default)]
    pub carry_response: CarryResponse,
}

/// Gesture recognition thresholds
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GestureConfig {
    /// Maximum press duration that counts as a tap (ms)
    pub tap_max_ms: u64,
    /// Displacement below which touch motion is jitter (normalized)
    pub motion_noise_floor: f64,
    /// Scroll lines per unit of centroid travel
    pub scroll_gain: f64,
    /// Minimum span change that registers as a pinch (normalized)
    pub pinch_sensitivity: f64,
    /// Minimum bearing change that registers as rotation (radians)
    pub rotate_sensitivity: f64,
    /// Noise deadzone for direct `/scroll` values
    pub scroll_deadzone: f64,
}

fn default_channels() -> BTreeMap<String, ChannelConfig> {
    let mut channels = BTreeMap::new();
    channels.insert(
        "joy-left".to_string(),
        ChannelConfig {
            gain: 25.0,
            exponent: 3,
            deadzone: 0.1,
            carry_response: CarryResponse::Direct,
        },
    );
    channels.insert(
        "joy-right".to_string(),
        ChannelConfig {
            gain: 5.0,
            exponent: 3,
            deadzone: 0.1,
            carry_response: CarryResponse::Direct,
        },
    );
    channels
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            trackpad: TrackpadConfig::default(),
            channels: default_channels(),
            gesture: GestureConfig::default(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0".to_string(),
            port: 9000,
            queue_size: 1024,
            tick_hz: 60,
        }
    }
}

impl Default for TrackpadConfig {
    fn default() -> Self {
        Self {
            speed: 1.0,
            curve: ResponseCurve::Linear,
        }
    }
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            tap_max_ms: 250,
            motion_noise_floor: 0.01,
            scroll_gain: 40.0,
            pinch_sensitivity: 0.02,
            rotate_sensitivity: 0.05,
            scroll_deadzone: 0.05,
        }
    }
}

impl Config {
    /// Validate config values are within acceptable ranges.
    /// Returns Ok(()) if valid, or Err with a description of the first invalid field.
    pub fn validate(&self) -> Result<(), crate::Error> {
        if self.server.queue_size == 0
            || (self.server.queue_size & (self.server.queue_size - 1)) != 0
        {
            return Err(crate::Error::Config(format!(
                "queue_size must be a power of 2, got {}",
                self.server.queue_size
            )));
        }
        if self.server.tick_hz == 0 || self.server.tick_hz > 1000 {
            return Err(crate::Error::Config(format!(
                "tick_hz must be in [1, 1000], got {}",
                self.server.tick_hz
            )));
        }
        if self.trackpad.speed <= 0.0 {
            return Err(crate::Error::Config(format!(
                "trackpad speed must be > 0, got {}",
                self.trackpad.speed
            )));
        }
        for (name, channel) in &self.channels {
            if channel.gain <= 0.0 {
                return Err(crate::Error::Config(format!(
                    "channel '{}': gain must be > 0, got {}",
                    name, channel.gain
                )));
            }
            if channel.exponent == 0 || channel.exponent % 2 == 0 {
                return Err(crate::Error::Config(format!(
                    "channel '{}': exponent must be odd and >= 1, got {}",
                    name, channel.exponent
                )));
            }
            if !(0.0..1.0).contains(&channel.deadzone) {
                return Err(crate::Error::Config(format!(
                    "channel '{}': deadzone must be in [0, 1), got {}",
                    name, channel.deadzone
                )));
            }
        }
        if self.gesture.tap_max_ms == 0 {
            return Err(crate::Error::Config("tap_max_ms must be > 0".to_string()));
        }
        if !(0.0..1.0).contains(&self.gesture.motion_noise_floor) {
            return Err(crate::Error::Config(format!(
                "motion_noise_floor must be in [0, 1), got {}",
                self.gesture.motion_noise_floor
            )));
        }
        if self.gesture.scroll_gain <= 0.0 {
            return Err(crate::Error::Config(format!(
                "scroll_gain must be > 0, got {}",
                self.gesture.scroll_gain
            )));
        }
        Ok(())
    }

    /// Load config from file
    pub fn load(path: &PathBuf) -> Result<Self, crate::Error> {
        let content = std::fs::read_to_string(path)?;
        let config: Self =
            toml::from_str(&content).map_err(|e| crate::Error::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load config from default location
    pub fn load_default() -> Result<Self, crate::Error> {
        let path = Self::default_path();
        if path.exists() {
            Self::load(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Save config to file
    pub fn save(&self, path: &PathBuf) -> Result<(), crate::Error> {
        let content =
            toml::to_string_pretty(self).map_err(|e| crate::Error::Config(e.to_string()))?;

        // Create parent directories
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, content)?;
        Ok(())
    }

    /// Save to default location
    pub fn save_default(&self) -> Result<(), crate::Error> {
        self.save(&Self::default_path())
    }

    /// Get default config path
    pub fn default_path() -> PathBuf {
        dirs::home_dir()
            .map(|h| h.join(".reachpad").join("config.toml"))
            .unwrap_or_else(|| PathBuf::from("config.toml"))
    }

    /// Generate TOML representation
    pub fn to_toml(&self) -> Result<String, crate::Error> {
        toml::to_string_pretty(self).map_err(|e| crate::Error::Config(e.to_string()))
    }
}

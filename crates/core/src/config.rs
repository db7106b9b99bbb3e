//! Game configuration
//!
//! Feature variants are run-time flags rather than build variants. The timing
//! fields default to the reference values in [`crate::types`].
//!
//! | Variable | Field | Default |
//! |----------|-------|---------|
//! | `STC_SHADOW` | `shadow_enabled` | on |
//! | `STC_WALL_KICK` | `wall_kick` | on |
//! | `STC_AUTO_ROTATION` | `auto_rotation` | on |
//!
//! Flags are switched off by `0`, `false` or `off` (case-insensitive) and on by
//! `1`, `true` or `on`. Anything else keeps the default.

use crate::types::{
    DAS_DELAY_TIMER, DAS_MOVE_TIMER, INIT_DELAY_FALL, ROTATION_AUTOREPEAT_DELAY,
    ROTATION_AUTOREPEAT_TIMER,
};

/// Game configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    /// Ghost piece support. When off the shadow is never shown and its toggle is ignored.
    pub shadow_enabled: bool,
    /// Push rotated pieces back inside the side walls instead of rejecting the rotation.
    pub wall_kick: bool,
    /// Repeat clockwise rotation while the key is held.
    pub auto_rotation: bool,
    /// Gravity period at level 0 (ms)
    pub init_delay_fall: u32,
    /// Delay before a held direction starts repeating (ms)
    pub das_delay: i32,
    /// Repeat interval of a held direction (ms)
    pub das_move: i32,
    pub rotation_delay: i32,
    pub rotation_repeat: i32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            shadow_enabled: true,
            wall_kick: true,
            auto_rotation: true,
            init_delay_fall: INIT_DELAY_FALL,
            das_delay: DAS_DELAY_TIMER,
            das_move: DAS_MOVE_TIMER,
            rotation_delay: ROTATION_AUTOREPEAT_DELAY,
            rotation_repeat: ROTATION_AUTOREPEAT_TIMER,
        }
    }
}

impl GameConfig {
    /// Create from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        use std::env;

        let defaults = Self::default();
        let flag = |name: &str, default: bool| {
            env::var(name)
                .ok()
                .and_then(|s| parse_flag(&s))
                .unwrap_or(default)
        };

        Self {
            shadow_enabled: flag("STC_SHADOW", defaults.shadow_enabled),
            wall_kick: flag("STC_WALL_KICK", defaults.wall_kick),
            auto_rotation: flag("STC_AUTO_ROTATION", defaults.auto_rotation),
            ..defaults
        }
    }

    pub fn with_shadow(mut self, enabled: bool) -> Self {
        self.shadow_enabled = enabled;
        self
    }

    pub fn with_wall_kick(mut self, enabled: bool) -> Self {
        self.wall_kick = enabled;
        self
    }

    pub fn with_auto_rotation(mut self, enabled: bool) -> Self {
        self.auto_rotation = enabled;
        self
    }

    pub fn with_init_delay_fall(mut self, delay_ms: u32) -> Self {
        self.init_delay_fall = delay_ms;
        self
    }
}

/// Parse an on/off environment value.
pub fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "on" => Some(true),
        "0" | "false" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_enable_every_feature() {
        let config = GameConfig::default();
        assert!(config.shadow_enabled);
        assert!(config.wall_kick);
        assert!(config.auto_rotation);
        assert_eq!(config.init_delay_fall, 1000);
        assert_eq!(config.das_delay, 200);
    }

    #[test]
    fn builders_override_flags() {
        let config = GameConfig::default()
            .with_shadow(false)
            .with_wall_kick(false)
            .with_init_delay_fall(500);
        assert!(!config.shadow_enabled);
        assert!(!config.wall_kick);
        assert!(config.auto_rotation);
        assert_eq!(config.init_delay_fall, 500);
    }

    #[test]
    fn parse_flag_values() {
        assert_eq!(parse_flag("OFF"), Some(false));
        assert_eq!(parse_flag(" 0 "), Some(false));
        assert_eq!(parse_flag("true"), Some(true));
        assert_eq!(parse_flag("maybe"), None);
    }
}

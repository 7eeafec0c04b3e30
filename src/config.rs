/// Tunable constants for the mini-game.
///
/// Every value is measured per frame (velocities in px/frame, factors applied
/// once per frame) except where the name says otherwise.  Defaults match the
/// feel of the browser version at one update per animation frame.

use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::error::ArcadeError;

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct GameConfig {
    pub ship: ShipConfig,
    pub bullets: BulletConfig,
    pub session: SessionConfig,
    pub effects: EffectsConfig,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct ShipConfig {
    /// Degrees turned per frame while left/right is held.
    pub rotation_step: f32,
    pub thrust: f32,
    /// Multiplier applied to velocity while brake is held.
    pub brake: f32,
    /// Multiplier applied to velocity every frame.
    pub friction: f32,
    pub max_speed: f32,
    pub side_margin: f32,
    pub top_margin: f32,
    /// Larger than the other margins so the ship stays clear of the footer.
    pub bottom_margin: f32,
    /// Spawn point distance from the bottom edge.
    pub spawn_offset: f32,
}

impl Default for ShipConfig {
    fn default() -> Self {
        ShipConfig {
            rotation_step: 3.0,
            thrust: 0.3,
            brake: 0.9,
            friction: 0.95,
            max_speed: 8.0,
            side_margin: 20.0,
            top_margin: 20.0,
            bottom_margin: 120.0,
            spawn_offset: 100.0,
        }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct BulletConfig {
    pub speed: f32,
    /// Edge length of the square hit box centred on the bullet.
    pub size: f32,
}

impl Default for BulletConfig {
    fn default() -> Self {
        BulletConfig { speed: 15.0, size: 8.0 }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct SessionConfig {
    pub countdown_secs: u32,
    pub win_delay_ms: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        SessionConfig { countdown_secs: 30, win_delay_ms: 500 }
    }
}

impl SessionConfig {
    pub fn win_delay(&self) -> Duration {
        Duration::from_millis(self.win_delay_ms)
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct EffectsConfig {
    pub gravity: f32,
    pub damping: f32,
    pub fade: f32,
    pub growth: f32,
    /// Fraction of velocity kept after bouncing off the floor or a wall.
    pub restitution: f32,
    pub wall_margin: f32,
    pub floor_margin: f32,
    /// Particles this far below the viewport are dropped.
    pub despawn_below: f32,
    pub speed_min: f32,
    pub speed_spread: f32,
    pub speed_scale: f32,
    /// Number of description words that become particles.
    pub description_words: usize,
    pub shake_ms: u64,
    pub flash_ms: u64,
}

impl Default for EffectsConfig {
    fn default() -> Self {
        EffectsConfig {
            gravity: 0.3,
            damping: 0.98,
            fade: 0.015,
            growth: 0.02,
            restitution: 0.6,
            wall_margin: 20.0,
            floor_margin: 20.0,
            despawn_below: 100.0,
            speed_min: 150.0,
            speed_spread: 100.0,
            speed_scale: 0.02,
            description_words: 8,
            shake_ms: 300,
            flash_ms: 400,
        }
    }
}

impl GameConfig {
    /// Parse a (possibly partial) JSON override; missing keys keep defaults.
    pub fn from_json_str(text: &str) -> Result<GameConfig, ArcadeError> {
        let config: GameConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<GameConfig, ArcadeError> {
        let text = std::fs::read_to_string(path)?;
        GameConfig::from_json_str(&text)
    }

    pub fn validate(&self) -> Result<(), ArcadeError> {
        let ship = &self.ship;
        if !(ship.friction > 0.0 && ship.friction <= 1.0) {
            return Err(invalid("ship.friction must be in (0, 1]"));
        }
        if !(ship.brake > 0.0 && ship.brake < 1.0) {
            return Err(invalid("ship.brake must be in (0, 1)"));
        }
        if ship.max_speed <= 0.0 {
            return Err(invalid("ship.max_speed must be positive"));
        }
        if ship.side_margin < 0.0 || ship.top_margin < 0.0 || ship.bottom_margin < 0.0 {
            return Err(invalid("ship margins must not be negative"));
        }
        if self.bullets.speed <= 0.0 {
            return Err(invalid("bullets.speed must be positive"));
        }
        if self.bullets.size < 0.0 {
            return Err(invalid("bullets.size must not be negative"));
        }
        if self.session.countdown_secs == 0 {
            return Err(invalid("session.countdown_secs must be at least 1"));
        }
        let fx = &self.effects;
        if !(fx.restitution >= 0.0 && fx.restitution < 1.0) {
            return Err(invalid("effects.restitution must be in [0, 1)"));
        }
        if fx.fade <= 0.0 {
            return Err(invalid("effects.fade must be positive"));
        }
        Ok(())
    }
}

fn invalid(msg: &str) -> ArcadeError {
    ArcadeError::Config(msg.to_string())
}

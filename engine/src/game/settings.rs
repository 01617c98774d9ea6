use serde::{Deserialize, Serialize};

use crate::config::Validate;

use super::power::PowerPolicy;
use super::types::{FieldSize, WallCollisionMode};

/// Complete configuration of one game session. Passed into the engine by
/// value; changing a running game goes through `GameLogic::apply_settings`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameSettings {
    pub field_width: usize,
    pub field_height: usize,
    pub init_move_delay_ms: u32,
    pub min_move_delay_ms: u32,
    /// Hard ceiling the slow power-up can push the move delay to.
    pub max_move_delay_ms: u32,
    /// How much the move delay shrinks per food eaten.
    pub speed_step_ms: u32,
    pub wall_collision_mode: WallCollisionMode,
    pub obstacles_enabled: bool,
    pub obstacle_count: usize,
    pub powerups_enabled: bool,
    pub powerup_chance: f32,
    pub powerup_duration_ms: u64,
    pub power_policy: PowerPolicy,
    pub default_profile: String,
}

impl GameSettings {
    pub fn field(&self) -> FieldSize {
        FieldSize {
            width: self.field_width,
            height: self.field_height,
        }
    }

    pub fn for_difficulty(difficulty: Difficulty) -> Self {
        let mut settings = Self::default();
        let (init, min, step, chance, obstacles) = match difficulty {
            Difficulty::Easy => (165, 95, 4, 0.25, 0),
            Difficulty::Normal => (135, 40, 6, 0.18, 12),
            Difficulty::Hard => (95, 30, 8, 0.08, 16),
            Difficulty::Extreme => (75, 5, 10, 0.05, 20),
        };
        settings.init_move_delay_ms = init;
        settings.min_move_delay_ms = min;
        settings.speed_step_ms = step;
        settings.powerup_chance = chance;
        settings.obstacle_count = obstacles;
        settings.obstacles_enabled = obstacles > 0;
        settings
    }
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            field_width: 40,
            field_height: 30,
            init_move_delay_ms: 135,
            min_move_delay_ms: 35,
            max_move_delay_ms: 999,
            speed_step_ms: 4,
            wall_collision_mode: WallCollisionMode::WrapAround,
            obstacles_enabled: true,
            obstacle_count: 12,
            powerups_enabled: true,
            powerup_chance: 0.35,
            powerup_duration_ms: 5000,
            power_policy: PowerPolicy::default(),
            default_profile: "default".to_string(),
        }
    }
}

impl Validate for GameSettings {
    fn validate(&self) -> Result<(), String> {
        if self.field_width < 10 || self.field_width > 100 {
            return Err("Field width must be between 10 and 100".to_string());
        }
        if self.field_height < 10 || self.field_height > 100 {
            return Err("Field height must be between 10 and 100".to_string());
        }
        if self.min_move_delay_ms == 0 {
            return Err("Minimum move delay must be at least 1ms".to_string());
        }
        if self.init_move_delay_ms < self.min_move_delay_ms {
            return Err("Initial move delay must not be below the minimum".to_string());
        }
        if self.max_move_delay_ms < self.init_move_delay_ms {
            return Err("Maximum move delay must not be below the initial".to_string());
        }
        if self.speed_step_ms == 0 {
            return Err("Speed step must be at least 1ms".to_string());
        }
        if self.obstacle_count > 100 {
            return Err("Obstacle count must be at most 100".to_string());
        }
        if !(0.0..=1.0).contains(&self.powerup_chance) {
            return Err("Power-up chance must be between 0.0 and 1.0".to_string());
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
    Extreme,
}

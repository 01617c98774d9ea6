use std::collections::HashSet;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::config::Validate;
use crate::profiles::{ProfileRecord, ProfileStore};
use crate::{log, log_error};

use super::food::{Food, PowerUp};
use super::obstacles::ObstacleField;
use super::power::PowerUpKind;
use super::session_rng::SessionRng;
use super::settings::GameSettings;
use super::snake::Snake;
use super::types::{DeathReason, Direction, FieldSize, Point, TickStatus};

/// Body length every new game starts with.
const INITIAL_SNAKE_LENGTH: usize = 3;

#[derive(Debug)]
pub enum EngineError {
    InvalidSettings(String),
    SnakeSpawn { width: usize, height: usize },
}

impl std::fmt::Display for EngineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EngineError::InvalidSettings(reason) => write!(f, "Invalid settings: {}", reason),
            EngineError::SnakeSpawn { width, height } => {
                write!(
                    f,
                    "Cannot place the initial snake on a {}x{} field",
                    width, height
                )
            }
        }
    }
}

impl std::error::Error for EngineError {}

/// What one tick did. This is the whole trigger contract for sound and
/// particle effects; presentation code must not diff engine internals.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TickEvents {
    pub status: TickStatus,
    pub ate_food: bool,
    pub picked_powerup: Option<PowerUpKind>,
}

impl TickEvents {
    fn idle() -> Self {
        Self::with_status(TickStatus::Idle)
    }

    fn with_status(status: TickStatus) -> Self {
        Self {
            status,
            ate_food: false,
            picked_powerup: None,
        }
    }
}

/// Read-only copy of the full game state, detached from the engine. Renderers
/// work exclusively from these.
#[derive(Clone, Debug)]
pub struct GameSnapshot {
    pub snake: Vec<Point>,
    pub prev_snake: Vec<Point>,
    pub food: Option<Point>,
    pub powerup: Option<(PowerUpKind, Point)>,
    pub obstacles: Vec<Point>,
    pub score: u32,
    pub highscore: u32,
    pub move_delay_ms: u32,
    pub game_over: bool,
    pub paused: bool,
    pub active_power: Option<PowerUpKind>,
    pub last_move_start_ms: u64,
}

#[derive(Clone, Copy, Debug)]
struct ActivePower {
    kind: PowerUpKind,
    ends_at_ms: u64,
}

fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as u64)
        .unwrap_or(0)
}

/// The authoritative game state machine. An external driver calls
/// `handle_move` once per move delay and `update` every rendered frame;
/// direction changes and pause toggles arrive between ticks.
pub struct GameLogic {
    settings: GameSettings,
    field: FieldSize,
    rng: SessionRng,
    store: Box<dyn ProfileStore>,
    snake: Option<Snake>,
    obstacles: ObstacleField,
    food: Food,
    powerup: Option<PowerUp>,
    score: u32,
    move_delay_ms: u32,
    game_over: bool,
    paused: bool,
    active_power: Option<ActivePower>,
    prev_snake: Vec<Point>,
    last_move_start_ms: u64,
    profile_name: String,
    profile: ProfileRecord,
    highscore: u32,
}

impl GameLogic {
    pub fn new(
        settings: GameSettings,
        store: Box<dyn ProfileStore>,
        rng: SessionRng,
    ) -> Result<Self, EngineError> {
        settings.validate().map_err(EngineError::InvalidSettings)?;

        let field = settings.field();
        let profile_name = settings.default_profile.clone();
        let profile = ProfileRecord::defaulted(&profile_name);
        let move_delay_ms = settings.init_move_delay_ms;

        let mut logic = Self {
            field,
            rng,
            store,
            snake: None,
            obstacles: ObstacleField::empty(),
            food: Food::empty(),
            powerup: None,
            score: 0,
            move_delay_ms,
            game_over: false,
            paused: false,
            active_power: None,
            prev_snake: Vec::new(),
            last_move_start_ms: 0,
            profile_name,
            profile,
            highscore: 0,
            settings,
        };
        logic.reset()?;
        Ok(logic)
    }

    /// Tears the session down to a fresh game: new snake, obstacles and food,
    /// cleared score and timers, profile reloaded. A snake that cannot be
    /// placed leaves the game over and propagates the failure.
    pub fn reset(&mut self) -> Result<(), EngineError> {
        self.field = self.settings.field();
        log!(
            "Starting new game on a {}x{} field",
            self.field.width,
            self.field.height
        );

        let mid = Point::new(self.field.width / 2, self.field.height / 2);
        let snake = match Snake::new(mid, Direction::Right, INITIAL_SNAKE_LENGTH, &self.field) {
            Ok(snake) => snake,
            Err(err) => {
                self.game_over = true;
                return Err(err);
            }
        };

        let body: HashSet<Point> = snake.cells().into_iter().collect();
        self.obstacles = if self.settings.obstacles_enabled {
            ObstacleField::generate(
                self.settings.obstacle_count,
                &body,
                &self.field,
                &mut self.rng,
            )
        } else {
            ObstacleField::empty()
        };
        self.food = Food::spawn(&self.field, &body, self.obstacles.cell_set(), &mut self.rng);
        self.powerup = None;
        self.score = 0;
        self.move_delay_ms = self.settings.init_move_delay_ms;
        self.game_over = false;
        self.paused = false;
        self.active_power = None;
        self.prev_snake = snake.cells();
        self.last_move_start_ms = now_ms();
        self.snake = Some(snake);
        self.load_profile();
        Ok(())
    }

    /// Switches the active profile mid-session. An empty name falls back to
    /// the configured default.
    pub fn set_profile(&mut self, name: &str) {
        let name = name.trim();
        self.profile_name = if name.is_empty() {
            self.settings.default_profile.clone()
        } else {
            name.to_string()
        };
        self.load_profile();
    }

    fn load_profile(&mut self) {
        if !self.store.exists(&self.profile_name)
            && let Err(err) = self.store.create(&self.profile_name)
        {
            log_error!("Failed to create profile '{}': {}", self.profile_name, err);
        }
        self.profile = self.store.load(&self.profile_name);
        self.highscore = self.profile.highscore;
    }

    /// Advances the game by exactly one tick.
    pub fn handle_move(&mut self) -> TickEvents {
        self.handle_move_at(now_ms())
    }

    /// Tick with an explicit timestamp, for deterministic drivers and tests.
    pub fn handle_move_at(&mut self, now_ms: u64) -> TickEvents {
        if self.game_over || self.paused || self.snake.is_none() {
            return TickEvents::idle();
        }

        let step = {
            let snake = self
                .snake
                .as_mut()
                .expect("snake exists while the game is running");
            self.prev_snake = snake.cells();
            self.last_move_start_ms = now_ms;
            snake
                .step(&self.field, self.settings.wall_collision_mode)
                .map(|_| snake.head())
        };

        let head = match step {
            Ok(head) => head,
            Err(reason) => {
                self.game_over = true;
                self.on_game_over();
                return TickEvents::with_status(reason.into());
            }
        };

        if self.settings.obstacles_enabled && self.obstacles.contains(&head) {
            self.game_over = true;
            self.on_game_over();
            return TickEvents::with_status(DeathReason::ObstacleCollision.into());
        }

        let mut events = TickEvents::with_status(TickStatus::Ok);

        if self.food.pos() == Some(head) {
            self.score += 1;
            if self.move_delay_ms > self.settings.min_move_delay_ms {
                self.move_delay_ms = self
                    .move_delay_ms
                    .saturating_sub(self.settings.speed_step_ms)
                    .max(self.settings.min_move_delay_ms);
            }
            let snake = self
                .snake
                .as_mut()
                .expect("snake exists while the game is running");
            snake.grow(1);
            let occupied: HashSet<Point> = snake.cells().into_iter().collect();
            log!(
                "Food eaten. Score: {}, move delay: {}ms",
                self.score,
                self.move_delay_ms
            );
            let mut forbidden = self.obstacles.cell_set().clone();
            if let Some(powerup) = self.powerup {
                forbidden.insert(powerup.pos);
            }
            self.food
                .respawn(&self.field, &occupied, &forbidden, &mut self.rng);
            events.ate_food = true;
            self.try_spawn_powerup();
        }

        if let Some(powerup) = self.powerup
            && powerup.pos == head
        {
            log!("Power-up picked up: {}", powerup.kind.as_str());
            self.apply_power(powerup.kind, now_ms);
            events.picked_powerup = Some(powerup.kind);
            self.powerup = None;
        }

        events
    }

    /// Spawn attempt after a food-eaten event: at most one power-up lives at
    /// a time, and each attempt passes with `powerup_chance`.
    fn try_spawn_powerup(&mut self) {
        if !self.settings.powerups_enabled || self.powerup.is_some() {
            return;
        }
        if self.rng.random::<f32>() >= self.settings.powerup_chance {
            return;
        }
        let Some(snake) = self.snake.as_ref() else {
            return;
        };
        let mut occupied: HashSet<Point> = snake.cells().into_iter().collect();
        if let Some(pos) = self.food.pos() {
            occupied.insert(pos);
        }
        self.powerup = PowerUp::spawn(
            &self.field,
            &occupied,
            self.obstacles.cell_set(),
            &mut self.rng,
        );
        if let Some(powerup) = self.powerup {
            log!(
                "Power-up spawned: {} at ({}, {})",
                powerup.kind.as_str(),
                powerup.pos.x,
                powerup.pos.y
            );
        }
    }

    fn apply_power(&mut self, kind: PowerUpKind, now_ms: u64) {
        let effect = self.settings.power_policy.effect(kind);
        self.active_power = Some(ActivePower {
            kind,
            ends_at_ms: now_ms + self.settings.powerup_duration_ms,
        });
        self.score += effect.score_bonus;
        if effect.delay_delta_ms > 0 {
            self.move_delay_ms = (self.move_delay_ms + effect.delay_delta_ms as u32)
                .min(self.settings.max_move_delay_ms);
        } else if effect.delay_delta_ms < 0 {
            self.move_delay_ms = self
                .move_delay_ms
                .saturating_sub(effect.delay_delta_ms.unsigned_abs())
                .max(self.settings.min_move_delay_ms);
        }
        if effect.growth > 0
            && let Some(snake) = self.snake.as_mut()
        {
            snake.grow(effect.growth);
        }
    }

    /// Undoes the transient delay effect of the expired power. When food was
    /// eaten during the power-up window the original delay is not exactly
    /// restored; the clamps keep the result inside the configured bounds.
    fn clear_power_effects(&mut self) {
        let Some(active) = self.active_power.take() else {
            return;
        };
        let delta = self.settings.power_policy.effect(active.kind).delay_delta_ms;
        if delta > 0 {
            self.move_delay_ms = self
                .move_delay_ms
                .saturating_sub(delta as u32)
                .max(self.settings.min_move_delay_ms);
        } else if delta < 0 {
            self.move_delay_ms =
                (self.move_delay_ms + delta.unsigned_abs()).min(self.settings.init_move_delay_ms);
        }
    }

    /// Cheap per-frame poll that expires the active power-up.
    pub fn update(&mut self) {
        self.update_at(now_ms());
    }

    pub fn update_at(&mut self, now_ms: u64) {
        if let Some(active) = self.active_power
            && now_ms > active.ends_at_ms
        {
            self.clear_power_effects();
        }
    }

    pub fn set_direction(&mut self, direction: Direction) {
        if let Some(snake) = self.snake.as_mut() {
            snake.set_direction(direction);
        }
    }

    pub fn toggle_pause(&mut self) {
        if !self.game_over {
            self.paused = !self.paused;
        }
    }

    fn on_game_over(&mut self) {
        let prev_high = self.profile.highscore;
        if self.score > prev_high {
            self.profile.highscore = self.score;
            self.highscore = self.score;
            log!("New record: {} (previous: {})", self.score, prev_high);
        } else {
            log!("Game over. Score: {}, record: {}", self.score, prev_high);
        }
        self.profile.last_score = self.score;
        self.profile.play_count += 1;
        if let Err(err) = self.store.save(&self.profile_name, &self.profile) {
            log_error!("Failed to save profile '{}': {}", self.profile_name, err);
        }
    }

    /// Swaps in a new configuration. Delay bounds apply immediately; field
    /// geometry, obstacles and spawn tuning take effect on the next `reset`.
    pub fn apply_settings(&mut self, settings: GameSettings) -> Result<(), EngineError> {
        settings.validate().map_err(EngineError::InvalidSettings)?;
        self.move_delay_ms = self
            .move_delay_ms
            .clamp(settings.min_move_delay_ms, settings.max_move_delay_ms);
        self.settings = settings;
        Ok(())
    }

    pub fn settings(&self) -> &GameSettings {
        &self.settings
    }

    pub fn profile_name(&self) -> &str {
        &self.profile_name
    }

    pub fn profile(&self) -> &ProfileRecord {
        &self.profile
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            snake: self
                .snake
                .as_ref()
                .map(|snake| snake.cells())
                .unwrap_or_default(),
            prev_snake: self.prev_snake.clone(),
            food: self.food.pos(),
            powerup: self.powerup.map(|powerup| (powerup.kind, powerup.pos)),
            obstacles: self.obstacles.cells().to_vec(),
            score: self.score,
            highscore: self.highscore,
            move_delay_ms: self.move_delay_ms,
            game_over: self.game_over,
            paused: self.paused,
            active_power: self.active_power.map(|active| active.kind),
            last_move_start_ms: self.last_move_start_ms,
        }
    }
}

#[cfg(test)]
impl GameLogic {
    pub(crate) fn place_food(&mut self, pos: Option<Point>) {
        self.food.set_pos(pos);
    }

    pub(crate) fn place_powerup(&mut self, kind: PowerUpKind, pos: Point) {
        self.powerup = Some(PowerUp { kind, pos });
    }

    pub(crate) fn place_obstacles(&mut self, cells: &[Point]) {
        self.obstacles = ObstacleField::from_cells(cells.iter().copied());
    }
}

/// Immutable game configuration.
///
/// Built once at startup and passed by reference into every entity and
/// loop function; nothing reads screen size or tuning from globals.

use std::ops::RangeInclusive;
use std::path::PathBuf;
use std::time::Duration;

// ── Defaults ─────────────────────────────────────────────────────────────────

pub const SCREEN_WIDTH: i32 = 800;
pub const SCREEN_HEIGHT: i32 = 600;

pub const TARGET_WIDTH: i32 = 60;
pub const TARGET_HEIGHT: i32 = 40;

pub const MIN_SPEED: i32 = 3;
pub const MAX_SPEED: i32 = 8;

/// Milliseconds between animation frame changes.
pub const ANIMATION_INTERVAL_MS: u64 = 200;

pub const SPAWN_TOP: i32 = 50;
/// Spawn band ends this many pixels above the bottom edge.
pub const SPAWN_BOTTOM_MARGIN: i32 = 100;

pub const INITIAL_TARGETS: usize = 3;
pub const MAX_TARGETS: usize = 10;
pub const POINTS_PER_LEVEL: u32 = 10;

pub const TICK_RATE_HZ: u32 = 60;

pub const CROSSHAIR_RADIUS: i32 = 15;
pub const CROSSHAIR_STROKE: i32 = 2;

/// How many `duckN.png` files are probed (`duck1.png` .. `duckN.png`).
pub const FRAME_FILES: usize = 2;

#[derive(Clone, Debug, PartialEq)]
pub struct GameConfig {
    pub screen_width: i32,
    pub screen_height: i32,
    pub target_width: i32,
    pub target_height: i32,
    pub min_speed: i32,
    pub max_speed: i32,
    pub animation_interval_ms: u64,
    pub spawn_top: i32,
    pub spawn_bottom_margin: i32,
    pub initial_targets: usize,
    pub max_targets: usize,
    pub points_per_level: u32,
    pub tick_rate_hz: u32,
    pub crosshair_radius: i32,
    pub crosshair_stroke: i32,
    pub frame_files: usize,
    pub asset_dir: PathBuf,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,
            target_width: TARGET_WIDTH,
            target_height: TARGET_HEIGHT,
            min_speed: MIN_SPEED,
            max_speed: MAX_SPEED,
            animation_interval_ms: ANIMATION_INTERVAL_MS,
            spawn_top: SPAWN_TOP,
            spawn_bottom_margin: SPAWN_BOTTOM_MARGIN,
            initial_targets: INITIAL_TARGETS,
            max_targets: MAX_TARGETS,
            points_per_level: POINTS_PER_LEVEL,
            tick_rate_hz: TICK_RATE_HZ,
            crosshair_radius: CROSSHAIR_RADIUS,
            crosshair_stroke: CROSSHAIR_STROKE,
            frame_files: FRAME_FILES,
            asset_dir: PathBuf::from("."),
        }
    }
}

impl GameConfig {
    /// Inclusive vertical band a target may spawn in: `[top, H - margin]`.
    pub fn spawn_band(&self) -> RangeInclusive<i32> {
        let bottom = (self.screen_height - self.spawn_bottom_margin).max(self.spawn_top);
        self.spawn_top..=bottom
    }

    pub fn speed_range(&self) -> RangeInclusive<i32> {
        self.min_speed..=self.max_speed.max(self.min_speed)
    }

    /// Wall-clock budget for one tick.
    pub fn frame_duration(&self) -> Duration {
        Duration::from_micros(1_000_000 / u64::from(self.tick_rate_hz.max(1)))
    }

    pub fn asset_path(&self, name: &str) -> PathBuf {
        self.asset_dir.join(name)
    }
}

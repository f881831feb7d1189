/// Pure game-logic functions.
///
/// Every public function takes an immutable reference to the current
/// `GameState` (or `Target`), the `GameConfig`, and where needed an RNG
/// handle, and returns a brand-new value.  Side effects are limited to the
/// injected RNG.

use rand::Rng;

use crate::config::GameConfig;
use crate::entities::{GameState, GameStatus, Rect, Target};

// ── Targets ───────────────────────────────────────────────────────────────────

/// Move a target back off the left edge with a fresh height and speed.
/// Animation state is carried over untouched.
pub fn reset_target(target: &Target, config: &GameConfig, rng: &mut impl Rng) -> Target {
    Target {
        x: -config.target_width,
        y: rng.gen_range(config.spawn_band()),
        speed: rng.gen_range(config.speed_range()),
        ..target.clone()
    }
}

/// A brand-new target at animation frame 0, already in its reset position.
pub fn spawn_target(config: &GameConfig, now: u64, rng: &mut impl Rng) -> Target {
    let fresh = Target {
        x: 0,
        y: 0,
        speed: 0,
        frame_index: 0,
        last_frame_change: now,
    };
    reset_target(&fresh, config, rng)
}

/// Advance one target by a single tick: animate, move, then wrap around
/// if it has crossed the right edge.
pub fn update_target(
    target: &Target,
    config: &GameConfig,
    frame_count: usize,
    now: u64,
    rng: &mut impl Rng,
) -> Target {
    let mut next = target.clone();

    if now.saturating_sub(target.last_frame_change) > config.animation_interval_ms {
        next.frame_index = (target.frame_index + 1) % frame_count.max(1);
        next.last_frame_change = now;
    }

    next.x += next.speed;
    if next.x > config.screen_width {
        next = reset_target(&next, config, rng);
    }
    next
}

pub fn target_rect(target: &Target, config: &GameConfig) -> Rect {
    Rect {
        x: target.x,
        y: target.y,
        w: config.target_width,
        h: config.target_height,
    }
}

/// Indices of every target whose rectangle contains `(x, y)`.
pub fn targets_at(state: &GameState, config: &GameConfig, x: i32, y: i32) -> Vec<usize> {
    state
        .targets
        .iter()
        .enumerate()
        .filter(|(_, t)| target_rect(t, config).contains(x, y))
        .map(|(i, _)| i)
        .collect()
}

// ── Constructors ─────────────────────────────────────────────────────────────

/// Build the initial game state: score 0, level 1, `initial_targets` ducks.
pub fn init_state(
    config: &GameConfig,
    sprite_frames: usize,
    now: u64,
    rng: &mut impl Rng,
) -> GameState {
    let targets = (0..config.initial_targets)
        .map(|_| spawn_target(config, now, rng))
        .collect();
    GameState {
        targets,
        score: 0,
        level: 1,
        status: GameStatus::Running,
        sprite_frames: sprite_frames.max(1),
        frame: 0,
    }
}

// ── Input-driven state transitions ───────────────────────────────────────────

/// Fire at logical point `(x, y)`.  Every target under the point is reset
/// and scores one point.  Returns the new state and the number of hits.
pub fn shoot(
    state: &GameState,
    config: &GameConfig,
    x: i32,
    y: i32,
    rng: &mut impl Rng,
) -> (GameState, usize) {
    let hit = targets_at(state, config, x, y);
    if hit.is_empty() {
        return (state.clone(), 0);
    }

    let targets = state
        .targets
        .iter()
        .enumerate()
        .map(|(i, t)| {
            if hit.contains(&i) {
                reset_target(t, config, rng)
            } else {
                t.clone()
            }
        })
        .collect();

    let next = GameState {
        targets,
        score: state.score + hit.len() as u32,
        ..state.clone()
    };
    (next, hit.len())
}

/// Transition to the terminal state.
pub fn stop(state: &GameState) -> GameState {
    GameState {
        status: GameStatus::Stopped,
        ..state.clone()
    }
}

// ── Per-frame tick (nearly pure — RNG is injected) ──────────────────────────

pub fn update_targets(
    state: &GameState,
    config: &GameConfig,
    now: u64,
    rng: &mut impl Rng,
) -> GameState {
    let targets = state
        .targets
        .iter()
        .map(|t| update_target(t, config, state.sprite_frames, now, rng))
        .collect();
    GameState {
        targets,
        ..state.clone()
    }
}

/// At most one level-up per call: the threshold is recomputed from the
/// current level, so a score that jumps past several thresholds still only
/// gains a single level (and a single target) this frame.
pub fn level_up(
    state: &GameState,
    config: &GameConfig,
    now: u64,
    rng: &mut impl Rng,
) -> GameState {
    let threshold = state.level * config.points_per_level;
    if state.score < threshold || state.targets.len() >= config.max_targets {
        return state.clone();
    }

    let mut targets = state.targets.clone();
    targets.push(spawn_target(config, now, rng));
    GameState {
        targets,
        level: state.level + 1,
        ..state.clone()
    }
}

/// Advance the simulation by one frame.  All randomness comes through `rng`
/// so callers control determinism (useful for tests with a seeded RNG).
pub fn tick(state: &GameState, config: &GameConfig, now: u64, rng: &mut impl Rng) -> GameState {
    if state.status == GameStatus::Stopped {
        return state.clone();
    }
    let updated = update_targets(state, config, now, rng);
    let leveled = level_up(&updated, config, now, rng);
    GameState {
        frame: state.frame + 1,
        ..leveled
    }
}

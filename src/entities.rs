/// All game entity types — pure data, no logic.

#[derive(Clone, Debug, PartialEq)]
pub enum GameStatus {
    Running,
    Stopped,
}

// ── Targets ───────────────────────────────────────────────────────────────────

/// One on-screen duck.  Positions are logical canvas pixels.
#[derive(Clone, Debug, PartialEq)]
pub struct Target {
    pub x: i32,
    pub y: i32,
    /// Pixels moved rightward per tick.
    pub speed: i32,
    /// Index into the shared animation frame sequence.
    pub frame_index: usize,
    /// Timestamp (ms) of the last frame advance.
    pub last_frame_change: u64,
}

/// Axis-aligned rectangle with half-open containment.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub fn contains(&self, px: i32, py: i32) -> bool {
        px >= self.x && px < self.x + self.w && py >= self.y && py < self.y + self.h
    }
}

// ── Master game state ─────────────────────────────────────────────────────────

/// The entire game state.  Cloneable so pure update functions can
/// return a new copy without mutating the original.
#[derive(Clone, Debug)]
pub struct GameState {
    /// The target pool.  Targets are never removed, only reset.
    pub targets: Vec<Target>,
    pub score: u32,
    pub level: u32,
    pub status: GameStatus,
    /// Length of the animation frame sequence every target cycles through.
    pub sprite_frames: usize,
    pub frame: u64,
}

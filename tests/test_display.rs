use duck_hunt::assets::Assets;
use duck_hunt::compute::{init_state, shoot, tick};
use duck_hunt::config::GameConfig;
use duck_hunt::display::*;
use duck_hunt::entities::*;
use duck_hunt::input::Pointer;

use image::{Rgba, RgbaImage};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tempfile::TempDir;

const GREEN: Rgb = [0, 255, 0];

fn viewport(cfg: &GameConfig) -> Viewport {
    Viewport::new(80, 24, cfg)
}

fn state_with(targets: Vec<Target>) -> GameState {
    GameState {
        targets,
        score: 0,
        level: 1,
        status: GameStatus::Running,
        sprite_frames: 1,
        frame: 0,
    }
}

fn target_at(x: i32, y: i32, frame_index: usize) -> Target {
    Target {
        x,
        y,
        speed: 3,
        frame_index,
        last_frame_change: 0,
    }
}

/// Pointer parked in the lower-right, away from the HUD and test targets.
fn far_pointer() -> Pointer {
    Pointer { column: 70, row: 20 }
}

// ── Viewport ──────────────────────────────────────────────────────────────────

#[test]
fn cells_map_to_their_logical_centres() {
    let cfg = GameConfig::default();
    let vp = viewport(&cfg);
    assert_eq!(vp.to_logical(0, 0), (5, 12));
    assert_eq!(vp.to_logical(40, 12), (405, 312));
    assert_eq!(vp.to_logical(79, 23), (795, 587));
}

#[test]
fn zero_sized_terminal_is_clamped() {
    let cfg = GameConfig::default();
    let vp = Viewport::new(0, 0, &cfg);
    assert_eq!((vp.columns, vp.rows), (1, 1));
    assert_eq!(vp.to_logical(0, 0), (400, 300));
}

// ── compose ───────────────────────────────────────────────────────────────────

#[test]
fn fallback_frame_has_white_fill_and_green_placeholder() {
    let cfg = GameConfig::default();
    let assets = Assets::fallback(&cfg);
    let state = state_with(vec![target_at(100, 200, 0)]);
    let canvas = compose(&state, &assets, viewport(&cfg), far_pointer(), &cfg);

    assert_eq!(canvas.width(), 80);
    assert_eq!(canvas.height(), 48);

    let (sx, sy) = canvas.subpixel_at(130, 220).unwrap();
    assert_eq!(canvas.pixel(sx, sy), GREEN);

    let (sx, sy) = canvas.subpixel_at(400, 100).unwrap();
    assert_eq!(canvas.pixel(sx, sy), C_BACKGROUND);
}

#[test]
fn hud_shows_score_and_level() {
    let cfg = GameConfig::default();
    let assets = Assets::fallback(&cfg);
    let mut state = state_with(Vec::new());
    state.score = 12;
    state.level = 2;
    let canvas = compose(&state, &assets, viewport(&cfg), far_pointer(), &cfg);

    assert_eq!(hud_text(&state), "Score: 12  Level: 2");
    assert!(canvas.text_row(0).starts_with(" Score: 12  Level: 2"));
}

#[test]
fn crosshair_is_centred_on_pointer() {
    let cfg = GameConfig::default();
    let assets = Assets::fallback(&cfg);
    let vp = viewport(&cfg);
    let pointer = far_pointer();
    let canvas = compose(&state_with(Vec::new()), &assets, vp, pointer, &cfg);

    let (px, py) = vp.to_logical(pointer.column, pointer.row);
    let (sx, sy) = canvas.subpixel_at(px, py).unwrap();
    assert_eq!(canvas.pixel(sx, sy), C_CROSSHAIR);

    // Arms of the cross reach the radius.
    let (sx, sy) = canvas.subpixel_at(px - 10, py).unwrap();
    assert_eq!(canvas.pixel(sx, sy), C_CROSSHAIR);
    let (sx, sy) = canvas.subpixel_at(px, py + 10).unwrap();
    assert_eq!(canvas.pixel(sx, sy), C_CROSSHAIR);

    // Well outside the circle is untouched.
    let (sx, sy) = canvas.subpixel_at(px - 60, py - 60).unwrap();
    assert_eq!(canvas.pixel(sx, sy), C_BACKGROUND);
}

#[test]
fn crosshair_is_drawn_over_targets() {
    let cfg = GameConfig::default();
    let assets = Assets::fallback(&cfg);
    let vp = viewport(&cfg);
    let pointer = Pointer { column: 13, row: 8 };
    let (px, py) = vp.to_logical(pointer.column, pointer.row);
    let state = state_with(vec![target_at(px - 30, py - 20, 0)]);
    let canvas = compose(&state, &assets, vp, pointer, &cfg);

    let (sx, sy) = canvas.subpixel_at(px, py).unwrap();
    assert_eq!(canvas.pixel(sx, sy), C_CROSSHAIR);
}

#[test]
fn background_image_replaces_fill() {
    let cfg = GameConfig::default();
    let mut assets = Assets::fallback(&cfg);
    assets.background = Some(RgbaImage::from_pixel(800, 600, Rgba([10, 20, 200, 255])));
    let canvas = compose(&state_with(Vec::new()), &assets, viewport(&cfg), far_pointer(), &cfg);

    let (sx, sy) = canvas.subpixel_at(400, 300).unwrap();
    assert_eq!(canvas.pixel(sx, sy), [10, 20, 200]);
}

#[test]
fn targets_use_their_current_animation_frame() {
    let dir = TempDir::new().unwrap();
    RgbaImage::from_pixel(60, 40, Rgba([255, 0, 0, 255]))
        .save(dir.path().join("duck1.png"))
        .unwrap();
    RgbaImage::from_pixel(60, 40, Rgba([0, 0, 255, 255]))
        .save(dir.path().join("duck2.png"))
        .unwrap();
    let cfg = GameConfig {
        asset_dir: dir.path().to_path_buf(),
        ..GameConfig::default()
    };
    let assets = Assets::load(&cfg);
    let state = state_with(vec![target_at(100, 200, 0), target_at(400, 300, 1)]);
    let canvas = compose(&state, &assets, viewport(&cfg), far_pointer(), &cfg);

    let (sx, sy) = canvas.subpixel_at(130, 220).unwrap();
    let first = canvas.pixel(sx, sy);
    assert!(first[0] > 250 && first[2] < 5, "{:?}", first);
    let (sx, sy) = canvas.subpixel_at(430, 320).unwrap();
    let second = canvas.pixel(sx, sy);
    assert!(second[2] > 250 && second[0] < 5, "{:?}", second);
}

#[test]
fn transparent_pixels_show_what_is_underneath() {
    let cfg = GameConfig::default();
    let vp = viewport(&cfg);
    let mut canvas = Canvas::new(vp);
    canvas.fill(C_BACKGROUND);
    canvas.blit(&RgbaImage::from_pixel(4, 4, Rgba([0, 0, 0, 0])), 0, 0, 800, 600);
    assert_eq!(canvas.pixel(10, 10), C_BACKGROUND);
}

#[test]
fn targets_off_the_left_edge_are_clipped() {
    let cfg = GameConfig::default();
    let assets = Assets::fallback(&cfg);
    let state = state_with(vec![target_at(-60, 200, 0)]);
    let canvas = compose(&state, &assets, viewport(&cfg), far_pointer(), &cfg);

    let (sx, sy) = canvas.subpixel_at(0, 220).unwrap();
    assert_eq!(canvas.pixel(sx, sy), C_BACKGROUND);
}

// ── present ───────────────────────────────────────────────────────────────────

#[test]
fn present_writes_hud_text() {
    let cfg = GameConfig::default();
    let assets = Assets::fallback(&cfg);
    let state = state_with(Vec::new());
    let mut out: Vec<u8> = Vec::new();
    render(&mut out, &state, &assets, viewport(&cfg), far_pointer(), &cfg).unwrap();

    let text = String::from_utf8_lossy(&out);
    assert!(text.contains("Score: 0  Level: 1"));
    assert!(text.contains('▀'));
}

#[test]
fn loop_runs_with_no_assets_present() {
    let cfg = GameConfig::default();
    let assets = Assets::fallback(&cfg);
    let mut rng = StdRng::seed_from_u64(3);
    let mut state = init_state(&cfg, assets.frame_count(), 0, &mut rng);
    let vp = viewport(&cfg);
    let mut out: Vec<u8> = Vec::new();

    for frame in 0..600u64 {
        let now = frame * 16;
        if frame % 7 == 0 {
            let column = (frame % 80) as u16;
            let row = (frame % 24) as u16;
            let (x, y) = vp.to_logical(column, row);
            state = shoot(&state, &cfg, x, y, &mut rng).0;
        }
        state = tick(&state, &cfg, now, &mut rng);
        let pointer = Pointer {
            column: (frame % 80) as u16,
            row: (frame % 24) as u16,
        };
        out.clear();
        render(&mut out, &state, &assets, vp, pointer, &cfg).unwrap();
        assert!(!out.is_empty());
        for t in &state.targets {
            assert!(t.x <= cfg.screen_width);
            assert!(cfg.spawn_band().contains(&t.y));
        }
    }
    assert!(state.targets.len() <= cfg.max_targets);
}

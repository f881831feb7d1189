/// Optional image and sound assets.
///
/// Every asset is optional.  A load failure is logged and replaced by a
/// built-in default; nothing here ever aborts the game.

use std::fs::File;
use std::io::{BufReader, ErrorKind};
use std::path::{Path, PathBuf};

use image::imageops::FilterType;
use image::{Rgba, RgbaImage};
use log::{info, warn};
use rodio::{Decoder, Source};

use crate::audio::SoundEffect;
use crate::config::GameConfig;

pub const BACKGROUND_FILE: &str = "background.png";
pub const SHOT_FILE: &str = "shot.wav";
pub const HIT_FILE: &str = "hit.wav";

/// Flat colour of the placeholder duck.
pub const PLACEHOLDER_COLOR: Rgba<u8> = Rgba([0, 255, 0, 255]);

/// File name of animation frame `n` (1-based): `duck1.png`, `duck2.png`, ...
pub fn frame_file(n: usize) -> String {
    format!("duck{}.png", n)
}

// ── Errors ────────────────────────────────────────────────────────────────────

#[derive(Debug)]
pub enum AssetError {
    /// The file does not exist.
    Missing(PathBuf),
    /// The file exists but could not be read.
    Io { path: PathBuf, reason: String },
    /// The file was read but could not be decoded.
    Decode { path: PathBuf, reason: String },
}

impl std::fmt::Display for AssetError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AssetError::Missing(path) => write!(f, "{} not found", path.display()),
            AssetError::Io { path, reason } => {
                write!(f, "failed to read {}: {}", path.display(), reason)
            }
            AssetError::Decode { path, reason } => {
                write!(f, "failed to decode {}: {}", path.display(), reason)
            }
        }
    }
}

impl std::error::Error for AssetError {}

fn open(path: &Path) -> Result<File, AssetError> {
    File::open(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => AssetError::Missing(path.to_path_buf()),
        _ => AssetError::Io {
            path: path.to_path_buf(),
            reason: e.to_string(),
        },
    })
}

// ── Loaders ───────────────────────────────────────────────────────────────────

/// Load an image and scale it to exactly `width` x `height`.
pub fn load_image(path: &Path, width: u32, height: u32) -> Result<RgbaImage, AssetError> {
    let reader = BufReader::new(open(path)?);
    let img = image::ImageReader::new(reader)
        .with_guessed_format()
        .map_err(|e| AssetError::Io {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?
        .decode()
        .map_err(|e| AssetError::Decode {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
    Ok(img
        .resize_exact(width, height, FilterType::Triangle)
        .to_rgba8())
}

pub fn load_sound(path: &Path) -> Result<SoundEffect, AssetError> {
    let reader = BufReader::new(open(path)?);
    let decoder = Decoder::new(reader).map_err(|e| AssetError::Decode {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    Ok(decoder.buffered())
}

/// Flat-coloured stand-in for a missing duck sprite.
pub fn placeholder_frame(width: u32, height: u32) -> RgbaImage {
    RgbaImage::from_pixel(width, height, PLACEHOLDER_COLOR)
}

// ── Asset set ─────────────────────────────────────────────────────────────────

pub struct Assets {
    /// Already scaled to the canvas.  `None` means solid fill.
    pub background: Option<RgbaImage>,
    /// Animation frames, scaled to the target size.  Never empty.
    target_frames: Vec<RgbaImage>,
    pub shot: Option<SoundEffect>,
    pub hit: Option<SoundEffect>,
}

impl Assets {
    /// Everything at its default: no background, a placeholder duck, silence.
    pub fn fallback(config: &GameConfig) -> Self {
        let (w, h) = target_size(config);
        Assets {
            background: None,
            target_frames: vec![placeholder_frame(w, h)],
            shot: None,
            hit: None,
        }
    }

    /// Load whatever is present in `config.asset_dir`.
    pub fn load(config: &GameConfig) -> Self {
        let background = load_image(
            &config.asset_path(BACKGROUND_FILE),
            config.screen_width.max(1) as u32,
            config.screen_height.max(1) as u32,
        )
        .map_err(|e| warn!("Background image unavailable ({}), using solid fill", e))
        .ok();

        let (w, h) = target_size(config);
        let mut target_frames: Vec<RgbaImage> = (1..=config.frame_files)
            .filter_map(|n| {
                load_image(&config.asset_path(&frame_file(n)), w, h)
                    .map_err(|e| info!("Duck frame skipped ({})", e))
                    .ok()
            })
            .collect();
        if target_frames.is_empty() {
            warn!("No duck frames found, using placeholder rectangle");
            target_frames.push(placeholder_frame(w, h));
        }

        let shot = load_sound(&config.asset_path(SHOT_FILE))
            .map_err(|e| warn!("Shot sound unavailable ({})", e))
            .ok();
        let hit = load_sound(&config.asset_path(HIT_FILE))
            .map_err(|e| warn!("Hit sound unavailable ({})", e))
            .ok();

        Assets {
            background,
            target_frames,
            shot,
            hit,
        }
    }

    pub fn frame_count(&self) -> usize {
        self.target_frames.len()
    }

    /// Animation frame for `index`, wrapping around the sequence.
    pub fn frame(&self, index: usize) -> &RgbaImage {
        &self.target_frames[index % self.target_frames.len()]
    }
}

fn target_size(config: &GameConfig) -> (u32, u32) {
    (
        config.target_width.max(1) as u32,
        config.target_height.max(1) as u32,
    )
}

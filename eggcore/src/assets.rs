//! Locating and decoding the egg image and the Nunito fonts
//!
//! Assets are looked up on disk rather than embedded, so the binary builds
//! without them. A missing asset is reported as an error and the caller
//! picks a fallback.

use egui::ColorImage;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const EGG_IMAGE: &str = "img_easter_egg.png";
pub const FONT_EXTRA_BOLD: &str = "Nunito-ExtraBold.ttf";
pub const FONT_BLACK: &str = "Nunito-Black.ttf";

#[derive(Error, Debug)]
pub enum AssetError {
    #[error("asset not found: {0}")]
    NotFound(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("image decode error: {0}")]
    Decode(#[from] image::ImageError),
}

pub type Result<T> = std::result::Result<T, AssetError>;

/// Candidate locations for `name`, most specific first.
pub fn search_paths(name: &str, preferred_dir: Option<&Path>) -> Vec<PathBuf> {
    let mut paths = Vec::new();

    if let Some(dir) = preferred_dir {
        paths.push(dir.join(name));
    }

    // Relative to executable
    if let Ok(exe) = std::env::current_exe() {
        if let Some(dir) = exe.parent() {
            paths.push(dir.join("assets").join(name));
            paths.push(dir.join(name));
            // Cargo workspace: exe is in target/debug or target/release
            if let Some(grandparent) = dir.parent().and_then(|p| p.parent()) {
                paths.push(grandparent.join("assets").join(name));
            }
        }
    }

    paths.push(PathBuf::from("assets").join(name));
    paths.push(PathBuf::from("/usr/share/shakyegg").join(name));
    paths
}

/// First existing file among the search paths.
pub fn locate(name: &str, preferred_dir: Option<&Path>) -> Result<PathBuf> {
    search_paths(name, preferred_dir)
        .into_iter()
        .find(|p| p.is_file())
        .ok_or_else(|| AssetError::NotFound(name.to_string()))
}

pub fn read(name: &str, preferred_dir: Option<&Path>) -> Result<Vec<u8>> {
    let path = locate(name, preferred_dir)?;
    log::debug!("loading {} from {}", name, path.display());
    Ok(std::fs::read(path)?)
}

/// Decode PNG bytes into an egui image.
pub fn decode_image(bytes: &[u8]) -> Result<ColorImage> {
    let img = image::load_from_memory(bytes)?.to_rgba8();
    let size = [img.width() as usize, img.height() as usize];
    Ok(ColorImage::from_rgba_unmultiplied(size, img.as_raw()))
}

/// Load the egg graphic, from `explicit` if given, else from the search paths.
pub fn load_egg_image(explicit: Option<&Path>) -> Result<ColorImage> {
    let bytes = match explicit {
        Some(path) if path.is_file() => std::fs::read(path)?,
        Some(path) => return Err(AssetError::NotFound(path.display().to_string())),
        None => read(EGG_IMAGE, None)?,
    };
    decode_image(&bytes)
}

/// Raw font files for the two Nunito weights, each optional.
#[derive(Default)]
pub struct FontAssets {
    pub extra_bold: Option<Vec<u8>>,
    pub black: Option<Vec<u8>>,
}

impl FontAssets {
    pub fn load(font_dir: Option<&Path>) -> Self {
        let load = |name: &str| match read(name, font_dir) {
            Ok(bytes) => Some(bytes),
            Err(e) => {
                log::warn!("{}, falling back to the default font", e);
                None
            }
        };
        Self {
            extra_bold: load(FONT_EXTRA_BOLD),
            black: load(FONT_BLACK),
        }
    }
}

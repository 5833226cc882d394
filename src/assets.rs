use ab_glyph::FontVec;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AssetError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to decode image {path}: {source}")]
    Decode {
        path: PathBuf,
        source: image::ImageError,
    },
    #[error("invalid font data in {path}")]
    Font { path: PathBuf },
}

/// Identifies one of the fixed set of images loaded at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpriteId {
    Road,
    RoadTool,
    EraserTool,
}

/// A decoded RGBA image ready to blit into the frame buffer.
pub struct Sprite {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

/// Everything read from the asset directory. Loading happens once, before
/// the window opens; any failure aborts startup.
pub struct Assets {
    pub font: FontVec,
    road: Sprite,
    road_tool: Sprite,
    eraser_tool: Sprite,
}

impl Assets {
    pub fn load(dir: &Path) -> Result<Self, AssetError> {
        let font_path = dir.join("DejaVuSansMono.ttf");
        let font_data = std::fs::read(&font_path).map_err(|e| AssetError::Read {
            path: font_path.clone(),
            source: e,
        })?;
        let font = FontVec::try_from_vec(font_data)
            .map_err(|_| AssetError::Font { path: font_path })?;

        Ok(Self {
            font,
            road: load_sprite(&dir.join("road.png"))?,
            road_tool: load_sprite(&dir.join("road_tool.png"))?,
            eraser_tool: load_sprite(&dir.join("eraser_tool.png"))?,
        })
    }

    pub fn sprite(&self, id: SpriteId) -> &Sprite {
        match id {
            SpriteId::Road => &self.road,
            SpriteId::RoadTool => &self.road_tool,
            SpriteId::EraserTool => &self.eraser_tool,
        }
    }
}

fn load_sprite(path: &Path) -> Result<Sprite, AssetError> {
    let img = image::open(path)
        .map_err(|e| AssetError::Decode {
            path: path.to_path_buf(),
            source: e,
        })?
        .into_rgba8();

    let (width, height) = img.dimensions();
    Ok(Sprite {
        width,
        height,
        rgba: img.into_raw(),
    })
}

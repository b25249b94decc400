use std::path::Path;

use anyhow::{Context, Result};

/// Default location of the rock texture, relative to the working directory
pub const DEFAULT_TEXTURE_PATH: &str = "textures/textures.jpg";

/// Decoded RGBA8 image
#[derive(Debug, Clone, PartialEq)]
pub struct TextureData {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}

impl TextureData {
    /// Single opaque pixel
    pub fn solid(rgba: [u8; 4]) -> Self {
        Self {
            width: 1,
            height: 1,
            data: rgba.to_vec(),
        }
    }
}

/// Color and displacement maps for the rock
#[derive(Debug, Clone)]
pub struct RockTextures {
    pub color: TextureData,
    pub displacement: TextureData,
    /// False when placeholders stand in for a missing file
    pub loaded: bool,
}

pub fn load_texture(path: impl AsRef<Path>) -> Result<TextureData> {
    let path = path.as_ref();
    let image = image::open(path)
        .with_context(|| format!("Failed to load texture: {}", path.display()))?
        .to_rgba8();

    let (width, height) = image.dimensions();
    Ok(TextureData {
        width,
        height,
        data: image.into_raw(),
    })
}

/// Load the same image as both maps. A failure falls back to a white color
/// map and a black (flat) displacement map instead of aborting.
pub fn load_rock_textures(path: impl AsRef<Path>) -> RockTextures {
    let path = path.as_ref();
    let color = load_texture(path);
    let displacement = load_texture(path);

    match (color, displacement) {
        (Ok(color), Ok(displacement)) => {
            log::info!(
                "Loaded rock texture {} ({}x{})",
                path.display(),
                color.width,
                color.height
            );
            RockTextures {
                color,
                displacement,
                loaded: true,
            }
        }
        (Err(e), _) | (_, Err(e)) => {
            log::warn!("{:#}; rendering without texture", e);
            RockTextures {
                color: TextureData::solid([255, 255, 255, 255]),
                displacement: TextureData::solid([0, 0, 0, 255]),
                loaded: false,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("floating-rock-{}-{}", std::process::id(), name))
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let err = load_texture(temp_path("missing.jpg")).unwrap_err();
        assert!(err.to_string().contains("Failed to load texture"));
    }

    #[test]
    fn test_missing_file_falls_back_to_placeholders() {
        let textures = load_rock_textures(temp_path("also-missing.jpg"));
        assert!(!textures.loaded);
        assert_eq!(textures.color, TextureData::solid([255, 255, 255, 255]));
        assert_eq!(textures.displacement.data, vec![0, 0, 0, 255]);
    }

    #[test]
    fn test_loads_png_twice() {
        let path = temp_path("stone.png");
        let image = image::RgbaImage::from_fn(2, 2, |x, y| {
            image::Rgba([(x * 100) as u8, (y * 100) as u8, 50, 255])
        });
        image.save(&path).unwrap();

        let textures = load_rock_textures(&path);
        std::fs::remove_file(&path).ok();

        assert!(textures.loaded);
        assert_eq!(textures.color.width, 2);
        assert_eq!(textures.color.data.len(), 2 * 2 * 4);
        assert_eq!(textures.color, textures.displacement);
        assert_eq!(&textures.color.data[4..8], &[100, 0, 50, 255]);
    }
}

pub mod texture;

pub use texture::{load_rock_textures, load_texture, RockTextures, TextureData, DEFAULT_TEXTURE_PATH};

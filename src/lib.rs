pub mod camera;
pub mod cli;
pub mod core;
pub mod hud;
pub mod loaders;
pub mod math;
pub mod renderer;
pub mod scene;
pub mod state;
pub mod traits;
pub mod types;
pub mod window;

pub use scene::{Rock, RockScene};
pub use state::AppState;

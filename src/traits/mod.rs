pub mod frame_target;
pub mod render_target;

pub use frame_target::*;
pub use render_target::*;

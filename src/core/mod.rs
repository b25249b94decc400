pub mod clock;
pub mod displacement;
pub mod frame_driver;
pub mod input_adapter;
pub mod mesh;
pub mod orbit;
pub mod resize;
pub mod sphere;

pub use clock::{Clock, FpsCounter};
pub use displacement::displace_rock;
pub use frame_driver::{CancellationToken, FrameDriver, FrameStatus};
pub use input_adapter::PointerAdapter;
pub use mesh::Mesh;
pub use orbit::{DragMode, OrbitControls};
pub use resize::{drawing_buffer_size, handle_resize, Viewport, MAX_PIXEL_RATIO};
pub use sphere::SphereGeometry;

/// Output surface whose size follows the viewport
pub trait RenderTarget {
    /// Set the logical output size; the drawing buffer is this times the pixel ratio
    fn set_size(&mut self, width: u32, height: u32);

    /// Set the (already capped) pixel ratio
    fn set_pixel_ratio(&mut self, ratio: f64);

    /// Current logical output size
    fn size(&self) -> (u32, u32);

    fn pixel_ratio(&self) -> f64;
}

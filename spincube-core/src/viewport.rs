/// Size of the drawable area in pixels.
///
/// Both dimensions are kept at least 1 so the aspect ratio always stays finite,
/// even while the window is minimized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    width: u32,
    height: u32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width: width.max(1),
            height: height.max(1),
        }
    }

    /// Builds a viewport from the signed sizes reported by window events.
    pub fn from_window_size(width: i32, height: i32) -> Self {
        Self::new(width.max(0) as u32, height.max(0) as u32)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn aspect_ratio(&self) -> f32 {
        self.width as f32 / self.height as f32
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(640, 480)
    }
}

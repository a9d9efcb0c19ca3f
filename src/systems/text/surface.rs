/// One rasterization request: pre-wrapped lines at fixed pen positions.
#[derive(Clone, Debug)]
pub struct RenderJob<'a> {
    pub font: &'a str,
    pub lines: &'a [String],
    pub width: u32,
    pub height: u32,
    /// Pen origin of the first line (top-left, `textBaseline = "top"`).
    pub padding: f32,
    pub line_height: f32,
    pub letter_spacing: f32,
}

/// Alpha channel of a rendered bitmap, row-major, `width * height` bytes.
#[derive(Clone, Debug, PartialEq)]
pub struct AlphaBitmap {
    pub width: u32,
    pub height: u32,
    pub alpha: Vec<u8>,
}

impl AlphaBitmap {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            alpha: vec![0; width as usize * height as usize],
        }
    }

    #[inline]
    pub fn row(&self, y: u32) -> &[u8] {
        let w = self.width as usize;
        let start = y as usize * w;
        &self.alpha[start..start + w]
    }
}

/// Something that can measure and draw text into an offscreen alpha bitmap.
///
/// Both methods return `None` when no drawing context is available; the
/// sampler turns that into an empty, uncached result.
pub trait TextSurface {
    /// Advance width of `text` in `font`, including `letter_spacing` after
    /// every character.
    fn measure(&mut self, text: &str, font: &str, letter_spacing: f32) -> Option<f32>;

    fn render(&mut self, job: &RenderJob<'_>) -> Option<AlphaBitmap>;
}

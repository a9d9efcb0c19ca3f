//! Browser text surface backed by an `OffscreenCanvas` 2d context.

use wasm_bindgen::JsCast;
use web_sys::{OffscreenCanvas, OffscreenCanvasRenderingContext2d};

use super::surface::{AlphaBitmap, RenderJob, TextSurface};

pub struct CanvasTextSurface {
    canvas: Option<(OffscreenCanvas, OffscreenCanvasRenderingContext2d)>,
}

impl Default for CanvasTextSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl CanvasTextSurface {
    /// The canvas is created lazily on first use.
    pub fn new() -> Self {
        Self { canvas: None }
    }

    fn context(&mut self) -> Option<&(OffscreenCanvas, OffscreenCanvasRenderingContext2d)> {
        if self.canvas.is_none() {
            let canvas = OffscreenCanvas::new(1, 1).ok()?;
            let ctx = canvas
                .get_context("2d")
                .ok()??
                .dyn_into::<OffscreenCanvasRenderingContext2d>()
                .ok()?;
            self.canvas = Some((canvas, ctx));
        }
        self.canvas.as_ref()
    }

    fn text_width(ctx: &OffscreenCanvasRenderingContext2d, text: &str) -> Option<f32> {
        ctx.measure_text(text).ok().map(|m| m.width() as f32)
    }
}

impl TextSurface for CanvasTextSurface {
    fn measure(&mut self, text: &str, font: &str, letter_spacing: f32) -> Option<f32> {
        let (_, ctx) = self.context()?;
        ctx.set_font(font);
        let width = Self::text_width(ctx, text)?;
        Some(width + letter_spacing * text.chars().count() as f32)
    }

    fn render(&mut self, job: &RenderJob<'_>) -> Option<AlphaBitmap> {
        let (canvas, ctx) = self.context()?;
        // Resizing resets the context state, so styles are set afterwards.
        canvas.set_width(job.width);
        canvas.set_height(job.height);
        ctx.set_font(job.font);
        ctx.set_text_baseline("top");
        ctx.set_fill_style_str("#fff");
        ctx.clear_rect(0.0, 0.0, job.width as f64, job.height as f64);

        for (i, line) in job.lines.iter().enumerate() {
            let y = (job.padding + i as f32 * job.line_height) as f64;
            if job.letter_spacing == 0.0 {
                ctx.fill_text(line, job.padding as f64, y).ok()?;
                continue;
            }
            let mut pen_x = job.padding;
            let mut buf = [0u8; 4];
            for c in line.chars() {
                let glyph: &str = c.encode_utf8(&mut buf);
                ctx.fill_text(glyph, pen_x as f64, y).ok()?;
                pen_x += Self::text_width(ctx, glyph)? + job.letter_spacing;
            }
        }

        let image = ctx
            .get_image_data(0.0, 0.0, job.width as f64, job.height as f64)
            .ok()?;
        let rgba = image.data().0;
        let mut bitmap = AlphaBitmap::new(job.width, job.height);
        for (dst, px) in bitmap.alpha.iter_mut().zip(rgba.chunks_exact(4)) {
            *dst = px[3];
        }
        Some(bitmap)
    }
}

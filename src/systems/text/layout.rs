use super::surface::TextSurface;

/// Default line height as a multiple of the font size.
pub const LINE_HEIGHT_FACTOR: f32 = 1.2;
pub const DEFAULT_FONT_PX: f32 = 16.0;

#[derive(Clone, Debug, PartialEq)]
pub struct TextLayout {
    pub lines: Vec<String>,
    pub max_line_width: f32,
    pub line_height: f32,
}

/// Font size in px from a CSS font shorthand (`"600 48px Inter"`,
/// `"italic 12.5px/1.4 serif"`). Falls back to 16px.
pub fn parse_font_px(font: &str) -> f32 {
    font.split_whitespace()
        .filter_map(|token| token.split('/').next())
        .filter_map(|size| size.strip_suffix("px"))
        .filter_map(|num| num.parse::<f32>().ok())
        .find(|px| px.is_finite() && *px > 0.0)
        .unwrap_or(DEFAULT_FONT_PX)
}

/// Split `text` into lines. Without `max_width` the whole text is one line,
/// with `\n` drawn as a space. With it, paragraphs break on `\n` and each is
/// greedily wrapped at spaces; a single word wider than `max_width` keeps
/// its own line.
pub fn layout_text<S: TextSurface>(
    surface: &mut S,
    text: &str,
    font: &str,
    max_width: Option<f32>,
    line_height: Option<f32>,
    letter_spacing: f32,
) -> Option<TextLayout> {
    let line_height = line_height.unwrap_or(parse_font_px(font) * LINE_HEIGHT_FACTOR);

    let Some(limit) = max_width else {
        let line = text.replace('\n', " ");
        return Some(TextLayout {
            max_line_width: surface.measure(&line, font, letter_spacing)?,
            lines: vec![line],
            line_height,
        });
    };

    let mut lines = Vec::new();
    let mut max_line_width: f32 = 0.0;

    for paragraph in text.split('\n') {

        let mut current = String::new();
        let mut current_width = 0.0;
        for word in paragraph.split_whitespace() {
            let candidate = if current.is_empty() {
                word.to_string()
            } else {
                format!("{} {}", current, word)
            };
            let width = surface.measure(&candidate, font, letter_spacing)?;
            if width <= limit || current.is_empty() {
                current = candidate;
                current_width = width;
            } else {
                max_line_width = max_line_width.max(current_width);
                lines.push(std::mem::take(&mut current));
                current_width = surface.measure(word, font, letter_spacing)?;
                current = word.to_string();
            }
        }
        max_line_width = max_line_width.max(current_width);
        lines.push(current);
    }

    Some(TextLayout {
        lines,
        max_line_width,
        line_height,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::systems::text::surface::{AlphaBitmap, RenderJob};

    /// Every character is 10px wide.
    struct Monospace;

    impl TextSurface for Monospace {
        fn measure(&mut self, text: &str, _font: &str, letter_spacing: f32) -> Option<f32> {
            Some(text.chars().count() as f32 * (10.0 + letter_spacing))
        }

        fn render(&mut self, _job: &RenderJob<'_>) -> Option<AlphaBitmap> {
            None
        }
    }

    #[test]
    fn font_px_parses_common_shorthands() {
        assert_eq!(parse_font_px("600 48px Inter"), 48.0);
        assert_eq!(parse_font_px("italic 12.5px/1.4 serif"), 12.5);
        assert_eq!(parse_font_px("bold Inter"), 16.0);
        assert_eq!(parse_font_px("0px mono"), 16.0);
    }

    #[test]
    fn no_max_width_renders_one_line() {
        let layout = layout_text(&mut Monospace, "one two\nthree", "10px x", None, None, 0.0).unwrap();
        assert_eq!(layout.lines, vec!["one two three"]);
        assert_eq!(layout.max_line_width, 130.0);
        assert!((layout.line_height - 12.0).abs() < 1e-4);
    }

    #[test]
    fn newlines_break_paragraphs_when_wrapping() {
        let layout = layout_text(&mut Monospace, "one two\nthree", "10px x", Some(500.0), None, 0.0).unwrap();
        assert_eq!(layout.lines, vec!["one two", "three"]);
        assert_eq!(layout.max_line_width, 70.0);
    }

    #[test]
    fn greedy_wrap_fills_lines_up_to_the_limit() {
        let layout =
            layout_text(&mut Monospace, "aa bb cc dddddd", "10px x", Some(50.0), Some(7.0), 0.0).unwrap();
        assert_eq!(layout.lines, vec!["aa bb", "cc", "dddddd"]);
        assert_eq!(layout.max_line_width, 60.0);
        assert_eq!(layout.line_height, 7.0);
    }

    #[test]
    fn letter_spacing_counts_toward_the_limit() {
        let layout = layout_text(&mut Monospace, "ab cd", "10px x", Some(50.0), None, 2.0).unwrap();
        assert_eq!(layout.lines, vec!["ab", "cd"]);
        assert_eq!(layout.max_line_width, 24.0);
    }
}

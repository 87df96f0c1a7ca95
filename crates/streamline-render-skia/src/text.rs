// File: crates/streamline-render-skia/src/text.rs
// Summary: Label shaping and measuring with Skia textlayout, keyed by the chart's font family.

use skia_safe as skia;
use skia::textlayout::{FontCollection, Paragraph, ParagraphBuilder, ParagraphStyle, TextAlign, TextStyle};

const MONO_FAMILIES: &[&str] = &["Roboto Mono", "Consolas", "Menlo", "DejaVu Sans Mono", "monospace"];
const SANS_FAMILIES: &[&str] = &["Segoe UI", "Arial", "Helvetica", "Roboto", "DejaVu Sans", "sans-serif"];

pub struct TextShaper {
    fonts: FontCollection,
}

impl Default for TextShaper {
    fn default() -> Self {
        Self::new()
    }
}

impl TextShaper {
    pub fn new() -> Self {
        let mut fc = FontCollection::new();
        fc.set_default_font_manager(skia::FontMgr::default(), None);
        Self { fonts: fc }
    }

    /// Requested family first, then a mono or sans fallback list.
    fn families(family: &str) -> Vec<&str> {
        let generic = family.trim();
        let fallback = if generic.eq_ignore_ascii_case("sans-serif") { SANS_FAMILIES } else { MONO_FAMILIES };
        let mut out = Vec::with_capacity(fallback.len() + 1);
        if !generic.is_empty() && !fallback.iter().any(|f| f.eq_ignore_ascii_case(generic)) {
            out.push(generic);
        }
        out.extend_from_slice(fallback);
        out
    }

    fn layout(&self, text: &str, size: f32, family: &str, color: skia::Color) -> Paragraph {
        let mut pstyle = ParagraphStyle::new();
        pstyle.set_text_align(TextAlign::Left);
        let mut builder = ParagraphBuilder::new(&pstyle, &self.fonts);
        let mut style = TextStyle::new();
        style.set_font_size(size.max(1.0));
        style.set_color(color);
        style.set_font_families(Self::families(family).as_slice());
        builder.push_style(&style);
        builder.add_text(text);
        let mut paragraph = builder.build();
        paragraph.layout(10_000.0);
        paragraph
    }

    pub fn measure_width(&self, text: &str, size: f32, family: &str) -> f32 {
        if text.is_empty() {
            return 0.0;
        }
        self.layout(text, size, family, skia::Color::TRANSPARENT).longest_line()
    }

    /// Draw `text` with its baseline at `y`.
    pub fn draw_left(&self, canvas: &skia::Canvas, text: &str, x: f32, y: f32, size: f32, family: &str, color: skia::Color) {
        let p = self.layout(text, size, family, color);
        // Paragraphs paint from their top-left corner.
        let ascent = p.alphabetic_baseline();
        p.paint(canvas, (x, y - ascent));
    }
}

// File: crates/streamline-core/src/theme.rs
// Summary: Colour presets for grid, labels, tooltip line and a default series palette.

use crate::color::Color;
use crate::options::ChartOptions;

#[derive(Clone, Copy, Debug)]
pub struct Theme {
    pub name: &'static str,
    pub background: Color,
    pub grid: Color,
    pub label: Color,
    pub tooltip_line: Color,
    /// Suggested stroke colours for consecutive series.
    pub palette: [Color; 4],
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            name: "dark",
            background: Color::rgb(0, 0, 0),
            grid: Color::rgb(0x77, 0x77, 0x77),
            label: Color::rgb(255, 255, 255),
            tooltip_line: Color::rgb(0xbb, 0xbb, 0xbb),
            palette: [
                Color::rgb(255, 0, 0),
                Color::rgb(0, 255, 0),
                Color::rgb(0, 0, 255),
                Color::rgb(255, 255, 0),
            ],
        }
    }

    pub fn light() -> Self {
        Self {
            name: "light",
            background: Color::rgb(250, 250, 252),
            grid: Color::rgb(230, 230, 235),
            label: Color::rgb(20, 20, 30),
            tooltip_line: Color::rgb(100, 100, 110),
            palette: [
                Color::rgb(32, 120, 200),
                Color::rgb(20, 160, 90),
                Color::rgb(200, 60, 60),
                Color::rgb(200, 140, 20),
            ],
        }
    }

    pub fn solarized_dark() -> Self {
        Self {
            name: "solarized-dark",
            background: Color::rgb(0x00, 0x2b, 0x36), // base03
            grid: Color::rgb(0x07, 0x36, 0x42),       // base02
            label: Color::rgb(0xee, 0xe8, 0xd5),      // base2
            tooltip_line: Color::rgb(0x93, 0xa1, 0xa1),
            palette: [
                Color::rgb(0x26, 0x8b, 0xd2), // blue
                Color::rgb(0x2a, 0xa1, 0x98), // cyan
                Color::rgb(0xdc, 0x32, 0x2f), // red
                Color::rgb(0xb5, 0x89, 0x00), // yellow
            ],
        }
    }

    pub fn solarized_light() -> Self {
        Self {
            name: "solarized-light",
            background: Color::rgb(0xfd, 0xf6, 0xe3), // base3
            grid: Color::rgb(0xee, 0xe8, 0xd5),       // base2
            label: Color::rgb(0x00, 0x2b, 0x36),      // base03
            tooltip_line: Color::rgb(0x65, 0x7b, 0x83),
            palette: [
                Color::rgb(0x26, 0x8b, 0xd2),
                Color::rgb(0x2a, 0xa1, 0x98),
                Color::rgb(0xdc, 0x32, 0x2f),
                Color::rgb(0xcb, 0x4b, 0x16),
            ],
        }
    }

    pub fn high_contrast_dark() -> Self {
        Self {
            name: "high-contrast-dark",
            background: Color::rgb(0x00, 0x00, 0x00),
            grid: Color::rgb(0x44, 0x44, 0x44),
            label: Color::rgb(0xff, 0xff, 0xff),
            tooltip_line: Color::rgb(0xff, 0xff, 0x00),
            palette: [
                Color::rgb(0x00, 0xff, 0xff),
                Color::rgb(0x00, 0xff, 0x00),
                Color::rgb(0xff, 0x00, 0xff),
                Color::rgb(0xff, 0xff, 0x00),
            ],
        }
    }

    /// Overwrite the colour fields of `opts` with this theme.
    pub fn apply(&self, opts: &mut ChartOptions) {
        opts.grid.fill_style = self.background;
        opts.grid.stroke_style = self.grid;
        opts.labels.fill_style = self.label;
        opts.tooltip_line.stroke_style = self.tooltip_line;
    }

    /// Palette colour for the `index`-th series, wrapping around.
    pub fn series_color(&self, index: usize) -> Color {
        self.palette[index % self.palette.len()]
    }
}

/// Return a list of built-in theme presets.
pub fn presets() -> Vec<Theme> {
    vec![
        Theme::dark(),
        Theme::light(),
        Theme::solarized_dark(),
        Theme::solarized_light(),
        Theme::high_contrast_dark(),
    ]
}

/// Find a theme by its `name`, falling back to dark.
pub fn find(name: &str) -> Theme {
    for t in presets() { if t.name.eq_ignore_ascii_case(name) { return t; } }
    Theme::dark()
}

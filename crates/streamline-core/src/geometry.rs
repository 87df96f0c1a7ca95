// File: crates/streamline-core/src/geometry.rs
// Summary: Lightweight geometry helpers for pixel math.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
    pub const fn is_empty(&self) -> bool { self.width == 0 || self.height == 0 }
    pub fn width_f(&self) -> f64 { self.width as f64 }
    pub fn height_f(&self) -> f64 { self.height as f64 }
    pub fn bounds(&self) -> Rect { Rect::from_ltwh(0.0, 0.0, self.width_f(), self.height_f()) }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn from_ltwh(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self { left, top, width, height }
    }
    pub fn right(&self) -> f64 { self.left + self.width }
    pub fn bottom(&self) -> f64 { self.top + self.height }
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.left && x < self.right() && y >= self.top && y < self.bottom()
    }
}

/// Round half-up to a whole pixel (`floor(v + 0.5)`), so `-2.5` becomes `-2`.
#[inline]
pub fn round_px(v: f64) -> f64 {
    (v + 0.5).floor()
}

#[inline]
pub fn clamp<T: PartialOrd>(v: T, lo: T, hi: T) -> T {
    if v < lo { lo } else if v > hi { hi } else { v }
}

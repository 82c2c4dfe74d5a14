pub use kurbo::{Affine, Vec2};

/// 1-based line/column position inside configuration text.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct SourcePos {
    pub line: u32,
    pub column: u32,
}

impl SourcePos {
    pub const START: Self = Self { line: 1, column: 1 };

    pub fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }
}

impl std::fmt::Display for SourcePos {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Declared logical size of the whole multi-display surface.
///
/// Units are arbitrary (pixels, monitors, ...): element positions and sizes
/// are divided by these values, so only proportions matter.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ScreenSize {
    pub width: f64,
    pub height: f64,
}

impl ScreenSize {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Both dimensions are finite and non-zero, so normalization is defined.
    pub fn is_usable(self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width != 0.0 && self.height != 0.0
    }

    pub fn normalize(self, raw: Vec2) -> Vec2 {
        Vec2::new(raw.x / self.width, raw.y / self.height)
    }

    pub fn as_vec2(self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;

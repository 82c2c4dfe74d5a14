use crate::foundation::{
    core::{ScreenSize, SourcePos, Vec2},
    error::{SlideshowError, SlideshowResult},
};

/// Shortest loop a show may have, even with no elements.
pub const MIN_TOTAL_DURATION: f64 = 1.0;

/// Which directive produced an element.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementKind {
    /// `image "<file>" { ... }` block, or the picture half of a numbered pair.
    Image,
    /// Auto-sequenced `slide "<file>" <seconds>`.
    Slide,
    /// Caption half of a numbered `image` pair.
    Caption,
}

/// One positioned, timed, fading visual unit of the show.
///
/// `position` and `size` are already normalized by the declared screen size,
/// so `(0, 0)` is the bottom-left corner and `(1, 1)` the top-right corner of
/// the whole multi-display surface. All times are seconds.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SlideElement {
    pub kind: ElementKind,
    /// Directory prefix concatenated with the declared file name.
    pub path: String,
    pub position: Vec2,
    pub size: Vec2,
    pub start: f64,
    pub duration: f64,
    pub fade_in: f64,
    pub fade_out: f64,
    /// Where the element was declared.
    pub declared_at: SourcePos,
}

impl SlideElement {
    /// Element with the block-form defaults: 5s long, 1s fades, at the origin.
    pub fn new(kind: ElementKind, path: impl Into<String>) -> Self {
        Self {
            kind,
            path: path.into(),
            position: Vec2::ZERO,
            size: Vec2::ZERO,
            start: 0.0,
            duration: 5.0,
            fade_in: 1.0,
            fade_out: 1.0,
            declared_at: SourcePos::START,
        }
    }

    /// End of the visible window (exclusive).
    pub fn end(&self) -> f64 {
        self.start + self.duration
    }

    /// Non-empty path, finite non-negative start and fades, positive duration.
    pub fn validate(&self) -> SlideshowResult<()> {
        if self.path.trim().is_empty() {
            return Err(SlideshowError::validation("element path must be non-empty"));
        }
        for (name, value) in [
            ("start", self.start),
            ("fade_in", self.fade_in),
            ("fade_out", self.fade_out),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(SlideshowError::validation(format!(
                    "element '{}' {name} must be finite and >= 0",
                    self.path
                )));
            }
        }
        if !self.duration.is_finite() || self.duration <= 0.0 {
            return Err(SlideshowError::validation(format!(
                "element '{}' duration must be finite and > 0",
                self.path
            )));
        }
        Ok(())
    }
}

/// A parsed show: the declared screen plus elements in paint order.
///
/// Elements are stored front-inserted: the element declared last in the file
/// is first here, and the first element is the topmost one.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Slideshow {
    pub screen: ScreenSize,
    elements: Vec<SlideElement>,
    total_duration: f64,
}

impl Slideshow {
    /// Builds a show from elements given in declaration order.
    pub fn from_declared(screen: ScreenSize, mut declared: Vec<SlideElement>) -> Self {
        declared.reverse();
        let total_duration = total_duration_of(&declared);
        Self {
            screen,
            elements: declared,
            total_duration,
        }
    }

    /// Elements, topmost first.
    pub fn elements(&self) -> &[SlideElement] {
        &self.elements
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Length of one loop of the show, in seconds.
    pub fn total_duration(&self) -> f64 {
        self.total_duration
    }
}

/// `max(start + duration)` over all elements, never below [`MIN_TOTAL_DURATION`].
pub fn total_duration_of(elements: &[SlideElement]) -> f64 {
    elements
        .iter()
        .map(SlideElement::end)
        .fold(MIN_TOTAL_DURATION, f64::max)
}

#[cfg(test)]
#[path = "../../tests/unit/composition/model.rs"]
mod tests;

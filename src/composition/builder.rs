use crate::{
    composition::model::{ElementKind, SlideElement, Slideshow},
    foundation::core::{ScreenSize, Vec2},
    foundation::error::{SlideshowError, SlideshowResult},
};

/// Builds a [`Slideshow`] from code instead of configuration text.
///
/// Positions and sizes are given in screen units and normalized on
/// [`build`](Self::build), exactly like parsed `image` blocks.
pub struct SlideshowBuilder {
    screen: ScreenSize,
    declared: Vec<SlideElement>,
}

impl SlideshowBuilder {
    pub fn new(screen: ScreenSize) -> Self {
        Self {
            screen,
            declared: Vec::new(),
        }
    }

    pub fn element(mut self, element: ElementBuilder) -> Self {
        self.declared.push(element.raw);
        self
    }

    pub fn build(self) -> SlideshowResult<Slideshow> {
        if !self.screen.is_usable() {
            return Err(SlideshowError::validation(
                "screen width/height must be finite and non-zero",
            ));
        }

        let mut normalized = Vec::with_capacity(self.declared.len());
        for raw in self.declared {
            raw.validate()?;
            normalized.push(SlideElement {
                position: self.screen.normalize(raw.position),
                size: self.screen.normalize(raw.size),
                ..raw
            });
        }
        Ok(Slideshow::from_declared(self.screen, normalized))
    }
}

/// One element in screen units, before normalization.
pub struct ElementBuilder {
    raw: SlideElement,
}

impl ElementBuilder {
    pub fn image(path: impl Into<String>) -> Self {
        Self {
            raw: SlideElement::new(ElementKind::Image, path),
        }
    }

    pub fn kind(mut self, kind: ElementKind) -> Self {
        self.raw.kind = kind;
        self
    }

    pub fn position(mut self, x: f64, y: f64) -> Self {
        self.raw.position = Vec2::new(x, y);
        self
    }

    pub fn size(mut self, w: f64, h: f64) -> Self {
        self.raw.size = Vec2::new(w, h);
        self
    }

    pub fn start(mut self, secs: f64) -> Self {
        self.raw.start = secs;
        self
    }

    pub fn duration(mut self, secs: f64) -> Self {
        self.raw.duration = secs;
        self
    }

    pub fn fades(mut self, fade_in: f64, fade_out: f64) -> Self {
        self.raw.fade_in = fade_in;
        self.raw.fade_out = fade_out;
        self
    }
}

#[cfg(test)]
#[path = "../../tests/unit/composition/builder.rs"]
mod tests;

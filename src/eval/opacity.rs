use crate::{
    composition::model::SlideElement,
    foundation::core::{Affine, Vec2},
};

/// Opacity of `element` at `frame_time` seconds into the loop.
///
/// Decision order matters when the fade windows overlap: the fade-in ramp is
/// consulted first, the fade-out ramp only once fade-in no longer applies.
pub fn element_opacity(element: &SlideElement, frame_time: f64) -> f64 {
    if frame_time < element.start {
        return 0.0;
    }

    let elapsed = frame_time - element.start;
    if elapsed >= element.duration {
        0.0
    } else if element.fade_in > 0.0 && elapsed < element.fade_in {
        elapsed / element.fade_in
    } else if element.fade_out > 0.0 && element.duration - elapsed < element.fade_out {
        (element.duration - elapsed) / element.fade_out
    } else {
        1.0
    }
}

/// Element rectangle in symmetric `[-1, 1]` device space.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct DeviceRect {
    /// Bottom-left corner.
    pub origin: Vec2,
    pub extent: Vec2,
}

impl DeviceRect {
    /// Maps a normalized `[0, 1]` rectangle into device space.
    pub fn from_normalized(position: Vec2, size: Vec2) -> Self {
        Self {
            origin: Vec2::new(position.x * 2.0 - 1.0, position.y * 2.0 - 1.0),
            extent: size * 2.0,
        }
    }

    /// Inverse of [`from_normalized`](Self::from_normalized): `(position, size)`.
    pub fn to_normalized(self) -> (Vec2, Vec2) {
        (
            Vec2::new((self.origin.x + 1.0) / 2.0, (self.origin.y + 1.0) / 2.0),
            self.extent / 2.0,
        )
    }

    /// Model matrix placing a unit quad `[0, 1]²` onto this rectangle.
    pub fn model_transform(self) -> Affine {
        Affine::translate(self.origin) * Affine::scale_non_uniform(self.extent.x, self.extent.y)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/eval/opacity.rs"]
mod tests;

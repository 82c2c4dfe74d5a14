use crate::{
    composition::model::{ElementKind, Slideshow},
    eval::opacity::{DeviceRect, element_opacity},
    foundation::core::{Affine, Vec2},
};

/// Everything visible at one instant of the show.
#[derive(Clone, Debug, serde::Serialize)]
pub struct EvaluatedFrame {
    pub frame_time: f64,
    /// Visible elements in list order: topmost first.
    pub draws: Vec<DrawInstruction>,
}

impl EvaluatedFrame {
    /// Draws bottom-most first, the order a painter submits them in.
    pub fn paint_order(&self) -> impl Iterator<Item = &DrawInstruction> {
        self.draws.iter().rev()
    }
}

/// One visible element, handed to the renderer.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct DrawInstruction {
    /// Index into [`Slideshow::elements`]; `0` is the topmost layer.
    pub layer: usize,
    pub kind: ElementKind,
    pub path: String,
    /// Normalized `[0, 1]` placement as parsed.
    pub position: Vec2,
    pub size: Vec2,
    /// The same placement in `[-1, 1]` device space.
    pub device: DeviceRect,
    pub transform: Affine,
    /// In `(0, 1]`.
    pub opacity: f64,
}

/// Stateless evaluator from show timeline to visible elements.
pub struct Evaluator;

impl Evaluator {
    #[tracing::instrument(skip(show))]
    pub fn eval_frame(show: &Slideshow, frame_time: f64) -> EvaluatedFrame {
        let mut draws = Vec::new();
        for (layer, element) in show.elements().iter().enumerate() {
            let opacity = element_opacity(element, frame_time);
            if opacity <= 0.0 {
                continue;
            }

            let device = DeviceRect::from_normalized(element.position, element.size);
            draws.push(DrawInstruction {
                layer,
                kind: element.kind,
                path: element.path.clone(),
                position: element.position,
                size: element.size,
                device,
                transform: device.model_transform(),
                opacity,
            });
        }

        EvaluatedFrame { frame_time, draws }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/eval/evaluator.rs"]
mod tests;

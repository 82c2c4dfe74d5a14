use std::collections::BTreeMap;

use crate::{
    composition::model::SlideElement,
    eval::evaluator::DrawInstruction,
    foundation::error::{SlideshowError, SlideshowResult},
};

/// Opaque handle to a renderer-owned visual resource (texture + quad).
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct ElementHandle(pub u64);

/// Renderer collaborator contract.
///
/// Ordering contract: within one frame, `draw_element` is called in paint
/// order (bottom-most first), between `begin_frame` and `end_frame`.
pub trait Renderer {
    /// Allocates the visual resource for one element.
    fn load_element(&mut self, element: &SlideElement) -> SlideshowResult<ElementHandle>;

    fn begin_frame(&mut self, _frame_time: f64) -> SlideshowResult<()> {
        Ok(())
    }

    /// Takes ownership of one visible element's draw.
    fn draw_element(
        &mut self,
        handle: ElementHandle,
        draw: DrawInstruction,
    ) -> SlideshowResult<()>;

    fn end_frame(&mut self) -> SlideshowResult<()> {
        Ok(())
    }

    fn release_element(&mut self, handle: ElementHandle);
}

impl<R: Renderer + ?Sized> Renderer for &mut R {
    fn load_element(&mut self, element: &SlideElement) -> SlideshowResult<ElementHandle> {
        (**self).load_element(element)
    }

    fn begin_frame(&mut self, frame_time: f64) -> SlideshowResult<()> {
        (**self).begin_frame(frame_time)
    }

    fn draw_element(
        &mut self,
        handle: ElementHandle,
        draw: DrawInstruction,
    ) -> SlideshowResult<()> {
        (**self).draw_element(handle, draw)
    }

    fn end_frame(&mut self) -> SlideshowResult<()> {
        (**self).end_frame()
    }

    fn release_element(&mut self, handle: ElementHandle) {
        (**self).release_element(handle);
    }
}

/// Renderer without a display: records what would have been drawn.
#[derive(Debug, Default)]
pub struct HeadlessRenderer {
    verify_images: bool,
    next_handle: u64,
    live: BTreeMap<ElementHandle, String>,
    in_frame: bool,
    /// Draws of the most recent frame, in submission order.
    pub last_frame: Vec<(ElementHandle, DrawInstruction)>,
    pub frames_rendered: u64,
    pub draws_submitted: u64,
}

impl HeadlessRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Also decode each image header on load, failing on unreadable files.
    pub fn verifying_images() -> Self {
        Self {
            verify_images: true,
            ..Self::default()
        }
    }

    pub fn live_handles(&self) -> usize {
        self.live.len()
    }

    pub fn path_of(&self, handle: ElementHandle) -> Option<&str> {
        self.live.get(&handle).map(String::as_str)
    }
}

impl Renderer for HeadlessRenderer {
    fn load_element(&mut self, element: &SlideElement) -> SlideshowResult<ElementHandle> {
        if self.verify_images {
            let (w, h) = image::image_dimensions(&element.path).map_err(|e| {
                SlideshowError::render(format!("load image '{}': {e}", element.path))
            })?;
            tracing::debug!(path = %element.path, width = w, height = h, "image header ok");
        }

        let handle = ElementHandle(self.next_handle);
        self.next_handle += 1;
        self.live.insert(handle, element.path.clone());
        Ok(handle)
    }

    fn begin_frame(&mut self, _frame_time: f64) -> SlideshowResult<()> {
        if self.in_frame {
            return Err(SlideshowError::render("begin_frame called twice"));
        }
        self.in_frame = true;
        self.last_frame.clear();
        Ok(())
    }

    fn draw_element(
        &mut self,
        handle: ElementHandle,
        draw: DrawInstruction,
    ) -> SlideshowResult<()> {
        if !self.in_frame {
            return Err(SlideshowError::render("draw_element outside a frame"));
        }
        if !self.live.contains_key(&handle) {
            return Err(SlideshowError::render(format!(
                "draw with released or unknown handle {}",
                handle.0
            )));
        }
        tracing::trace!(
            path = %draw.path,
            layer = draw.layer,
            opacity = draw.opacity,
            "draw"
        );
        self.draws_submitted += 1;
        self.last_frame.push((handle, draw));
        Ok(())
    }

    fn end_frame(&mut self) -> SlideshowResult<()> {
        if !std::mem::take(&mut self.in_frame) {
            return Err(SlideshowError::render("end_frame without begin_frame"));
        }
        self.frames_rendered += 1;
        Ok(())
    }

    fn release_element(&mut self, handle: ElementHandle) {
        if let Some(path) = self.live.remove(&handle) {
            tracing::debug!(%path, "released element");
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/backend.rs"]
mod tests;

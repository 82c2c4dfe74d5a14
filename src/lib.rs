//! Timeline engine for image slideshows spread over several displays.
//!
//! A show is described in a small text format (see [`parse_str`]). Parsing
//! yields a [`Slideshow`]: the declared screen size plus timed, fading
//! elements in paint order. Each display process then owns a
//! [`SlideshowSession`] that, once per frame, syncs its loop clock through a
//! [`SharedClock`] and hands every visible element to a [`Renderer`].
//!
//! # Pipeline overview
//!
//! 1. **Parse**: `text -> Slideshow` (fails with a positioned [`ParseError`])
//! 2. **Tick**: shared clock -> loop-relative frame time ([`TimelineState`])
//! 3. **Evaluate**: `Slideshow + frame time -> EvaluatedFrame` (opacity per element)
//! 4. **Draw**: visible elements, bottom-most first, through the [`Renderer`]
#![forbid(unsafe_code)]

mod audio;
mod composition;
mod config;
mod eval;
mod foundation;
mod render;
mod session;
mod sync;

pub use audio::cue::{LoggedCue, LoopCue, NoAudio};
pub use composition::builder::{ElementBuilder, SlideshowBuilder};
pub use composition::model::{
    ElementKind, MIN_TOTAL_DURATION, SlideElement, Slideshow, total_duration_of,
};
pub use config::cursor::{AssignmentTerminator, Cursor};
pub use config::error::{ParseError, ParseResult};
pub use config::parser::{ParseOptions, parse_file, parse_str, parse_str_with};
pub use eval::evaluator::{DrawInstruction, EvaluatedFrame, Evaluator};
pub use eval::opacity::{DeviceRect, element_opacity};
pub use eval::timeline::{Phase, Tick, TimelineState, wrap_frame_time};
pub use foundation::core::{Affine, ScreenSize, SourcePos, Vec2};
pub use foundation::error::{SlideshowError, SlideshowResult};
pub use render::backend::{ElementHandle, HeadlessRenderer, Renderer};
pub use session::slideshow_session::{FrameReport, SlideshowSession};
pub use sync::clock::{
    FRAME_TIME_KEY, LocalClock, ManualClock, STARTED_KEY, SharedClock, SharedStore, exchange_f64,
};

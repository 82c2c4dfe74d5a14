use crate::{
    audio::cue::{LoopCue, NoAudio},
    composition::model::Slideshow,
    eval::evaluator::Evaluator,
    eval::timeline::{Phase, Tick, TimelineState},
    foundation::error::SlideshowResult,
    render::backend::{ElementHandle, Renderer},
    sync::clock::SharedClock,
};

/// What one call to [`SlideshowSession::tick`] did.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct FrameReport {
    pub tick: Tick,
    pub drawn: usize,
    /// The loop-start cue fired on this tick.
    pub cue_fired: bool,
}

/// One display's slideshow: the parsed show, its renderer resources, the
/// shared clock and the loop state. Created after parsing succeeds, torn
/// down (releasing every element) when dropped.
pub struct SlideshowSession<R: Renderer, C: SharedClock> {
    show: Slideshow,
    handles: Vec<ElementHandle>,
    timeline: TimelineState,
    renderer: R,
    clock: C,
    cue: Box<dyn LoopCue>,
}

impl<R: Renderer, C: SharedClock> SlideshowSession<R, C> {
    /// Loads every element into `renderer`. On failure, elements loaded so
    /// far are released again.
    pub fn new(show: Slideshow, mut renderer: R, clock: C) -> SlideshowResult<Self> {
        let mut handles = Vec::with_capacity(show.len());
        for element in show.elements() {
            match renderer.load_element(element) {
                Ok(handle) => handles.push(handle),
                Err(e) => {
                    for handle in handles {
                        renderer.release_element(handle);
                    }
                    return Err(e);
                }
            }
        }

        let timeline = TimelineState::new(show.total_duration());
        Ok(Self {
            show,
            handles,
            timeline,
            renderer,
            clock,
            cue: Box::new(NoAudio),
        })
    }

    pub fn with_cue(mut self, cue: impl LoopCue + 'static) -> Self {
        self.cue = Box::new(cue);
        self
    }

    pub fn show(&self) -> &Slideshow {
        &self.show
    }

    pub fn phase(&self) -> Phase {
        self.timeline.phase()
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    pub fn clock_mut(&mut self) -> &mut C {
        &mut self.clock
    }

    /// The "begin" input (e.g. a key press). Only the time authority acts on it.
    pub fn begin(&mut self) {
        self.timeline.begin();
    }

    /// Runs one frame: sync the clock, fire the loop cue if the loop just
    /// restarted, then hand every visible element to the renderer.
    pub fn tick(&mut self) -> SlideshowResult<FrameReport> {
        let tick = self.timeline.advance(&mut self.clock);

        let cue_fired = tick.loop_restarted && self.clock.is_time_authority();
        if cue_fired {
            self.cue.play_loop_start_sound();
        }

        if tick.phase == Phase::NotStarted {
            return Ok(FrameReport {
                tick,
                drawn: 0,
                cue_fired,
            });
        }

        let frame = Evaluator::eval_frame(&self.show, tick.frame_time);
        let drawn = frame.draws.len();

        self.renderer.begin_frame(tick.frame_time)?;
        // The frame is closed even when a draw fails, so the next tick can begin one.
        let submitted = frame.draws.into_iter().rev().try_for_each(|draw| {
            let handle = self.handles[draw.layer];
            self.renderer.draw_element(handle, draw)
        });
        let ended = self.renderer.end_frame();
        submitted?;
        ended?;

        Ok(FrameReport {
            tick,
            drawn,
            cue_fired,
        })
    }
}

impl<R: Renderer, C: SharedClock> Drop for SlideshowSession<R, C> {
    fn drop(&mut self) {
        for handle in self.handles.drain(..) {
            self.renderer.release_element(handle);
        }
        tracing::debug!("slideshow session closed");
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/slideshow_session.rs"]
mod tests;

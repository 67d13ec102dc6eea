//! Whole-frame scenarios driven through [`crate::Ui`]

mod capture;
mod layout;
mod scroll;
mod widgets;

use std::rc::Rc;

use crate::config::UiConfig;
use crate::foundation::logging;
use crate::foundation::math::{Mat4, Vec2};
use crate::input::{InputSnapshot, InputTracker};
use crate::pipeline::FrameReport;
use crate::render::RecordingSink;
use crate::space::HostView;
use crate::text::MonospaceMetrics;
use crate::Ui;

fn viewport() -> Vec2 {
    Vec2::new(800.0, 600.0)
}

/// A runtime plus a scripted host: fixed camera, tracked buttons, recording sink
pub(super) struct Harness {
    pub ui: Ui,
    pub sink: RecordingSink,
    view: HostView,
    tracker: InputTracker,
}

impl Harness {
    pub fn new() -> Self {
        logging::init_test();
        let ui = Ui::new(Rc::new(MonospaceMetrics::new(10.0, 16.0)), UiConfig::default()).unwrap();
        Self {
            ui,
            sink: RecordingSink::new(),
            view: HostView::new(viewport(), 70.0_f32.to_radians(), Mat4::identity()),
            tracker: InputTracker::new(),
        }
    }

    /// Screen pixel over a point of the root screen plane
    pub fn pixel(plane: Vec2) -> Vec2 {
        let half = viewport() * 0.5;
        Vec2::new(plane.x + half.x, half.y - plane.y)
    }

    /// Snapshot with the pointer over `plane` and the primary button held or not
    pub fn input(&mut self, plane: Vec2, left_down: bool) -> InputSnapshot {
        self.tracker.sample(Self::pixel(plane), [left_down, false, false])
    }

    /// Run one frame with a prepared snapshot
    pub fn frame_with(&mut self, input: &InputSnapshot) -> FrameReport {
        self.sink.clear();
        self.ui.advance_frame(&self.view, input, &mut self.sink)
    }

    /// Run one frame with the pointer at `plane`
    pub fn frame(&mut self, plane: Vec2, left_down: bool) -> FrameReport {
        let input = self.input(plane, left_down);
        self.frame_with(&input)
    }
}

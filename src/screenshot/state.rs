// Storefront - state.rs
// Copyright (C) 2025  Storefront contributors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

use std::cell::{Cell, Ref, RefCell};
use std::fmt;

use super::layout::{self, Measurement, Orientation, PaintOp, ScalingFilter, ScreenshotProps};
use super::paintable::{Paintable, PaintableEvent, PaintableMetrics};
use crate::observable::{Observable, Subject, Subscription};

#[derive(Copy, Debug, Clone, Eq, PartialEq)]
pub enum ScreenshotEvent {
    QueueDraw,
    QueueResize,
    /// The named property changed
    Notify(&'static str),
}

/// Everything a screenshot widget has to keep track of: the displayed
/// paintable, which is exclusively owned until it gets replaced, and the
/// display parameters.
pub struct ScreenshotState<P: Paintable> {
    paintable: RefCell<Option<P>>,
    paintable_subscription: RefCell<Option<Subscription>>,
    props: Cell<ScreenshotProps>,
    events: Subject<ScreenshotEvent>,
}

impl<P: Paintable> ScreenshotState<P> {
    pub fn new() -> Self {
        Self {
            paintable: RefCell::default(),
            paintable_subscription: RefCell::default(),
            props: Cell::default(),
            events: Subject::new(),
        }
    }

    pub fn props(&self) -> ScreenshotProps {
        self.props.get()
    }

    pub fn paintable(&self) -> Ref<'_, Option<P>> {
        self.paintable.borrow()
    }

    /// Replaces the displayed paintable. The previous one gets detached
    /// before it is released.
    pub fn set_paintable(&self, paintable: Option<P>) {
        self.detach();

        if let Some(paintable) = paintable.as_ref() {
            let events = self.events.downgrade();
            let subscription = paintable.subscribe(Box::new(move |event| match event {
                PaintableEvent::ContentsInvalidated => {
                    events.emit(&ScreenshotEvent::QueueDraw);
                }
                PaintableEvent::SizeInvalidated => {
                    events.emit(&ScreenshotEvent::QueueResize);
                }
                PaintableEvent::Loaded => {
                    events.emit(&ScreenshotEvent::QueueDraw);
                    events.emit(&ScreenshotEvent::QueueResize);
                }
            }));
            *self.paintable_subscription.borrow_mut() = Some(subscription);
        }
        *self.paintable.borrow_mut() = paintable;

        self.emit(ScreenshotEvent::QueueResize);
        self.emit(ScreenshotEvent::QueueDraw);
        self.emit(ScreenshotEvent::Notify("paintable"));
    }

    pub fn focus_x(&self) -> f64 {
        self.props.get().focus_x
    }

    pub fn set_focus_x(&self, focus_x: f64) {
        self.update(|props| props.focus_x = focus_x);
        self.emit(ScreenshotEvent::QueueDraw);
        self.emit(ScreenshotEvent::Notify("focus-x"));
    }

    pub fn focus_y(&self) -> f64 {
        self.props.get().focus_y
    }

    pub fn set_focus_y(&self, focus_y: f64) {
        self.update(|props| props.focus_y = focus_y);
        self.emit(ScreenshotEvent::QueueDraw);
        self.emit(ScreenshotEvent::Notify("focus-y"));
    }

    pub fn rounded_corners(&self) -> bool {
        self.props.get().rounded_corners
    }

    pub fn set_rounded_corners(&self, rounded_corners: bool) {
        if self.rounded_corners() == rounded_corners {
            return;
        }

        self.update(|props| props.rounded_corners = rounded_corners);
        self.emit(ScreenshotEvent::QueueDraw);
        self.emit(ScreenshotEvent::Notify("rounded-corners"));
    }

    pub fn top_half(&self) -> bool {
        self.props.get().top_half
    }

    pub fn set_top_half(&self, top_half: bool) {
        if self.top_half() == top_half {
            return;
        }

        self.update(|props| props.top_half = top_half);
        self.emit(ScreenshotEvent::QueueResize);
        self.emit(ScreenshotEvent::QueueDraw);
        self.emit(ScreenshotEvent::Notify("top-half"));
    }

    pub fn filter(&self) -> ScalingFilter {
        self.props.get().filter
    }

    pub fn set_filter(&self, filter: ScalingFilter) {
        if self.filter() == filter {
            return;
        }

        self.update(|props| props.filter = filter);
        self.emit(ScreenshotEvent::QueueDraw);
        self.emit(ScreenshotEvent::Notify("filter"));
    }

    pub fn request_mode(&self) -> layout::SizeRequestMode {
        layout::request_mode(&self.props.get())
    }

    pub fn measure(&self, orientation: Orientation, for_size: i32) -> Measurement {
        let metrics = self.metrics();
        layout::measure(&self.props.get(), metrics.as_ref(), orientation, for_size)
    }

    /// Returns the paint operations for the current state, or `None` if
    /// there is nothing to paint.
    pub fn paint_plan(&self, widget_width: i32, widget_height: i32) -> Option<Vec<PaintOp>> {
        let metrics = self.metrics()?;
        Some(layout::paint_plan(
            &self.props.get(),
            &metrics,
            widget_width,
            widget_height,
        ))
    }

    /// Detaches from and releases the paintable, without notifying.
    pub fn dispose(&self) {
        self.detach();
    }

    fn detach(&self) {
        if let Some(subscription) = self.paintable_subscription.borrow_mut().take() {
            subscription.unsubscribe();
        }
        let previous = self.paintable.borrow_mut().take();
        drop(previous);
    }

    fn metrics(&self) -> Option<PaintableMetrics> {
        self.paintable.borrow().as_ref().map(PaintableMetrics::of)
    }

    fn update(&self, f: impl FnOnce(&mut ScreenshotProps)) {
        let mut props = self.props.get();
        f(&mut props);
        self.props.set(props);
    }

    fn emit(&self, event: ScreenshotEvent) {
        self.events.emit(&event);
    }
}

impl<P: Paintable> Observable<ScreenshotEvent> for ScreenshotState<P> {
    fn subscribe(&self, observer: Box<dyn Fn(&ScreenshotEvent)>) -> Subscription {
        self.events.subscribe(observer)
    }
}

impl<P: Paintable> Default for ScreenshotState<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: Paintable> Drop for ScreenshotState<P> {
    fn drop(&mut self) {
        self.detach();
    }
}

impl<P: Paintable> fmt::Debug for ScreenshotState<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScreenshotState")
            .field("has_paintable", &self.paintable.borrow().is_some())
            .field("props", &self.props.get())
            .finish()
    }
}

// Storefront - screenshot.rs
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

use std::cell::RefCell;

use glib::{ParamSpec, ParamSpecBoolean, ParamSpecDouble, ParamSpecEnum, ParamSpecObject};
use gtk::prelude::*;
use gtk::subclass::prelude::*;
use gtk::{gdk, glib, graphene, gsk};
use once_cell::sync::Lazy;

use crate::observable::{Observable, Subscription};
use crate::screenshot::{
    Orientation, PaintOp, Rect, ScalingFilter, ScreenshotEvent, ScreenshotState, SizeRequestMode,
};
use crate::ui::PaintableHandle;

mod imp {
    use super::*;

    #[derive(Debug, Default)]
    pub struct SfScreenshot {
        pub state: ScreenshotState<PaintableHandle>,
        pub state_subscription: RefCell<Option<Subscription>>,
    }

    #[glib::object_subclass]
    impl ObjectSubclass for SfScreenshot {
        const NAME: &'static str = "SfScreenshot";
        type ParentType = gtk::Widget;
        type Type = super::SfScreenshot;
    }

    impl ObjectImpl for SfScreenshot {
        fn properties() -> &'static [ParamSpec] {
            static PROPERTIES: Lazy<Vec<ParamSpec>> = Lazy::new(|| {
                vec![
                    ParamSpecObject::builder::<gdk::Paintable>("paintable")
                        .explicit_notify()
                        .build(),
                    ParamSpecDouble::builder("focus-x")
                        .minimum(-1.0)
                        .maximum(f64::MAX)
                        .default_value(-1.0)
                        .explicit_notify()
                        .build(),
                    ParamSpecDouble::builder("focus-y")
                        .minimum(-1.0)
                        .maximum(f64::MAX)
                        .default_value(-1.0)
                        .explicit_notify()
                        .build(),
                    ParamSpecBoolean::builder("rounded-corners")
                        .default_value(true)
                        .explicit_notify()
                        .build(),
                    ParamSpecBoolean::builder("top-half")
                        .default_value(false)
                        .explicit_notify()
                        .build(),
                    ParamSpecEnum::builder_with_default("filter", gsk::ScalingFilter::Trilinear)
                        .explicit_notify()
                        .build(),
                ]
            });
            PROPERTIES.as_ref()
        }

        fn property(&self, _id: usize, pspec: &ParamSpec) -> glib::Value {
            let obj = self.obj();

            match pspec.name() {
                "paintable" => obj.paintable().to_value(),
                "focus-x" => obj.focus_x().to_value(),
                "focus-y" => obj.focus_y().to_value(),
                "rounded-corners" => obj.rounded_corners().to_value(),
                "top-half" => obj.top_half().to_value(),
                "filter" => obj.filter().to_value(),
                _ => unimplemented!(),
            }
        }

        fn set_property(&self, _id: usize, value: &glib::Value, pspec: &ParamSpec) {
            let obj = self.obj();

            match pspec.name() {
                "paintable" => {
                    let paintable: Option<gdk::Paintable> = value.get().unwrap();
                    obj.set_paintable(paintable.as_ref());
                }
                "focus-x" => obj.set_focus_x(value.get().unwrap()),
                "focus-y" => obj.set_focus_y(value.get().unwrap()),
                "rounded-corners" => obj.set_rounded_corners(value.get().unwrap()),
                "top-half" => obj.set_top_half(value.get().unwrap()),
                "filter" => obj.set_filter(value.get().unwrap()),
                _ => unimplemented!(),
            }
        }

        fn constructed(&self) {
            self.parent_constructed();

            let weak = self.obj().downgrade();
            let subscription = self.state.subscribe(Box::new(move |event| {
                let Some(obj) = weak.upgrade() else {
                    return;
                };

                match event {
                    ScreenshotEvent::QueueDraw => obj.queue_draw(),
                    ScreenshotEvent::QueueResize => obj.queue_resize(),
                    ScreenshotEvent::Notify(name) => obj.notify(name),
                }
            }));
            *self.state_subscription.borrow_mut() = Some(subscription);
        }

        fn dispose(&self) {
            self.state.dispose();
            self.state_subscription.borrow_mut().take();
        }
    }

    impl WidgetImpl for SfScreenshot {
        fn request_mode(&self) -> gtk::SizeRequestMode {
            match self.state.request_mode() {
                SizeRequestMode::ConstantSize => gtk::SizeRequestMode::ConstantSize,
                SizeRequestMode::HeightForWidth => gtk::SizeRequestMode::HeightForWidth,
            }
        }

        fn measure(&self, orientation: gtk::Orientation, for_size: i32) -> (i32, i32, i32, i32) {
            let orientation = match orientation {
                gtk::Orientation::Horizontal => Orientation::Horizontal,
                _ => Orientation::Vertical,
            };

            let m = self.state.measure(orientation, for_size);
            (m.minimum, m.natural, m.minimum_baseline, m.natural_baseline)
        }

        fn snapshot(&self, snapshot: &gtk::Snapshot) {
            let widget = self.obj();
            let Some(ops) = self.state.paint_plan(widget.width(), widget.height()) else {
                return;
            };

            let paintable = self.state.paintable();
            let Some(handle) = paintable.as_ref() else {
                return;
            };

            for op in ops {
                match op {
                    PaintOp::PushRoundedClip(rounded) => {
                        let radius = rounded.radius as f32;
                        let radius = graphene::Size::new(radius, radius);
                        let rect = gsk::RoundedRect::new(
                            graphene_rect(&rounded.bounds),
                            radius,
                            radius,
                            radius,
                            radius,
                        );
                        snapshot.push_rounded_clip(&rect);
                    }
                    PaintOp::PushClip(rect) => snapshot.push_clip(&graphene_rect(&rect)),
                    PaintOp::Translate { x, y } => {
                        snapshot.translate(&graphene::Point::new(x as f32, y as f32));
                    }
                    PaintOp::AppendScaledTexture {
                        filter,
                        width,
                        height,
                    } => {
                        // An async texture which isn't loaded yet draws nothing
                        if let Some(texture) = handle.texture() {
                            snapshot.append_scaled_texture(
                                &texture,
                                gsk_filter(filter),
                                &graphene::Rect::new(0.0, 0.0, width as f32, height as f32),
                            );
                        }
                    }
                    PaintOp::SnapshotPaintable { width, height } => {
                        handle.paintable().snapshot(snapshot, width, height);
                    }
                    PaintOp::Pop => snapshot.pop(),
                }
            }
        }
    }
}

glib::wrapper! {
    /// Displays a screenshot, scaled to fit while keeping its aspect ratio.
    pub struct SfScreenshot(
        ObjectSubclass<imp::SfScreenshot>)
        @extends gtk::Widget;
}

impl SfScreenshot {
    pub fn new() -> Self {
        glib::Object::new()
    }

    pub fn paintable(&self) -> Option<gdk::Paintable> {
        self.imp()
            .state
            .paintable()
            .as_ref()
            .map(|handle| handle.paintable().clone())
    }

    pub fn set_paintable(&self, paintable: Option<&gdk::Paintable>) {
        let handle = paintable.cloned().map(PaintableHandle::new);
        self.imp().state.set_paintable(handle);
    }

    pub fn focus_x(&self) -> f64 {
        self.imp().state.focus_x()
    }

    pub fn set_focus_x(&self, focus_x: f64) {
        self.imp().state.set_focus_x(focus_x);
    }

    pub fn focus_y(&self) -> f64 {
        self.imp().state.focus_y()
    }

    pub fn set_focus_y(&self, focus_y: f64) {
        self.imp().state.set_focus_y(focus_y);
    }

    pub fn rounded_corners(&self) -> bool {
        self.imp().state.rounded_corners()
    }

    pub fn set_rounded_corners(&self, rounded_corners: bool) {
        self.imp().state.set_rounded_corners(rounded_corners);
    }

    pub fn top_half(&self) -> bool {
        self.imp().state.top_half()
    }

    pub fn set_top_half(&self, top_half: bool) {
        self.imp().state.set_top_half(top_half);
    }

    pub fn filter(&self) -> gsk::ScalingFilter {
        gsk_filter(self.imp().state.filter())
    }

    pub fn set_filter(&self, filter: gsk::ScalingFilter) {
        let filter = match filter {
            gsk::ScalingFilter::Linear => ScalingFilter::Linear,
            gsk::ScalingFilter::Nearest => ScalingFilter::Nearest,
            _ => ScalingFilter::Trilinear,
        };
        self.imp().state.set_filter(filter);
    }
}

impl Default for SfScreenshot {
    fn default() -> Self {
        Self::new()
    }
}

fn gsk_filter(filter: ScalingFilter) -> gsk::ScalingFilter {
    match filter {
        ScalingFilter::Linear => gsk::ScalingFilter::Linear,
        ScalingFilter::Nearest => gsk::ScalingFilter::Nearest,
        ScalingFilter::Trilinear => gsk::ScalingFilter::Trilinear,
    }
}

fn graphene_rect(rect: &Rect) -> graphene::Rect {
    graphene::Rect::new(
        rect.x as f32,
        rect.y as f32,
        rect.width as f32,
        rect.height as f32,
    )
}

// Storefront - paintable_handle.rs
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

use std::rc::Rc;

use gtk::prelude::*;
use gtk::{gdk, glib};

use crate::observable::{Observable, Subscription};
use crate::screenshot::{self, PaintableEvent, PaintableKind};
use crate::ui::SfAsyncTexture;

/// Wraps a [gdk::Paintable], so it can be displayed through
/// [screenshot::ScreenshotState]. Its signals are exposed as
/// [PaintableEvent]s.
#[derive(Debug, Clone)]
pub struct PaintableHandle {
    paintable: gdk::Paintable,
}

impl PaintableHandle {
    pub fn new(paintable: gdk::Paintable) -> Self {
        Self { paintable }
    }

    pub fn paintable(&self) -> &gdk::Paintable {
        &self.paintable
    }

    /// The texture to use for the scaled-texture path.
    pub fn texture(&self) -> Option<gdk::Texture> {
        if let Some(texture) = self.paintable.downcast_ref::<SfAsyncTexture>() {
            texture.texture()
        } else {
            self.paintable.downcast_ref::<gdk::Texture>().cloned()
        }
    }
}

impl Observable<PaintableEvent> for PaintableHandle {
    fn subscribe(&self, observer: Box<dyn Fn(&PaintableEvent)>) -> Subscription {
        let observer: Rc<dyn Fn(&PaintableEvent)> = Rc::from(observer);
        let mut handlers: Vec<glib::SignalHandlerId> = Vec::new();

        let o = observer.clone();
        handlers.push(
            self.paintable
                .connect_invalidate_contents(move |_| o(&PaintableEvent::ContentsInvalidated)),
        );

        let o = observer.clone();
        handlers.push(
            self.paintable
                .connect_invalidate_size(move |_| o(&PaintableEvent::SizeInvalidated)),
        );

        if let Some(texture) = self.paintable.downcast_ref::<SfAsyncTexture>() {
            let o = observer.clone();
            handlers.push(texture.connect_notify_local(Some("loaded"), move |_, _| {
                o(&PaintableEvent::Loaded)
            }));
        }

        let weak = self.paintable.downgrade();
        Subscription::new(move || {
            if let Some(paintable) = weak.upgrade() {
                for handler in handlers {
                    paintable.disconnect(handler);
                }
            }
        })
    }
}

impl screenshot::Paintable for PaintableHandle {
    fn intrinsic_width(&self) -> i32 {
        self.paintable.intrinsic_width()
    }

    fn intrinsic_height(&self) -> i32 {
        self.paintable.intrinsic_height()
    }

    fn intrinsic_aspect_ratio(&self) -> f64 {
        self.paintable.intrinsic_aspect_ratio()
    }

    fn kind(&self) -> PaintableKind {
        if self.paintable.is::<SfAsyncTexture>() {
            PaintableKind::AsyncTexture
        } else if self.paintable.is::<gdk::Texture>() {
            PaintableKind::Texture
        } else {
            PaintableKind::Generic
        }
    }
}

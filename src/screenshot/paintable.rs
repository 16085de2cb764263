// Storefront - paintable.rs
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

use crate::observable::Observable;

#[derive(Copy, Debug, Clone, Eq, PartialEq)]
pub enum PaintableEvent {
    /// The contents changed, a redraw is needed
    ContentsInvalidated,
    /// The intrinsic size changed, a relayout is needed
    SizeInvalidated,
    /// An asynchronously loaded texture finished loading
    Loaded,
}

/// Which variant of paintable is displayed. Only textures can be drawn
/// through the scaled-texture path.
#[derive(Copy, Debug, Clone, Eq, PartialEq, Default)]
pub enum PaintableKind {
    #[default]
    Generic,
    Texture,
    AsyncTexture,
}

impl PaintableKind {
    pub fn is_texture(&self) -> bool {
        matches!(self, Self::Texture | Self::AsyncTexture)
    }
}

/// An abstract drawable image source.
pub trait Paintable: Observable<PaintableEvent> {
    fn intrinsic_width(&self) -> i32;

    fn intrinsic_height(&self) -> i32;

    fn intrinsic_aspect_ratio(&self) -> f64 {
        let width = self.intrinsic_width();
        let height = self.intrinsic_height();

        if width > 0 && height > 0 {
            width as f64 / height as f64
        } else {
            0.0
        }
    }

    fn kind(&self) -> PaintableKind {
        PaintableKind::Generic
    }
}

/// Snapshot of the intrinsic values of a paintable, which is all the
/// layout code needs to know about it.
#[derive(Copy, Debug, Clone, PartialEq, Default)]
pub struct PaintableMetrics {
    pub width: i32,
    pub height: i32,
    pub aspect_ratio: f64,
    pub kind: PaintableKind,
}

impl PaintableMetrics {
    pub fn of<P: Paintable + ?Sized>(paintable: &P) -> Self {
        Self {
            width: paintable.intrinsic_width(),
            height: paintable.intrinsic_height(),
            aspect_ratio: paintable.intrinsic_aspect_ratio(),
            kind: paintable.kind(),
        }
    }
}

// Storefront - utils.rs
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

use gtk::prelude::*;

use crate::transaction::Icon;

pub fn clear_box(box_: &gtk::Box) {
    while let Some(child) = box_.first_child() {
        box_.remove(&child);
    }
}

pub fn icon_image(icon: &Icon, pixel_size: i32) -> gtk::Image {
    let image = match icon {
        Icon::Named(name) => gtk::Image::from_icon_name(name),
        Icon::File(path) => gtk::Image::from_file(path),
    };

    image.set_pixel_size(pixel_size);
    image
}

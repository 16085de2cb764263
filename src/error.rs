// Storefront - error.rs
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

use gtk::glib;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("GLib error: {0}")]
    GLib(#[from] glib::Error),

    #[error("No image file to load")]
    NoFile,
}

impl Error {
    pub fn message(&self) -> String {
        match self {
            Self::GLib(err) => err.message().to_string(),
            _ => self.to_string(),
        }
    }
}

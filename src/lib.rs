// Storefront - lib.rs
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

#[macro_use]
extern crate log;

/// Explicit observer registration for the toolkit independent parts
pub mod observable;
/// Screenshot layout and painting, and the state behind the screenshot
/// widget
pub mod screenshot;
/// License identifier lookups
pub mod spdx;
/// Transaction model and the logic the transaction view is made of
pub mod transaction;
/// The GTK widgets
pub mod ui;

mod app;
mod error;
#[rustfmt::skip]
pub mod config;
pub mod i18n;

pub use app::SfApplication;
pub use error::Error;

// Storefront - mod.rs
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

//! GTK widgets on top of the toolkit independent state types.

mod async_texture;
mod paintable_handle;
mod screenshot;
mod transaction_view;
pub mod utils;

pub use async_texture::SfAsyncTexture;
pub use paintable_handle::PaintableHandle;
pub use screenshot::SfScreenshot;
pub use transaction_view::SfTransactionView;

// Storefront - config.rs
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

// Build time configuration. Packagers can override the profile and the
// locale directory through the environment of the build.

pub const APP_ID: &str = "io.github.Storefront";
pub const NAME: &str = "Storefront";
pub const PKGNAME: &str = "storefront";
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const PROFILE: &str = match option_env!("STOREFRONT_PROFILE") {
    Some(profile) => profile,
    None => "development",
};
pub const LOCALEDIR: &str = match option_env!("STOREFRONT_LOCALEDIR") {
    Some(dir) => dir,
    None => "/usr/share/locale",
};

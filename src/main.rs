// Storefront - main.rs
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

use gettextrs::{bindtextdomain, setlocale, textdomain, LocaleCategory};
use gtk::glib;
use storefront::config;
use storefront::SfApplication;

fn main() -> glib::ExitCode {
    // Initialize logger
    pretty_env_logger::init();

    // Setup language / translations
    setlocale(LocaleCategory::LcAll, "");
    if let Err(err) = bindtextdomain(config::PKGNAME, config::LOCALEDIR) {
        warn!("Unable to bind text domain: {}", err);
    }
    if let Err(err) = textdomain(config::PKGNAME) {
        warn!("Unable to switch text domain: {}", err);
    }

    glib::set_application_name(config::NAME);

    // Run app itself
    SfApplication::run()
}

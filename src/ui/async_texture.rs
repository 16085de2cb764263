// Storefront - async_texture.rs
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

use std::cell::{Cell, RefCell};

use glib::{clone, ParamSpec, ParamSpecBoolean, ParamSpecObject};
use gtk::gdk::subclass::prelude::*;
use gtk::prelude::*;
use gtk::subclass::prelude::*;
use gtk::{gdk, gio, glib};
use once_cell::sync::Lazy;

use crate::error::Error;

mod imp {
    use super::*;

    #[derive(Debug, Default)]
    pub struct SfAsyncTexture {
        pub file: RefCell<Option<gio::File>>,
        pub texture: RefCell<Option<gdk::Texture>>,
        pub loading: Cell<bool>,
    }

    #[glib::object_subclass]
    impl ObjectSubclass for SfAsyncTexture {
        const NAME: &'static str = "SfAsyncTexture";
        type Type = super::SfAsyncTexture;
        type Interfaces = (gdk::Paintable,);
    }

    impl ObjectImpl for SfAsyncTexture {
        fn properties() -> &'static [ParamSpec] {
            static PROPERTIES: Lazy<Vec<ParamSpec>> = Lazy::new(|| {
                vec![
                    ParamSpecObject::builder::<gio::File>("file")
                        .construct_only()
                        .build(),
                    ParamSpecBoolean::builder("loaded").read_only().build(),
                ]
            });
            PROPERTIES.as_ref()
        }

        fn property(&self, _id: usize, pspec: &ParamSpec) -> glib::Value {
            match pspec.name() {
                "file" => self.file.borrow().to_value(),
                "loaded" => self.obj().is_loaded().to_value(),
                _ => unimplemented!(),
            }
        }

        fn set_property(&self, _id: usize, value: &glib::Value, pspec: &ParamSpec) {
            match pspec.name() {
                "file" => *self.file.borrow_mut() = value.get().unwrap(),
                _ => unimplemented!(),
            }
        }
    }

    impl PaintableImpl for SfAsyncTexture {
        fn intrinsic_width(&self) -> i32 {
            self.texture.borrow().as_ref().map_or(0, |t| t.width())
        }

        fn intrinsic_height(&self) -> i32 {
            self.texture.borrow().as_ref().map_or(0, |t| t.height())
        }

        fn snapshot(&self, snapshot: &gdk::Snapshot, width: f64, height: f64) {
            if let Some(texture) = self.texture.borrow().as_ref() {
                texture.snapshot(snapshot, width, height);
            }
        }
    }
}

glib::wrapper! {
    /// A paintable which loads its texture from a file in the background.
    /// It has no size until `loaded` becomes true.
    pub struct SfAsyncTexture(ObjectSubclass<imp::SfAsyncTexture>)
        @implements gdk::Paintable;
}

impl SfAsyncTexture {
    pub fn new(file: &gio::File) -> Self {
        glib::Object::builder().property("file", file).build()
    }

    pub fn file(&self) -> Option<gio::File> {
        self.imp().file.borrow().clone()
    }

    pub fn is_loaded(&self) -> bool {
        self.imp().texture.borrow().is_some()
    }

    /// The loaded texture, if any.
    pub fn texture(&self) -> Option<gdk::Texture> {
        self.imp().texture.borrow().clone()
    }

    /// Starts loading the texture on the main context. Does nothing if it
    /// is already loaded or loading.
    pub fn load(&self) {
        let imp = self.imp();
        if self.is_loaded() || imp.loading.get() {
            return;
        }

        imp.loading.set(true);
        let fut = clone!(
            #[weak(rename_to = this)]
            self,
            async move {
                let result = this.load_texture().await;
                this.imp().loading.set(false);

                match result {
                    Ok(texture) => this.set_texture(texture),
                    Err(err) => warn!("Unable to load texture: {}", err.message()),
                }
            }
        );
        glib::spawn_future_local(fut);
    }

    async fn load_texture(&self) -> Result<gdk::Texture, Error> {
        let file = self.file().ok_or(Error::NoFile)?;
        debug!("Loading texture {}", file.uri());

        let (bytes, _etag) = file.load_bytes_future().await?;
        let texture = gdk::Texture::from_bytes(&bytes)?;
        Ok(texture)
    }

    fn set_texture(&self, texture: gdk::Texture) {
        *self.imp().texture.borrow_mut() = Some(texture);

        self.notify("loaded");
        self.invalidate_size();
        self.invalidate_contents();
    }
}

// Storefront - entry.rs
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

use std::path::PathBuf;

use bitflags::bitflags;

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct EntryKind: u32 {
        const APPLICATION = 1 << 0;
        const RUNTIME = 1 << 1;
        const ADDON = 1 << 2;
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Icon {
    /// Name of an icon from the icon theme
    Named(String),
    File(PathBuf),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EntrySource {
    #[default]
    Flatpak,
    Other,
}

/// An application, runtime or addon from the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    id: String,
    title: String,
    kinds: EntryKind,
    source: EntrySource,
    icon: Option<Icon>,
    addon_extension_of_ref: Option<String>,
}

impl Entry {
    pub fn new(id: &str, kinds: EntryKind) -> Self {
        Self {
            id: id.to_string(),
            title: id.to_string(),
            kinds,
            source: EntrySource::default(),
            icon: None,
            addon_extension_of_ref: None,
        }
    }

    pub fn with_title(mut self, title: &str) -> Self {
        self.title = title.to_string();
        self
    }

    pub fn with_icon(mut self, icon: Icon) -> Self {
        self.icon = Some(icon);
        self
    }

    pub fn with_source(mut self, source: EntrySource) -> Self {
        self.source = source;
        self
    }

    /// Sets the ref (`<namespace>/<id>/<arch>/<branch>`) of the application
    /// this addon extends.
    pub fn with_extension_of(mut self, extension_of_ref: &str) -> Self {
        self.addon_extension_of_ref = Some(extension_of_ref.to_string());
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn kinds(&self) -> EntryKind {
        self.kinds
    }

    /// Whether the entry is of any of the given `kinds`.
    pub fn is_of_kinds(&self, kinds: EntryKind) -> bool {
        self.kinds.intersects(kinds)
    }

    pub fn is_flatpak(&self) -> bool {
        self.source == EntrySource::Flatpak
    }

    pub fn icon(&self) -> Option<&Icon> {
        self.icon.as_ref()
    }

    pub fn addon_extension_of_ref(&self) -> Option<&str> {
        self.addon_extension_of_ref.as_deref()
    }
}

/// All entries representing the same logical application, as shown to the
/// user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryGroup {
    id: String,
    title: String,
    icon: Option<Icon>,
}

impl EntryGroup {
    pub fn new(id: &str, title: &str, icon: Option<Icon>) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            icon,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn icon(&self) -> Option<&Icon> {
        self.icon.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_match_any() {
        let entry = Entry::new("org.gnome.Foo", EntryKind::APPLICATION);
        assert!(entry.is_of_kinds(EntryKind::APPLICATION));
        assert!(entry.is_of_kinds(EntryKind::APPLICATION | EntryKind::ADDON));
        assert!(!entry.is_of_kinds(EntryKind::RUNTIME));
        assert!(!entry.is_of_kinds(EntryKind::empty()));
    }

    #[test]
    fn builder_defaults() {
        let entry = Entry::new("org.gnome.Foo.Plugin", EntryKind::ADDON)
            .with_extension_of("app/org.gnome.Foo/x86_64/stable");

        assert_eq!(entry.title(), "org.gnome.Foo.Plugin");
        assert!(entry.is_flatpak());
        assert!(entry.icon().is_none());
        assert_eq!(
            entry.addon_extension_of_ref(),
            Some("app/org.gnome.Foo/x86_64/stable")
        );
    }
}

// Storefront - resolve.rs
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

use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use super::{Entry, EntryGroup, EntryKind};

/// Looks up the display group of an application id.
pub trait ApplicationFactory {
    fn convert_one(&self, id: &str) -> Option<Rc<EntryGroup>>;
}

/// [ApplicationFactory] backed by a map of application ids.
#[derive(Debug, Default)]
pub struct ApplicationMap {
    groups: HashMap<String, Rc<EntryGroup>>,
}

impl ApplicationMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, group: EntryGroup) -> Rc<EntryGroup> {
        let group = Rc::new(group);
        self.groups.insert(group.id().to_string(), group.clone());
        group
    }
}

impl ApplicationFactory for ApplicationMap {
    fn convert_one(&self, id: &str) -> Option<Rc<EntryGroup>> {
        self.groups.get(id).cloned()
    }
}

/// Application wide state, as exposed by the window.
pub struct StateInfo {
    application_factory: Rc<dyn ApplicationFactory>,
}

impl StateInfo {
    pub fn new(application_factory: Rc<dyn ApplicationFactory>) -> Self {
        Self {
            application_factory,
        }
    }

    pub fn application_factory(&self) -> &dyn ApplicationFactory {
        self.application_factory.as_ref()
    }
}

impl fmt::Debug for StateInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateInfo").finish_non_exhaustive()
    }
}

/// The window hosting a transaction view.
pub trait WindowContext {
    fn state_info(&self) -> Option<Rc<StateInfo>>;

    fn show_group(&self, group: &Rc<EntryGroup>);
}

/// Extracts the application id out of a ref like
/// `app/org.gnome.Foo/x86_64/stable`.
pub fn generic_id_from_ref(reference: &str) -> Option<&str> {
    let (_, rest) = reference.split_once('/')?;
    let id = rest.split_once('/').map_or(rest, |(id, _)| id);

    if id.is_empty() {
        None
    } else {
        Some(id)
    }
}

/// Finds the group an entry gets displayed with. Applications are looked
/// up by their own id first; addons resolve to the application they extend.
pub fn resolve_group_from_entry(
    entry: &Entry,
    window: &dyn WindowContext,
) -> Option<Rc<EntryGroup>> {
    let info = window.state_info()?;
    let factory = info.application_factory();

    if entry.is_of_kinds(EntryKind::APPLICATION) {
        if let Some(group) = factory.convert_one(entry.id()) {
            return Some(group);
        }
    }

    let extension_of_ref = entry.addon_extension_of_ref()?;
    let generic_id = generic_id_from_ref(extension_of_ref)?;

    factory.convert_one(generic_id)
}

#[cfg(test)]
pub(crate) mod tests {
    use std::cell::RefCell;

    use super::*;

    pub struct FakeWindow {
        pub info: Option<Rc<StateInfo>>,
        pub shown: RefCell<Vec<String>>,
    }

    impl FakeWindow {
        pub fn with_groups(groups: &[(&str, &str)]) -> Self {
            let mut map = ApplicationMap::new();
            for (id, title) in groups {
                map.insert(EntryGroup::new(id, title, None));
            }

            Self {
                info: Some(Rc::new(StateInfo::new(Rc::new(map)))),
                shown: RefCell::default(),
            }
        }

        pub fn without_state() -> Self {
            Self {
                info: None,
                shown: RefCell::default(),
            }
        }
    }

    impl WindowContext for FakeWindow {
        fn state_info(&self) -> Option<Rc<StateInfo>> {
            self.info.clone()
        }

        fn show_group(&self, group: &Rc<EntryGroup>) {
            self.shown.borrow_mut().push(group.id().to_string());
        }
    }

    #[test]
    fn generic_id_is_second_segment() {
        assert_eq!(
            generic_id_from_ref("app/org.gnome.Foo/x86_64/stable"),
            Some("org.gnome.Foo")
        );
        assert_eq!(generic_id_from_ref("app/org.gnome.Foo"), Some("org.gnome.Foo"));
        assert_eq!(generic_id_from_ref("org.gnome.Foo"), None);
        assert_eq!(generic_id_from_ref("app//x86_64/stable"), None);
    }

    #[test]
    fn application_resolves_by_own_id() {
        let window = FakeWindow::with_groups(&[("org.gnome.Foo", "Foo")]);
        let entry = Entry::new("org.gnome.Foo", EntryKind::APPLICATION);

        let group = resolve_group_from_entry(&entry, &window);
        assert_eq!(group.as_deref().map(EntryGroup::title), Some("Foo"));
    }

    #[test]
    fn addon_resolves_through_extension_ref() {
        let window = FakeWindow::with_groups(&[("org.gnome.Foo", "Foo")]);
        let entry = Entry::new("org.gnome.Foo.Plugin.Bar", EntryKind::ADDON)
            .with_extension_of("app/org.gnome.Foo/x86_64/stable");

        let group = resolve_group_from_entry(&entry, &window);
        assert_eq!(group.as_deref().map(EntryGroup::id), Some("org.gnome.Foo"));
    }

    #[test]
    fn unknown_application_falls_back_to_extension_ref() {
        let window = FakeWindow::with_groups(&[("org.gnome.Foo", "Foo")]);
        let entry = Entry::new("org.gnome.Foo.Devel", EntryKind::APPLICATION)
            .with_extension_of("app/org.gnome.Foo/x86_64/master");

        assert!(resolve_group_from_entry(&entry, &window).is_some());
    }

    #[test]
    fn unresolvable_entries() {
        let window = FakeWindow::with_groups(&[("org.gnome.Foo", "Foo")]);

        let runtime = Entry::new("org.gnome.Platform", EntryKind::RUNTIME);
        assert!(resolve_group_from_entry(&runtime, &window).is_none());

        let orphan = Entry::new("org.other.Plugin", EntryKind::ADDON)
            .with_extension_of("app/org.other.App/x86_64/stable");
        assert!(resolve_group_from_entry(&orphan, &window).is_none());

        let app = Entry::new("org.gnome.Foo", EntryKind::APPLICATION);
        assert!(resolve_group_from_entry(&app, &FakeWindow::without_state()).is_none());
    }
}

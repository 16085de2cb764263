// Storefront - callbacks.rs
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

//! Small helpers the transaction view binds its rows with.

use std::rc::Rc;

use gtk::glib;

use super::{resolve_group_from_entry, EntryKind, EntryTracker, Icon, TransactionKind};
use super::{TransactionTask, WindowContext};
use crate::i18n::i18n_f;

pub const GENERIC_ICON_NAME: &str = "application-x-executable";

pub fn invert_boolean(value: bool) -> bool {
    !value
}

pub fn is_null<T>(value: Option<&T>) -> bool {
    value.is_none()
}

pub fn is_both(first: bool, second: bool) -> bool {
    first && second
}

pub fn list_has_items<T>(items: Option<&[T]>) -> bool {
    items.is_some_and(|items| !items.is_empty())
}

pub fn format_size(bytes: u64) -> String {
    glib::format_size(bytes).to_string()
}

pub fn format_download_size(bytes: u64) -> String {
    format_size(bytes)
}

pub fn format_installed_size(bytes: u64) -> String {
    format_size(bytes)
}

pub fn format_bytes_transferred(bytes: u64) -> String {
    i18n_f("Transferred {} so far", &[&format_size(bytes)])
}

/// Formats `progress` (0.0 - 1.0) of `total_size` as "done / total".
pub fn format_download_progress(progress: f64, total_size: u64) -> String {
    let downloaded = (progress * total_size as f64) as u64;
    format!("{} / {}", format_size(downloaded), format_size(total_size))
}

/// Subtitle of a tracker's row: the download progress while operations
/// are running, the installed size once they are done.
pub fn tracker_subtitle(tracker: &EntryTracker) -> String {
    let current = tracker.current_ops();

    if current.is_empty() {
        let installed_size = tracker
            .finished_ops()
            .iter()
            .filter_map(|t| t.op().map(|op| op.installed_size))
            .sum();
        return format_installed_size(installed_size);
    }

    let download_size = current
        .iter()
        .filter_map(|t| t.op().map(|op| op.download_size))
        .sum();
    format_download_progress(tracker.progress(), download_size)
}

/// Whether `task` belongs into the list of finished operations shown
/// for `tracker`. Operations whose name contains the entry id are left
/// out, failed operations are always kept.
pub fn filter_finished_ops(task: Option<&TransactionTask>, tracker: Option<&EntryTracker>) -> bool {
    let (Some(task), Some(tracker)) = (task, tracker) else {
        return true;
    };

    if task.has_error() {
        return true;
    }

    let Some(entry) = tracker.entry() else {
        return true;
    };

    let Some(op) = task.op() else {
        return true;
    };

    // An empty id is contained in every name
    !op.name.contains(entry.id())
}

/// Builds a filter for the finished operations of `tracker`, or `None`
/// without a tracker.
pub fn finished_ops_filter(
    tracker: Option<Rc<EntryTracker>>,
) -> Option<impl Fn(&TransactionTask) -> bool> {
    let tracker = tracker?;
    Some(move |task: &TransactionTask| filter_finished_ops(Some(task), Some(&tracker)))
}

pub fn is_transaction_type(tracker: Option<&EntryTracker>, kind: TransactionKind) -> bool {
    tracker.is_some_and(|tracker| tracker.kind() == kind)
}

pub fn is_entry_kind(tracker: Option<&EntryTracker>, kinds: EntryKind) -> bool {
    tracker
        .and_then(EntryTracker::entry)
        .is_some_and(|entry| entry.is_of_kinds(kinds))
}

/// Where the icon of a tracked entry comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MainIcon {
    Entry(Icon),
    Group(Icon),
    /// [GENERIC_ICON_NAME] from the icon theme
    Generic,
}

impl MainIcon {
    pub fn icon(&self) -> Icon {
        match self {
            Self::Entry(icon) | Self::Group(icon) => icon.clone(),
            Self::Generic => Icon::Named(GENERIC_ICON_NAME.to_string()),
        }
    }
}

pub fn main_icon(tracker: Option<&EntryTracker>, window: Option<&dyn WindowContext>) -> MainIcon {
    let Some(entry) = tracker.and_then(EntryTracker::entry) else {
        return MainIcon::Generic;
    };

    if let Some(icon) = entry.icon() {
        return MainIcon::Entry(icon.clone());
    }

    if !entry.is_flatpak() {
        return MainIcon::Generic;
    }

    let Some(window) = window else {
        return MainIcon::Generic;
    };

    resolve_group_from_entry(entry, window)
        .and_then(|group| group.icon().cloned())
        .map_or(MainIcon::Generic, MainIcon::Group)
}

/// Shows the group of the clicked entry. Returns whether there was
/// something to show.
pub fn entry_clicked(tracker: &EntryTracker, window: Option<&dyn WindowContext>) -> bool {
    let Some(window) = window else {
        debug!("Transaction view is not part of a window");
        return false;
    };

    let Some(entry) = tracker.entry() else {
        return false;
    };

    match resolve_group_from_entry(entry, window) {
        Some(group) => {
            window.show_group(&group);
            true
        }
        None => {
            debug!("Unable to resolve group of entry {}", entry.id());
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transaction::resolve::tests::FakeWindow;
    use crate::transaction::{
        ApplicationMap, Entry, EntryGroup, EntrySource, OpPayload, StateInfo, Transaction,
    };

    fn tracked(entry: Entry) -> (Transaction, Rc<EntryTracker>) {
        let transaction = Transaction::new("test");
        let tracker = transaction.add_entry(entry, TransactionKind::Install);
        (transaction, tracker)
    }

    fn task(name: &str) -> TransactionTask {
        TransactionTask::new(Some(OpPayload::new(name, 0, 0)))
    }

    #[test]
    fn boolean_helpers() {
        assert!(invert_boolean(false));
        assert!(!invert_boolean(true));
        assert!(is_null::<u32>(None));
        assert!(!is_null(Some(&1)));
        assert!(is_both(true, true));
        assert!(!is_both(true, false));
        assert!(list_has_items(Some(&[1, 2][..])));
        assert!(!list_has_items::<u32>(Some(&[])));
        assert!(!list_has_items::<u32>(None));
    }

    #[test]
    fn size_formatting() {
        assert_eq!(format_download_size(1000), format_size(1000));
        assert_eq!(format_installed_size(0), format_size(0));
        assert_eq!(
            format_download_progress(0.5, 2_000_000),
            format!("{} / {}", format_size(1_000_000), format_size(2_000_000))
        );
        assert_eq!(
            format_download_progress(0.0, 0),
            format!("{} / {}", format_size(0), format_size(0))
        );

        let transferred = format_bytes_transferred(4096);
        assert!(transferred.contains(&format_size(4096)));
    }

    #[test]
    fn subtitle_follows_running_operations() {
        let (transaction, tracker) = tracked(Entry::new("org.gnome.Foo", EntryKind::APPLICATION));
        assert_eq!(tracker_subtitle(&tracker), format_installed_size(0));

        let own = transaction.start_task(
            "org.gnome.Foo",
            Some(OpPayload::new("app/org.gnome.Foo/x86_64/stable", 1000, 5000)),
        );
        transaction.update_task(&own, 0.5, 500);
        assert_eq!(tracker_subtitle(&tracker), format_download_progress(0.5, 1000));

        transaction.finish_task(&own, None);
        assert_eq!(tracker_subtitle(&tracker), format_installed_size(5000));
    }

    #[test]
    fn finished_ops_exclude_own_operation() {
        let (_transaction, tracker) = tracked(Entry::new("org.gnome.Foo", EntryKind::APPLICATION));

        let own = task("app/org.gnome.Foo/x86_64/stable");
        let locale = task("app/org.gnome.Foo.Locale/x86_64/stable");
        let runtime = task("runtime/org.gnome.Platform/x86_64/47");

        assert!(!filter_finished_ops(Some(&own), Some(&tracker)));
        // Substring match, like the related refs of the application
        assert!(!filter_finished_ops(Some(&locale), Some(&tracker)));
        assert!(filter_finished_ops(Some(&runtime), Some(&tracker)));
    }

    #[test]
    fn failed_operations_are_always_kept() {
        let (transaction, tracker) = tracked(Entry::new("org.gnome.Foo", EntryKind::APPLICATION));
        let own = transaction.start_task(
            "org.gnome.Foo",
            Some(OpPayload::new("app/org.gnome.Foo/x86_64/stable", 0, 0)),
        );
        transaction.finish_task(&own, Some("Failed"));

        assert!(filter_finished_ops(Some(&own), Some(&tracker)));
    }

    #[test]
    fn incomplete_data_is_kept() {
        let (_transaction, tracker) = tracked(Entry::new("org.gnome.Foo", EntryKind::APPLICATION));
        let no_op = TransactionTask::new(None);
        let unnamed = task("");
        let no_entry = EntryTracker::new(None, TransactionKind::Install);

        assert!(filter_finished_ops(None, Some(&tracker)));
        assert!(filter_finished_ops(Some(&no_op), None));
        assert!(filter_finished_ops(Some(&no_op), Some(&tracker)));
        assert!(filter_finished_ops(Some(&unnamed), Some(&tracker)));
        assert!(filter_finished_ops(Some(&task("org.gnome.Foo")), Some(&no_entry)));
    }

    #[test]
    fn empty_entry_id_excludes_everything() {
        let (_transaction, tracker) = tracked(Entry::new("", EntryKind::APPLICATION));

        let runtime = task("runtime/org.gnome.Platform/x86_64/47");

        assert!(!filter_finished_ops(Some(&runtime), Some(&tracker)));
        assert!(!filter_finished_ops(Some(&task("")), Some(&tracker)));
    }

    #[test]
    fn filter_closure() {
        let (_transaction, tracker) = tracked(Entry::new("org.gnome.Foo", EntryKind::APPLICATION));
        assert!(finished_ops_filter(None).is_none());

        let Some(filter) = finished_ops_filter(Some(tracker)) else {
            panic!("Expected a filter");
        };
        assert!(!filter(&task("app/org.gnome.Foo/x86_64/stable")));
        assert!(filter(&task("runtime/org.gnome.Sdk/x86_64/47")));
    }

    #[test]
    fn tracker_predicates() {
        let (_transaction, tracker) = tracked(Entry::new("org.gnome.Foo", EntryKind::APPLICATION));

        assert!(is_transaction_type(Some(&tracker), TransactionKind::Install));
        assert!(!is_transaction_type(Some(&tracker), TransactionKind::Remove));
        assert!(!is_transaction_type(None, TransactionKind::Install));

        assert!(is_entry_kind(Some(&tracker), EntryKind::APPLICATION));
        assert!(!is_entry_kind(Some(&tracker), EntryKind::RUNTIME));
        assert!(!is_entry_kind(None, EntryKind::APPLICATION));
    }

    #[test]
    fn main_icon_prefers_entry_icon() {
        let icon = Icon::Named("org.gnome.Foo".into());
        let (_transaction, tracker) = tracked(
            Entry::new("org.gnome.Foo", EntryKind::APPLICATION).with_icon(icon.clone()),
        );

        assert_eq!(main_icon(Some(&tracker), None), MainIcon::Entry(icon));
        assert_eq!(main_icon(None, None), MainIcon::Generic);
    }

    #[test]
    fn main_icon_falls_back_to_group_icon() {
        let mut map = ApplicationMap::new();
        let icon = Icon::File("/tmp/foo.png".into());
        map.insert(EntryGroup::new("org.gnome.Foo", "Foo", Some(icon.clone())));
        let window = FakeWindow {
            info: Some(Rc::new(StateInfo::new(Rc::new(map)))),
            shown: Default::default(),
        };

        let (_transaction, tracker) = tracked(
            Entry::new("org.gnome.Foo.Plugin", EntryKind::ADDON)
                .with_extension_of("app/org.gnome.Foo/x86_64/stable"),
        );
        assert_eq!(main_icon(Some(&tracker), Some(&window)), MainIcon::Group(icon));
        assert_eq!(main_icon(Some(&tracker), None), MainIcon::Generic);

        // Group without icon
        let window = FakeWindow::with_groups(&[("org.gnome.Foo", "Foo")]);
        assert_eq!(main_icon(Some(&tracker), Some(&window)), MainIcon::Generic);
        assert_eq!(MainIcon::Generic.icon(), Icon::Named(GENERIC_ICON_NAME.into()));
    }

    #[test]
    fn main_icon_of_other_sources_is_generic() {
        let mut map = ApplicationMap::new();
        map.insert(EntryGroup::new(
            "org.gnome.Foo",
            "Foo",
            Some(Icon::Named("org.gnome.Foo".into())),
        ));
        let window = FakeWindow {
            info: Some(Rc::new(StateInfo::new(Rc::new(map)))),
            shown: Default::default(),
        };

        let (_transaction, tracker) = tracked(
            Entry::new("org.gnome.Foo", EntryKind::APPLICATION).with_source(EntrySource::Other),
        );
        assert_eq!(main_icon(Some(&tracker), Some(&window)), MainIcon::Generic);

        let (_transaction, tracker) = tracked(Entry::new("org.gnome.Foo", EntryKind::APPLICATION));
        assert_eq!(
            main_icon(Some(&tracker), Some(&window)),
            MainIcon::Group(Icon::Named("org.gnome.Foo".into()))
        );
    }

    #[test]
    fn clicking_shows_group() {
        let window = FakeWindow::with_groups(&[("org.gnome.Foo", "Foo")]);
        let (_transaction, tracker) = tracked(Entry::new("org.gnome.Foo", EntryKind::APPLICATION));

        assert!(entry_clicked(&tracker, Some(&window)));
        assert_eq!(*window.shown.borrow(), vec!["org.gnome.Foo".to_string()]);

        assert!(!entry_clicked(&tracker, None));
        assert!(!entry_clicked(&tracker, Some(&FakeWindow::without_state())));
    }
}

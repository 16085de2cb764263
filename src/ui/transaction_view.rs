// Storefront - transaction_view.rs
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

use std::cell::{OnceCell, RefCell};
use std::collections::HashSet;
use std::rc::Rc;

use adw::prelude::*;
use adw::subclass::prelude::*;
use derivative::Derivative;
use glib::clone;
use gtk::glib;
use indexmap::map::IndexMap;

use crate::observable::{Observable, Subscription};
use crate::transaction::callbacks;
use crate::transaction::{
    EntryTracker, EventBindings, RowContext, Transaction, TransactionTask, TransactionViewEvent,
    TransactionViewState, ViewUpdate, WindowContext, ENTRY_CLICKED,
};
use crate::ui::utils;

mod imp {
    use super::*;

    #[derive(Debug)]
    pub struct EntryRow {
        pub tracker: Rc<EntryTracker>,
        pub row: adw::ExpanderRow,
    }

    #[derive(Derivative, Default)]
    #[derivative(Debug)]
    pub struct SfTransactionView {
        pub state: TransactionViewState,
        #[derivative(Debug = "ignore")]
        pub state_subscription: RefCell<Option<Subscription>>,
        #[derivative(Debug = "ignore")]
        pub window: RefCell<Option<Rc<dyn WindowContext>>>,
        #[derivative(Debug = "ignore")]
        pub bindings: OnceCell<EventBindings<RowContext>>,
        /// Rows of the displayed trackers, keyed by entry id
        pub rows: RefCell<IndexMap<String, EntryRow>>,
        pub content: gtk::Box,
        pub progressbar: gtk::ProgressBar,
        pub groups: gtk::Box,
    }

    #[glib::object_subclass]
    impl ObjectSubclass for SfTransactionView {
        const NAME: &'static str = "SfTransactionView";
        type ParentType = adw::Bin;
        type Type = super::SfTransactionView;
    }

    impl ObjectImpl for SfTransactionView {
        fn constructed(&self) {
            self.parent_constructed();

            self.progressbar.set_show_text(true);
            self.progressbar.set_visible(false);
            self.groups.set_orientation(gtk::Orientation::Vertical);
            self.groups.set_spacing(18);

            self.content.set_orientation(gtk::Orientation::Vertical);
            self.content.set_spacing(18);
            self.content.append(&self.progressbar);
            self.content.append(&self.groups);
            self.obj().set_child(Some(&self.content));

            let _ = self.bindings.set(TransactionViewState::row_bindings());

            let subscription = self.state.subscribe(Box::new(clone!(
                #[weak(rename_to = this)]
                self,
                move |event| {
                    this.handle(event);
                }
            )));
            *self.state_subscription.borrow_mut() = Some(subscription);
        }

        fn dispose(&self) {
            self.state_subscription.borrow_mut().take();
            self.state.set_transaction(None);
        }
    }

    impl WidgetImpl for SfTransactionView {}

    impl BinImpl for SfTransactionView {}

    impl SfTransactionView {
        fn handle(&self, event: &TransactionViewEvent) {
            match event.update() {
                ViewUpdate::Rebuild => self.rebuild(),
                ViewUpdate::Refresh => self.refresh(),
            }
        }

        /// Recreates the rows. Rows which were expanded stay expanded.
        pub fn rebuild(&self) {
            let expanded: HashSet<String> = self
                .rows
                .borrow()
                .iter()
                .filter(|(_, entry_row)| entry_row.row.is_expanded())
                .map(|(id, _)| id.clone())
                .collect();

            self.rows.borrow_mut().clear();
            utils::clear_box(&self.groups);

            for section in self.state.sections() {
                let group = adw::PreferencesGroup::new();
                group.set_title(&section.kind.to_string());

                for tracker in section.trackers {
                    let id = tracker
                        .entry()
                        .map(|entry| entry.id().to_string())
                        .unwrap_or_default();

                    let row = self.entry_row(tracker.clone());
                    row.set_expanded(expanded.contains(&id));
                    group.add(&row);

                    self.rows.borrow_mut().insert(id, EntryRow { tracker, row });
                }

                self.groups.append(&group);
            }

            self.refresh();
        }

        /// Updates progress and sizes of the existing rows.
        fn refresh(&self) {
            let transaction = self.state.transaction();
            self.progressbar.set_visible(transaction.is_some());

            let Some(transaction) = transaction else {
                return;
            };

            self.progressbar.set_fraction(transaction.progress());
            self.progressbar.set_text(Some(&callbacks::format_bytes_transferred(
                transaction.bytes_transferred(),
            )));

            for entry_row in self.rows.borrow().values() {
                let subtitle = callbacks::tracker_subtitle(&entry_row.tracker);
                entry_row.row.set_subtitle(&subtitle);
            }
        }

        fn entry_row(&self, tracker: Rc<EntryTracker>) -> adw::ExpanderRow {
            let window = self.window.borrow().clone();
            let row = adw::ExpanderRow::new();

            if let Some(entry) = tracker.entry() {
                row.set_title(&glib::markup_escape_text(entry.title()));
            }

            let icon = callbacks::main_icon(Some(&tracker), window.as_deref());
            row.add_prefix(&utils::icon_image(&icon.icon(), 32));

            let finished: Vec<Rc<TransactionTask>> =
                match callbacks::finished_ops_filter(Some(tracker.clone())) {
                    Some(filter) => tracker
                        .finished_ops()
                        .into_iter()
                        .filter(|task| filter(task.as_ref()))
                        .collect(),
                    None => Vec::new(),
                };

            for task in &finished {
                row.add_row(&finished_op_row(task));
            }
            row.set_enable_expansion(callbacks::list_has_items(Some(finished.as_slice())));

            let button = gtk::Button::from_icon_name("go-next-symbolic");
            button.set_valign(gtk::Align::Center);
            button.add_css_class("flat");
            button.set_visible(!callbacks::is_null(window.as_ref()));
            row.add_suffix(&button);

            let context = RowContext { tracker, window };
            button.connect_clicked(clone!(
                #[weak(rename_to = this)]
                self,
                move |_| {
                    if let Some(bindings) = this.bindings.get() {
                        bindings.dispatch(ENTRY_CLICKED, &context);
                    }
                }
            ));

            row
        }
    }

    fn finished_op_row(task: &TransactionTask) -> adw::ActionRow {
        let row = adw::ActionRow::new();

        let name = task.op().map(|op| op.name.as_str()).unwrap_or_default();
        row.set_title(&glib::markup_escape_text(name));

        match task.error() {
            Some(error) => {
                row.set_subtitle(&glib::markup_escape_text(&error));
                row.add_css_class("error");
            }
            None => {
                if let Some(op) = task.op() {
                    row.set_subtitle(&callbacks::format_installed_size(op.installed_size));
                }
            }
        }

        row
    }
}

glib::wrapper! {
    /// Lists the entries of a transaction, grouped by what happens to them.
    pub struct SfTransactionView(
        ObjectSubclass<imp::SfTransactionView>)
        @extends gtk::Widget, adw::Bin;
}

impl SfTransactionView {
    pub fn new() -> Self {
        glib::Object::new()
    }

    pub fn transaction(&self) -> Option<Rc<Transaction>> {
        self.imp().state.transaction()
    }

    pub fn set_transaction(&self, transaction: Option<Rc<Transaction>>) {
        self.imp().state.set_transaction(transaction);
    }

    pub fn window_context(&self) -> Option<Rc<dyn WindowContext>> {
        self.imp().window.borrow().clone()
    }

    /// Sets the window the rows resolve entry groups with.
    pub fn set_window_context(&self, window: Option<Rc<dyn WindowContext>>) {
        *self.imp().window.borrow_mut() = window;
        self.imp().rebuild();
    }

    pub fn connect_transaction_notify<F: Fn(&Self) + 'static>(&self, f: F) -> Subscription {
        let weak = self.downgrade();
        self.imp().state.subscribe(Box::new(move |event| {
            if *event != TransactionViewEvent::Notify("transaction") {
                return;
            }

            if let Some(obj) = weak.upgrade() {
                f(&obj);
            }
        }))
    }
}

impl Default for SfTransactionView {
    fn default() -> Self {
        Self::new()
    }
}

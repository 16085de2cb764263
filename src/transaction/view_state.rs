// Storefront - view_state.rs
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

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use super::callbacks;
use super::{EntryTracker, EventBindings, Transaction, TransactionEvent, TransactionKind};
use super::WindowContext;
use crate::observable::{Observable, Subject, Subscription};

pub const ENTRY_CLICKED: &str = "entry-clicked";

#[derive(Debug, Clone, Eq, PartialEq)]
pub enum TransactionViewEvent {
    /// The named property changed
    Notify(&'static str),
    /// Something within the displayed transaction changed
    Changed(TransactionEvent),
}

impl TransactionViewEvent {
    /// How much of the view has to be redone after this event.
    pub fn update(&self) -> ViewUpdate {
        match self {
            Self::Changed(TransactionEvent::TaskStarted { .. })
            | Self::Changed(TransactionEvent::TaskUpdated { .. })
            | Self::Changed(TransactionEvent::Finished) => ViewUpdate::Refresh,
            Self::Changed(TransactionEvent::TrackerAdded { .. })
            | Self::Changed(TransactionEvent::TaskFinished { .. })
            | Self::Notify(_) => ViewUpdate::Rebuild,
        }
    }
}

#[derive(Copy, Debug, Clone, Eq, PartialEq)]
pub enum ViewUpdate {
    /// Rows or their finished operations changed
    Rebuild,
    /// Only progress and sizes changed, the rows stay
    Refresh,
}

/// Trackers of a transaction which share the same kind.
#[derive(Debug, Clone)]
pub struct Section {
    pub kind: TransactionKind,
    pub trackers: Vec<Rc<EntryTracker>>,
}

/// What a row handler gets to work with.
pub struct RowContext {
    pub tracker: Rc<EntryTracker>,
    pub window: Option<Rc<dyn WindowContext>>,
}

/// State of a transaction view: the referenced transaction, which is
/// owned by someone else.
pub struct TransactionViewState {
    transaction: RefCell<Option<Rc<Transaction>>>,
    transaction_subscription: RefCell<Option<Subscription>>,
    events: Subject<TransactionViewEvent>,
}

impl TransactionViewState {
    pub fn new() -> Self {
        Self {
            transaction: RefCell::default(),
            transaction_subscription: RefCell::default(),
            events: Subject::new(),
        }
    }

    pub fn transaction(&self) -> Option<Rc<Transaction>> {
        self.transaction.borrow().clone()
    }

    pub fn set_transaction(&self, transaction: Option<Rc<Transaction>>) {
        if let Some(subscription) = self.transaction_subscription.borrow_mut().take() {
            subscription.unsubscribe();
        }

        if let Some(transaction) = transaction.as_ref() {
            let events = self.events.downgrade();
            let subscription = transaction.subscribe(Box::new(move |event| {
                events.emit(&TransactionViewEvent::Changed(event.clone()));
            }));
            *self.transaction_subscription.borrow_mut() = Some(subscription);
        }
        *self.transaction.borrow_mut() = transaction;

        self.events.emit(&TransactionViewEvent::Notify("transaction"));
    }

    /// Groups the trackers by transaction kind. Empty sections are left out.
    pub fn sections(&self) -> Vec<Section> {
        let Some(transaction) = self.transaction() else {
            return Vec::new();
        };
        let trackers = transaction.trackers();

        TransactionKind::ALL
            .iter()
            .map(|kind| Section {
                kind: *kind,
                trackers: trackers
                    .iter()
                    .filter(|t| callbacks::is_transaction_type(Some(t), *kind))
                    .cloned()
                    .collect(),
            })
            .filter(|section| !section.trackers.is_empty())
            .collect()
    }

    /// Handlers of the events a row can emit.
    pub fn row_bindings() -> EventBindings<RowContext> {
        EventBindings::new().bind(ENTRY_CLICKED, |context: &RowContext| {
            callbacks::entry_clicked(&context.tracker, context.window.as_deref());
        })
    }
}

impl Observable<TransactionViewEvent> for TransactionViewState {
    fn subscribe(&self, observer: Box<dyn Fn(&TransactionViewEvent)>) -> Subscription {
        self.events.subscribe(observer)
    }
}

impl Default for TransactionViewState {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for TransactionViewState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransactionViewState")
            .field("transaction", &self.transaction.borrow())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use crate::transaction::resolve::tests::FakeWindow;
    use crate::transaction::{Entry, EntryKind};

    fn app(id: &str) -> Entry {
        Entry::new(id, EntryKind::APPLICATION)
    }

    fn recorder(
        state: &TransactionViewState,
    ) -> (Rc<RefCell<Vec<TransactionViewEvent>>>, Subscription) {
        let log = Rc::new(RefCell::new(Vec::new()));
        let l = log.clone();
        let sub = state.subscribe(Box::new(move |event| l.borrow_mut().push(event.clone())));
        (log, sub)
    }

    #[test]
    fn set_transaction_always_notifies() {
        let state = TransactionViewState::new();
        let (log, _sub) = recorder(&state);

        state.set_transaction(None);
        let transaction = Rc::new(Transaction::new("test"));
        state.set_transaction(Some(transaction.clone()));

        assert_eq!(log.borrow().len(), 2);
        assert!(state
            .transaction()
            .is_some_and(|t| Rc::ptr_eq(&t, &transaction)));
    }

    #[test]
    fn transaction_changes_are_forwarded_until_replaced() {
        let state = TransactionViewState::new();
        let first = Rc::new(Transaction::new("first"));
        let second = Rc::new(Transaction::new("second"));

        state.set_transaction(Some(first.clone()));
        let (log, _sub) = recorder(&state);

        first.add_entry(app("org.a.App"), TransactionKind::Install);
        assert_eq!(log.borrow().len(), 1);

        state.set_transaction(Some(second.clone()));
        first.add_entry(app("org.b.App"), TransactionKind::Install);
        second.finish();

        assert_eq!(
            *log.borrow(),
            vec![
                TransactionViewEvent::Changed(TransactionEvent::TrackerAdded {
                    entry_id: "org.a.App".into()
                }),
                TransactionViewEvent::Notify("transaction"),
                TransactionViewEvent::Changed(TransactionEvent::Finished),
            ]
        );
    }

    #[test]
    fn progress_only_refreshes() {
        let uuid = || "0000".to_string();
        let changed = |event| TransactionViewEvent::Changed(event).update();

        assert_eq!(changed(TransactionEvent::TaskUpdated { uuid: uuid() }), ViewUpdate::Refresh);
        assert_eq!(changed(TransactionEvent::TaskStarted { uuid: uuid() }), ViewUpdate::Refresh);
        assert_eq!(changed(TransactionEvent::Finished), ViewUpdate::Refresh);

        assert_eq!(changed(TransactionEvent::TaskFinished { uuid: uuid() }), ViewUpdate::Rebuild);
        assert_eq!(
            changed(TransactionEvent::TrackerAdded {
                entry_id: "org.a.App".into()
            }),
            ViewUpdate::Rebuild
        );
        assert_eq!(
            TransactionViewEvent::Notify("transaction").update(),
            ViewUpdate::Rebuild
        );
    }

    #[test]
    fn sections_group_by_kind() {
        let state = TransactionViewState::new();
        assert!(state.sections().is_empty());

        let transaction = Rc::new(Transaction::new("test"));
        transaction.add_entry(app("org.a.App"), TransactionKind::Remove);
        transaction.add_entry(app("org.b.App"), TransactionKind::Install);
        transaction.add_entry(app("org.c.App"), TransactionKind::Remove);
        state.set_transaction(Some(transaction));

        let sections = state.sections();
        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].kind, TransactionKind::Install);
        assert_eq!(sections[0].trackers.len(), 1);
        assert_eq!(sections[1].kind, TransactionKind::Remove);
        assert_eq!(sections[1].trackers.len(), 2);
    }

    #[test]
    fn row_click_shows_group() {
        let window = Rc::new(FakeWindow::with_groups(&[("org.a.App", "A")]));
        let transaction = Transaction::new("test");
        let tracker = transaction.add_entry(
            Entry::new("org.a.App", EntryKind::APPLICATION),
            TransactionKind::Install,
        );

        let context = RowContext {
            tracker,
            window: Some(window.clone()),
        };
        assert!(TransactionViewState::row_bindings().dispatch(ENTRY_CLICKED, &context));
        assert_eq!(*window.shown.borrow(), vec!["org.a.App".to_string()]);
    }
}

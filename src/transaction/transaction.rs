// Storefront - transaction.rs
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
use std::fmt;
use std::rc::Rc;

use indexmap::map::IndexMap;

use super::{Entry, OpPayload, TransactionTask};
use crate::i18n::i18n;
use crate::observable::{Observable, Subject, Subscription};

#[derive(Copy, Debug, Clone, Eq, PartialEq, Hash)]
pub enum TransactionKind {
    Install,
    Update,
    Remove,
}

impl TransactionKind {
    pub const ALL: [Self; 3] = [Self::Install, Self::Update, Self::Remove];
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let text = match self {
            Self::Install => i18n("Installing"),
            Self::Update => i18n("Updating"),
            Self::Remove => i18n("Removing"),
        };

        write!(f, "{text}")
    }
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub enum TransactionEvent {
    TrackerAdded { entry_id: String },
    TaskStarted { uuid: String },
    TaskUpdated { uuid: String },
    TaskFinished { uuid: String },
    Finished,
}

/// Tracks what happens to one entry of a transaction.
#[derive(Debug)]
pub struct EntryTracker {
    entry: Option<Rc<Entry>>,
    kind: TransactionKind,
    current_ops: RefCell<Vec<Rc<TransactionTask>>>,
    finished_ops: RefCell<Vec<Rc<TransactionTask>>>,
}

impl EntryTracker {
    pub fn new(entry: Option<Rc<Entry>>, kind: TransactionKind) -> Self {
        Self {
            entry,
            kind,
            current_ops: RefCell::default(),
            finished_ops: RefCell::default(),
        }
    }

    pub fn entry(&self) -> Option<&Rc<Entry>> {
        self.entry.as_ref()
    }

    pub fn kind(&self) -> TransactionKind {
        self.kind
    }

    pub fn current_ops(&self) -> Vec<Rc<TransactionTask>> {
        self.current_ops.borrow().clone()
    }

    pub fn finished_ops(&self) -> Vec<Rc<TransactionTask>> {
        self.finished_ops.borrow().clone()
    }

    /// Progress of all tasks of this entry. Finished tasks count as done.
    pub fn progress(&self) -> f64 {
        let current = self.current_ops.borrow();
        let finished = self.finished_ops.borrow().len();
        let total = current.len() + finished;

        if total == 0 {
            return 0.0;
        }

        let sum: f64 = current.iter().map(|t| t.progress()).sum::<f64>() + finished as f64;
        sum / total as f64
    }
}

/// A transaction handle. Trackers are kept in the order their entries
/// got added.
pub struct Transaction {
    name: String,
    trackers: RefCell<IndexMap<String, Rc<EntryTracker>>>,
    tasks: RefCell<Vec<Rc<TransactionTask>>>,
    finished: Cell<bool>,
    events: Subject<TransactionEvent>,
}

impl Transaction {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            trackers: RefCell::default(),
            tasks: RefCell::default(),
            finished: Cell::new(false),
            events: Subject::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn add_entry(&self, entry: Entry, kind: TransactionKind) -> Rc<EntryTracker> {
        let entry_id = entry.id().to_string();

        let tracker = {
            let mut trackers = self.trackers.borrow_mut();
            if let Some(tracker) = trackers.get(&entry_id) {
                warn!("Entry {:?} is already part of the transaction", entry_id);
                return tracker.clone();
            }

            let tracker = Rc::new(EntryTracker::new(Some(Rc::new(entry)), kind));
            trackers.insert(entry_id.clone(), tracker.clone());
            tracker
        };

        self.events.emit(&TransactionEvent::TrackerAdded { entry_id });
        tracker
    }

    pub fn tracker(&self, entry_id: &str) -> Option<Rc<EntryTracker>> {
        self.trackers.borrow().get(entry_id).cloned()
    }

    pub fn trackers(&self) -> Vec<Rc<EntryTracker>> {
        self.trackers.borrow().values().cloned().collect()
    }

    pub fn tasks(&self) -> Vec<Rc<TransactionTask>> {
        self.tasks.borrow().clone()
    }

    /// Starts a task on behalf of the entry with `entry_id`. Tasks of
    /// unknown entries are only part of the transaction's task list.
    pub fn start_task(&self, entry_id: &str, op: Option<OpPayload>) -> Rc<TransactionTask> {
        let task = Rc::new(TransactionTask::new(op));
        self.tasks.borrow_mut().push(task.clone());

        match self.tracker(entry_id) {
            Some(tracker) => tracker.current_ops.borrow_mut().push(task.clone()),
            None => debug!("Task {} has no tracked entry {:?}", task.uuid(), entry_id),
        }

        self.events.emit(&TransactionEvent::TaskStarted {
            uuid: task.uuid().to_string(),
        });
        task
    }

    pub fn update_task(&self, task: &TransactionTask, progress: f64, bytes_transferred: u64) {
        task.progress.set(progress.clamp(0.0, 1.0));
        task.bytes_transferred.set(bytes_transferred);

        self.events.emit(&TransactionEvent::TaskUpdated {
            uuid: task.uuid().to_string(),
        });
    }

    /// Marks `task` as finished, failed if `error` is set, and moves it to
    /// the finished operations of its entry.
    pub fn finish_task(&self, task: &Rc<TransactionTask>, error: Option<&str>) {
        if task.is_finished() {
            warn!("Task {} is already finished", task.uuid());
            return;
        }

        task.finished.set(true);
        if error.is_none() {
            task.progress.set(1.0);
        }
        *task.error.borrow_mut() = error.map(str::to_string);

        for tracker in self.trackers.borrow().values() {
            let mut current = tracker.current_ops.borrow_mut();
            if let Some(pos) = current.iter().position(|t| Rc::ptr_eq(t, task)) {
                current.remove(pos);
                tracker.finished_ops.borrow_mut().push(task.clone());
                break;
            }
        }

        self.events.emit(&TransactionEvent::TaskFinished {
            uuid: task.uuid().to_string(),
        });
    }

    pub fn finish(&self) {
        if self.finished.replace(true) {
            return;
        }

        self.events.emit(&TransactionEvent::Finished);
    }

    pub fn is_finished(&self) -> bool {
        self.finished.get()
    }

    /// Combined progress of all tasks, between 0.0 and 1.0
    pub fn progress(&self) -> f64 {
        let tasks = self.tasks.borrow();
        if tasks.is_empty() {
            return if self.is_finished() { 1.0 } else { 0.0 };
        }

        tasks.iter().map(|t| t.progress()).sum::<f64>() / tasks.len() as f64
    }

    pub fn download_size(&self) -> u64 {
        self.tasks
            .borrow()
            .iter()
            .filter_map(|t| t.op().map(|op| op.download_size))
            .sum()
    }

    pub fn bytes_transferred(&self) -> u64 {
        self.tasks
            .borrow()
            .iter()
            .map(|t| t.bytes_transferred())
            .sum()
    }
}

impl Observable<TransactionEvent> for Transaction {
    fn subscribe(&self, observer: Box<dyn Fn(&TransactionEvent)>) -> Subscription {
        self.events.subscribe(observer)
    }
}

impl fmt::Debug for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transaction")
            .field("name", &self.name)
            .field("trackers", &self.trackers.borrow().len())
            .field("tasks", &self.tasks.borrow().len())
            .field("finished", &self.finished.get())
            .finish()
    }
}

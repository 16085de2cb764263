// Storefront - task.rs
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

/// The backend operation a task performs.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OpPayload {
    /// Usually the ref the operation works on, eg. `app/org.gnome.Foo/x86_64/stable`
    pub name: String,
    pub download_size: u64,
    pub installed_size: u64,
}

impl OpPayload {
    pub fn new(name: &str, download_size: u64, installed_size: u64) -> Self {
        Self {
            name: name.to_string(),
            download_size,
            installed_size,
        }
    }
}

/// One unit of work within a transaction.
#[derive(Debug)]
pub struct TransactionTask {
    uuid: String,
    op: Option<OpPayload>,

    pub(super) progress: Cell<f64>,
    pub(super) bytes_transferred: Cell<u64>,
    pub(super) finished: Cell<bool>,
    pub(super) error: RefCell<Option<String>>,
}

impl TransactionTask {
    pub fn new(op: Option<OpPayload>) -> Self {
        Self {
            uuid: uuid::Uuid::new_v4().to_string(),
            op,
            progress: Cell::new(0.0),
            bytes_transferred: Cell::new(0),
            finished: Cell::new(false),
            error: RefCell::default(),
        }
    }

    pub fn uuid(&self) -> &str {
        &self.uuid
    }

    pub fn op(&self) -> Option<&OpPayload> {
        self.op.as_ref()
    }

    /// Progress between 0.0 and 1.0
    pub fn progress(&self) -> f64 {
        self.progress.get()
    }

    pub fn bytes_transferred(&self) -> u64 {
        self.bytes_transferred.get()
    }

    pub fn is_finished(&self) -> bool {
        self.finished.get()
    }

    pub fn error(&self) -> Option<String> {
        self.error.borrow().clone()
    }

    pub fn has_error(&self) -> bool {
        self.error.borrow().is_some()
    }
}

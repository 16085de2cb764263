// Storefront - mod.rs
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

mod bindings;
pub mod callbacks;
mod entry;
mod resolve;
mod task;
#[allow(clippy::module_inception)]
mod transaction;
mod view_state;

pub use bindings::{EventBindings, Handler};
pub use entry::{Entry, EntryGroup, EntryKind, EntrySource, Icon};
pub use resolve::{
    generic_id_from_ref, resolve_group_from_entry, ApplicationFactory, ApplicationMap, StateInfo,
    WindowContext,
};
pub use task::{OpPayload, TransactionTask};
pub use transaction::{EntryTracker, Transaction, TransactionEvent, TransactionKind};
pub use view_state::{
    RowContext, Section, TransactionViewEvent, TransactionViewState, ViewUpdate, ENTRY_CLICKED,
};

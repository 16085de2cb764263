// Storefront - observable.rs
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

//! Explicit observer registration, used instead of toolkit signals by the
//! toolkit-independent parts of the crate.
//!
//! Everything here is single threaded: observers get invoked synchronously
//! on the thread which emits the event.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

pub type Observer<E> = Rc<dyn Fn(&E)>;

/// Something which can be observed for events of type `E`.
pub trait Observable<E> {
    /// Registers `observer`. It stays registered until the returned
    /// [Subscription] gets unsubscribed or dropped.
    fn subscribe(&self, observer: Box<dyn Fn(&E)>) -> Subscription;
}

/// Disposable handle of a registered observer.
#[must_use = "dropping a subscription detaches the observer immediately"]
pub struct Subscription {
    cancel: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    pub fn new(cancel: impl FnOnce() + 'static) -> Self {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }

    /// A subscription which isn't attached to anything.
    pub fn detached() -> Self {
        Self { cancel: None }
    }

    /// Combines multiple subscriptions into one handle.
    pub fn merge(subscriptions: Vec<Subscription>) -> Self {
        Self::new(move || drop(subscriptions))
    }

    pub fn unsubscribe(mut self) {
        self.cancel();
    }

    fn cancel(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.cancel();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("attached", &self.cancel.is_some())
            .finish()
    }
}

struct Inner<E> {
    next_id: Cell<u64>,
    observers: RefCell<Vec<(u64, Observer<E>)>>,
}

/// A list of observers, notified in subscription order.
pub struct Subject<E> {
    inner: Rc<Inner<E>>,
}

impl<E: 'static> Subject<E> {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(Inner {
                next_id: Cell::new(0),
                observers: RefCell::new(Vec::new()),
            }),
        }
    }

    pub fn emit(&self, event: &E) {
        emit(&self.inner, event);
    }

    pub fn observer_count(&self) -> usize {
        self.inner.observers.borrow().len()
    }

    pub fn downgrade(&self) -> WeakSubject<E> {
        WeakSubject {
            inner: Rc::downgrade(&self.inner),
        }
    }
}

impl<E: 'static> Observable<E> for Subject<E> {
    fn subscribe(&self, observer: Box<dyn Fn(&E)>) -> Subscription {
        let id = self.inner.next_id.get();
        self.inner.next_id.set(id + 1);
        self.inner
            .observers
            .borrow_mut()
            .push((id, Rc::from(observer)));

        let weak = Rc::downgrade(&self.inner);
        Subscription::new(move || {
            if let Some(inner) = weak.upgrade() {
                inner.observers.borrow_mut().retain(|(i, _)| *i != id);
            }
        })
    }
}

impl<E: 'static> Default for Subject<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> fmt::Debug for Subject<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subject")
            .field("observers", &self.inner.observers.borrow().len())
            .finish()
    }
}

/// Non-owning reference to a [Subject].
pub struct WeakSubject<E> {
    inner: Weak<Inner<E>>,
}

impl<E: 'static> WeakSubject<E> {
    /// Emits `event` if the subject is still alive. Returns whether it was.
    pub fn emit(&self, event: &E) -> bool {
        match self.inner.upgrade() {
            Some(inner) => {
                emit(&inner, event);
                true
            }
            None => false,
        }
    }
}

impl<E> Clone for WeakSubject<E> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

fn emit<E>(inner: &Inner<E>, event: &E) {
    // Observers may subscribe or unsubscribe while being notified
    let observers: Vec<Observer<E>> = inner
        .observers
        .borrow()
        .iter()
        .map(|(_, observer)| observer.clone())
        .collect();

    for observer in observers {
        observer(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counter(subject: &Subject<u32>) -> (Rc<Cell<u32>>, Subscription) {
        let count = Rc::new(Cell::new(0));
        let c = count.clone();
        let sub = subject.subscribe(Box::new(move |value| c.set(c.get() + value)));
        (count, sub)
    }

    #[test]
    fn emit_reaches_all_observers() {
        let subject = Subject::new();
        let (a, _sa) = counter(&subject);
        let (b, _sb) = counter(&subject);

        subject.emit(&2);
        subject.emit(&3);

        assert_eq!(a.get(), 5);
        assert_eq!(b.get(), 5);
        assert_eq!(subject.observer_count(), 2);
    }

    #[test]
    fn dropping_subscription_detaches() {
        let subject = Subject::new();
        let (a, sa) = counter(&subject);
        let (b, sb) = counter(&subject);

        drop(sa);
        subject.emit(&1);
        sb.unsubscribe();
        subject.emit(&1);

        assert_eq!(a.get(), 0);
        assert_eq!(b.get(), 1);
        assert_eq!(subject.observer_count(), 0);
    }

    #[test]
    fn notification_order_follows_subscription_order() {
        let subject: Subject<()> = Subject::new();
        let log = Rc::new(RefCell::new(Vec::new()));

        let subs: Vec<Subscription> = (0..3)
            .map(|i| {
                let log = log.clone();
                subject.subscribe(Box::new(move |_| log.borrow_mut().push(i)))
            })
            .collect();

        subject.emit(&());
        assert_eq!(*log.borrow(), vec![0, 1, 2]);
        drop(subs);
    }

    #[test]
    fn observer_can_unsubscribe_itself_during_emit() {
        let subject: Subject<()> = Subject::new();
        let slot: Rc<RefCell<Option<Subscription>>> = Rc::new(RefCell::new(None));

        let s = slot.clone();
        let sub = subject.subscribe(Box::new(move |_| {
            s.borrow_mut().take();
        }));
        *slot.borrow_mut() = Some(sub);

        subject.emit(&());
        assert_eq!(subject.observer_count(), 0);
    }

    #[test]
    fn weak_subject_outlived_by_subscription() {
        let subject = Subject::new();
        let weak = subject.downgrade();
        let (_count, sub) = counter(&subject);

        assert!(weak.emit(&1));
        drop(subject);
        assert!(!weak.emit(&1));

        // Detaching from a dead subject is a no-op
        sub.unsubscribe();
    }

    #[test]
    fn merged_subscription_detaches_everything() {
        let first = Subject::new();
        let second = Subject::new();
        let (_a, sa) = counter(&first);
        let (_b, sb) = counter(&second);

        let merged = Subscription::merge(vec![sa, sb]);
        assert_eq!(first.observer_count() + second.observer_count(), 2);

        drop(merged);
        assert_eq!(first.observer_count() + second.observer_count(), 0);
    }
}

// Storefront - bindings.rs
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

use std::fmt;

pub type Handler<C> = Box<dyn Fn(&C)>;

/// Table of `{event name, handler}` pairs, built in code.
pub struct EventBindings<C> {
    bindings: Vec<(&'static str, Handler<C>)>,
}

impl<C> EventBindings<C> {
    pub fn new() -> Self {
        Self {
            bindings: Vec::new(),
        }
    }

    pub fn bind(mut self, event: &'static str, handler: impl Fn(&C) + 'static) -> Self {
        self.bindings.push((event, Box::new(handler)));
        self
    }

    /// Runs every handler bound to `event`. Returns whether there was one.
    pub fn dispatch(&self, event: &str, context: &C) -> bool {
        let mut handled = false;

        for (_, handler) in self.bindings.iter().filter(|(name, _)| *name == event) {
            handler(context);
            handled = true;
        }

        if !handled {
            warn!("No handler bound to event {:?}", event);
        }
        handled
    }

    pub fn events(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.bindings.iter().map(|(name, _)| *name)
    }
}

impl<C> Default for EventBindings<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> fmt::Debug for EventBindings<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.events()).finish()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;

    #[test]
    fn dispatch_runs_matching_handlers() {
        let bindings = EventBindings::new()
            .bind("add", |c: &Cell<i32>| c.set(c.get() + 1))
            .bind("add", |c: &Cell<i32>| c.set(c.get() + 10))
            .bind("reset", |c: &Cell<i32>| c.set(0));

        let counter = Cell::new(0);
        assert!(bindings.dispatch("add", &counter));
        assert_eq!(counter.get(), 11);

        assert!(bindings.dispatch("reset", &counter));
        assert_eq!(counter.get(), 0);

        assert!(!bindings.dispatch("unknown", &counter));
        assert_eq!(bindings.events().collect::<Vec<_>>(), vec!["add", "add", "reset"]);
    }
}

// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Trailing-edge debounce.
//!
//! Every [`Debouncer::trigger`] cancels the pending call and arms a new one
//! `delay` from now, so a burst of keystrokes produces exactly one call, after
//! the user stops typing. The argument of the last trigger is the one the
//! action sees.
//!
//! ```text
//! trigger:  t=0    t=100  t=200
//! timer:    [--x   [--x   [--------400ms--------] fire @ 600
//! ```

use crate::scheduler::{Scheduler, TimerId};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

/// Coalesces rapid triggers into one delayed call of `action`.
///
/// Holds at most one pending timer. Not `Clone`; share it behind an `Rc` when
/// several event handlers need to trigger it.
pub struct Debouncer<A, S: Scheduler> {
    action: Rc<dyn Fn(A)>,
    delay: Duration,
    scheduler: S,
    pending: Rc<Cell<Option<TimerId>>>,
    // The argument waiting to be delivered with the pending call.
    latest: Rc<RefCell<Option<A>>>,
}

impl<A: 'static, S: Scheduler> Debouncer<A, S> {
    pub fn new(action: impl Fn(A) + 'static, delay: Duration, scheduler: S) -> Self {
        Self {
            action: Rc::new(action),
            delay,
            scheduler,
            pending: Rc::new(Cell::new(None)),
            latest: Rc::new(RefCell::new(None)),
        }
    }

    /// Restart the quiet period, remembering `arg` for the eventual call.
    pub fn trigger(&self, arg: A) {
        if let Some(id) = self.pending.take() {
            self.scheduler.clear_timeout(id);
        }
        *self.latest.borrow_mut() = Some(arg);

        let action = Rc::clone(&self.action);
        let pending = Rc::clone(&self.pending);
        let latest = Rc::clone(&self.latest);
        let id = self.scheduler.set_timeout(
            self.delay,
            Box::new(move || {
                pending.set(None);
                // Take before calling: the action may trigger again.
                let arg = latest.borrow_mut().take();
                if let Some(arg) = arg {
                    action(arg);
                }
            }),
        );
        self.pending.set(Some(id));
    }

    /// Drop the pending call, if any.
    pub fn cancel(&self) {
        if let Some(id) = self.pending.take() {
            self.scheduler.clear_timeout(id);
        }
        self.latest.borrow_mut().take();
    }

    pub fn is_pending(&self) -> bool {
        self.pending.get().is_some()
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }
}

// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Wait for the index library to show up.
//!
//! The library is loaded by its own `<script>` tag, which may finish before or
//! after this module starts. [`wait_until_ready`] checks a probe, and while the
//! probe says no, yields to the event loop through a zero-delay timer and
//! checks again. A timer (a macrotask) rather than a bare re-wake matters in
//! the browser: microtasks run before the pending script gets a chance to
//! execute, so re-waking immediately would spin without ever letting the
//! library load.
//!
//! Without a timeout this waits forever, exactly like polling a global in a
//! loop. With one it resolves to [`WidgetError::LibraryUnavailable`].

use crate::error::WidgetError;
use crate::scheduler::Scheduler;
use std::cell::Cell;
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use std::task::{Context, Poll};
use std::time::Duration;
use tracing::debug;

/// Future returned by [`wait_until_ready`].
pub struct WaitReady<P, S> {
    probe: P,
    scheduler: S,
    timeout: Option<Duration>,
    started: Option<Duration>,
    // True while a wake-up tick is queued, so spurious polls don't stack ticks.
    armed: Rc<Cell<bool>>,
    ticks: u64,
}

/// Resolve once `probe` returns true, re-checking once per event-loop tick.
pub fn wait_until_ready<P, S>(probe: P, scheduler: S, timeout: Option<Duration>) -> WaitReady<P, S>
where
    P: Fn() -> bool,
    S: Scheduler,
{
    WaitReady {
        probe,
        scheduler,
        timeout,
        started: None,
        armed: Rc::new(Cell::new(false)),
        ticks: 0,
    }
}

impl<P, S> Future for WaitReady<P, S>
where
    P: Fn() -> bool + Unpin,
    S: Scheduler + Unpin,
{
    type Output = Result<(), WidgetError>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.get_mut();
        let now = this.scheduler.now();
        let started = *this.started.get_or_insert(now);

        if (this.probe)() {
            debug!(ticks = this.ticks, "search library ready");
            return Poll::Ready(Ok(()));
        }

        let waited = now.saturating_sub(started);
        if let Some(timeout) = this.timeout {
            if waited >= timeout {
                return Poll::Ready(Err(WidgetError::LibraryUnavailable {
                    waited_ms: waited.as_millis() as u64,
                }));
            }
        }

        if !this.armed.get() {
            this.armed.set(true);
            this.ticks += 1;
            let armed = Rc::clone(&this.armed);
            let waker = cx.waker().clone();
            this.scheduler.set_timeout(
                Duration::ZERO,
                Box::new(move || {
                    armed.set(false);
                    waker.wake();
                }),
            );
        }

        Poll::Pending
    }
}

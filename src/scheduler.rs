// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The timer source the widget runs on.
//!
//! In the browser this is `setTimeout`/`clearTimeout` on the window; in tests
//! it is [`ManualScheduler`](crate::testing::ManualScheduler), a virtual clock
//! that only moves when told to. Keeping the debouncer and the readiness wait
//! generic over this trait is what lets their timing be asserted to the
//! millisecond without sleeping.

use std::time::Duration;

/// Handle to a scheduled task, valid until it runs or is cancelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(pub u64);

/// A single-threaded deferred-task queue.
pub trait Scheduler {
    /// Time elapsed since the scheduler's origin.
    fn now(&self) -> Duration;

    /// Run `task` once after `delay`. A zero delay still defers to the next
    /// turn of the event loop; it never runs inline.
    fn set_timeout(&self, delay: Duration, task: Box<dyn FnOnce()>) -> TimerId;

    /// Cancel a pending task. Cancelling a task that already ran is a no-op.
    fn clear_timeout(&self, id: TimerId);
}

//! Capabilities an effect needs from its environment.
//!
//! Effects never touch a platform API directly. They register callbacks with
//! these traits and keep the returned [`TaskId`]s in a [`Subscriptions`] set,
//! which cancels everything when the effect is dropped. The environment is
//! single-threaded: callbacks are never run concurrently, but a callback may
//! register or cancel tasks (including itself) while it runs.

use crate::geometry::Size;
use glam::Vec2;
use instant::Instant;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// Identifies one registration with a host.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskId(u64);

impl TaskId {
    /// Allocate an id that is unique across every host in the process.
    pub fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        TaskId(NEXT.fetch_add(1, Ordering::Relaxed))
    }

    pub fn raw(self) -> u64 {
        self.0
    }
}

pub type Callback = Box<dyn FnMut()>;

/// Anything a registration can be withdrawn from.
///
/// Cancelling an unknown or already cancelled id is a no-op.
pub trait Cancel {
    fn cancel(&self, task: TaskId);
}

pub trait Scheduler: Cancel {
    fn now(&self) -> Instant;
    /// Run `callback` once per display frame until cancelled.
    fn every_frame(&self, callback: Callback) -> TaskId;
    /// Run `callback` every `period` until cancelled.
    fn every(&self, period: Duration, callback: Callback) -> TaskId;
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PointerSignal {
    /// Pointer (mouse or first touch point) at a client-space position.
    Move(Vec2),
    /// Pointer left the element the notifier is attached to.
    Leave,
}

pub trait PointerNotifier: Cancel {
    fn on_pointer(&self, callback: Box<dyn FnMut(PointerSignal)>) -> TaskId;
}

pub trait HoverNotifier: Cancel {
    /// `true` on enter, `false` on leave.
    fn on_hover(&self, callback: Box<dyn FnMut(bool)>) -> TaskId;
}

pub trait VisibilityNotifier: Cancel {
    fn on_enter_view(&self, callback: Callback) -> TaskId;
}

pub trait ResizeNotifier: Cancel {
    fn on_resize(&self, callback: Box<dyn FnMut(Size)>) -> TaskId;
}

/// Owned set of live registrations. Dropping it cancels them all.
#[derive(Default)]
pub struct Subscriptions {
    live: Vec<(TaskId, Box<dyn FnOnce()>)>,
}

impl Subscriptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remember `task`, withdrawing it from `host` on cancel.
    pub fn track<C>(&mut self, host: &Rc<C>, task: TaskId)
    where
        C: Cancel + ?Sized + 'static,
    {
        let host = host.clone();
        self.live.push((task, Box::new(move || host.cancel(task))));
    }

    /// Cancel a single task. Returns false if it was not tracked here.
    pub fn cancel(&mut self, task: TaskId) -> bool {
        match self.live.iter().position(|(id, _)| *id == task) {
            Some(i) => {
                let (_, cancel) = self.live.swap_remove(i);
                cancel();
                true
            }
            None => false,
        }
    }

    pub fn cancel_all(&mut self) {
        for (_, cancel) in self.live.drain(..) {
            cancel();
        }
    }

    pub fn contains(&self, task: TaskId) -> bool {
        self.live.iter().any(|(id, _)| *id == task)
    }

    pub fn len(&self) -> usize {
        self.live.len()
    }

    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }
}

impl Drop for Subscriptions {
    fn drop(&mut self) {
        self.cancel_all();
    }
}

//! Cancel-safe timers.
//!
//! Every scheduled effect hands back a [`TimerHandle`]. Cancelling the handle
//! (or dropping it) guarantees the effect never runs afterwards, no matter
//! whether the host has already queued the callback. Effects only ever see
//! component state through weak references, so a timer that outlives its
//! owner fires into nothing.

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::rc::{Rc, Weak};

use gloo_timers::callback::{Interval, Timeout};

pub trait Scheduler {
    /// Milliseconds on the scheduler's clock.
    fn now(&self) -> f64;

    /// Runs `effect` once after `delay_ms`.
    fn schedule(&self, delay_ms: u32, effect: Box<dyn FnOnce()>) -> TimerHandle;

    /// Runs `effect` every `interval_ms` until the handle is cancelled.
    fn schedule_repeating(&self, interval_ms: u32, effect: Box<dyn FnMut()>) -> TimerHandle;
}

enum Task {
    Once(Box<dyn FnOnce()>),
    Repeating(Box<dyn FnMut()>),
    Spent,
}

struct TimerState {
    cancelled: Cell<bool>,
    task: RefCell<Task>,
    release: RefCell<Option<Box<dyn FnOnce()>>>,
}

impl TimerState {
    fn fire(&self) {
        if self.cancelled.get() {
            return;
        }
        // The task is moved out before running so the effect may freely
        // cancel its own handle or schedule new timers.
        let task = std::mem::replace(&mut *self.task.borrow_mut(), Task::Spent);
        match task {
            Task::Once(effect) => effect(),
            Task::Repeating(mut effect) => {
                effect();
                if !self.cancelled.get() {
                    *self.task.borrow_mut() = Task::Repeating(effect);
                }
            }
            Task::Spent => {}
        }
    }

    fn cancel(&self) {
        if self.cancelled.replace(true) {
            return;
        }
        if let Ok(mut task) = self.task.try_borrow_mut() {
            *task = Task::Spent;
        }
        let release = self.release.borrow_mut().take();
        if let Some(release) = release {
            release();
        }
    }

    fn is_active(&self) -> bool {
        !self.cancelled.get() && !matches!(*self.task.borrow(), Task::Spent)
    }
}

/// Owner of one scheduled effect. Dropping the handle cancels the timer.
#[must_use = "dropping a TimerHandle cancels its timer"]
pub struct TimerHandle {
    state: Rc<TimerState>,
}

impl TimerHandle {
    fn new(task: Task) -> Self {
        Self {
            state: Rc::new(TimerState {
                cancelled: Cell::new(false),
                task: RefCell::new(task),
                release: RefCell::new(None),
            }),
        }
    }

    fn downgrade(&self) -> Weak<TimerState> {
        Rc::downgrade(&self.state)
    }

    /// Hook run exactly once when the handle is cancelled; used to tear down
    /// the host timer.
    fn on_release(&self, release: impl FnOnce() + 'static) {
        *self.state.release.borrow_mut() = Some(Box::new(release));
    }

    /// Idempotent. A no-op once a one-shot timer has fired.
    pub fn cancel(&self) {
        self.state.cancel();
    }

    /// True while the effect can still run.
    pub fn is_active(&self) -> bool {
        self.state.is_active()
    }
}

impl Drop for TimerHandle {
    fn drop(&mut self) {
        self.state.cancel();
    }
}

impl std::fmt::Debug for TimerHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TimerHandle")
            .field("active", &self.is_active())
            .finish()
    }
}

/// Timers backed by the browser's `setTimeout` / `setInterval`.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserScheduler;

impl BrowserScheduler {
    pub fn shared() -> Rc<dyn Scheduler> {
        Rc::new(BrowserScheduler)
    }
}

impl Scheduler for BrowserScheduler {
    fn now(&self) -> f64 {
        web_sys::js_sys::Date::now()
    }

    fn schedule(&self, delay_ms: u32, effect: Box<dyn FnOnce()>) -> TimerHandle {
        let handle = TimerHandle::new(Task::Once(effect));
        let state = handle.downgrade();
        let timeout = Timeout::new(delay_ms, move || {
            if let Some(state) = state.upgrade() {
                state.fire();
            }
        });
        // Dropping a gloo Timeout clears it.
        handle.on_release(move || drop(timeout));
        handle
    }

    fn schedule_repeating(&self, interval_ms: u32, effect: Box<dyn FnMut()>) -> TimerHandle {
        let handle = TimerHandle::new(Task::Repeating(effect));
        let state = handle.downgrade();
        let interval = Interval::new(interval_ms, move || {
            if let Some(state) = state.upgrade() {
                state.fire();
            }
        });
        handle.on_release(move || drop(interval));
        handle
    }
}

struct Pending {
    state: Weak<TimerState>,
    every: Option<u64>,
}

#[derive(Default)]
struct VirtualClock {
    now: u64,
    seq: u64,
    queue: BTreeMap<(u64, u64), Pending>,
}

impl VirtualClock {
    fn enqueue(&mut self, due: u64, pending: Pending) {
        self.seq += 1;
        self.queue.insert((due, self.seq), pending);
    }
}

/// Deterministic scheduler driven by [`VirtualScheduler::advance`]. Timers
/// due at the same instant fire in the order they were scheduled.
#[derive(Clone, Default)]
pub struct VirtualScheduler {
    clock: Rc<RefCell<VirtualClock>>,
}

impl VirtualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shared(&self) -> Rc<dyn Scheduler> {
        Rc::new(self.clone())
    }

    /// Moves the clock forward, firing every timer that comes due on the way.
    pub fn advance(&self, ms: u64) {
        let target = self.clock.borrow().now + ms;
        loop {
            let (due, pending) = {
                let mut clock = self.clock.borrow_mut();
                let Some((key, pending)) = clock.queue.pop_first() else {
                    break;
                };
                if key.0 > target {
                    clock.queue.insert(key, pending);
                    break;
                }
                clock.now = key.0;
                (key.0, pending)
            };

            let Some(state) = pending.state.upgrade() else {
                continue;
            };
            state.fire();
            if let Some(every) = pending.every {
                if state.is_active() {
                    self.clock.borrow_mut().enqueue(due + every, pending);
                }
            }
        }
        let mut clock = self.clock.borrow_mut();
        clock.now = clock.now.max(target);
    }

    /// Number of timers that can still fire.
    pub fn pending(&self) -> usize {
        self.clock
            .borrow()
            .queue
            .values()
            .filter(|p| p.state.upgrade().map_or(false, |s| s.is_active()))
            .count()
    }
}

impl Scheduler for VirtualScheduler {
    fn now(&self) -> f64 {
        self.clock.borrow().now as f64
    }

    fn schedule(&self, delay_ms: u32, effect: Box<dyn FnOnce()>) -> TimerHandle {
        let handle = TimerHandle::new(Task::Once(effect));
        let mut clock = self.clock.borrow_mut();
        let due = clock.now + u64::from(delay_ms);
        clock.enqueue(
            due,
            Pending {
                state: handle.downgrade(),
                every: None,
            },
        );
        handle
    }

    fn schedule_repeating(&self, interval_ms: u32, effect: Box<dyn FnMut()>) -> TimerHandle {
        let handle = TimerHandle::new(Task::Repeating(effect));
        // A zero interval would spin forever inside `advance`.
        let every = u64::from(interval_ms.max(1));
        let mut clock = self.clock.borrow_mut();
        let due = clock.now + every;
        clock.enqueue(
            due,
            Pending {
                state: handle.downgrade(),
                every: Some(every),
            },
        );
        handle
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counter() -> (Rc<Cell<u32>>, impl Fn() -> Box<dyn FnOnce()>) {
        let hits = Rc::new(Cell::new(0));
        let make = {
            let hits = hits.clone();
            move || {
                let hits = hits.clone();
                Box::new(move || hits.set(hits.get() + 1)) as Box<dyn FnOnce()>
            }
        };
        (hits, make)
    }

    #[test]
    fn fires_once_when_due() {
        let clock = VirtualScheduler::new();
        let (hits, make) = counter();
        let handle = clock.schedule(100, make());

        clock.advance(99);
        assert_eq!(hits.get(), 0);
        assert!(handle.is_active());

        clock.advance(1);
        assert_eq!(hits.get(), 1);
        assert!(!handle.is_active());

        clock.advance(1_000);
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn cancel_before_due_suppresses_effect() {
        let clock = VirtualScheduler::new();
        let (hits, make) = counter();
        let handle = clock.schedule(50, make());
        handle.cancel();
        clock.advance(100);
        assert_eq!(hits.get(), 0);
        assert_eq!(clock.pending(), 0);
    }

    #[test]
    fn cancel_is_idempotent_and_safe_after_firing() {
        let clock = VirtualScheduler::new();
        let (hits, make) = counter();
        let handle = clock.schedule(10, make());
        clock.advance(10);
        handle.cancel();
        handle.cancel();
        clock.advance(10);
        assert_eq!(hits.get(), 1);

        let early = clock.schedule(10, make());
        early.cancel();
        early.cancel();
        clock.advance(20);
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn dropping_the_handle_cancels() {
        let clock = VirtualScheduler::new();
        let (hits, make) = counter();
        drop(clock.schedule(10, make()));
        clock.advance(10);
        assert_eq!(hits.get(), 0);
    }

    #[test]
    fn same_instant_timers_keep_schedule_order() {
        let clock = VirtualScheduler::new();
        let order = Rc::new(RefCell::new(Vec::new()));
        let handles: Vec<_> = (0..3)
            .map(|n| {
                let order = order.clone();
                clock.schedule(5, Box::new(move || order.borrow_mut().push(n)))
            })
            .collect();
        clock.advance(5);
        assert_eq!(*order.borrow(), vec![0, 1, 2]);
        drop(handles);
    }

    #[test]
    fn repeating_timer_can_stop_itself() {
        let clock = VirtualScheduler::new();
        let ticks = Rc::new(Cell::new(0));
        let slot: Rc<RefCell<Option<TimerHandle>>> = Rc::new(RefCell::new(None));

        let handle = {
            let ticks = ticks.clone();
            let slot = Rc::downgrade(&slot);
            clock.schedule_repeating(
                30,
                Box::new(move || {
                    ticks.set(ticks.get() + 1);
                    if ticks.get() == 3 {
                        if let Some(slot) = slot.upgrade() {
                            slot.borrow_mut().take();
                        }
                    }
                }),
            )
        };
        *slot.borrow_mut() = Some(handle);

        clock.advance(300);
        assert_eq!(ticks.get(), 3);
        assert!(slot.borrow().is_none());
        assert_eq!(clock.pending(), 0);
    }

    #[test]
    fn effects_observe_the_due_time() {
        let clock = VirtualScheduler::new();
        let seen = Rc::new(Cell::new(0.0));
        let _handle = {
            let seen = seen.clone();
            let reader = clock.clone();
            clock.schedule(250, Box::new(move || seen.set(reader.now())))
        };
        clock.advance(1_000);
        assert_eq!(seen.get(), 250.0);
        assert_eq!(clock.now(), 1_000.0);
    }
}

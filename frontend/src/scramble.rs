//! Scramble-text reveal: the label starts as noise and settles into the real
//! text from left to right.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::config::SCRAMBLE_TICK_MS;
use crate::error::UiError;
use crate::timer::{Scheduler, TimerHandle};

pub const HERO_ALPHABET: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789!@#$%^&*";
pub const PRICE_ALPHABET: &str = "0123456789_-%$#@";

#[derive(Clone, Debug, PartialEq)]
pub struct ScrambleSettings {
    step_per_tick: f64,
    tick_interval_ms: u32,
    alphabet: Vec<char>,
}

impl ScrambleSettings {
    pub fn new(step_per_tick: f64, tick_interval_ms: u32, alphabet: &str) -> Result<Self, UiError> {
        if !(step_per_tick > 0.0 && step_per_tick <= 1.0) {
            return Err(UiError::InvalidScramble("step must be in (0, 1]"));
        }
        if tick_interval_ms == 0 {
            return Err(UiError::InvalidScramble("tick interval must be positive"));
        }
        let alphabet: Vec<char> = alphabet.chars().collect();
        if alphabet.is_empty() {
            return Err(UiError::InvalidScramble("alphabet is empty"));
        }
        Ok(Self {
            step_per_tick,
            tick_interval_ms,
            alphabet,
        })
    }

    /// Hero titles: one character settles every three ticks.
    pub fn hero() -> Self {
        Self {
            step_per_tick: 1.0 / 3.0,
            tick_interval_ms: SCRAMBLE_TICK_MS,
            alphabet: HERO_ALPHABET.chars().collect(),
        }
    }

    /// Price tags on pricing cards: one character every two ticks.
    pub fn price() -> Self {
        Self {
            step_per_tick: 0.5,
            tick_interval_ms: SCRAMBLE_TICK_MS,
            alphabet: PRICE_ALPHABET.chars().collect(),
        }
    }

    pub fn tick_interval_ms(&self) -> u32 {
        self.tick_interval_ms
    }
}

/// Pure reveal state. Idle state shows the real text.
#[derive(Clone, Debug, PartialEq)]
pub struct ScrambleState {
    target: Vec<char>,
    display: String,
    revealed: f64,
    running: bool,
}

impl ScrambleState {
    pub fn new(target: &str) -> Self {
        let target: Vec<char> = target.chars().collect();
        Self {
            revealed: target.len() as f64,
            display: target.iter().collect(),
            target,
            running: false,
        }
    }

    pub fn display(&self) -> &str {
        &self.display
    }

    pub fn revealed(&self) -> f64 {
        self.revealed
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn target(&self) -> String {
        self.target.iter().collect()
    }

    /// Rewinds to zero revealed characters. `display` keeps its current text
    /// until the first tick.
    pub fn reset(&mut self) {
        self.revealed = 0.0;
        self.running = !self.target.is_empty();
    }

    /// Snaps to the settled text and stops.
    pub fn settle(&mut self) {
        self.revealed = self.target.len() as f64;
        self.display = self.target.iter().collect();
        self.running = false;
    }

    pub fn retarget(&mut self, target: &str) {
        self.target = target.chars().collect();
        self.settle();
    }

    /// Advances one tick. Returns `true` on the tick that finishes the reveal.
    pub fn advance<R: Rng>(&mut self, settings: &ScrambleSettings, rng: &mut R) -> bool {
        if !self.running {
            return false;
        }
        self.revealed += settings.step_per_tick;
        if self.revealed >= self.target.len() as f64 {
            self.settle();
            return true;
        }
        let settled = self.revealed.floor() as usize;
        self.display = self
            .target
            .iter()
            .enumerate()
            .map(|(i, &c)| {
                if i < settled {
                    c
                } else {
                    settings.alphabet[rng.gen_range(0..settings.alphabet.len())]
                }
            })
            .collect();
        false
    }
}

struct Shared {
    state: ScrambleState,
    settings: ScrambleSettings,
    rng: SmallRng,
    timer: Option<TimerHandle>,
    listener: Option<Rc<dyn Fn()>>,
}

/// Drives a [`ScrambleState`] off a repeating timer. At most one tick loop
/// exists per animator; dropping the animator cancels it.
pub struct ScrambleAnimator {
    shared: Rc<RefCell<Shared>>,
    scheduler: Rc<dyn Scheduler>,
}

impl ScrambleAnimator {
    pub fn new(target: &str, settings: ScrambleSettings, scheduler: Rc<dyn Scheduler>) -> Self {
        Self::with_rng(target, settings, scheduler, SmallRng::from_entropy())
    }

    pub fn with_rng(
        target: &str,
        settings: ScrambleSettings,
        scheduler: Rc<dyn Scheduler>,
        rng: SmallRng,
    ) -> Self {
        Self {
            shared: Rc::new(RefCell::new(Shared {
                state: ScrambleState::new(target),
                settings,
                rng,
                timer: None,
                listener: None,
            })),
            scheduler,
        }
    }

    /// Called after every tick that changed the display.
    pub fn set_listener(&self, listener: Rc<dyn Fn()>) {
        self.shared.borrow_mut().listener = Some(listener);
    }

    pub fn display(&self) -> String {
        self.shared.borrow().state.display().to_string()
    }

    pub fn revealed(&self) -> f64 {
        self.shared.borrow().state.revealed()
    }

    pub fn is_running(&self) -> bool {
        self.shared.borrow().timer.is_some()
    }

    /// Starts the reveal from zero, cancelling any run in progress.
    pub fn start(&self) {
        let prior = self.shared.borrow_mut().timer.take();
        drop(prior);

        let interval = {
            let mut shared = self.shared.borrow_mut();
            shared.state.reset();
            if !shared.state.is_running() {
                return;
            }
            shared.settings.tick_interval_ms()
        };

        let weak = Rc::downgrade(&self.shared);
        let handle = self
            .scheduler
            .schedule_repeating(interval, Box::new(move || tick(&weak)));
        self.shared.borrow_mut().timer = Some(handle);
    }

    /// Cancels a run in progress and shows the settled text.
    pub fn stop(&self) {
        let prior = {
            let mut shared = self.shared.borrow_mut();
            shared.state.settle();
            shared.timer.take()
        };
        drop(prior);
    }

    /// Swaps the text. A running reveal is cancelled.
    pub fn set_target(&self, target: &str) {
        let prior = {
            let mut shared = self.shared.borrow_mut();
            if shared.state.target() == target {
                return;
            }
            shared.state.retarget(target);
            shared.timer.take()
        };
        drop(prior);
    }
}

fn tick(shared: &Weak<RefCell<Shared>>) {
    let Some(shared) = shared.upgrade() else {
        return;
    };
    let (finished_timer, listener) = {
        let mut guard = shared.borrow_mut();
        let Shared {
            state,
            settings,
            rng,
            timer,
            listener,
        } = &mut *guard;
        let finished = state.advance(settings, rng);
        (if finished { timer.take() } else { None }, listener.clone())
    };
    drop(finished_timer);
    if let Some(listener) = listener {
        listener();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timer::VirtualScheduler;
    use std::cell::Cell;

    fn seeded() -> SmallRng {
        SmallRng::seed_from_u64(7)
    }

    #[test]
    fn rejects_bad_settings() {
        assert!(ScrambleSettings::new(0.0, 30, "AB").is_err());
        assert!(ScrambleSettings::new(1.5, 30, "AB").is_err());
        assert!(ScrambleSettings::new(0.5, 0, "AB").is_err());
        assert_eq!(
            ScrambleSettings::new(0.5, 30, ""),
            Err(UiError::InvalidScramble("alphabet is empty"))
        );
        assert!(ScrambleSettings::new(1.0, 30, "AB").is_ok());
    }

    #[test]
    fn idle_state_shows_target() {
        let clock = VirtualScheduler::new();
        let animator = ScrambleAnimator::new("PREDATOR", ScrambleSettings::hero(), clock.shared());
        assert_eq!(animator.display(), "PREDATOR");
        assert!(!animator.is_running());
    }

    #[test]
    fn settled_prefix_grows_with_revealed_count() {
        let settings = ScrambleSettings::new(0.5, 30, "#").unwrap();
        let mut state = ScrambleState::new("ABCD");
        let mut rng = seeded();
        state.reset();

        state.advance(&settings, &mut rng);
        assert_eq!(state.display(), "####");
        state.advance(&settings, &mut rng);
        assert_eq!(state.display(), "A###");
        state.advance(&settings, &mut rng);
        assert_eq!(state.display(), "A###");
        state.advance(&settings, &mut rng);
        assert_eq!(state.display(), "AB##");
    }

    #[test]
    fn unrevealed_characters_come_from_alphabet() {
        let settings = ScrambleSettings::price();
        let mut state = ScrambleState::new("¥55/Hr");
        let mut rng = seeded();
        state.reset();
        state.advance(&settings, &mut rng);
        assert_eq!(state.display().chars().count(), 6);
        assert!(state.display().chars().all(|c| PRICE_ALPHABET.contains(c)));
    }

    #[test]
    fn four_unit_ticks_reveal_four_letters_then_stop() {
        let clock = VirtualScheduler::new();
        let settings = ScrambleSettings::new(1.0, 30, HERO_ALPHABET).unwrap();
        let animator = ScrambleAnimator::with_rng("APEX", settings, clock.shared(), seeded());
        let renders = Rc::new(Cell::new(0));
        {
            let renders = renders.clone();
            animator.set_listener(Rc::new(move || renders.set(renders.get() + 1)));
        }

        animator.start();
        assert!(animator.is_running());
        clock.advance(90);
        assert_eq!(renders.get(), 3);
        assert!(animator.display().starts_with("APE"));

        clock.advance(30);
        assert_eq!(animator.display(), "APEX");
        assert!(!animator.is_running());
        assert_eq!(clock.pending(), 0);

        clock.advance(300);
        assert_eq!(renders.get(), 4);
    }

    #[test]
    fn restart_mid_run_resets_and_keeps_one_loop() {
        let clock = VirtualScheduler::new();
        let settings = ScrambleSettings::new(1.0, 30, "#").unwrap();
        let animator = ScrambleAnimator::with_rng("APEX", settings, clock.shared(), seeded());

        animator.start();
        clock.advance(60);
        assert_eq!(animator.revealed(), 2.0);

        animator.start();
        assert_eq!(animator.revealed(), 0.0);
        assert_eq!(clock.pending(), 1);

        clock.advance(30);
        assert_eq!(animator.revealed(), 1.0);
        assert_eq!(animator.display(), "A###");
    }

    #[test]
    fn stop_cancels_and_settles() {
        let clock = VirtualScheduler::new();
        let animator = ScrambleAnimator::new("¥35/Hr", ScrambleSettings::price(), clock.shared());
        animator.start();
        clock.advance(30);
        animator.stop();
        assert_eq!(animator.display(), "¥35/Hr");
        assert_eq!(clock.pending(), 0);
    }

    #[test]
    fn retarget_cancels_running_reveal() {
        let clock = VirtualScheduler::new();
        let animator = ScrambleAnimator::new("¥28/Hr", ScrambleSettings::price(), clock.shared());
        animator.start();
        clock.advance(30);
        animator.set_target("¥30/Hr");
        assert_eq!(animator.display(), "¥30/Hr");
        assert!(!animator.is_running());
        assert_eq!(clock.pending(), 0);
    }

    #[test]
    fn empty_target_never_schedules() {
        let clock = VirtualScheduler::new();
        let animator = ScrambleAnimator::new("", ScrambleSettings::hero(), clock.shared());
        animator.start();
        assert!(!animator.is_running());
        assert_eq!(clock.pending(), 0);
    }

    #[test]
    fn dropping_animator_stops_ticks() {
        let clock = VirtualScheduler::new();
        let renders = Rc::new(Cell::new(0));
        let animator = ScrambleAnimator::new("APEX", ScrambleSettings::hero(), clock.shared());
        {
            let renders = renders.clone();
            animator.set_listener(Rc::new(move || renders.set(renders.get() + 1)));
        }
        animator.start();
        clock.advance(30);
        drop(animator);
        clock.advance(1_000);
        assert_eq!(renders.get(), 1);
        assert_eq!(clock.pending(), 0);
    }
}

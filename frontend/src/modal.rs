//! Modal bookkeeping: one open flag per feature, folded into page scroll lock
//! and nav visibility.

use std::collections::BTreeMap;

use log::{debug, warn};

/// Name of a feature area that can open its own overlay. Each feature keeps
/// at most one of its modals open and reports a single flag.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ModalFeature(&'static str);

impl ModalFeature {
    pub const SHOP_INFO: ModalFeature = ModalFeature("shop-info");
    pub const COACHING_MODULE: ModalFeature = ModalFeature("coaching-module");
    pub const PRICING_TIER: ModalFeature = ModalFeature("pricing-tier");

    pub const fn new(name: &'static str) -> Self {
        Self(name)
    }

    pub fn name(&self) -> &'static str {
        self.0
    }
}

/// Page-level scroll lock.
pub trait ScrollLock {
    fn lock(&self);
    fn unlock(&self);
}

/// Locks scrolling by setting `overflow: hidden` on `<body>`.
#[derive(Clone, Copy, Debug, Default)]
pub struct BodyScrollLock;

impl BodyScrollLock {
    fn set_overflow(value: &str) {
        let Some(body) = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.body())
        else {
            warn!("no document body to toggle scroll lock on");
            return;
        };
        let result = if value.is_empty() {
            body.style().remove_property("overflow").map(|_| ())
        } else {
            body.style().set_property("overflow", value)
        };
        if let Err(err) = result {
            warn!("failed to set body overflow: {:?}", err);
        }
    }
}

impl ScrollLock for BodyScrollLock {
    fn lock(&self) {
        Self::set_overflow("hidden");
    }

    fn unlock(&self) {
        Self::set_overflow("");
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModalTransition {
    Opened,
    Closed,
    Unchanged,
}

/// Folds per-feature modal flags into one "any modal open" bit and owns the
/// side effects of that bit: page scroll lock and nav visibility. Effects
/// fire on transitions only.
pub struct ModalCoordinator<L: ScrollLock> {
    flags: BTreeMap<ModalFeature, bool>,
    any_open: bool,
    lock: L,
}

impl<L: ScrollLock> ModalCoordinator<L> {
    pub fn new(lock: L) -> Self {
        Self {
            flags: BTreeMap::new(),
            any_open: false,
            lock,
        }
    }

    /// Records one feature's flag and recomputes the aggregate before
    /// returning, so no caller can observe a stale value.
    pub fn set_flag(&mut self, feature: ModalFeature, is_open: bool) -> ModalTransition {
        self.flags.insert(feature, is_open);
        let any_open = self.flags.values().any(|open| *open);
        let transition = match (self.any_open, any_open) {
            (false, true) => ModalTransition::Opened,
            (true, false) => ModalTransition::Closed,
            _ => ModalTransition::Unchanged,
        };
        self.any_open = any_open;

        match transition {
            ModalTransition::Opened => {
                debug!("modal opened by {}, locking page scroll", feature.name());
                self.lock.lock();
            }
            ModalTransition::Closed => {
                debug!("last modal closed by {}, unlocking page scroll", feature.name());
                self.lock.unlock();
            }
            ModalTransition::Unchanged => {}
        }
        transition
    }

    pub fn is_any_open(&self) -> bool {
        self.any_open
    }

    pub fn is_open(&self, feature: ModalFeature) -> bool {
        self.flags.get(&feature).copied().unwrap_or(false)
    }

    pub fn nav_visible(&self) -> bool {
        !self.any_open
    }

    /// Unconditionally releases the scroll lock. Runs on teardown.
    pub fn release(&mut self) {
        self.lock.unlock();
    }
}

impl<L: ScrollLock> Drop for ModalCoordinator<L> {
    fn drop(&mut self) {
        self.release();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Clone, Default)]
    struct RecordingLock {
        calls: Rc<RefCell<Vec<&'static str>>>,
    }

    impl RecordingLock {
        fn calls(&self) -> Vec<&'static str> {
            self.calls.borrow().clone()
        }

        fn locked(&self) -> bool {
            self.calls.borrow().last() == Some(&"lock")
        }
    }

    impl ScrollLock for RecordingLock {
        fn lock(&self) {
            self.calls.borrow_mut().push("lock");
        }

        fn unlock(&self) {
            self.calls.borrow_mut().push("unlock");
        }
    }

    #[test]
    fn effects_fire_on_transitions_only() {
        let lock = RecordingLock::default();
        let mut modals = ModalCoordinator::new(lock.clone());

        assert_eq!(modals.set_flag(ModalFeature::SHOP_INFO, false), ModalTransition::Unchanged);
        assert_eq!(modals.set_flag(ModalFeature::SHOP_INFO, true), ModalTransition::Opened);
        assert_eq!(modals.set_flag(ModalFeature::PRICING_TIER, true), ModalTransition::Unchanged);
        assert_eq!(modals.set_flag(ModalFeature::SHOP_INFO, true), ModalTransition::Unchanged);
        assert_eq!(lock.calls(), vec!["lock"]);
        assert!(!modals.nav_visible());
    }

    #[test]
    fn stays_open_until_every_feature_closes() {
        let lock = RecordingLock::default();
        let mut modals = ModalCoordinator::new(lock.clone());

        modals.set_flag(ModalFeature::SHOP_INFO, true);
        modals.set_flag(ModalFeature::COACHING_MODULE, true);
        assert_eq!(modals.set_flag(ModalFeature::COACHING_MODULE, false), ModalTransition::Unchanged);
        assert!(modals.is_any_open());
        assert!(lock.locked());

        assert_eq!(modals.set_flag(ModalFeature::SHOP_INFO, false), ModalTransition::Closed);
        assert!(!modals.is_any_open());
        assert!(modals.nav_visible());
        assert_eq!(lock.calls(), vec!["lock", "unlock"]);
    }

    #[test]
    fn closing_one_feature_does_not_mask_another() {
        let mut modals = ModalCoordinator::new(RecordingLock::default());
        modals.set_flag(ModalFeature::PRICING_TIER, true);
        modals.set_flag(ModalFeature::COACHING_MODULE, false);
        assert!(modals.is_any_open());
        assert!(modals.is_open(ModalFeature::PRICING_TIER));
        assert!(!modals.is_open(ModalFeature::SHOP_INFO));
    }

    #[test]
    fn ad_hoc_features_take_part() {
        let mut modals = ModalCoordinator::new(RecordingLock::default());
        let chat = ModalFeature::new("chat");
        assert_eq!(modals.set_flag(chat, true), ModalTransition::Opened);
        assert_eq!(chat.name(), "chat");
    }

    #[test]
    fn drop_releases_lock_while_open() {
        let lock = RecordingLock::default();
        {
            let mut modals = ModalCoordinator::new(lock.clone());
            modals.set_flag(ModalFeature::SHOP_INFO, true);
        }
        assert_eq!(lock.calls(), vec!["lock", "unlock"]);
        assert!(!lock.locked());
    }
}

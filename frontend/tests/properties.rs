#![cfg(not(target_arch = "wasm32"))]

use std::cell::Cell;
use std::collections::HashMap;
use std::rc::Rc;

use proptest::prelude::*;

use apex_elite::config::{RIPPLE_TTL_MS, TOAST_TTL_MS};
use apex_elite::markers::{MarkerList, Point, ToastSlot};
use apex_elite::modal::{ModalCoordinator, ModalFeature, ScrollLock};
use apex_elite::timer::VirtualScheduler;

const FEATURES: [ModalFeature; 4] = [
    ModalFeature::SHOP_INFO,
    ModalFeature::COACHING_MODULE,
    ModalFeature::PRICING_TIER,
    ModalFeature::new("gallery"),
];

#[derive(Clone, Default)]
struct FlagLock(Rc<Cell<bool>>);

impl ScrollLock for FlagLock {
    fn lock(&self) {
        self.0.set(true);
    }

    fn unlock(&self) {
        self.0.set(false);
    }
}

fn flag_updates() -> impl Strategy<Value = Vec<(usize, bool)>> {
    prop::collection::vec((0..FEATURES.len(), any::<bool>()), 0..64)
}

proptest! {
    #[test]
    fn aggregate_is_or_of_latest_flags(updates in flag_updates()) {
        let lock = FlagLock::default();
        let mut modals = ModalCoordinator::new(lock.clone());
        let mut latest: HashMap<usize, bool> = HashMap::new();

        for (feature, is_open) in updates {
            modals.set_flag(FEATURES[feature], is_open);
            latest.insert(feature, is_open);

            let expected = latest.values().any(|open| *open);
            prop_assert_eq!(modals.is_any_open(), expected);
            prop_assert_eq!(lock.0.get(), expected);
            prop_assert_eq!(modals.nav_visible(), !expected);
            prop_assert_eq!(modals.is_open(FEATURES[feature]), is_open);
        }

        drop(modals);
        prop_assert!(!lock.0.get());
    }

    #[test]
    fn marker_present_exactly_until_ttl(
        gaps in prop::collection::vec(0u64..1_500, 1..16),
        read_after in 0u64..3_000,
    ) {
        let clock = VirtualScheduler::new();
        let ripples = MarkerList::new(clock.shared(), RIPPLE_TTL_MS);
        let ttl = u64::from(RIPPLE_TTL_MS);

        let mut now = 0u64;
        let mut spawned = Vec::new();
        for (i, gap) in gaps.iter().enumerate() {
            clock.advance(*gap);
            now += gap;
            let id = ripples.spawn(Point { x: i as f64, y: 0.0 });
            spawned.push((id, now));
        }
        clock.advance(read_after);
        now += read_after;

        for (id, born) in spawned {
            prop_assert_eq!(ripples.contains(id), now - born < ttl);
        }
        prop_assert_eq!(clock.pending(), ripples.len());
    }

    #[test]
    fn newer_toast_governs_visibility(offset in 0u64..4_000) {
        let clock = VirtualScheduler::new();
        let toasts = ToastSlot::new(clock.shared(), TOAST_TTL_MS);
        let ttl = u64::from(TOAST_TTL_MS);

        toasts.show("已复制 微信号");
        clock.advance(offset);
        toasts.show("已复制 QQ号");

        clock.advance(ttl - 1);
        let message = toasts.message();
        prop_assert_eq!(message.as_deref(), Some("已复制 QQ号"));
        clock.advance(1);
        prop_assert!(toasts.message().is_none());
        prop_assert_eq!(clock.pending(), 0);
    }
}

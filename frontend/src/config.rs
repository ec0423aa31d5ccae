use log::Level;

#[cfg(debug_assertions)]
pub fn log_level() -> Level {
    Level::Debug // Verbose while developing locally
}

#[cfg(not(debug_assertions))]
pub fn log_level() -> Level {
    Level::Info
}

/// Scroll offset past which the desktop nav bar condenses.
pub const NAV_CONDENSE_THRESHOLD_PX: f64 = 50.0;
/// Scroll offset past which the mobile logo slides away.
pub const MOBILE_LOGO_HIDE_THRESHOLD_PX: f64 = 250.0;
/// Fraction of the viewport height added to scrollY to form the probe point.
pub const PROBE_VIEWPORT_RATIO: f64 = 0.4;

pub const RIPPLE_TTL_MS: u32 = 1_000;
pub const TOAST_TTL_MS: u32 = 2_000;
pub const SCRAMBLE_TICK_MS: u32 = 30;

/// Page sections in document order. The first one is active on load.
pub const PAGE_SECTIONS: [&str; 4] = ["hero", "mission", "coaching", "pricing"];

#[derive(Clone, Debug, PartialEq)]
pub struct Contacts {
    pub wechat_id: &'static str,
    pub qq_id: &'static str,
    pub xianyu_text: &'static str,
    pub xianyu_url: &'static str,
}

pub fn contacts() -> Contacts {
    Contacts {
        wechat_id: "Sachiraito1",
        qq_id: "1498059513",
        xianyu_text: "【闲鱼】https://m.tb.cn/h.7n1phWg?tk=NR6qUUIijAm HU591 「我在闲鱼发布了【APEX 多赛季大师男pw】」",
        xianyu_url: "https://m.tb.cn/h.7n1phWg?tk=NR6qUUIijAm",
    }
}

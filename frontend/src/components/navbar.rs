use std::rc::Rc;

use log::warn;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use yew::prelude::*;

use crate::scroll::{DomGeometry, ScrollTracker};

const NAV_LINKS: [(&str, &str); 3] = [
    ("精英课程", "mission"),
    ("一对一指导", "coaching"),
    ("陪玩价格", "pricing"),
];

const MOBILE_ITEMS: [(&str, &str); 4] = [
    ("hero", "主页"),
    ("mission", "项目"),
    ("coaching", "教学"),
    ("pricing", "陪玩"),
];

#[derive(Properties, PartialEq)]
pub struct NavbarProps {
    /// False while any modal is open.
    #[prop_or(true)]
    pub visible: bool,
}

#[function_component(Navbar)]
pub fn navbar(props: &NavbarProps) -> Html {
    let tracker = use_mut_ref(ScrollTracker::default);
    let snapshot = use_state_eq(|| tracker.borrow().snapshot());

    {
        let tracker = tracker.clone();
        let snapshot = snapshot.clone();
        use_effect_with_deps(
            move |_| {
                let destructor: Box<dyn FnOnce()> =
                    match (web_sys::window(), DomGeometry::from_window()) {
                        (Some(window), Ok(geometry)) => {
                            let sync = {
                                let window = window.clone();
                                Rc::new(move || {
                                    let scroll_y = window.scroll_y().unwrap_or(0.0);
                                    let viewport = window
                                        .inner_height()
                                        .ok()
                                        .and_then(|h| h.as_f64())
                                        .unwrap_or(0.0);
                                    let next = tracker.borrow_mut().observe(scroll_y, viewport, &geometry);
                                    snapshot.set(next);
                                })
                            };
                            let callback = Closure::<dyn Fn()>::new({
                                let sync = sync.clone();
                                move || sync()
                            });
                            if let Err(err) = window
                                .add_event_listener_with_callback("scroll", callback.as_ref().unchecked_ref())
                            {
                                warn!("failed to attach scroll listener: {:?}", err);
                            }
                            // Initial pass so a reload mid-page highlights the right section
                            sync();
                            Box::new(move || {
                                if let Err(err) = window.remove_event_listener_with_callback(
                                    "scroll",
                                    callback.as_ref().unchecked_ref(),
                                ) {
                                    warn!("failed to detach scroll listener: {:?}", err);
                                }
                            })
                        }
                        _ => {
                            warn!("no window; scroll spy disabled");
                            Box::new(|| ())
                        }
                    };
                move || destructor()
            },
            (),
        );
    }

    let go_to = |target: &'static str| {
        let tracker = tracker.clone();
        let snapshot = snapshot.clone();
        Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            let (section, next) = {
                let mut tracker = tracker.borrow_mut();
                (tracker.select(target), tracker.snapshot())
            };
            if let Some(section) = section {
                if let Err(err) = DomGeometry::from_window().and_then(|dom| dom.scroll_into_view(section)) {
                    warn!("{}", err);
                }
            }
            snapshot.set(next);
        })
    };

    let scrolled = snapshot.past_primary;
    let active = snapshot.active_section;

    html! {
        <>
            <nav class={classes!("top-nav", scrolled.then(|| "scrolled"), (!props.visible).then(|| "hidden"))}>
                <div class="nav-content">
                    <a class="nav-logo cursor-pointer" href="#hero" onclick={go_to("top")}>
                        {"APEX"}<span class="accent">{".ELITE"}</span>
                    </a>
                    <div class="nav-links">
                        { for NAV_LINKS.iter().map(|(label, target)| html! {
                            <a
                                key={*target}
                                href={format!("#{}", target)}
                                class={classes!("nav-link", (active == *target).then(|| "active"))}
                                onclick={go_to(*target)}
                            >
                                {*label}
                            </a>
                        }) }
                    </div>
                    <button class="nav-cta" onclick={go_to("pricing")}>{"立即下单"}</button>
                </div>
            </nav>

            <div class={classes!("mobile-logo", snapshot.past_secondary.then(|| "hidden"))}>
                {"APEX.ELITE"}
            </div>

            <nav class={classes!("mobile-bar", (!props.visible).then(|| "hidden"))}>
                { for MOBILE_ITEMS.iter().map(|(target, label)| html! {
                    <button
                        key={*target}
                        class={classes!("mobile-item", (active == *target).then(|| "active"))}
                        onclick={go_to(*target)}
                    >
                        {*label}
                    </button>
                }) }
            </nav>
        </>
    }
}

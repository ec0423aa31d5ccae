use std::rc::Rc;

use log::{error, warn};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Element, MouseEvent};
use yew::prelude::*;

use crate::components::{
    coaching::Coaching, cursor::Cursor, footer::Footer, hero::Hero, missions::Missions,
    modals::ShopInfoModal, navbar::Navbar, pricing::Pricing,
};
use crate::config::RIPPLE_TTL_MS;
use crate::content::Catalog;
use crate::markers::{MarkerList, Point};
use crate::modal::{BodyScrollLock, ModalCoordinator, ModalFeature, ModalTransition};
use crate::timer::BrowserScheduler;

const CLICKABLE: &str = "a, button, [role=\"button\"], .cursor-pointer";

const MOUSE_EVENTS: [&str; 3] = ["mousemove", "mousedown", "mouseup"];

#[function_component(App)]
pub fn app() -> Html {
    let catalog = use_memo(|_| Catalog::load().map(Rc::new), ());

    let pointer = use_state(|| (-100.0, -100.0));
    let clicking = use_state(|| false);
    let hovering = use_state(|| false);

    let redraw = use_force_update();
    let ripples = use_memo(
        |_| MarkerList::<Point>::new(BrowserScheduler::shared(), RIPPLE_TTL_MS),
        (),
    );

    let modals = use_mut_ref(|| ModalCoordinator::new(BodyScrollLock));
    let shop_open = use_state(|| false);

    // Pointer listeners on the window drive the custom cursor and ripples.
    {
        let pointer = pointer.clone();
        let clicking = clicking.clone();
        let hovering = hovering.clone();
        let ripples = ripples.clone();
        let redraw = redraw.clone();
        use_effect_with_deps(
            move |_| {
                ripples.set_listener(Rc::new(move || redraw.force_update()));

                let on_move = Closure::<dyn Fn(MouseEvent)>::new({
                    let hovering = hovering.clone();
                    move |e: MouseEvent| {
                        pointer.set((f64::from(e.client_x()), f64::from(e.client_y())));
                        let over_clickable = e
                            .target()
                            .and_then(|t| t.dyn_into::<Element>().ok())
                            .and_then(|el| el.closest(CLICKABLE).ok().flatten())
                            .is_some();
                        hovering.set(over_clickable);
                    }
                });
                let on_down = Closure::<dyn Fn(MouseEvent)>::new({
                    let clicking = clicking.clone();
                    let ripples = ripples.clone();
                    move |e: MouseEvent| {
                        clicking.set(true);
                        ripples.spawn(Point {
                            x: f64::from(e.client_x()),
                            y: f64::from(e.client_y()),
                        });
                    }
                });
                let on_up = Closure::<dyn Fn(MouseEvent)>::new(move |_: MouseEvent| clicking.set(false));

                let listeners = [on_move, on_down, on_up];
                let window = web_sys::window();
                if let Some(window) = &window {
                    for (event, listener) in MOUSE_EVENTS.iter().zip(listeners.iter()) {
                        if let Err(err) = window
                            .add_event_listener_with_callback(event, listener.as_ref().unchecked_ref())
                        {
                            warn!("failed to attach {} listener: {:?}", event, err);
                        }
                    }
                }

                move || {
                    if let Some(window) = &window {
                        for (event, listener) in MOUSE_EVENTS.iter().zip(listeners.iter()) {
                            if let Err(err) = window.remove_event_listener_with_callback(
                                event,
                                listener.as_ref().unchecked_ref(),
                            ) {
                                warn!("failed to detach {} listener: {:?}", event, err);
                            }
                        }
                    }
                    ripples.detach();
                }
            },
            (),
        );
    }

    // Never leave the page scroll-locked after teardown.
    {
        let modals = modals.clone();
        use_effect_with_deps(move |_| move || modals.borrow_mut().release(), ());
    }

    // Nav visibility is read from the coordinator at render time.
    let report = |feature: ModalFeature| {
        let modals = modals.clone();
        let redraw = redraw.clone();
        Callback::from(move |is_open: bool| {
            let transition = modals.borrow_mut().set_flag(feature, is_open);
            if transition != ModalTransition::Unchanged {
                redraw.force_update();
            }
        })
    };

    let report_shop = report(ModalFeature::SHOP_INFO);
    let open_shop = {
        let shop_open = shop_open.clone();
        let report_shop = report_shop.clone();
        Callback::from(move |_: ()| {
            shop_open.set(true);
            report_shop.emit(true);
        })
    };
    let close_shop = {
        let shop_open = shop_open.clone();
        Callback::from(move |_: ()| {
            shop_open.set(false);
            report_shop.emit(false);
        })
    };

    let catalog = match &*catalog {
        Ok(catalog) => catalog.clone(),
        Err(err) => {
            error!("{}", err);
            return html! { <p class="fatal">{"页面内容加载失败"}</p> };
        }
    };

    html! {
        <div class="app-root">
            <style>
                {r#"
                    body {
                        background: #030303;
                        color: #e5e5e5;
                        cursor: none;
                    }
                    .accent {
                        color: #dc2626;
                    }
                    .ripple {
                        position: fixed;
                        width: 8px;
                        height: 8px;
                        margin: -4px 0 0 -4px;
                        border: 1px solid #dc2626;
                        border-radius: 50%;
                        pointer-events: none;
                        z-index: 9998;
                        animation: ripple-out 1s ease-out forwards;
                    }
                    @keyframes ripple-out {
                        to {
                            transform: scale(12);
                            opacity: 0;
                        }
                    }
                    .top-nav, .mobile-bar {
                        transition: transform 0.3s ease, opacity 0.3s ease;
                    }
                    .top-nav.hidden {
                        transform: translateY(-100%);
                        opacity: 0;
                        pointer-events: none;
                    }
                    .mobile-bar.hidden {
                        transform: translateY(100%);
                        opacity: 0;
                        pointer-events: none;
                    }
                    .mobile-logo.hidden {
                        opacity: 0;
                    }
                    .modal-backdrop {
                        position: fixed;
                        inset: 0;
                        background: rgba(0, 0, 0, 0.85);
                        z-index: 9000;
                        display: flex;
                        align-items: center;
                        justify-content: center;
                    }
                    .toast {
                        position: fixed;
                        bottom: 2rem;
                        left: 50%;
                        transform: translateX(-50%);
                        background: #dc2626;
                        color: #fff;
                        padding: 0.75rem 1.5rem;
                        z-index: 9500;
                    }
                "#}
            </style>
            { for ripples.markers().into_iter().map(|ripple| html! {
                <div
                    key={ripple.id}
                    class="ripple"
                    style={format!("left: {}px; top: {}px;", ripple.payload.x, ripple.payload.y)}
                />
            }) }
            <Cursor x={pointer.0} y={pointer.1} clicking={*clicking} hovering={*hovering} />
            <Navbar visible={modals.borrow().nav_visible()} />
            <main>
                <Hero on_open_shop_info={open_shop} />
                <Missions missions={catalog.missions.clone()} />
                <Coaching
                    modules={catalog.coaching.clone()}
                    on_modal_change={report(ModalFeature::COACHING_MODULE)}
                />
                <Pricing
                    catalog={catalog.clone()}
                    on_modal_change={report(ModalFeature::PRICING_TIER)}
                />
            </main>
            <Footer />
            {
                if *shop_open {
                    html! { <ShopInfoModal on_close={close_shop} /> }
                } else {
                    html! {}
                }
            }
        </div>
    }
}

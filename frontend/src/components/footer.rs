use std::rc::Rc;

use log::warn;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::clipboard::{copy_contact, BrowserClipboard, ContactChannel};
use crate::config::{contacts, TOAST_TTL_MS};
use crate::markers::ToastSlot;
use crate::timer::BrowserScheduler;

fn open_link(url: &str) {
    let Some(window) = web_sys::window() else {
        return;
    };
    if let Err(err) = window.open_with_url_and_target(url, "_blank") {
        warn!("failed to open {}: {:?}", url, err);
    }
}

#[function_component(Footer)]
pub fn footer() -> Html {
    let redraw = use_force_update();
    let toasts = use_memo(
        |_| ToastSlot::new(BrowserScheduler::shared(), TOAST_TTL_MS),
        (),
    );

    {
        let toasts = toasts.clone();
        use_effect_with_deps(
            move |_| {
                toasts.set_listener(Rc::new(move || redraw.force_update()));
                move || toasts.detach()
            },
            (),
        );
    }

    let copy = |channel: ContactChannel| {
        let toasts = toasts.clone();
        Callback::from(move |_: MouseEvent| {
            let contacts = contacts();
            if let Some(url) = channel.link(&contacts) {
                open_link(url);
            }
            let toasts = (*toasts).clone();
            spawn_local(async move {
                // Failures are already logged; no toast is the only feedback.
                let _ = copy_contact(&BrowserClipboard, channel, &contacts, &toasts).await;
            });
        })
    };

    let contact_info = contacts();

    html! {
        <footer id="contact" class="footer">
            {
                match toasts.message() {
                    Some(message) => html! { <div class="toast">{"✓ "}{message}</div> },
                    None => html! {},
                }
            }
            <div class="footer-grid">
                <div class="footer-brand">
                    <div class="footer-logo">{"APEX"}<span class="accent">{".ELITE"}</span></div>
                    <p>{"纯绿手打 · 顶猎打手 · 售后无忧"}</p>
                </div>
                <div class="footer-contacts">
                    <h4>{"联系方式 // CONTACT"}</h4>
                    <button class="contact" onclick={copy(ContactChannel::WeChat)}>
                        {format!("微信: {}", contact_info.wechat_id)}
                    </button>
                    <button class="contact" onclick={copy(ContactChannel::Qq)}>
                        {format!("QQ: {}", contact_info.qq_id)}
                    </button>
                    <button class="contact" onclick={copy(ContactChannel::Xianyu)}>
                        {"闲鱼店铺"}
                    </button>
                </div>
            </div>
        </footer>
    }
}

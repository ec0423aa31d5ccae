use log::{error, info};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::js_sys::{Function, Promise, Reflect};

use crate::config::Contacts;
use crate::error::UiError;
use crate::markers::ToastSlot;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ContactChannel {
    WeChat,
    Qq,
    Xianyu,
}

impl ContactChannel {
    pub fn label(&self) -> &'static str {
        match self {
            ContactChannel::WeChat => "微信号",
            ContactChannel::Qq => "QQ号",
            ContactChannel::Xianyu => "闲鱼口令",
        }
    }

    pub fn content<'a>(&self, contacts: &'a Contacts) -> &'a str {
        match self {
            ContactChannel::WeChat => contacts.wechat_id,
            ContactChannel::Qq => contacts.qq_id,
            ContactChannel::Xianyu => contacts.xianyu_text,
        }
    }

    /// Link opened alongside the copy, if the channel has one.
    pub fn link<'a>(&self, contacts: &'a Contacts) -> Option<&'a str> {
        match self {
            ContactChannel::Xianyu => Some(contacts.xianyu_url),
            _ => None,
        }
    }
}

#[allow(async_fn_in_trait)]
pub trait ClipboardSink {
    async fn write_text(&self, text: &str) -> Result<(), UiError>;
}

/// `navigator.clipboard`. Insecure origins and older browsers have no
/// clipboard object at all, so it is looked up dynamically and every JS call
/// goes through a `Result`.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserClipboard;

impl BrowserClipboard {
    fn write_promise(text: &str) -> Result<Promise, UiError> {
        let window = web_sys::window().ok_or(UiError::HostUnavailable("window"))?;
        let navigator = window.navigator();
        let clipboard = Reflect::get(&navigator, &JsValue::from_str("clipboard"))
            .map_err(|err| UiError::ClipboardUnavailable(format!("{:?}", err)))?;
        if clipboard.is_undefined() || clipboard.is_null() {
            return Err(UiError::ClipboardUnavailable("navigator.clipboard is missing".into()));
        }
        let write_text = Reflect::get(&clipboard, &JsValue::from_str("writeText"))
            .map_err(|err| UiError::ClipboardUnavailable(format!("{:?}", err)))?
            .dyn_into::<Function>()
            .map_err(|_| UiError::ClipboardUnavailable("writeText is not a function".into()))?;
        write_text
            .call1(&clipboard, &JsValue::from_str(text))
            .map_err(|err| UiError::ClipboardUnavailable(format!("{:?}", err)))?
            .dyn_into::<Promise>()
            .map_err(|_| UiError::ClipboardUnavailable("writeText did not return a promise".into()))
    }
}

impl ClipboardSink for BrowserClipboard {
    async fn write_text(&self, text: &str) -> Result<(), UiError> {
        let promise = Self::write_promise(text)?;
        JsFuture::from(promise)
            .await
            .map(|_| ())
            .map_err(|err| UiError::ClipboardUnavailable(format!("{:?}", err)))
    }
}

pub fn copied_message(channel: ContactChannel) -> String {
    format!("已复制 {}", channel.label())
}

/// Copies a contact handle and confirms with a toast. A failed write is
/// logged and shows no toast.
pub async fn copy_contact<C>(
    sink: &C,
    channel: ContactChannel,
    contacts: &Contacts,
    toasts: &ToastSlot,
) -> Result<(), UiError>
where
    C: ClipboardSink,
{
    match sink.write_text(channel.content(contacts)).await {
        Ok(()) => {
            info!("copied {:?} contact", channel);
            toasts.show(copied_message(channel));
            Ok(())
        }
        Err(err) => {
            error!("Copy failed: {}", err);
            Err(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::contacts;
    use crate::timer::VirtualScheduler;
    use futures::executor::block_on;
    use std::cell::RefCell;

    #[derive(Default)]
    struct FakeClipboard {
        fail: bool,
        written: RefCell<Vec<String>>,
    }

    impl ClipboardSink for FakeClipboard {
        async fn write_text(&self, text: &str) -> Result<(), UiError> {
            if self.fail {
                return Err(UiError::ClipboardUnavailable("denied".into()));
            }
            self.written.borrow_mut().push(text.to_string());
            Ok(())
        }
    }

    #[test]
    fn successful_copy_shows_toast() {
        let clock = VirtualScheduler::new();
        let toasts = ToastSlot::new(clock.shared(), 2_000);
        let sink = FakeClipboard::default();

        block_on(copy_contact(&sink, ContactChannel::Qq, &contacts(), &toasts)).unwrap();

        assert_eq!(*sink.written.borrow(), vec!["1498059513".to_string()]);
        assert_eq!(toasts.message().as_deref(), Some("已复制 QQ号"));
    }

    #[test]
    fn rejected_copy_shows_nothing() {
        let clock = VirtualScheduler::new();
        let toasts = ToastSlot::new(clock.shared(), 2_000);
        let sink = FakeClipboard {
            fail: true,
            ..Default::default()
        };

        let result = block_on(copy_contact(&sink, ContactChannel::WeChat, &contacts(), &toasts));

        assert!(matches!(result, Err(UiError::ClipboardUnavailable(_))));
        assert!(toasts.message().is_none());
        assert_eq!(clock.pending(), 0);
    }

    #[test]
    fn only_xianyu_opens_a_link() {
        let contacts = contacts();
        assert!(ContactChannel::Xianyu.link(&contacts).is_some());
        assert!(ContactChannel::WeChat.link(&contacts).is_none());
        assert!(ContactChannel::Xianyu.content(&contacts).starts_with("【闲鱼】"));
    }
}

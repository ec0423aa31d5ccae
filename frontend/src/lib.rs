pub mod clipboard;
pub mod config;
pub mod content;
pub mod error;
pub mod markers;
pub mod modal;
pub mod scramble;
pub mod scroll;
pub mod timer;

pub mod components {
    pub mod app;
    pub mod coaching;
    pub mod cursor;
    pub mod footer;
    pub mod hero;
    pub mod missions;
    pub mod modals;
    pub mod navbar;
    pub mod pricing;
    pub mod scramble_text;
}

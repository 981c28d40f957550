//! A widget toolkit and stacking window manager for terminal shells.
//!
//! Widgets live in a [`widget::WidgetTree`] arena and are composited onto a
//! [`screen::Screen`]; the [`wm::WindowManager`] arranges toplevel widgets
//! into workspaces and routes input to them.

pub mod components;
pub mod config;
pub mod constants;
pub mod drivers;
pub mod error;
pub mod event_loop;
pub mod keybindings;
pub mod screen;
pub mod theme;
pub mod tracing_sub;
pub mod ui;
pub mod widget;
pub mod wm;

pub use error::{Error, Result};

//! Window-manager strategy hooks.
//!
//! The manager consults its policy at fixed points: placement of a new
//! window, decoration, close/resize/move vetoes, input pre-processing and
//! focus notifications. Every hook has the plain behaviour as its default,
//! so a policy overrides only what it changes.

use std::fmt;

use super::WmCore;
use crate::drivers::MouseEvent;
use crate::widget::WidgetId;

pub trait WmPolicy: fmt::Debug {
    fn name(&self) -> &'static str;

    /// Place and attach a freshly shown toplevel.
    fn new_window(&mut self, wm: &mut WmCore, id: WidgetId) {
        wm.place_window_default(id);
        wm.attach_window(id);
    }

    /// Paint decorations onto the node surface. Runs after every copy of
    /// the widget into that surface.
    fn decorate_window(&mut self, _wm: &mut WmCore, _id: WidgetId) {}

    /// Return `true` to keep the window open.
    fn close_window(&mut self, _wm: &mut WmCore, _id: WidgetId) -> bool {
        false
    }

    /// May adjust the proposed size. Return `false` to refuse the resize.
    fn window_resize_confirm(
        &mut self,
        _wm: &mut WmCore,
        _id: WidgetId,
        _width: &mut i32,
        _height: &mut i32,
    ) -> bool {
        true
    }

    fn window_resized(&mut self, _wm: &mut WmCore, _id: WidgetId) {}

    /// May adjust the proposed position. Return `false` to refuse the move.
    fn window_move_confirm(
        &mut self,
        _wm: &mut WmCore,
        _id: WidgetId,
        _x: &mut i32,
        _y: &mut i32,
    ) -> bool {
        true
    }

    fn window_moved(&mut self, _wm: &mut WmCore, _id: WidgetId) {}

    fn window_update(&mut self, _wm: &mut WmCore, _id: WidgetId) {}

    /// First refusal on every key. Return `true` to consume it.
    fn key_pressed(&mut self, _wm: &mut WmCore, _key: &str) -> bool {
        false
    }

    /// First refusal on every click outside the taskbar. `widget` is the
    /// topmost window under the pointer.
    fn mouse_clicked(
        &mut self,
        _wm: &mut WmCore,
        _event: MouseEvent,
        _x: i32,
        _y: i32,
        _widget: Option<WidgetId>,
    ) -> bool {
        false
    }

    /// A window was brought to the front and now holds focus.
    fn give_focus(&mut self, _wm: &mut WmCore, _id: WidgetId) {}

    fn terminal_refresh(&mut self, _wm: &mut WmCore) {}
}

/// Centers new windows and otherwise keeps out of the way.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultPolicy;

impl WmPolicy for DefaultPolicy {
    fn name(&self) -> &'static str {
        "default"
    }
}

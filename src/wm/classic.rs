//! The classic policy: a borderless full-height main window, a close box on
//! every decorated window and a key to bring the main window back.

use super::WmCore;
use super::policy::WmPolicy;
use crate::constants::{CLOSE_BOX_LABEL, CLOSE_BOX_OFFSET, MAIN_WINDOW_NAME};
use crate::drivers::MouseEvent;
use crate::theme;
use crate::ui::Canvas;
use crate::widget::WidgetId;

const RAISE_MAIN_WINDOW_KEY: &str = "alt-b";

#[derive(Debug, Default, Clone, Copy)]
pub struct ClassicPolicy;

fn is_main_window(wm: &WmCore, id: WidgetId) -> bool {
    wm.tree().name(id) == Some(MAIN_WINDOW_NAME)
}

impl ClassicPolicy {
    fn place_main_window(wm: &mut WmCore, id: WidgetId) {
        let height = wm.usable_height();
        let tree = wm.tree_mut();
        tree.set_toplevel(id, false);
        if let Some(flags) = tree.flags_mut(id) {
            flags.set_take_focus(true);
        }
        tree.set_position(id, 0, 0);
        if !tree.set_size(id, -1, height) {
            tracing::debug!(window = %id, height, "main window kept its height");
        }
        tree.draw(id);
    }
}

impl WmPolicy for ClassicPolicy {
    fn name(&self) -> &'static str {
        "classic"
    }

    fn new_window(&mut self, wm: &mut WmCore, id: WidgetId) {
        if is_main_window(wm, id) {
            Self::place_main_window(wm, id);
            wm.attach_window(id);
            wm.raise_window(id);
            return;
        }
        if !wm.tree().flags(id).is_some_and(|f| f.transient()) {
            wm.place_window_default(id);
        }
        wm.attach_window(id);
    }

    fn decorate_window(&mut self, wm: &mut WmCore, id: WidgetId) {
        if is_main_window(wm, id) {
            return;
        }
        let Some(flags) = wm.tree().flags(id) else {
            return;
        };
        if !flags.has_border() || flags.transient() {
            return;
        }
        let (w, _) = wm.tree().size_of(id);
        let Some(surface) = wm.node(id).map(|node| node.surface) else {
            return;
        };
        if let Some(buffer) = wm.tree_mut().screen_mut().surface_mut(surface) {
            Canvas::new(buffer).put_str(w - CLOSE_BOX_OFFSET, 0, CLOSE_BOX_LABEL, theme::normal());
        }
    }

    fn window_update(&mut self, wm: &mut WmCore, id: WidgetId) {
        self.decorate_window(wm, id);
    }

    fn key_pressed(&mut self, wm: &mut WmCore, key: &str) -> bool {
        if key != RAISE_MAIN_WINDOW_KEY {
            return false;
        }
        match wm.find_by_name(MAIN_WINDOW_NAME) {
            Some(main) => {
                wm.raise_window(main);
                true
            }
            None => false,
        }
    }

    fn mouse_clicked(
        &mut self,
        wm: &mut WmCore,
        event: MouseEvent,
        x: i32,
        y: i32,
        widget: Option<WidgetId>,
    ) -> bool {
        let Some(id) = widget else {
            return false;
        };
        if event != MouseEvent::LeftDown || !wm.tree().flags(id).is_some_and(|f| f.has_border()) {
            return false;
        }
        let Some((wx, wy)) = wm.tree().position(id) else {
            return false;
        };
        let (w, _) = wm.tree().size_of(id);
        if y == wy && x == wx + w - (CLOSE_BOX_OFFSET - 1) {
            tracing::debug!(window = %id, "close box clicked");
            wm.destroy_widget(id);
            return true;
        }
        false
    }
}

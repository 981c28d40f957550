use std::fmt;

use crate::drivers::MouseEvent;
use crate::theme;
use crate::ui::Canvas;
use crate::widget::{Widget, WidgetCore, WidgetFlags};

use super::label::text_bounds;

type Callback = Box<dyn FnMut()>;

/// Single-row push button. Activated by `enter` or a left click.
pub struct Button {
    text: String,
    activations: usize,
    on_activate: Option<Callback>,
}

impl fmt::Debug for Button {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Button")
            .field("text", &self.text)
            .field("activations", &self.activations)
            .finish()
    }
}

impl Button {
    pub fn new<T: Into<String>>(text: T) -> Self {
        Self {
            text: text.into(),
            activations: 0,
            on_activate: None,
        }
    }

    pub fn on_activate(mut self, f: impl FnMut() + 'static) -> Self {
        self.on_activate = Some(Box::new(f));
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn activations(&self) -> usize {
        self.activations
    }
}

impl Widget for Button {
    fn kind_name(&self) -> &'static str {
        "button"
    }

    fn initial_flags(&self) -> WidgetFlags {
        WidgetFlags::new()
            .with_border(false)
            .with_shadow(false)
            .with_take_focus(true)
    }

    fn initial_minimum_size(&self) -> (i32, i32) {
        (4, 1)
    }

    fn size_request(&mut self, core: &mut WidgetCore) {
        let (w, h) = text_bounds(&self.text);
        core.request_size(w + 4, h);
    }

    fn paint(&self, core: &WidgetCore, canvas: &mut Canvas<'_>) {
        let style = if core.flags().has_focus() {
            theme::highlight()
        } else {
            theme::title_dim()
        };
        let (w, _) = core.content_size();
        canvas.hline(0, 0, w, " ", style);
        canvas.put_str(2, 0, &self.text, style);
    }

    fn key_pressed(&mut self, core: &mut WidgetCore, key: &str) -> bool {
        if key == "enter" {
            self.activate(core);
            return true;
        }
        false
    }

    fn clicked(&mut self, core: &mut WidgetCore, event: MouseEvent, _x: i32, _y: i32) -> bool {
        if event == MouseEvent::LeftDown {
            self.activate(core);
            return true;
        }
        false
    }

    fn activate(&mut self, core: &mut WidgetCore) {
        self.activations += 1;
        tracing::debug!(widget = %core.id(), text = %self.text, "button activated");
        if let Some(cb) = self.on_activate.as_mut() {
            cb();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::screen::Screen;
    use crate::widget::WidgetTree;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn enter_and_left_click_activate() {
        let hits = Rc::new(Cell::new(0));
        let seen = hits.clone();
        let mut tree = WidgetTree::new(Screen::headless(20, 5));
        let id = tree.add_widget(Button::new("OK").on_activate(move || seen.set(seen.get() + 1)));
        assert!(tree.key_pressed(id, "enter"));
        assert!(tree.clicked(id, MouseEvent::LeftDown, 0, 0));
        assert!(!tree.clicked(id, MouseEvent::MiddleDown, 0, 0));
        assert!(!tree.key_pressed(id, "a"));
        assert_eq!(hits.get(), 2);
        assert_eq!(tree.widget::<Button>(id).map(Button::activations), Some(2));
    }

    #[test]
    fn padded_to_the_text() {
        let mut tree = WidgetTree::new(Screen::headless(20, 5));
        let id = tree.add_widget(Button::new("Cancel"));
        tree.size_request(id);
        assert_eq!(tree.core(id).unwrap().content_size(), (10, 1));
    }
}

use ratatui::style::Style;

use crate::theme;
use crate::ui::Canvas;
use crate::widget::{Widget, WidgetCore, WidgetFlags};

/// Static, possibly multi-line text. Never takes focus.
#[derive(Debug, Clone)]
pub struct Label {
    text: String,
    style: Style,
}

impl Label {
    pub fn new<T: Into<String>>(text: T) -> Self {
        Self {
            text: text.into(),
            style: theme::normal(),
        }
    }

    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replace the text. The owner redraws the label afterwards.
    pub fn set_text<T: Into<String>>(&mut self, text: T) {
        self.text = text.into();
    }
}

/// Width of the widest line and number of lines.
pub(crate) fn text_bounds(text: &str) -> (i32, i32) {
    let mut lines = 0;
    let mut widest = 0;
    for line in text.split('\n') {
        lines += 1;
        widest = widest.max(line.chars().count());
    }
    (
        i32::try_from(widest).unwrap_or(i32::MAX),
        lines,
    )
}

impl Widget for Label {
    fn kind_name(&self) -> &'static str {
        "label"
    }

    fn initial_flags(&self) -> WidgetFlags {
        WidgetFlags::new()
            .with_border(false)
            .with_shadow(false)
            .with_grow_x(true)
    }

    fn initial_minimum_size(&self) -> (i32, i32) {
        (3, 1)
    }

    fn size_request(&mut self, core: &mut WidgetCore) {
        let (w, h) = text_bounds(&self.text);
        core.request_size(w, h);
    }

    fn paint(&self, _core: &WidgetCore, canvas: &mut Canvas<'_>) {
        for (y, line) in (0..).zip(self.text.split('\n')) {
            canvas.put_str(0, y, line, self.style);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::screen::Screen;
    use crate::ui::row_text;
    use crate::widget::WidgetTree;

    #[test]
    fn size_follows_the_text() {
        let mut tree = WidgetTree::new(Screen::headless(20, 5));
        let id = tree.add_widget(Label::new("hello\nworld!"));
        tree.draw(id);
        assert_eq!(tree.size(id), Some((6, 2)));
        let surface = tree.surface(id).unwrap();
        let buffer = tree.screen().surface(surface).unwrap();
        assert!(row_text(buffer, 1).starts_with("world!"));
    }

    #[test]
    fn text_bounds_counts_lines_and_widest() {
        assert_eq!(text_bounds(""), (0, 1));
        assert_eq!(text_bounds("ab\nabcd\n"), (4, 3));
    }

    #[test]
    fn set_text_is_reachable_through_the_tree() {
        let mut tree = WidgetTree::new(Screen::headless(20, 5));
        let id = tree.add_widget(Label::new("one"));
        tree.widget_mut::<Label>(id).unwrap().set_text("two");
        assert_eq!(tree.widget::<Label>(id).map(Label::text), Some("two"));
    }
}

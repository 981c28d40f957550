use ratatui::style::Style;

use super::workspace::{EntryState, TaskbarEntry};
use crate::screen::{PanelId, Screen, SurfaceId};
use crate::theme;
use crate::ui::Canvas;
use crate::widget::WidgetId;

/// One-row window list pinned to the bottom of the terminal.
#[derive(Debug)]
pub struct Taskbar {
    surface: SurfaceId,
    panel: PanelId,
    // (first column, one past last column, window)
    hits: Vec<(i32, i32, WidgetId)>,
}

impl Taskbar {
    pub fn new(screen: &mut Screen) -> Self {
        let (w, h) = screen.terminal_size();
        let surface = screen.alloc_surface(w, 1);
        let panel = screen.new_panel(surface);
        screen.move_panel(panel, 0, i32::from(h) - 1);
        Self {
            surface,
            panel,
            hits: Vec::new(),
        }
    }

    pub fn panel(&self) -> PanelId {
        self.panel
    }

    /// Follow a terminal resize: full width, last row.
    pub fn relocate(&mut self, screen: &mut Screen) {
        let (w, h) = screen.terminal_size();
        screen.resize_surface(self.surface, w, 1);
        screen.move_panel(self.panel, 0, i32::from(h) - 1);
    }

    /// Split the row evenly between the entries; the last one takes the
    /// remainder. Entries are separated by a standout bar.
    pub fn draw(&mut self, screen: &mut Screen, entries: &[TaskbarEntry]) {
        let width = i32::from(screen.terminal_size().0);
        self.hits.clear();
        let Some(buffer) = screen.surface_mut(self.surface) else {
            return;
        };
        let mut canvas = Canvas::new(buffer);
        canvas.fill(theme::taskbar());
        let n = i32::try_from(entries.len()).unwrap_or(i32::MAX);
        if n == 0 {
            return;
        }
        let slot = width / n;
        for (i, entry) in (0..).zip(entries) {
            let start = slot * i;
            let end = if i == n - 1 { width } else { start + slot };
            let style = entry_style(entry.state);
            canvas.hline(start, 0, end - start, " ", style);
            canvas.put_str(start, 0, &entry.title, style);
            if i > 0 {
                canvas.set_cell(start - 1, 0, "│", theme::taskbar_separator());
            }
            self.hits.push((start, end, entry.widget));
        }
        screen.raise_panel(self.panel);
    }

    pub fn hit(&self, x: i32) -> Option<WidgetId> {
        self.hits
            .iter()
            .find(|(start, end, _)| x >= *start && x < *end)
            .map(|(_, _, id)| *id)
    }
}

fn entry_style(state: EntryState) -> Style {
    match state {
        EntryState::Focused => theme::taskbar_focused(),
        EntryState::Urgent => theme::urgent(),
        EntryState::Normal => theme::taskbar(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::row_text;
    use crate::widget::WidgetTree;

    #[test]
    fn entries_share_the_row() {
        let mut tree = WidgetTree::new(Screen::headless(12, 3));
        let a = tree.new_window("ab");
        let b = tree.new_window("cd");
        let screen = tree.screen_mut();
        let mut bar = Taskbar::new(screen);
        let entries = vec![
            TaskbarEntry {
                widget: a,
                title: "ab".into(),
                state: EntryState::Focused,
            },
            TaskbarEntry {
                widget: b,
                title: "cd".into(),
                state: EntryState::Normal,
            },
        ];
        bar.draw(screen, &entries);
        assert_eq!(bar.hit(0), Some(a));
        assert_eq!(bar.hit(6), Some(b));
        assert_eq!(bar.hit(11), Some(b));
        assert_eq!(bar.hit(12), None);
        screen.flush().unwrap();
        assert_eq!(row_text(screen.frame(), 2), "ab   │cd    ");
    }
}

//! A named group of toplevel widgets.
//!
//! `list` keeps insertion order (what the taskbar shows); `ordered` keeps
//! stacking order with the topmost widget at its head. Both always hold the
//! same set of widgets.

use std::collections::BTreeMap;

use super::node::WmNode;
use crate::constants::{UNNAMED_WORKSPACE, UNTITLED_WINDOW};
use crate::widget::{WidgetId, WidgetTree};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryState {
    Focused,
    Urgent,
    Normal,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskbarEntry {
    pub widget: WidgetId,
    pub title: String,
    pub state: EntryState,
}

#[derive(Debug, Clone)]
pub struct Workspace {
    name: String,
    list: Vec<WidgetId>,
    ordered: Vec<WidgetId>,
}

impl Default for Workspace {
    fn default() -> Self {
        Self::new(None)
    }
}

impl Workspace {
    pub fn new(name: Option<&str>) -> Self {
        Self {
            name: name.unwrap_or(UNNAMED_WORKSPACE).to_string(),
            list: Vec::new(),
            ordered: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: &str) {
        self.name = name.to_string();
    }

    pub fn list(&self) -> &[WidgetId] {
        &self.list
    }

    pub fn ordered(&self) -> &[WidgetId] {
        &self.ordered
    }

    pub fn contains(&self, id: WidgetId) -> bool {
        self.list.contains(&id)
    }

    /// Append to the taskbar order and put on top, taking focus away from the
    /// previous top widget.
    pub fn add_widget(&mut self, tree: &mut WidgetTree, id: WidgetId) {
        if self.contains(id) {
            return;
        }
        let old = self.top_widget();
        self.list.push(id);
        self.ordered.insert(0, id);
        if let Some(old) = old {
            tree.set_focus(old, false);
        }
    }

    /// Add at the bottom of the stack without touching focus.
    pub fn append_widget(&mut self, id: WidgetId) {
        if self.contains(id) {
            return;
        }
        self.list.push(id);
        self.ordered.push(id);
    }

    pub fn remove_widget(&mut self, id: WidgetId) {
        self.list.retain(|w| *w != id);
        self.ordered.retain(|w| *w != id);
    }

    /// Make `id` the topmost widget. The old top loses focus and redraws;
    /// `id` gets (or keeps) focus and redraws even when already on top.
    pub fn bring_to_front(&mut self, tree: &mut WidgetTree, id: WidgetId) {
        let Some(pos) = self.ordered.iter().position(|w| *w == id) else {
            tracing::debug!(widget = %id, workspace = %self.name, "bring_to_front on foreign widget");
            return;
        };
        if pos != 0 {
            let old = self.ordered[0];
            self.ordered.remove(pos);
            self.ordered.insert(0, id);
            tree.set_focus(old, false);
            tree.draw(old);
        }
        tree.set_focus(id, true);
        tree.draw(id);
    }

    pub fn top_widget(&self) -> Option<WidgetId> {
        self.ordered.first().copied()
    }

    pub fn is_top_widget(&self, id: WidgetId) -> bool {
        self.top_widget() == Some(id)
    }

    pub fn is_empty(&self) -> bool {
        self.ordered.is_empty()
    }

    pub fn is_single(&self) -> bool {
        self.ordered.len() == 1
    }

    /// Bottom of the stack.
    pub fn last(&self) -> Option<WidgetId> {
        self.ordered.last().copied()
    }

    /// Take every widget's panel off screen. Widget state is untouched.
    pub fn hide(&self, tree: &mut WidgetTree, nodes: &BTreeMap<WidgetId, WmNode>) {
        for id in &self.ordered {
            if let Some(node) = nodes.get(id) {
                tree.screen_mut().hide_panel(node.panel);
            }
        }
    }

    /// Put panels back bottom to top so the stacking matches `ordered`.
    pub fn show(&self, tree: &mut WidgetTree, nodes: &BTreeMap<WidgetId, WmNode>) {
        for id in self.ordered.iter().rev() {
            if let Some(flags) = tree.flags_mut(*id) {
                flags.set_visible(true);
            }
            if let Some(node) = nodes.get(id) {
                tree.screen_mut().show_panel(node.panel);
            }
        }
    }

    pub fn taskbar_entries(&self, tree: &WidgetTree) -> Vec<TaskbarEntry> {
        let top = self.top_widget();
        self.list
            .iter()
            .map(|id| {
                let state = if Some(*id) == top {
                    EntryState::Focused
                } else if tree.flags(*id).is_some_and(|f| f.urgent()) {
                    EntryState::Urgent
                } else {
                    EntryState::Normal
                };
                TaskbarEntry {
                    widget: *id,
                    title: tree.title(*id).unwrap_or(UNTITLED_WINDOW).to_string(),
                    state,
                }
            })
            .collect()
    }
}

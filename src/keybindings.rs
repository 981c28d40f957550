use std::collections::HashMap;
use std::fmt;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    // Widget level
    ContextMenu,
    FocusNext,
    FocusPrev,
    // Window manager level
    Quit,
    WindowNext,
    WindowPrev,
    WorkspaceNext,
    WorkspacePrev,
    CloseWindow,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Action::ContextMenu => "Context menu",
            Action::FocusNext => "Focus next",
            Action::FocusPrev => "Focus previous",
            Action::Quit => "Quit",
            Action::WindowNext => "Next window",
            Action::WindowPrev => "Previous window",
            Action::WorkspaceNext => "Next workspace",
            Action::WorkspacePrev => "Previous workspace",
            Action::CloseWindow => "Close window",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyCombo {
    pub code: KeyCode,
    pub mods: KeyModifiers,
}

impl KeyCombo {
    pub fn new(code: KeyCode, mods: KeyModifiers) -> Self {
        Self { code, mods }
    }

    pub fn plain(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::NONE)
    }

    /// Canonical name, the same string `key_name` yields for a matching event.
    pub fn name(&self) -> Option<String> {
        combo_name(self.code, self.mods)
    }
}

impl fmt::Display for KeyCombo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => write!(f, "{}", name),
            None => write!(f, "{:?}", self.code),
        }
    }
}

/// Name a key event the way bindings and widgets compare keys:
/// `"a"`, `"tab"`, `"back-tab"`, `"ctrl-x"`, `"alt-b"`, `"f11"`.
pub fn key_name(key: &KeyEvent) -> Option<String> {
    combo_name(key.code, key.modifiers)
}

fn combo_name(code: KeyCode, mods: KeyModifiers) -> Option<String> {
    let base = match code {
        KeyCode::Char(' ') => "space".to_string(),
        KeyCode::Char(c) => c.to_string(),
        KeyCode::Tab => "tab".to_string(),
        KeyCode::BackTab => "back-tab".to_string(),
        KeyCode::Enter => "enter".to_string(),
        KeyCode::Esc => "escape".to_string(),
        KeyCode::Backspace => "backspace".to_string(),
        KeyCode::Left => "left".to_string(),
        KeyCode::Right => "right".to_string(),
        KeyCode::Up => "up".to_string(),
        KeyCode::Down => "down".to_string(),
        KeyCode::Home => "home".to_string(),
        KeyCode::End => "end".to_string(),
        KeyCode::PageUp => "page-up".to_string(),
        KeyCode::PageDown => "page-down".to_string(),
        KeyCode::Delete => "delete".to_string(),
        KeyCode::Insert => "insert".to_string(),
        KeyCode::Menu => "menu".to_string(),
        KeyCode::F(n) => format!("f{}", n),
        _ => return None,
    };
    let mut name = String::new();
    if mods.contains(KeyModifiers::CONTROL) {
        name.push_str("ctrl-");
    }
    if mods.contains(KeyModifiers::ALT) {
        name.push_str("alt-");
    }
    if mods.contains(KeyModifiers::SHIFT) && !matches!(code, KeyCode::Char(_)) {
        name.push_str("shift-");
    }
    name.push_str(&base);
    Some(name)
}

#[derive(Debug, Clone, Default)]
pub struct KeyBindings {
    map: HashMap<Action, Vec<KeyCombo>>,
}

impl KeyBindings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bindings every widget honours: the context menu everywhere, focus
    /// movement inside boxes.
    pub fn widget_defaults() -> Self {
        use Action::*;
        let mut kb = Self::new();
        kb.add(ContextMenu, KeyCombo::plain(KeyCode::F(11)));
        kb.add(
            ContextMenu,
            KeyCombo::new(KeyCode::Char('x'), KeyModifiers::CONTROL),
        );
        kb.add(ContextMenu, KeyCombo::plain(KeyCode::Menu));
        kb.add(FocusNext, KeyCombo::plain(KeyCode::Tab));
        kb.add(FocusNext, KeyCombo::plain(KeyCode::Right));
        kb.add(FocusPrev, KeyCombo::plain(KeyCode::BackTab));
        kb.add(FocusPrev, KeyCombo::plain(KeyCode::Left));
        kb
    }

    pub fn wm_defaults() -> Self {
        use Action::*;
        let mut kb = Self::new();
        kb.add(
            Quit,
            KeyCombo::new(KeyCode::Char('q'), KeyModifiers::CONTROL),
        );
        kb.add(
            WindowNext,
            KeyCombo::new(KeyCode::Char('n'), KeyModifiers::ALT),
        );
        kb.add(
            WindowPrev,
            KeyCombo::new(KeyCode::Char('p'), KeyModifiers::ALT),
        );
        kb.add(
            WorkspaceNext,
            KeyCombo::new(KeyCode::Char('>'), KeyModifiers::ALT),
        );
        kb.add(
            WorkspacePrev,
            KeyCombo::new(KeyCode::Char('<'), KeyModifiers::ALT),
        );
        kb.add(
            CloseWindow,
            KeyCombo::new(KeyCode::Char('c'), KeyModifiers::ALT),
        );
        kb
    }

    pub fn add(&mut self, action: Action, combo: KeyCombo) {
        self.map.entry(action).or_default().push(combo);
    }

    pub fn matches(&self, action: Action, key: &str) -> bool {
        self.map
            .get(&action)
            .is_some_and(|list| list.iter().any(|c| c.name().as_deref() == Some(key)))
    }

    pub fn action_for(&self, key: &str) -> Option<Action> {
        self.map
            .iter()
            .find(|(_, list)| list.iter().any(|c| c.name().as_deref() == Some(key)))
            .map(|(act, _)| *act)
    }

    /// Return the display strings for all combos mapped to `action`.
    pub fn combos_for(&self, action: Action) -> Vec<String> {
        self.map
            .get(&action)
            .map(|list| list.iter().map(|c| c.to_string()).collect())
            .unwrap_or_default()
    }
}

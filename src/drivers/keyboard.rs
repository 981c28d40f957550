use crossterm::event::{Event, KeyCode, KeyEventKind, KeyModifiers};

/// Folds platform quirks out of raw key events before they are named.
///
/// Shift+Tab becomes BackTab, Shift is dropped from printable characters
/// (the character already carries the case), and key releases are
/// discarded. Windows consoles also report repeats and a held Escape
/// several times; those collapse to a single press.
#[derive(Debug, Default)]
pub struct KeyboardNormalizer {
    esc_down: bool,
}

impl KeyboardNormalizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn normalize(&mut self, evt: Event) -> Option<Event> {
        let Event::Key(mut key) = evt else {
            return Some(evt);
        };
        if !self.accept(key.code, key.kind) {
            return None;
        }
        fold_shift(&mut key.code, &mut key.modifiers);
        Some(Event::Key(key))
    }

    /// Whether a key of this kind counts as a fresh press.
    fn accept(&mut self, code: KeyCode, kind: KeyEventKind) -> bool {
        if !cfg!(windows) {
            return kind != KeyEventKind::Release;
        }
        match kind {
            KeyEventKind::Repeat => false,
            KeyEventKind::Release => {
                if code == KeyCode::Esc {
                    self.esc_down = false;
                }
                false
            }
            KeyEventKind::Press if code == KeyCode::Esc => {
                !std::mem::replace(&mut self.esc_down, true)
            }
            KeyEventKind::Press => {
                self.esc_down = false;
                true
            }
        }
    }
}

fn fold_shift(code: &mut KeyCode, modifiers: &mut KeyModifiers) {
    if *code == KeyCode::Tab && modifiers.contains(KeyModifiers::SHIFT) {
        *code = KeyCode::BackTab;
    }
    if matches!(code, KeyCode::Char(_) | KeyCode::BackTab) {
        modifiers.remove(KeyModifiers::SHIFT);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEvent;

    fn press(code: KeyCode, mods: KeyModifiers) -> Event {
        let mut key = KeyEvent::new(code, mods);
        key.kind = KeyEventKind::Press;
        Event::Key(key)
    }

    #[test]
    fn tab_with_shift_becomes_backtab() {
        let mut norm = KeyboardNormalizer::new();
        let out = norm.normalize(press(KeyCode::Tab, KeyModifiers::SHIFT));
        let Some(Event::Key(k)) = out else {
            panic!("expected key event");
        };
        assert_eq!(k.code, KeyCode::BackTab);
        assert!(!k.modifiers.contains(KeyModifiers::SHIFT));
    }

    #[test]
    fn shift_is_dropped_from_printable_chars_only() {
        let mut norm = KeyboardNormalizer::new();
        let Some(Event::Key(k)) =
            norm.normalize(press(KeyCode::Char('>'), KeyModifiers::SHIFT | KeyModifiers::ALT))
        else {
            panic!("expected key event");
        };
        assert_eq!(k.modifiers, KeyModifiers::ALT);

        let Some(Event::Key(k)) = norm.normalize(press(KeyCode::Up, KeyModifiers::SHIFT)) else {
            panic!("expected key event");
        };
        assert_eq!(k.modifiers, KeyModifiers::SHIFT);
    }

    #[test]
    fn release_key_is_ignored() {
        let mut norm = KeyboardNormalizer::new();
        let mut key = KeyEvent::new(KeyCode::Char('a'), KeyModifiers::NONE);
        key.kind = KeyEventKind::Release;
        assert!(norm.normalize(Event::Key(key)).is_none());
    }

    #[test]
    fn non_key_events_pass_through() {
        let mut norm = KeyboardNormalizer::new();
        assert_eq!(
            norm.normalize(Event::Resize(10, 20)),
            Some(Event::Resize(10, 20))
        );
    }
}

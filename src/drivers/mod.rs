pub mod console;
pub mod headless;
pub mod keyboard;

use std::io;
use std::time::Duration;

use ::crossterm::event::{Event, MouseButton, MouseEventKind};
use ratatui::buffer::Buffer;

use crate::keybindings::key_name;

pub trait InputDriver {
    fn poll(&mut self, timeout: Duration) -> io::Result<bool>;
    fn read(&mut self) -> io::Result<Event>;
    fn set_mouse_capture(&mut self, _enabled: bool) -> io::Result<()> {
        Ok(())
    }
}

impl<T: InputDriver + ?Sized> InputDriver for &mut T {
    fn poll(&mut self, timeout: Duration) -> io::Result<bool> {
        (**self).poll(timeout)
    }

    fn read(&mut self) -> io::Result<Event> {
        (**self).read()
    }

    fn set_mouse_capture(&mut self, enabled: bool) -> io::Result<()> {
        (**self).set_mouse_capture(enabled)
    }
}

/// Presents composed frames. Object safe so the screen can own any driver.
pub trait OutputDriver {
    fn enter(&mut self) -> io::Result<()>;
    fn exit(&mut self) -> io::Result<()>;
    fn size(&self) -> io::Result<(u16, u16)>;
    fn present(&mut self, frame: &Buffer) -> io::Result<()>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseEvent {
    LeftDown,
    RightDown,
    MiddleDown,
    Up,
    ScrollUp,
    ScrollDown,
}

impl MouseEvent {
    /// Presses that move focus to the widget under the pointer.
    pub fn is_press(self) -> bool {
        matches!(
            self,
            MouseEvent::LeftDown | MouseEvent::RightDown | MouseEvent::MiddleDown
        )
    }
}

/// Input as the toolkit sees it: keys by canonical name, mouse events at
/// absolute screen coordinates, and terminal resizes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    Key(String),
    Mouse { event: MouseEvent, x: i32, y: i32 },
    Resize(u16, u16),
}

impl InputEvent {
    pub fn key(name: &str) -> Self {
        InputEvent::Key(name.to_string())
    }

    /// Translate a (normalised) crossterm event. Drags, pointer motion,
    /// focus and paste events have no toolkit counterpart.
    pub fn decode(evt: Event) -> Option<Self> {
        match evt {
            Event::Key(key) => key_name(&key).map(InputEvent::Key),
            Event::Mouse(mouse) => {
                let event = match mouse.kind {
                    MouseEventKind::Down(MouseButton::Left) => MouseEvent::LeftDown,
                    MouseEventKind::Down(MouseButton::Right) => MouseEvent::RightDown,
                    MouseEventKind::Down(MouseButton::Middle) => MouseEvent::MiddleDown,
                    MouseEventKind::Up(_) => MouseEvent::Up,
                    MouseEventKind::ScrollUp => MouseEvent::ScrollUp,
                    MouseEventKind::ScrollDown => MouseEvent::ScrollDown,
                    _ => return None,
                };
                Some(InputEvent::Mouse {
                    event,
                    x: i32::from(mouse.column),
                    y: i32::from(mouse.row),
                })
            }
            Event::Resize(w, h) => Some(InputEvent::Resize(w, h)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ::crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent as CtMouse};

    struct Dummy;
    impl InputDriver for Dummy {
        fn poll(&mut self, _timeout: Duration) -> io::Result<bool> {
            Ok(true)
        }

        fn read(&mut self) -> io::Result<Event> {
            Ok(Event::Key(KeyEvent::new(
                KeyCode::Char('x'),
                KeyModifiers::NONE,
            )))
        }
    }

    #[test]
    fn blanket_impl_for_mut_ref_works() {
        let mut d = Dummy;
        let mut r = &mut d;
        assert!(r.poll(Duration::from_millis(0)).unwrap());
        let ev = InputDriver::read(&mut r).unwrap();
        assert_eq!(InputEvent::decode(ev), Some(InputEvent::key("x")));
    }

    #[test]
    fn decodes_mouse_presses_and_drops_motion() {
        let press = Event::Mouse(CtMouse {
            kind: MouseEventKind::Down(MouseButton::Right),
            column: 4,
            row: 7,
            modifiers: KeyModifiers::NONE,
        });
        assert_eq!(
            InputEvent::decode(press),
            Some(InputEvent::Mouse {
                event: MouseEvent::RightDown,
                x: 4,
                y: 7
            })
        );
        let moved = Event::Mouse(CtMouse {
            kind: MouseEventKind::Moved,
            column: 0,
            row: 0,
            modifiers: KeyModifiers::NONE,
        });
        assert_eq!(InputEvent::decode(moved), None);
    }

    #[test]
    fn decodes_resize() {
        assert_eq!(
            InputEvent::decode(Event::Resize(80, 24)),
            Some(InputEvent::Resize(80, 24))
        );
        assert!(!MouseEvent::Up.is_press());
        assert!(MouseEvent::MiddleDown.is_press());
    }
}

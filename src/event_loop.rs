use std::io;
use std::time::Duration;

use crate::drivers::{InputDriver, InputEvent};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlFlow {
    Continue,
    Quit,
}

/// Single-threaded message pump.
///
/// The loop is the only place that polls the input driver. Every iteration
/// first calls the handler with `None` (the idle tick, where the window
/// manager flushes coalesced updates), then drains every event that is
/// already waiting so a burst of input is handled before the next flush.
/// Raw events the toolkit has no use for are dropped before the handler
/// sees them.
pub struct EventLoop<D> {
    driver: D,
    poll_interval: Duration,
}

impl<D: InputDriver> EventLoop<D> {
    pub fn new(driver: D, poll_interval: Duration) -> Self {
        Self {
            driver,
            poll_interval,
        }
    }

    /// Wait up to one poll interval for the next decodable event.
    pub fn poll(&mut self) -> io::Result<Option<InputEvent>> {
        if self.driver.poll(self.poll_interval)? {
            Ok(InputEvent::decode(self.driver.read()?))
        } else {
            Ok(None)
        }
    }

    pub fn driver(&mut self) -> &mut D {
        &mut self.driver
    }

    /// Run until the handler returns [`ControlFlow::Quit`].
    pub fn run<F>(&mut self, mut handler: F) -> io::Result<()>
    where
        F: FnMut(&mut D, Option<InputEvent>) -> io::Result<ControlFlow>,
    {
        loop {
            if let ControlFlow::Quit = handler(&mut self.driver, None)? {
                break;
            }

            if self.driver.poll(self.poll_interval)? {
                loop {
                    let raw = self.driver.read()?;
                    if let Some(event) = InputEvent::decode(raw)
                        && let ControlFlow::Quit = handler(&mut self.driver, Some(event))?
                    {
                        return Ok(());
                    }
                    if !self.driver.poll(Duration::ZERO)? {
                        break;
                    }
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drivers::headless::ScriptedInput;
    use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};

    #[test]
    fn idle_tick_precedes_each_burst_and_undecodable_events_are_dropped() {
        let input = ScriptedInput::new([
            Event::Key(KeyEvent::new(KeyCode::Char('a'), KeyModifiers::NONE)),
            Event::FocusGained,
            Event::Resize(10, 4),
        ]);
        let mut seen = Vec::new();
        let mut idle = 0;
        EventLoop::new(input, Duration::ZERO)
            .run(|driver, event| {
                match event {
                    Some(event) => seen.push(event),
                    None => {
                        idle += 1;
                        if driver.is_drained() {
                            return Ok(ControlFlow::Quit);
                        }
                    }
                }
                Ok(ControlFlow::Continue)
            })
            .unwrap();
        assert_eq!(seen, vec![InputEvent::key("a"), InputEvent::Resize(10, 4)]);
        assert_eq!(idle, 2);
    }

    #[test]
    fn quit_from_an_event_stops_mid_burst() {
        let input = ScriptedInput::new([Event::Resize(1, 1), Event::Resize(2, 2)]);
        let mut count = 0;
        let mut lp = EventLoop::new(input, Duration::ZERO);
        lp.run(|_, event| {
            if event.is_some() {
                count += 1;
                return Ok(ControlFlow::Quit);
            }
            Ok(ControlFlow::Continue)
        })
        .unwrap();
        assert_eq!(count, 1);
        assert!(!lp.driver().is_drained());
    }

    #[test]
    fn poll_decodes_one_event() {
        let mut lp = EventLoop::new(ScriptedInput::new([Event::Resize(3, 2)]), Duration::ZERO);
        assert_eq!(lp.poll().unwrap(), Some(InputEvent::Resize(3, 2)));
        assert_eq!(lp.poll().unwrap(), None);
    }
}

//! Drivers that never touch the real terminal.

use std::collections::VecDeque;
use std::io;
use std::time::Duration;

use crossterm::event::Event;
use ratatui::buffer::Buffer;

use super::{InputDriver, OutputDriver};

/// Keeps the last presented frame in memory.
#[derive(Debug)]
pub struct HeadlessOutput {
    size: (u16, u16),
    presented: usize,
    last: Option<Buffer>,
}

impl HeadlessOutput {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            size: (width, height),
            presented: 0,
            last: None,
        }
    }

    pub fn presented(&self) -> usize {
        self.presented
    }

    pub fn last_frame(&self) -> Option<&Buffer> {
        self.last.as_ref()
    }
}

impl OutputDriver for HeadlessOutput {
    fn enter(&mut self) -> io::Result<()> {
        Ok(())
    }

    fn exit(&mut self) -> io::Result<()> {
        Ok(())
    }

    fn size(&self) -> io::Result<(u16, u16)> {
        Ok(self.size)
    }

    fn present(&mut self, frame: &Buffer) -> io::Result<()> {
        self.presented += 1;
        self.size = (frame.area.width, frame.area.height);
        self.last = Some(frame.clone());
        Ok(())
    }
}

/// Replays a fixed list of events, then reports no more input.
#[derive(Debug, Default)]
pub struct ScriptedInput {
    events: VecDeque<Event>,
}

impl ScriptedInput {
    pub fn new(events: impl IntoIterator<Item = Event>) -> Self {
        Self {
            events: events.into_iter().collect(),
        }
    }

    pub fn push(&mut self, evt: Event) {
        self.events.push_back(evt);
    }

    pub fn is_drained(&self) -> bool {
        self.events.is_empty()
    }
}

impl InputDriver for ScriptedInput {
    fn poll(&mut self, _timeout: Duration) -> io::Result<bool> {
        Ok(!self.events.is_empty())
    }

    fn read(&mut self) -> io::Result<Event> {
        self.events
            .pop_front()
            .ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, "script exhausted"))
    }
}

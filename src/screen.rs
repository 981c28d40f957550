//! In-memory compositor backing every widget and window.
//!
//! `Screen` plays the role of the terminal backend collaborator: it hands out
//! cell surfaces (`ratatui::buffer::Buffer`s addressed by `SurfaceId`),
//! stacks a subset of them as panels, copies regions between surfaces and,
//! on `flush`, composes the visible panels bottom-to-top into one frame that
//! is presented through an `OutputDriver`.

use std::collections::BTreeMap;
use std::fmt;
use std::io;
use std::time::{Duration, Instant};

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;

use crate::drivers::OutputDriver;
use crate::drivers::headless::HeadlessOutput;
use crate::ui::{Canvas, SignedRect};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SurfaceId(u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PanelId(u32);

impl fmt::Display for SurfaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "surface#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy)]
struct Panel {
    surface: SurfaceId,
    x: i32,
    y: i32,
    hidden: bool,
}

pub struct Screen {
    surfaces: BTreeMap<SurfaceId, Buffer>,
    panels: BTreeMap<PanelId, Panel>,
    // bottom -> top
    stack: Vec<PanelId>,
    next_surface: u32,
    next_panel: u32,
    frame: Buffer,
    output: Box<dyn OutputDriver>,
    last_input: Instant,
    flush_count: usize,
}

impl fmt::Debug for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Screen")
            .field("surfaces", &self.surfaces.len())
            .field("stack", &self.stack)
            .field("size", &self.terminal_size())
            .field("flush_count", &self.flush_count)
            .finish()
    }
}

impl Screen {
    pub fn new(output: Box<dyn OutputDriver>, width: u16, height: u16) -> Self {
        Self {
            surfaces: BTreeMap::new(),
            panels: BTreeMap::new(),
            stack: Vec::new(),
            next_surface: 0,
            next_panel: 0,
            frame: Buffer::empty(Rect::new(0, 0, width, height)),
            output,
            last_input: Instant::now(),
            flush_count: 0,
        }
    }

    /// Build a screen sized from the output driver's own report.
    pub fn from_output(output: Box<dyn OutputDriver>) -> io::Result<Self> {
        let (width, height) = output.size()?;
        Ok(Self::new(output, width, height))
    }

    /// A screen that presents into memory, used by tests and benchmarks.
    pub fn headless(width: u16, height: u16) -> Self {
        Self::new(Box::new(HeadlessOutput::new(width, height)), width, height)
    }

    pub fn output_mut(&mut self) -> &mut dyn OutputDriver {
        self.output.as_mut()
    }

    pub fn terminal_size(&self) -> (u16, u16) {
        (self.frame.area.width, self.frame.area.height)
    }

    pub fn set_terminal_size(&mut self, width: u16, height: u16) {
        if self.terminal_size() == (width, height) {
            return;
        }
        self.frame = Buffer::empty(Rect::new(0, 0, width, height));
    }

    pub fn touch_input(&mut self) {
        self.last_input = Instant::now();
    }

    pub fn idle_time(&self) -> Duration {
        self.last_input.elapsed()
    }

    pub fn alloc_surface(&mut self, width: u16, height: u16) -> SurfaceId {
        let id = SurfaceId(self.next_surface);
        self.next_surface = self.next_surface.wrapping_add(1);
        self.surfaces
            .insert(id, Buffer::empty(Rect::new(0, 0, width, height)));
        id
    }

    /// Replace the surface with a blank one of the new size.
    pub fn resize_surface(&mut self, id: SurfaceId, width: u16, height: u16) {
        if let Some(buffer) = self.surfaces.get_mut(&id) {
            *buffer = Buffer::empty(Rect::new(0, 0, width, height));
        }
    }

    pub fn release_surface(&mut self, id: SurfaceId) {
        self.surfaces.remove(&id);
        let orphaned: Vec<PanelId> = self
            .panels
            .iter()
            .filter(|(_, panel)| panel.surface == id)
            .map(|(pid, _)| *pid)
            .collect();
        for panel in orphaned {
            self.del_panel(panel);
        }
    }

    pub fn surface(&self, id: SurfaceId) -> Option<&Buffer> {
        self.surfaces.get(&id)
    }

    pub fn surface_mut(&mut self, id: SurfaceId) -> Option<&mut Buffer> {
        self.surfaces.get_mut(&id)
    }

    pub fn surface_size(&self, id: SurfaceId) -> Option<(u16, u16)> {
        self.surfaces
            .get(&id)
            .map(|buffer| (buffer.area.width, buffer.area.height))
    }

    /// Copy `dest.width x dest.height` cells from `src` (starting at
    /// `src_origin`) into `dst` at `dest`.
    pub fn copy_region(
        &mut self,
        src: SurfaceId,
        src_origin: (u16, u16),
        dst: SurfaceId,
        dest: SignedRect,
    ) {
        if src == dst {
            return;
        }
        let Some(source) = self.surfaces.remove(&src) else {
            return;
        };
        if let Some(target) = self.surfaces.get_mut(&dst) {
            Canvas::new(target).blit_from_signed(&source, src_origin, dest);
        }
        self.surfaces.insert(src, source);
    }

    /// Stack `surface` as a new panel on top of every other panel.
    pub fn new_panel(&mut self, surface: SurfaceId) -> PanelId {
        let id = PanelId(self.next_panel);
        self.next_panel = self.next_panel.wrapping_add(1);
        self.panels.insert(
            id,
            Panel {
                surface,
                x: 0,
                y: 0,
                hidden: false,
            },
        );
        self.stack.push(id);
        id
    }

    pub fn del_panel(&mut self, id: PanelId) {
        self.panels.remove(&id);
        self.stack.retain(|panel| *panel != id);
    }

    /// Unhide the panel and put it on top of the stack.
    pub fn show_panel(&mut self, id: PanelId) {
        if let Some(panel) = self.panels.get_mut(&id) {
            panel.hidden = false;
            self.raise_panel(id);
        }
    }

    pub fn hide_panel(&mut self, id: PanelId) {
        if let Some(panel) = self.panels.get_mut(&id) {
            panel.hidden = true;
        }
    }

    pub fn raise_panel(&mut self, id: PanelId) {
        if let Some(pos) = self.stack.iter().position(|panel| *panel == id) {
            let item = self.stack.remove(pos);
            self.stack.push(item);
        }
    }

    pub fn lower_panel(&mut self, id: PanelId) {
        if let Some(pos) = self.stack.iter().position(|panel| *panel == id) {
            let item = self.stack.remove(pos);
            self.stack.insert(0, item);
        }
    }

    pub fn move_panel(&mut self, id: PanelId, x: i32, y: i32) {
        if let Some(panel) = self.panels.get_mut(&id) {
            panel.x = x;
            panel.y = y;
        }
    }

    pub fn panel_hidden(&self, id: PanelId) -> bool {
        self.panels.get(&id).is_none_or(|panel| panel.hidden)
    }

    pub fn panel_position(&self, id: PanelId) -> Option<(i32, i32)> {
        self.panels.get(&id).map(|panel| (panel.x, panel.y))
    }

    pub fn panel_surface(&self, id: PanelId) -> Option<SurfaceId> {
        self.panels.get(&id).map(|panel| panel.surface)
    }

    /// Panels from bottom to top.
    pub fn panel_stack(&self) -> &[PanelId] {
        &self.stack
    }

    fn compose(&mut self) {
        let area = self.frame.area;
        let mut canvas = Canvas::new(&mut self.frame);
        canvas.fill(crate::theme::normal());
        for id in &self.stack {
            let Some(panel) = self.panels.get(id) else {
                continue;
            };
            if panel.hidden {
                continue;
            }
            let Some(surface) = self.surfaces.get(&panel.surface) else {
                continue;
            };
            let dest = SignedRect::new(
                panel.x,
                panel.y,
                surface.area.width.min(area.width),
                surface.area.height.min(area.height),
            );
            canvas.blit_from_signed(surface, (0, 0), dest);
        }
    }

    /// Compose every visible panel and present the frame.
    pub fn flush(&mut self) -> io::Result<()> {
        self.compose();
        self.flush_count = self.flush_count.saturating_add(1);
        self.output.present(&self.frame)
    }

    /// The most recently composed frame.
    pub fn frame(&self) -> &Buffer {
        &self.frame
    }

    pub fn flush_count(&self) -> usize {
        self.flush_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::row_text;

    fn paint(screen: &mut Screen, id: SurfaceId, symbol: &str) {
        let buffer = screen.surface_mut(id).expect("surface");
        let area = buffer.area;
        for y in 0..area.height {
            for x in 0..area.width {
                buffer.cell_mut((x, y)).unwrap().set_symbol(symbol);
            }
        }
    }

    #[test]
    fn panels_compose_bottom_to_top() {
        let mut screen = Screen::headless(6, 2);
        let a = screen.alloc_surface(4, 2);
        let b = screen.alloc_surface(2, 1);
        paint(&mut screen, a, "a");
        paint(&mut screen, b, "b");
        let pa = screen.new_panel(a);
        let pb = screen.new_panel(b);
        screen.move_panel(pb, 3, 0);
        screen.flush().unwrap();
        assert_eq!(row_text(screen.frame(), 0), "aaabb ");
        assert_eq!(row_text(screen.frame(), 1), "aaaa  ");

        screen.raise_panel(pa);
        screen.flush().unwrap();
        assert_eq!(row_text(screen.frame(), 0), "aaaab ");
        assert_eq!(screen.flush_count(), 2);
    }

    #[test]
    fn hidden_panels_are_skipped_and_show_raises() {
        let mut screen = Screen::headless(2, 1);
        let a = screen.alloc_surface(2, 1);
        let b = screen.alloc_surface(2, 1);
        paint(&mut screen, a, "a");
        paint(&mut screen, b, "b");
        let pa = screen.new_panel(a);
        let pb = screen.new_panel(b);
        screen.hide_panel(pb);
        screen.flush().unwrap();
        assert_eq!(row_text(screen.frame(), 0), "aa");
        screen.show_panel(pb);
        assert_eq!(screen.panel_stack(), &[pa, pb]);
        screen.flush().unwrap();
        assert_eq!(row_text(screen.frame(), 0), "bb");
    }

    #[test]
    fn releasing_a_surface_drops_its_panels() {
        let mut screen = Screen::headless(2, 1);
        let a = screen.alloc_surface(2, 1);
        let pa = screen.new_panel(a);
        screen.release_surface(a);
        assert!(screen.surface(a).is_none());
        assert!(screen.panel_stack().is_empty());
        assert!(screen.panel_hidden(pa));
    }

    #[test]
    fn copy_region_between_surfaces() {
        let mut screen = Screen::headless(1, 1);
        let src = screen.alloc_surface(3, 1);
        let dst = screen.alloc_surface(3, 1);
        paint(&mut screen, src, "s");
        screen.copy_region(src, (1, 0), dst, SignedRect::new(1, 0, 2, 1));
        assert_eq!(row_text(screen.surface(dst).unwrap(), 0), " ss");
        // self copies are ignored rather than aliasing the buffer
        screen.copy_region(dst, (0, 0), dst, SignedRect::new(0, 0, 1, 1));
        assert_eq!(row_text(screen.surface(dst).unwrap(), 0), " ss");
    }
}

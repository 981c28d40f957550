//! Canvas: a thin painter over a `ratatui::buffer::Buffer` that clamps every
//! write to the buffer's area.
//!
//! Widget surfaces, window-manager node surfaces and the composed terminal
//! frame are all plain `Buffer`s. Painting code goes through `Canvas` so that
//! coordinates drifting outside a surface (negative offsets, oversized titles,
//! windows dragged past the terminal edge) are clipped instead of panicking.
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;

/// Signed origin with unsigned size, used for surfaces that may hang past the
/// top or left edge of their destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SignedRect {
    pub x: i32,
    pub y: i32,
    pub width: u16,
    pub height: u16,
}

impl SignedRect {
    pub const fn new(x: i32, y: i32, width: u16, height: u16) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        self.width > 0
            && self.height > 0
            && x >= self.x
            && y >= self.y
            && x < self.x + i32::from(self.width)
            && y < self.y + i32::from(self.height)
    }
}

/// Clamp-on-write painter over a cell buffer.
pub struct Canvas<'a> {
    area: Rect,
    buffer: &'a mut Buffer,
}

impl<'a> Canvas<'a> {
    pub fn new(buffer: &'a mut Buffer) -> Self {
        let area = buffer.area;
        Self { area, buffer }
    }

    /// Restrict painting to `area` (intersected with the buffer).
    pub fn with_area(buffer: &'a mut Buffer, area: Rect) -> Self {
        let area = area.intersection(buffer.area);
        Self { area, buffer }
    }

    pub fn area(&self) -> Rect {
        self.area
    }

    pub fn buffer(&self) -> &Buffer {
        self.buffer
    }

    pub fn buffer_mut(&mut self) -> &mut Buffer {
        self.buffer
    }

    fn cell_in_area(&self, x: i32, y: i32) -> Option<(u16, u16)> {
        if x < 0 || y < 0 {
            return None;
        }
        let (x, y) = (u16::try_from(x).ok()?, u16::try_from(y).ok()?);
        let max_x = self.area.x.saturating_add(self.area.width);
        let max_y = self.area.y.saturating_add(self.area.height);
        (x >= self.area.x && x < max_x && y >= self.area.y && y < max_y).then_some((x, y))
    }

    pub fn set_cell(&mut self, x: i32, y: i32, symbol: &str, style: Style) {
        if let Some(pos) = self.cell_in_area(x, y)
            && let Some(cell) = self.buffer.cell_mut(pos)
        {
            cell.set_symbol(symbol);
            cell.set_style(style);
        }
    }

    pub fn put_str(&mut self, x: i32, y: i32, text: &str, style: Style) {
        if y < 0 {
            return;
        }
        // Drop the part of the string hanging past the left edge.
        let skip = if x < 0 { x.unsigned_abs() as usize } else { 0 };
        let text: String = text.chars().skip(skip).collect();
        let x = x.max(0);
        let (Ok(x), Ok(y)) = (u16::try_from(x), u16::try_from(y)) else {
            return;
        };
        safe_set_string(self.buffer, self.area, x, y, &text, style);
    }

    /// Reset every cell of the canvas area to a blank cell in `style`.
    pub fn fill(&mut self, style: Style) {
        for y in self.area.y..self.area.y.saturating_add(self.area.height) {
            for x in self.area.x..self.area.x.saturating_add(self.area.width) {
                if let Some(cell) = self.buffer.cell_mut((x, y)) {
                    cell.reset();
                    cell.set_symbol(" ");
                    cell.set_style(style);
                }
            }
        }
    }

    pub fn hline(&mut self, x: i32, y: i32, len: i32, symbol: &str, style: Style) {
        for dx in 0..len.max(0) {
            self.set_cell(x + dx, y, symbol, style);
        }
    }

    pub fn vline(&mut self, x: i32, y: i32, len: i32, symbol: &str, style: Style) {
        for dy in 0..len.max(0) {
            self.set_cell(x, y + dy, symbol, style);
        }
    }

    /// Single-line frame around `(0, 0, width, height)`.
    pub fn draw_border(&mut self, width: i32, height: i32, style: Style) {
        if width < 2 || height < 2 {
            return;
        }
        let right = width - 1;
        let bottom = height - 1;
        self.hline(1, 0, width - 2, "─", style);
        self.hline(1, bottom, width - 2, "─", style);
        self.vline(0, 1, height - 2, "│", style);
        self.vline(right, 1, height - 2, "│", style);
        self.set_cell(0, 0, "┌", style);
        self.set_cell(right, 0, "┐", style);
        self.set_cell(0, bottom, "└", style);
        self.set_cell(right, bottom, "┘", style);
    }

    /// Drop shadow one cell right of and below `(0, 0, width, height)`.
    pub fn draw_shadow(&mut self, width: i32, height: i32, style: Style) {
        self.vline(width, 1, height, " ", style);
        self.hline(1, height, width, " ", style);
    }

    /// Copy `dest.width x dest.height` cells starting at `src_origin` in `src`
    /// onto this canvas at the signed position `dest`, clipping both sides.
    pub fn blit_from_signed(&mut self, src: &Buffer, src_origin: (u16, u16), dest: SignedRect) {
        for sy in 0..i32::from(dest.height) {
            for sx in 0..i32::from(dest.width) {
                let Some(pos) = self.cell_in_area(dest.x + sx, dest.y + sy) else {
                    continue;
                };
                let src_x = i32::from(src_origin.0) + sx;
                let src_y = i32::from(src_origin.1) + sy;
                let (Ok(src_x), Ok(src_y)) = (u16::try_from(src_x), u16::try_from(src_y)) else {
                    continue;
                };
                if let (Some(src_cell), Some(dst_cell)) =
                    (src.cell((src_x, src_y)), self.buffer.cell_mut(pos))
                {
                    *dst_cell = src_cell.clone();
                }
            }
        }
    }
}

pub(crate) fn safe_set_string(
    buffer: &mut Buffer,
    bounds: Rect,
    x: u16,
    y: u16,
    text: &str,
    style: Style,
) {
    if bounds.width == 0 || bounds.height == 0 {
        return;
    }
    let max_x = bounds.x.saturating_add(bounds.width);
    let max_y = bounds.y.saturating_add(bounds.height);
    if x < bounds.x || x >= max_x || y < bounds.y || y >= max_y {
        return;
    }
    let available = max_x.saturating_sub(x);
    if available == 0 {
        return;
    }
    let text = truncate_to_width(text, available as usize);
    buffer.set_string(x, y, text, style);
}

pub(crate) fn truncate_to_width(value: &str, width: usize) -> String {
    if value.chars().count() <= width {
        return value.to_string();
    }
    value.chars().take(width).collect()
}

/// Collect the symbols of one buffer row, used by tests and debug dumps.
pub fn row_text(buffer: &Buffer, y: u16) -> String {
    let area = buffer.area;
    (area.x..area.x.saturating_add(area.width))
        .filter_map(|x| buffer.cell((x, y)).map(|cell| cell.symbol().to_string()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::buffer::Buffer;
    use ratatui::layout::Rect;
    use ratatui::style::Style;

    fn filled(area: Rect, symbol: &str) -> Buffer {
        let mut buf = Buffer::empty(area);
        for y in area.y..area.y + area.height {
            for x in area.x..area.x + area.width {
                if let Some(cell) = buf.cell_mut((x, y)) {
                    cell.set_symbol(symbol);
                }
            }
        }
        buf
    }

    #[test]
    fn blit_from_signed_clips_negative_offsets() {
        let mut dest = Buffer::empty(Rect::new(0, 0, 4, 2));
        let src = filled(Rect::new(0, 0, 3, 2), "#");
        let mut canvas = Canvas::new(&mut dest);
        canvas.blit_from_signed(&src, (0, 0), SignedRect::new(-1, 0, 3, 2));
        assert_eq!(dest.cell((0, 0)).unwrap().symbol(), "#");
        assert_eq!(dest.cell((1, 0)).unwrap().symbol(), "#");
        assert_eq!(dest.cell((2, 0)).unwrap().symbol(), " ");
    }

    #[test]
    fn blit_from_signed_honours_source_origin() {
        let mut dest = Buffer::empty(Rect::new(0, 0, 3, 1));
        let mut src = filled(Rect::new(0, 0, 4, 1), ".");
        src.cell_mut((2, 0)).unwrap().set_symbol("Q");
        let mut canvas = Canvas::new(&mut dest);
        canvas.blit_from_signed(&src, (2, 0), SignedRect::new(0, 0, 2, 1));
        assert_eq!(row_text(&dest, 0), "Q. ");
    }

    #[test]
    fn blit_from_signed_ignores_non_overlapping() {
        let mut dest = Buffer::empty(Rect::new(0, 0, 3, 3));
        let src = filled(Rect::new(0, 0, 2, 2), "#");
        let mut canvas = Canvas::new(&mut dest);
        canvas.blit_from_signed(&src, (0, 0), SignedRect::new(-5, -5, 2, 2));
        for y in 0..3 {
            assert_eq!(row_text(&dest, y), "   ");
        }
    }

    #[test]
    fn border_and_shadow_paint_expected_cells() {
        let mut buf = Buffer::empty(Rect::new(0, 0, 5, 4));
        let mut canvas = Canvas::new(&mut buf);
        canvas.draw_border(4, 3, Style::default());
        canvas.draw_shadow(4, 3, Style::default());
        assert_eq!(row_text(&buf, 0), "┌──┐ ");
        assert_eq!(row_text(&buf, 1), "│  │ ");
        assert_eq!(row_text(&buf, 2), "└──┘ ");
    }

    #[test]
    fn put_str_clips_left_and_right() {
        let mut buf = Buffer::empty(Rect::new(0, 0, 4, 1));
        let mut canvas = Canvas::new(&mut buf);
        canvas.put_str(-2, 0, "abcdef", Style::default());
        assert_eq!(row_text(canvas.buffer(), 0), "cdef");
        canvas.put_str(0, -1, "zz", Style::default());
        assert_eq!(row_text(&buf, 0), "cdef");
    }

    #[test]
    fn truncate_to_width_short_and_long() {
        assert_eq!(truncate_to_width("abc", 5), "abc");
        assert_eq!(truncate_to_width("abcdef", 3), "abc");
    }

    #[test]
    fn signed_rect_contains_respects_bounds() {
        let r = SignedRect::new(-2, 1, 4, 2);
        assert!(r.contains(-2, 1));
        assert!(r.contains(1, 2));
        assert!(!r.contains(2, 1));
        assert!(!SignedRect::new(0, 0, 0, 3).contains(0, 0));
    }
}

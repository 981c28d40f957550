/// Named boolean state carried by every widget.
///
/// A fresh widget is visible and draws a border and a shadow; every other
/// flag starts clear. `drawing` and `destroying` are owned by the tree: the
/// first guards against re-entrant draws, the second is set once when
/// destruction starts and never cleared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WidgetFlags {
    visible: bool,
    mapped: bool,
    has_border: bool,
    has_shadow: bool,
    grow_x: bool,
    grow_y: bool,
    take_focus: bool,
    has_focus: bool,
    drawing: bool,
    destroying: bool,
    disable_actions: bool,
    urgent: bool,
    transient: bool,
}

impl Default for WidgetFlags {
    fn default() -> Self {
        Self {
            visible: true,
            mapped: false,
            has_border: true,
            has_shadow: true,
            grow_x: false,
            grow_y: false,
            take_focus: false,
            has_focus: false,
            drawing: false,
            destroying: false,
            disable_actions: false,
            urgent: false,
            transient: false,
        }
    }
}

impl WidgetFlags {
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults for a box container: growable in both directions, focusable,
    /// widget-level actions deferred to the active child, no chrome.
    pub fn container() -> Self {
        Self {
            grow_x: true,
            grow_y: true,
            take_focus: true,
            disable_actions: true,
            has_border: false,
            has_shadow: false,
            ..Self::default()
        }
    }

    pub fn with_border(mut self, on: bool) -> Self {
        self.has_border = on;
        self
    }

    pub fn with_shadow(mut self, on: bool) -> Self {
        self.has_shadow = on;
        self
    }

    pub fn with_grow_x(mut self, on: bool) -> Self {
        self.grow_x = on;
        self
    }

    pub fn with_grow_y(mut self, on: bool) -> Self {
        self.grow_y = on;
        self
    }

    pub fn with_take_focus(mut self, on: bool) -> Self {
        self.take_focus = on;
        self
    }

    pub fn visible(&self) -> bool {
        self.visible
    }

    pub fn set_visible(&mut self, on: bool) {
        self.visible = on;
    }

    pub fn mapped(&self) -> bool {
        self.mapped
    }

    pub fn set_mapped(&mut self, on: bool) {
        self.mapped = on;
    }

    pub fn has_border(&self) -> bool {
        self.has_border
    }

    pub fn set_has_border(&mut self, on: bool) {
        self.has_border = on;
    }

    pub fn has_shadow(&self) -> bool {
        self.has_shadow
    }

    pub fn set_has_shadow(&mut self, on: bool) {
        self.has_shadow = on;
    }

    pub fn grow_x(&self) -> bool {
        self.grow_x
    }

    pub fn set_grow_x(&mut self, on: bool) {
        self.grow_x = on;
    }

    pub fn grow_y(&self) -> bool {
        self.grow_y
    }

    pub fn set_grow_y(&mut self, on: bool) {
        self.grow_y = on;
    }

    pub fn take_focus(&self) -> bool {
        self.take_focus
    }

    pub fn set_take_focus(&mut self, on: bool) {
        self.take_focus = on;
    }

    pub fn has_focus(&self) -> bool {
        self.has_focus
    }

    pub(crate) fn set_has_focus(&mut self, on: bool) {
        self.has_focus = on;
    }

    pub fn drawing(&self) -> bool {
        self.drawing
    }

    pub(crate) fn set_drawing(&mut self, on: bool) {
        self.drawing = on;
    }

    pub fn destroying(&self) -> bool {
        self.destroying
    }

    pub(crate) fn mark_destroying(&mut self) {
        self.destroying = true;
    }

    pub fn disable_actions(&self) -> bool {
        self.disable_actions
    }

    pub fn set_disable_actions(&mut self, on: bool) {
        self.disable_actions = on;
    }

    pub fn urgent(&self) -> bool {
        self.urgent
    }

    pub fn set_urgent(&mut self, on: bool) {
        self.urgent = on;
    }

    pub fn transient(&self) -> bool {
        self.transient
    }

    pub fn set_transient(&mut self, on: bool) {
        self.transient = on;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_widget_defaults() {
        let f = WidgetFlags::new();
        assert!(f.visible() && f.has_border() && f.has_shadow());
        assert!(!f.mapped() && !f.grow_x() && !f.take_focus() && !f.transient());
    }

    #[test]
    fn container_defaults() {
        let f = WidgetFlags::container();
        assert!(f.grow_x() && f.grow_y() && f.take_focus() && f.disable_actions());
        assert!(!f.has_border() && !f.has_shadow());
        assert!(f.visible());
    }

    #[test]
    fn destroying_is_monotonic() {
        let mut f = WidgetFlags::new();
        f.mark_destroying();
        f.mark_destroying();
        assert!(f.destroying());
    }
}

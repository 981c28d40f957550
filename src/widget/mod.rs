//! Widgets: identity, geometry, flags and the capability trait leaf kinds
//! implement.
//!
//! Every widget lives in a [`WidgetTree`] arena and is addressed by a
//! copyable [`WidgetId`]. A node is a [`WidgetCore`] (geometry, flags,
//! surface, parent link) plus a kind: either a leaf implementing [`Widget`]
//! or a box container whose behaviour lives in [`container`].

use std::any::Any;
use std::fmt;

use crate::drivers::MouseEvent;
use crate::screen::SurfaceId;
use crate::ui::Canvas;

pub mod container;
pub mod flags;
pub mod tree;

pub use container::{Alignment, BoxState, Maximize, Orientation};
pub use flags::WidgetFlags;
pub use tree::WidgetTree;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WidgetId(u64);

impl WidgetId {
    pub(crate) fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for WidgetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// State shared by every widget kind.
#[derive(Debug, Clone)]
pub struct WidgetCore {
    pub(crate) id: WidgetId,
    pub(crate) parent: Option<WidgetId>,
    pub(crate) x: i32,
    pub(crate) y: i32,
    pub(crate) width: i32,
    pub(crate) height: i32,
    pub(crate) min_width: i32,
    pub(crate) min_height: i32,
    pub(crate) flags: WidgetFlags,
    pub(crate) name: Option<String>,
    pub(crate) surface: Option<SurfaceId>,
    pub(crate) shadows_enabled: bool,
}

impl WidgetCore {
    pub(crate) fn new(id: WidgetId, flags: WidgetFlags, shadows_enabled: bool) -> Self {
        Self {
            id,
            parent: None,
            x: 0,
            y: 0,
            width: 0,
            height: 0,
            min_width: 0,
            min_height: 0,
            flags,
            name: None,
            surface: None,
            shadows_enabled,
        }
    }

    pub fn id(&self) -> WidgetId {
        self.id
    }

    pub fn parent(&self) -> Option<WidgetId> {
        self.parent
    }

    pub fn position(&self) -> (i32, i32) {
        (self.x, self.y)
    }

    /// Content size, without the shadow.
    pub fn content_size(&self) -> (i32, i32) {
        (self.width, self.height)
    }

    /// Store a content size directly. Only meaningful from `size_request`,
    /// where the widget reports what it wants before any negotiation.
    pub fn request_size(&mut self, width: i32, height: i32) {
        self.width = width.max(0);
        self.height = height.max(0);
    }

    pub fn minimum_size(&self) -> (i32, i32) {
        (self.min_width, self.min_height)
    }

    /// One extra cell in each direction when the widget casts a shadow and
    /// shadows are switched on.
    pub fn shadow(&self) -> i32 {
        i32::from(self.flags.has_shadow() && self.shadows_enabled)
    }

    /// Reported size: content plus shadow.
    pub fn size(&self) -> (i32, i32) {
        let s = self.shadow();
        (self.width + s, self.height + s)
    }

    pub fn flags(&self) -> &WidgetFlags {
        &self.flags
    }

    pub fn flags_mut(&mut self) -> &mut WidgetFlags {
        &mut self.flags
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn border(&self) -> i32 {
        i32::from(self.flags.has_border())
    }

    /// Base acceptance rule for a proposed reported size: never below the
    /// minimum, and a dimension may only change when its grow flag is set.
    pub fn default_confirm_size(&self, width: i32, height: i32) -> bool {
        let s = self.shadow();
        let (w, h) = (width - s, height - s);
        if w < self.min_width || h < self.min_height {
            return false;
        }
        if w != self.width && !self.flags.grow_x() {
            return false;
        }
        if h != self.height && !self.flags.grow_y() {
            return false;
        }
        true
    }
}

/// Capability trait for leaf widgets. Every hook has the base behaviour as
/// its default, so a kind overrides only what it needs.
pub trait Widget {
    fn kind_name(&self) -> &'static str;

    /// Flags a freshly created widget of this kind starts with.
    fn initial_flags(&self) -> WidgetFlags {
        WidgetFlags::default()
    }

    fn initial_minimum_size(&self) -> (i32, i32) {
        (0, 0)
    }

    /// Compute and store the desired content size via
    /// [`WidgetCore::request_size`].
    fn size_request(&mut self, _core: &mut WidgetCore) {}

    /// Must not change any state; callers probe speculatively.
    fn confirm_size(&self, core: &WidgetCore, width: i32, height: i32) -> bool {
        core.default_confirm_size(width, height)
    }

    fn size_changed(&mut self, _core: &mut WidgetCore, _old_width: i32, _old_height: i32) {}

    /// Paint the content. Border and shadow are already on the canvas.
    fn paint(&self, _core: &WidgetCore, _canvas: &mut Canvas<'_>) {}

    fn key_pressed(&mut self, _core: &mut WidgetCore, _key: &str) -> bool {
        false
    }

    fn clicked(&mut self, _core: &mut WidgetCore, _event: MouseEvent, _x: i32, _y: i32) -> bool {
        false
    }

    fn context_menu(&mut self, _core: &mut WidgetCore) -> bool {
        false
    }

    fn activate(&mut self, _core: &mut WidgetCore) {}

    fn gained_focus(&mut self, _core: &mut WidgetCore) {}

    fn lost_focus(&mut self, _core: &mut WidgetCore) {}

    /// Teardown hook, run exactly once after the surface is released.
    fn destroyed(&mut self, _core: &mut WidgetCore) {}
}

/// Object-safe view of a leaf with downcasting, so callers holding only an
/// id can reach their concrete widget again.
pub trait AnyWidget: Widget + Any {
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Widget + Any> AnyWidget for T {
    fn as_any(&self) -> &dyn Any {
        self
    }
    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn core(flags: WidgetFlags, shadows: bool) -> WidgetCore {
        let mut core = WidgetCore::new(WidgetId::new(1), flags, shadows);
        core.request_size(4, 2);
        core
    }

    #[test]
    fn reported_size_counts_shadow_only_when_enabled() {
        let c = core(WidgetFlags::new(), false);
        assert_eq!(c.size(), (4, 2));
        let c = core(WidgetFlags::new(), true);
        assert_eq!(c.size(), (5, 3));
        let c = core(WidgetFlags::new().with_shadow(false), true);
        assert_eq!(c.size(), (4, 2));
    }

    #[test]
    fn default_confirm_respects_grow_flags_and_minimum() {
        let mut c = core(WidgetFlags::new().with_grow_x(true), false);
        c.min_width = 2;
        assert!(c.default_confirm_size(4, 2));
        assert!(c.default_confirm_size(9, 2));
        assert!(!c.default_confirm_size(4, 3), "grow-y is clear");
        assert!(!c.default_confirm_size(1, 2), "below minimum width");
    }

    #[test]
    fn default_confirm_compares_content_size_with_shadow() {
        let c = core(WidgetFlags::new(), true);
        assert!(c.default_confirm_size(5, 3));
        assert!(!c.default_confirm_size(4, 2));
    }
}

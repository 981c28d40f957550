use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use super::container::BoxState;
use super::{AnyWidget, Widget, WidgetCore, WidgetFlags, WidgetId};
use crate::constants::SURFACE_SLACK;
use crate::drivers::MouseEvent;
use crate::keybindings::{Action, KeyBindings};
use crate::screen::{Screen, SurfaceId};
use crate::theme;
use crate::ui::Canvas;

pub(crate) enum NodeKind {
    Leaf(Box<dyn AnyWidget>),
    Container(BoxState),
}

pub(crate) struct Node {
    pub(crate) core: WidgetCore,
    pub(crate) kind: NodeKind,
}

/// Arena owning every widget plus the screen their surfaces live on.
///
/// Parents own their children through the child list of their `BoxState`;
/// the child only records its parent id. Destroying a widget removes it (and
/// everything it owns) from the arena, after which its id no longer resolves.
pub struct WidgetTree {
    nodes: BTreeMap<WidgetId, Node>,
    next_id: u64,
    screen: Screen,
    shadows: bool,
    bindings: KeyBindings,
    // toplevels with a redraw queued for the next tick
    pending: BTreeSet<WidgetId>,
    // toplevels hidden or destroyed since the window manager last looked
    released: Vec<WidgetId>,
}

impl fmt::Debug for WidgetTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WidgetTree")
            .field("nodes", &self.nodes.len())
            .field("pending", &self.pending)
            .field("released", &self.released)
            .field("screen", &self.screen)
            .finish()
    }
}

pub(crate) fn cells(v: i32) -> u16 {
    u16::try_from(v.max(0)).unwrap_or(u16::MAX)
}

impl WidgetTree {
    pub fn new(screen: Screen) -> Self {
        Self {
            nodes: BTreeMap::new(),
            next_id: 1,
            screen,
            shadows: false,
            bindings: KeyBindings::widget_defaults(),
            pending: BTreeSet::new(),
            released: Vec::new(),
        }
    }

    pub fn with_shadows(mut self, on: bool) -> Self {
        self.shadows = on;
        for node in self.nodes.values_mut() {
            node.core.shadows_enabled = on;
        }
        self
    }

    pub fn shadows_enabled(&self) -> bool {
        self.shadows
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn screen_mut(&mut self) -> &mut Screen {
        &mut self.screen
    }

    pub fn bindings(&self) -> &KeyBindings {
        &self.bindings
    }

    pub fn set_bindings(&mut self, bindings: KeyBindings) {
        self.bindings = bindings;
    }

    pub(crate) fn insert(&mut self, flags: WidgetFlags, kind: NodeKind) -> WidgetId {
        let id = WidgetId::new(self.next_id);
        self.next_id += 1;
        let core = WidgetCore::new(id, flags, self.shadows);
        self.nodes.insert(id, Node { core, kind });
        tracing::trace!(widget = %id, "created");
        id
    }

    /// Adopt a leaf widget. It starts detached and unmapped.
    pub fn add_widget<W: Widget + 'static>(&mut self, widget: W) -> WidgetId {
        let flags = widget.initial_flags();
        let (min_w, min_h) = widget.initial_minimum_size();
        let id = self.insert(flags, NodeKind::Leaf(Box::new(widget)));
        self.set_minimum_size(id, min_w, min_h);
        id
    }

    pub fn contains(&self, id: WidgetId) -> bool {
        self.nodes.contains_key(&id)
    }

    /// True for ids this tree handed out whose widget has since been destroyed.
    pub fn is_destroyed(&self, id: WidgetId) -> bool {
        id.raw() < self.next_id && !self.nodes.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub(crate) fn node(&self, id: WidgetId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    pub(crate) fn node_mut(&mut self, id: WidgetId) -> Option<&mut Node> {
        self.nodes.get_mut(&id)
    }

    pub fn core(&self, id: WidgetId) -> Option<&WidgetCore> {
        self.nodes.get(&id).map(|node| &node.core)
    }

    pub fn core_mut(&mut self, id: WidgetId) -> Option<&mut WidgetCore> {
        self.nodes.get_mut(&id).map(|node| &mut node.core)
    }

    /// Borrow a leaf as its concrete type.
    pub fn widget<T: Widget + 'static>(&self, id: WidgetId) -> Option<&T> {
        match &self.nodes.get(&id)?.kind {
            NodeKind::Leaf(widget) => widget.as_ref().as_any().downcast_ref::<T>(),
            NodeKind::Container(_) => None,
        }
    }

    pub fn widget_mut<T: Widget + 'static>(&mut self, id: WidgetId) -> Option<&mut T> {
        match &mut self.nodes.get_mut(&id)?.kind {
            NodeKind::Leaf(widget) => widget.as_mut().as_any_mut().downcast_mut::<T>(),
            NodeKind::Container(_) => None,
        }
    }

    pub(crate) fn with_leaf<R>(
        &mut self,
        id: WidgetId,
        f: impl FnOnce(&mut dyn AnyWidget, &mut WidgetCore) -> R,
    ) -> Option<R> {
        match self.nodes.get_mut(&id) {
            Some(Node {
                core,
                kind: NodeKind::Leaf(widget),
            }) => Some(f(widget.as_mut(), core)),
            _ => None,
        }
    }

    pub fn is_container(&self, id: WidgetId) -> bool {
        matches!(
            self.nodes.get(&id),
            Some(Node {
                kind: NodeKind::Container(_),
                ..
            })
        )
    }

    pub fn flags(&self, id: WidgetId) -> Option<WidgetFlags> {
        self.core(id).map(|core| core.flags)
    }

    pub fn flags_mut(&mut self, id: WidgetId) -> Option<&mut WidgetFlags> {
        self.core_mut(id).map(|core| &mut core.flags)
    }

    pub(crate) fn is_visible(&self, id: WidgetId) -> bool {
        self.flags(id).is_some_and(|f| f.visible())
    }

    pub fn parent(&self, id: WidgetId) -> Option<WidgetId> {
        self.core(id).and_then(|core| core.parent)
    }

    pub fn toplevel(&self, id: WidgetId) -> Option<WidgetId> {
        let mut current = self.core(id)?;
        while let Some(parent) = current.parent {
            current = self.core(parent)?;
        }
        Some(current.id)
    }

    pub fn is_toplevel(&self, id: WidgetId) -> bool {
        self.core(id).is_some_and(|core| core.parent.is_none())
    }

    pub fn set_name(&mut self, id: WidgetId, name: &str) {
        if let Some(core) = self.core_mut(id) {
            core.name = Some(name.to_string());
        }
    }

    pub fn name(&self, id: WidgetId) -> Option<&str> {
        self.core(id).and_then(|core| core.name.as_deref())
    }

    /// Reported size, shadow included.
    pub fn size(&self, id: WidgetId) -> Option<(i32, i32)> {
        self.core(id).map(WidgetCore::size)
    }

    pub(crate) fn size_of(&self, id: WidgetId) -> (i32, i32) {
        self.size(id).unwrap_or((0, 0))
    }

    pub fn position(&self, id: WidgetId) -> Option<(i32, i32)> {
        self.core(id).map(WidgetCore::position)
    }

    pub fn set_minimum_size(&mut self, id: WidgetId, width: i32, height: i32) {
        if let Some(core) = self.core_mut(id) {
            core.min_width = width.max(0);
            core.min_height = height.max(0);
        }
    }

    pub fn surface(&self, id: WidgetId) -> Option<SurfaceId> {
        self.core(id).and_then(|core| core.surface)
    }

    pub fn size_request(&mut self, id: WidgetId) {
        if self.is_container(id) {
            self.box_size_request(id);
            return;
        }
        if self
            .with_leaf(id, |widget, core| widget.size_request(core))
            .is_none()
        {
            tracing::warn!(widget = %id, "size_request on unknown widget");
        }
    }

    /// Would the widget accept being resized to this reported size?
    pub fn confirm_size(&mut self, id: WidgetId, width: i32, height: i32) -> bool {
        if self.is_container(id) {
            return self.box_confirm_size(id, width, height);
        }
        match self.nodes.get(&id) {
            Some(Node {
                core,
                kind: NodeKind::Leaf(widget),
            }) => widget.confirm_size(core, width, height),
            _ => false,
        }
    }

    /// Resize to a reported size. Non-positive dimensions keep their
    /// current value. A mapped widget must confirm first; refusal changes
    /// nothing.
    pub fn set_size(&mut self, id: WidgetId, width: i32, height: i32) -> bool {
        let Some(core) = self.core(id) else {
            tracing::warn!(widget = %id, "set_size on unknown widget");
            return false;
        };
        let s = core.shadow();
        let mut w = width - s;
        let mut h = height - s;
        if w <= 0 {
            w = core.width;
        }
        if h <= 0 {
            h = core.height;
        }
        let mapped = core.flags.mapped();
        if mapped && !self.confirm_size(id, w + s, h + s) {
            tracing::debug!(widget = %id, width = w, height = h, "resize refused");
            return false;
        }

        let Some(core) = self.core_mut(id) else {
            return false;
        };
        let (old_w, old_h) = (core.width, core.height);
        core.width = w;
        core.height = h;
        let surface = core.surface;
        if let Some(surface) = surface {
            self.grow_surface(surface, w + s, h + s);
        }
        self.size_changed(id, old_w, old_h);
        if !mapped && let Some(core) = self.core_mut(id) {
            core.flags.set_mapped(true);
        }
        true
    }

    fn size_changed(&mut self, id: WidgetId, old_w: i32, old_h: i32) {
        if self.is_container(id) {
            self.box_size_changed(id, old_w, old_h);
        } else {
            self.with_leaf(id, |widget, core| widget.size_changed(core, old_w, old_h));
        }
    }

    fn grow_surface(&mut self, surface: SurfaceId, width: i32, height: i32) {
        let Some((cap_w, cap_h)) = self.screen.surface_size(surface) else {
            return;
        };
        if width >= i32::from(cap_w) || height >= i32::from(cap_h) {
            self.screen.resize_surface(
                surface,
                cells(width).saturating_add(SURFACE_SLACK),
                cells(height).saturating_add(SURFACE_SLACK),
            );
        }
    }

    /// Move a widget. Boxes shift every child by the same offset, so child
    /// coordinates stay absolute.
    pub fn set_position(&mut self, id: WidgetId, x: i32, y: i32) {
        let children = self
            .box_state(id)
            .map(|state| state.children.clone())
            .unwrap_or_default();
        let Some(core) = self.core_mut(id) else {
            tracing::warn!(widget = %id, "set_position on unknown widget");
            return;
        };
        let (dx, dy) = (x - core.x, y - core.y);
        core.x = x;
        core.y = y;
        if dx == 0 && dy == 0 {
            return;
        }
        for child in children {
            if let Some((cx, cy)) = self.position(child) {
                self.set_position(child, cx + dx, cy + dy);
            }
        }
    }

    fn map(&mut self, id: WidgetId) {
        let Some(core) = self.core(id) else {
            return;
        };
        let needs_size = core.width == 0 || core.height == 0;
        if needs_size {
            self.size_request(id);
            if self.is_container(id) {
                self.find_focusable(id);
            }
        }
        if let Some(core) = self.core_mut(id) {
            core.flags.set_mapped(true);
        }
    }

    fn ensure_surface(&mut self, id: WidgetId) {
        let Some(core) = self.core(id) else {
            return;
        };
        let (w, h) = core.size();
        match core.surface {
            Some(surface) => self.grow_surface(surface, w, h),
            None => {
                let surface = self.screen.alloc_surface(
                    cells(w).saturating_add(SURFACE_SLACK),
                    cells(h).saturating_add(SURFACE_SLACK),
                );
                if let Some(core) = self.core_mut(id) {
                    core.surface = Some(surface);
                }
            }
        }
    }

    /// Clear the surface and paint border and shadow.
    fn paint_base(&mut self, id: WidgetId) {
        let Some(core) = self.nodes.get(&id).map(|node| &node.core) else {
            return;
        };
        let Some(buffer) = core.surface.and_then(|s| self.screen.surface_mut(s)) else {
            return;
        };
        let mut canvas = Canvas::new(buffer);
        canvas.fill(theme::normal());
        if core.flags.has_border() {
            canvas.draw_border(core.width, core.height, theme::border());
        }
        if core.shadow() > 0 {
            canvas.draw_shadow(core.width, core.height, theme::shadow());
        }
    }

    fn paint_leaf(&mut self, id: WidgetId) {
        let Some(Node {
            core,
            kind: NodeKind::Leaf(widget),
        }) = self.nodes.get(&id)
        else {
            return;
        };
        let Some(buffer) = core.surface.and_then(|s| self.screen.surface_mut(s)) else {
            return;
        };
        widget.paint(core, &mut Canvas::new(buffer));
    }

    /// Map if needed, repaint into the widget's surface and queue a
    /// coalesced screen update. Re-entrant calls are ignored.
    pub fn draw(&mut self, id: WidgetId) {
        let Some(flags) = self.flags(id) else {
            tracing::debug!(widget = %id, "draw on unknown widget");
            return;
        };
        if flags.drawing() || flags.destroying() {
            return;
        }
        if let Some(f) = self.flags_mut(id) {
            f.set_drawing(true);
        }
        if !flags.mapped() {
            self.map(id);
        }
        self.ensure_surface(id);
        self.paint_base(id);
        if self.is_container(id) {
            self.box_draw(id);
        } else {
            self.paint_leaf(id);
        }
        self.queue_update(id);
        if let Some(f) = self.flags_mut(id) {
            f.set_drawing(false);
        }
    }

    /// Clear visible and mapped. A toplevel also gives up its place on
    /// screen.
    pub fn hide(&mut self, id: WidgetId) {
        let Some(core) = self.core_mut(id) else {
            return;
        };
        core.flags.set_visible(false);
        core.flags.set_mapped(false);
        if core.parent.is_none() && !self.released.contains(&id) {
            self.released.push(id);
        }
    }

    pub fn key_pressed(&mut self, id: WidgetId, key: &str) -> bool {
        let Some(flags) = self.flags(id) else {
            tracing::debug!(widget = %id, key, "key for unknown widget");
            return false;
        };
        if !flags.take_focus() {
            return false;
        }
        if !flags.disable_actions()
            && let Some(action) = self.bindings.action_for(key)
            && self.perform_action(id, action)
        {
            return true;
        }
        if self.is_container(id) {
            self.box_key_pressed(id, key)
        } else {
            self.with_leaf(id, |widget, core| widget.key_pressed(core, key))
                .unwrap_or(false)
        }
    }

    /// Run a widget-level action. Returns whether it was handled.
    pub fn perform_action(&mut self, id: WidgetId, action: Action) -> bool {
        match action {
            Action::ContextMenu => self
                .with_leaf(id, |widget, core| widget.context_menu(core))
                .unwrap_or(false),
            Action::FocusNext if self.is_container(id) => self.box_focus_change(id, true),
            Action::FocusPrev if self.is_container(id) => self.box_focus_change(id, false),
            _ => false,
        }
    }

    /// Deliver a click at absolute screen coordinates. An unconsumed
    /// right-button press opens the context menu.
    pub fn clicked(&mut self, id: WidgetId, event: MouseEvent, x: i32, y: i32) -> bool {
        if !self.contains(id) {
            return false;
        }
        let handled = if self.is_container(id) {
            self.box_clicked(id, event, x, y)
        } else {
            self.with_leaf(id, |widget, core| widget.clicked(core, event, x, y))
                .unwrap_or(false)
        };
        if !handled && event == MouseEvent::RightDown {
            return self.perform_action(id, Action::ContextMenu);
        }
        handled
    }

    /// Returns false when the widget cannot take focus or already is in the
    /// requested state.
    pub fn set_focus(&mut self, id: WidgetId, focus: bool) -> bool {
        let Some(flags) = self.flags_mut(id) else {
            return false;
        };
        if !flags.take_focus() || flags.has_focus() == focus {
            return false;
        }
        flags.set_has_focus(focus);
        if focus {
            self.gained_focus(id);
        } else {
            self.lost_focus(id);
        }
        true
    }

    fn gained_focus(&mut self, id: WidgetId) {
        if self.is_container(id) {
            if let Some(active) = self.box_state(id).and_then(|s| s.active) {
                self.set_focus(active, true);
            }
        } else {
            self.with_leaf(id, |widget, core| widget.gained_focus(core));
        }
        self.redraw_if_mapped(id);
    }

    fn lost_focus(&mut self, id: WidgetId) {
        if self.is_container(id) {
            if let Some(active) = self.box_state(id).and_then(|s| s.active) {
                self.set_focus(active, false);
            }
        } else {
            self.with_leaf(id, |widget, core| widget.lost_focus(core));
        }
        self.redraw_if_mapped(id);
    }

    fn redraw_if_mapped(&mut self, id: WidgetId) {
        if self.flags(id).is_some_and(|f| f.mapped()) {
            self.draw(id);
        }
    }

    pub fn activate(&mut self, id: WidgetId) {
        self.with_leaf(id, |widget, core| widget.activate(core));
    }

    /// Ask for the widget's toplevel to be copied to screen on the next
    /// tick. Repeated requests before the tick are free.
    pub fn queue_update(&mut self, id: WidgetId) {
        if self.surface(id).is_none() {
            return;
        }
        if let Some(top) = self.toplevel(id)
            && self.pending.insert(top)
        {
            tracing::trace!(widget = %id, toplevel = %top, "update queued");
        }
    }

    pub fn has_pending_update(&self, id: WidgetId) -> bool {
        self.pending.contains(&id)
    }

    pub fn take_pending_updates(&mut self) -> Vec<WidgetId> {
        std::mem::take(&mut self.pending).into_iter().collect()
    }

    pub fn take_released(&mut self) -> Vec<WidgetId> {
        std::mem::take(&mut self.released)
    }

    /// Tear a widget down: hide it, destroy what it owns, release its
    /// surface, run the teardown hook, unlink it from its parent. Safe to
    /// call again; later calls are no-ops.
    pub fn destroy(&mut self, id: WidgetId) {
        let Some(core) = self.core_mut(id) else {
            tracing::debug!(widget = %id, "destroy on unknown widget ignored");
            return;
        };
        if core.flags.destroying() {
            tracing::debug!(widget = %id, "destroy already in progress");
            return;
        }
        core.flags.mark_destroying();
        tracing::debug!(widget = %id, "destroying");

        self.hide(id);
        let children = self
            .box_state(id)
            .map(|state| state.children.clone())
            .unwrap_or_default();
        for child in children {
            self.destroy(child);
        }
        if let Some(surface) = self.core_mut(id).and_then(|core| core.surface.take()) {
            self.screen.release_surface(surface);
        }
        self.with_leaf(id, |widget, core| widget.destroyed(core));
        self.detach(id);
        self.pending.remove(&id);
        self.nodes.remove(&id);
    }

    /// Every widget in the subtree rooted at `id`, pre-order.
    pub fn subtree(&self, id: WidgetId) -> Vec<WidgetId> {
        let mut out = Vec::new();
        let mut stack = vec![id];
        while let Some(next) = stack.pop() {
            if !self.contains(next) {
                continue;
            }
            out.push(next);
            if let Some(state) = self.box_state(next) {
                stack.extend(state.children.iter().rev().copied());
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[derive(Default)]
    struct Probe {
        size: (i32, i32),
        teardowns: Rc<Cell<usize>>,
        keys: Rc<Cell<usize>>,
        menus: Rc<Cell<usize>>,
    }

    impl Widget for Probe {
        fn kind_name(&self) -> &'static str {
            "probe"
        }

        fn initial_flags(&self) -> WidgetFlags {
            WidgetFlags::new()
                .with_border(false)
                .with_shadow(false)
                .with_take_focus(true)
        }

        fn size_request(&mut self, core: &mut WidgetCore) {
            core.request_size(self.size.0, self.size.1);
        }

        fn paint(&self, _core: &WidgetCore, canvas: &mut Canvas<'_>) {
            canvas.put_str(0, 0, "p", theme::normal());
        }

        fn key_pressed(&mut self, _core: &mut WidgetCore, key: &str) -> bool {
            self.keys.set(self.keys.get() + 1);
            key == "enter"
        }

        fn context_menu(&mut self, _core: &mut WidgetCore) -> bool {
            self.menus.set(self.menus.get() + 1);
            true
        }

        fn destroyed(&mut self, _core: &mut WidgetCore) {
            self.teardowns.set(self.teardowns.get() + 1);
        }
    }

    fn tree() -> WidgetTree {
        WidgetTree::new(Screen::headless(40, 10))
    }

    #[test]
    fn set_size_keeps_current_for_non_positive_dimensions() {
        let mut t = tree();
        let id = t.add_widget(Probe::default());
        assert!(t.set_size(id, 5, 2));
        assert!(t.set_size(id, 0, -3));
        assert_eq!(t.size(id), Some((5, 2)));
        assert!(t.flags(id).unwrap().mapped());
    }

    #[test]
    fn mapped_widget_refuses_rigid_resize() {
        let mut t = tree();
        let id = t.add_widget(Probe::default());
        t.set_size(id, 5, 2);
        assert!(!t.set_size(id, 6, 2));
        assert_eq!(t.size(id), Some((5, 2)));
        t.flags_mut(id).unwrap().set_grow_x(true);
        assert!(t.set_size(id, 6, 2));
        assert_eq!(t.size(id), Some((6, 2)));
    }

    #[test]
    fn draw_maps_allocates_and_queues_once() {
        let mut t = tree();
        let id = t.add_widget(Probe {
            size: (3, 1),
            ..Probe::default()
        });
        t.draw(id);
        t.draw(id);
        assert!(t.flags(id).unwrap().mapped());
        assert_eq!(t.size(id), Some((3, 1)));
        let surface = t.surface(id).expect("allocated on first draw");
        assert_eq!(t.screen().surface_size(surface), Some((23, 21)));
        assert_eq!(t.take_pending_updates(), vec![id]);
        assert!(t.take_pending_updates().is_empty());
    }

    #[test]
    fn destroy_is_idempotent_and_runs_teardown_once() {
        let mut t = tree();
        let teardowns = Rc::new(Cell::new(0));
        let id = t.add_widget(Probe {
            size: (2, 1),
            teardowns: teardowns.clone(),
            ..Probe::default()
        });
        t.draw(id);
        t.destroy(id);
        t.destroy(id);
        assert_eq!(teardowns.get(), 1);
        assert!(t.is_destroyed(id));
        assert!(t.is_empty());
        assert_eq!(t.take_released(), vec![id]);
        assert!(!t.set_focus(id, true));
        assert!(!t.key_pressed(id, "a"));
    }

    #[test]
    fn set_focus_reports_state_changes_only() {
        let mut t = tree();
        let id = t.add_widget(Probe::default());
        assert!(t.set_focus(id, true));
        assert!(!t.set_focus(id, true));
        assert!(t.set_focus(id, false));
        t.flags_mut(id).unwrap().set_take_focus(false);
        assert!(!t.set_focus(id, true));
    }

    #[test]
    fn bindings_run_before_the_key_hook() {
        let mut t = tree();
        let keys = Rc::new(Cell::new(0));
        let menus = Rc::new(Cell::new(0));
        let id = t.add_widget(Probe {
            keys: keys.clone(),
            menus: menus.clone(),
            ..Probe::default()
        });
        assert!(t.key_pressed(id, "ctrl-x"));
        assert_eq!((menus.get(), keys.get()), (1, 0));
        assert!(t.key_pressed(id, "enter"));
        assert!(!t.key_pressed(id, "tab"));
        assert_eq!(keys.get(), 2);
    }

    #[test]
    fn unconsumed_right_click_opens_context_menu() {
        let mut t = tree();
        let menus = Rc::new(Cell::new(0));
        let id = t.add_widget(Probe {
            menus: menus.clone(),
            ..Probe::default()
        });
        assert!(!t.clicked(id, MouseEvent::LeftDown, 0, 0));
        assert!(t.clicked(id, MouseEvent::RightDown, 0, 0));
        assert_eq!(menus.get(), 1);
    }

    #[test]
    fn shadow_adds_to_reported_size_when_enabled() {
        let mut t = WidgetTree::new(Screen::headless(10, 5)).with_shadows(true);
        let id = t.add_widget(Probe::default());
        t.flags_mut(id).unwrap().set_has_shadow(true);
        t.set_size(id, 5, 3);
        assert_eq!(t.core(id).unwrap().content_size(), (4, 2));
        assert_eq!(t.size(id), Some((5, 3)));
    }

    #[test]
    fn widget_downcasts_to_its_concrete_type() {
        let mut t = tree();
        let id = t.add_widget(Probe {
            size: (7, 1),
            ..Probe::default()
        });
        assert_eq!(t.widget::<Probe>(id).map(|p| p.size), Some((7, 1)));
        assert_eq!(t.widget_mut::<Probe>(id).map(|p| p.kind_name()), Some("probe"));
    }
}

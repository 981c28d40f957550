//! Box containers: layout, resize negotiation and the focus cycle.
//!
//! A box lays its children out along one axis (the main axis) with `pad`
//! cells between them. Sizing is a two-phase protocol: `confirm_size` looks
//! for a single flexible child able to absorb a proposed delta and records
//! it, and the following `size_changed` hands the whole main-axis delta to
//! that child while every sibling only follows the cross axis.
//!
//! Only a box without a parent keeps a focus list. It is built lazily from
//! a pre-order walk of the focusable leaves below it.

use super::tree::{NodeKind, cells};
use super::{WidgetFlags, WidgetId, WidgetTree};
use crate::constants::{DEFAULT_BOX_PAD, SURFACE_SLACK};
use crate::drivers::MouseEvent;
use crate::theme;
use crate::ui::{Canvas, SignedRect, truncate_to_width};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    #[default]
    Vertical,
    Horizontal,
}

/// Cross-axis placement of children narrower than their box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alignment {
    Start,
    Center,
    End,
}

/// Dimensions a window tracks when the terminal is resized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Maximize {
    pub x: bool,
    pub y: bool,
}

#[derive(Debug, Clone)]
pub struct BoxState {
    pub(crate) children: Vec<WidgetId>,
    pub(crate) orientation: Orientation,
    pub(crate) homogeneous: bool,
    pub(crate) fill: bool,
    pub(crate) pad: i32,
    pub(crate) alignment: Alignment,
    pub(crate) title: Option<String>,
    pub(crate) focus: Vec<WidgetId>,
    pub(crate) active: Option<WidgetId>,
    pub(crate) last_resized: Option<WidgetId>,
    pub(crate) size_queued: Option<WidgetId>,
    pub(crate) window: bool,
    pub(crate) maximize: Maximize,
}

impl BoxState {
    fn new(homogeneous: bool, orientation: Orientation) -> Self {
        let alignment = match orientation {
            Orientation::Vertical => Alignment::Start,
            Orientation::Horizontal => Alignment::Center,
        };
        Self {
            children: Vec::new(),
            orientation,
            homogeneous,
            fill: true,
            pad: DEFAULT_BOX_PAD,
            alignment,
            title: None,
            focus: Vec::new(),
            active: None,
            last_resized: None,
            size_queued: None,
            window: false,
            maximize: Maximize::default(),
        }
    }

    fn vertical(&self) -> bool {
        self.orientation == Orientation::Vertical
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn homogeneous(&self) -> bool {
        self.homogeneous
    }

    pub fn fill(&self) -> bool {
        self.fill
    }

    pub fn pad(&self) -> i32 {
        self.pad
    }

    pub fn alignment(&self) -> Alignment {
        self.alignment
    }

    pub fn is_window(&self) -> bool {
        self.window
    }
}

impl WidgetTree {
    pub fn new_box(&mut self, homogeneous: bool, orientation: Orientation) -> WidgetId {
        self.insert(
            WidgetFlags::container(),
            NodeKind::Container(BoxState::new(homogeneous, orientation)),
        )
    }

    /// A vertical box decorated as a toplevel window.
    pub fn new_window(&mut self, title: &str) -> WidgetId {
        let id = self.new_box(false, Orientation::Vertical);
        if let Some(state) = self.box_state_mut(id) {
            state.window = true;
            state.title = Some(title.to_string());
        }
        self.set_toplevel(id, true);
        id
    }

    pub fn box_state(&self, id: WidgetId) -> Option<&BoxState> {
        match &self.node(id)?.kind {
            NodeKind::Container(state) => Some(state),
            NodeKind::Leaf(_) => None,
        }
    }

    pub(crate) fn box_state_mut(&mut self, id: WidgetId) -> Option<&mut BoxState> {
        match &mut self.node_mut(id)?.kind {
            NodeKind::Container(state) => Some(state),
            NodeKind::Leaf(_) => None,
        }
    }

    pub fn is_window(&self, id: WidgetId) -> bool {
        self.box_state(id).is_some_and(BoxState::is_window)
    }

    pub fn children(&self, id: WidgetId) -> Vec<WidgetId> {
        self.box_state(id)
            .map(|state| state.children.clone())
            .unwrap_or_default()
    }

    pub fn active(&self, id: WidgetId) -> Option<WidgetId> {
        self.box_state(id).and_then(|state| state.active)
    }

    pub fn focus_list(&self, id: WidgetId) -> &[WidgetId] {
        self.box_state(id)
            .map(|state| state.focus.as_slice())
            .unwrap_or_default()
    }

    pub fn add(&mut self, parent: WidgetId, child: WidgetId) {
        self.attach(parent, child, false);
    }

    pub fn add_in_front(&mut self, parent: WidgetId, child: WidgetId) {
        self.attach(parent, child, true);
    }

    fn attach(&mut self, parent: WidgetId, child: WidgetId, front: bool) {
        if parent == child || !self.contains(child) {
            tracing::warn!(parent = %parent, child = %child, "cannot add widget to box");
            return;
        }
        if let Some(old) = self.parent(child) {
            tracing::warn!(child = %child, old_parent = %old, "widget already has a parent");
            return;
        }
        let Some(state) = self.box_state_mut(parent) else {
            tracing::warn!(widget = %parent, "add on a widget that is not a box");
            return;
        };
        if front {
            state.children.insert(0, child);
        } else {
            state.children.push(child);
        }
        if let Some(core) = self.core_mut(child) {
            core.parent = Some(parent);
        }
        if let Some(root) = self.toplevel(parent)
            && !self.focus_list(root).is_empty()
        {
            self.rebuild_focus_list(root);
        }
    }

    /// Take `child` out of the box without destroying it.
    pub fn remove(&mut self, parent: WidgetId, child: WidgetId) {
        let Some(state) = self.box_state_mut(parent) else {
            return;
        };
        let before = state.children.len();
        state.children.retain(|c| *c != child);
        if state.children.len() == before {
            return;
        }
        if state.last_resized == Some(child) {
            state.last_resized = None;
        }
        if state.size_queued == Some(child) {
            state.size_queued = None;
        }
        let gone = self.subtree(child);
        if let Some(root) = self.toplevel(parent) {
            self.forget_focus(root, &gone);
        }
        if let Some(core) = self.core_mut(child) {
            core.parent = None;
        }
        if self.flags(parent).is_some_and(|f| f.mapped()) {
            self.draw(parent);
        }
    }

    /// Destroy every child and collapse the box to zero size.
    pub fn remove_all(&mut self, id: WidgetId) {
        for child in self.children(id) {
            self.destroy(child);
        }
        if let Some(state) = self.box_state_mut(id) {
            state.children.clear();
            state.focus.clear();
            state.active = None;
        }
        if let Some(core) = self.core_mut(id) {
            core.width = 0;
            core.height = 0;
        }
    }

    /// Throw away all computed geometry and focus state below a root box and
    /// lay it out again from scratch.
    pub fn readjust(&mut self, id: WidgetId) {
        if !self.is_container(id) || !self.is_toplevel(id) {
            return;
        }
        self.reset_geometry(id);
        if let Some(state) = self.box_state_mut(id) {
            state.focus.clear();
            state.active = None;
            state.last_resized = None;
            state.size_queued = None;
        }
        self.size_request(id);
        if let Some(surface) = self.surface(id) {
            let (w, h) = self.size_of(id);
            self.screen_mut().resize_surface(
                surface,
                cells(w).saturating_add(SURFACE_SLACK),
                cells(h).saturating_add(SURFACE_SLACK),
            );
        }
        self.find_focusable(id);
    }

    fn reset_geometry(&mut self, id: WidgetId) {
        for child in self.children(id) {
            self.reset_geometry(child);
        }
        if let Some(state) = self.box_state_mut(id) {
            state.last_resized = None;
            state.size_queued = None;
        }
        if let Some(core) = self.core_mut(id) {
            core.flags.set_mapped(false);
            core.width = 0;
            core.height = 0;
        }
    }

    pub fn set_pad(&mut self, id: WidgetId, pad: i32) {
        if let Some(state) = self.box_state_mut(id) {
            state.pad = pad.max(0);
        }
    }

    pub fn set_fill(&mut self, id: WidgetId, fill: bool) {
        if let Some(state) = self.box_state_mut(id) {
            state.fill = fill;
        }
    }

    pub fn set_alignment(&mut self, id: WidgetId, alignment: Alignment) {
        if let Some(state) = self.box_state_mut(id) {
            state.alignment = alignment;
        }
    }

    pub fn set_title(&mut self, id: WidgetId, title: &str) {
        if let Some(state) = self.box_state_mut(id) {
            state.title = Some(title.to_string());
        }
    }

    pub fn title(&self, id: WidgetId) -> Option<&str> {
        self.box_state(id).and_then(|state| state.title.as_deref())
    }

    pub fn set_maximize(&mut self, id: WidgetId, maximize: Maximize) {
        if let Some(state) = self.box_state_mut(id) {
            state.maximize = maximize;
        }
    }

    pub fn maximize(&self, id: WidgetId) -> Maximize {
        self.box_state(id)
            .map(|state| state.maximize)
            .unwrap_or_default()
    }

    /// Toplevel boxes draw a border and a shadow and accept focus.
    pub fn set_toplevel(&mut self, id: WidgetId, on: bool) {
        if let Some(flags) = self.flags_mut(id) {
            flags.set_has_border(on);
            flags.set_has_shadow(on);
            flags.set_take_focus(on);
        }
    }

    // Focus cycle

    fn focusable_leaves(&self, id: WidgetId, out: &mut Vec<WidgetId>) {
        for child in self.children(id) {
            if self.is_container(child) {
                self.focusable_leaves(child, out);
            } else if self.flags(child).is_some_and(|f| f.take_focus()) {
                out.push(child);
            }
        }
    }

    fn rebuild_focus_list(&mut self, root: WidgetId) {
        let mut focus = Vec::new();
        self.focusable_leaves(root, &mut focus);
        if let Some(state) = self.box_state_mut(root) {
            if state.active.is_some_and(|a| !focus.contains(&a)) {
                state.active = None;
            }
            state.focus = focus;
        }
    }

    /// Build the focus list of a root box if needed and make sure something
    /// is active.
    pub fn find_focusable(&mut self, id: WidgetId) -> Option<WidgetId> {
        let needs_list = self.is_toplevel(id) && self.focus_list(id).is_empty();
        if needs_list {
            self.rebuild_focus_list(id);
        }
        let state = self.box_state_mut(id)?;
        if state.active.is_none() {
            state.active = state.focus.first().copied();
        }
        state.active
    }

    fn focus_eligible(&self, id: WidgetId) -> bool {
        self.flags(id)
            .is_some_and(|f| f.visible() && f.take_focus())
    }

    /// Rotate the active child through the focus list until an eligible
    /// widget comes up. After a full turn without one, nothing changes.
    fn rotate_focus(&mut self, id: WidgetId, forward: bool) {
        let Some(state) = self.box_state(id) else {
            return;
        };
        let focus = state.focus.clone();
        let start = state.active;
        if focus.is_empty() {
            return;
        }
        let len = focus.len();
        let mut current = start;
        let mut found = None;
        for _ in 0..len {
            let next = match current.and_then(|a| focus.iter().position(|f| *f == a)) {
                Some(i) if forward => focus[(i + 1) % len],
                Some(i) => focus[(i + len - 1) % len],
                None if forward => focus[0],
                None => focus[len - 1],
            };
            current = Some(next);
            if self.focus_eligible(next) {
                found = Some(next);
                break;
            }
        }
        if let (Some(next), Some(state)) = (found, self.box_state_mut(id)) {
            state.active = Some(next);
        }
    }

    pub(crate) fn find_next(&mut self, id: WidgetId) {
        self.rotate_focus(id, true);
    }

    pub(crate) fn find_prev(&mut self, id: WidgetId) {
        self.rotate_focus(id, false);
    }

    pub(crate) fn box_focus_change(&mut self, id: WidgetId, next: bool) -> bool {
        let now = self.active(id);
        if next {
            self.find_next(id);
        } else {
            self.find_prev(id);
        }
        let active = self.active(id);
        match (now, active) {
            (Some(now), Some(active)) if now != active => {
                self.set_focus(now, false);
                self.set_focus(active, true);
                true
            }
            _ => false,
        }
    }

    /// Move focus one step (`dir > 0` forward, `dir < 0` backward) within
    /// the toplevel box of `id`.
    pub fn move_focus(&mut self, id: WidgetId, dir: i32) {
        let Some(root) = self.toplevel(id) else {
            return;
        };
        if self.active(root).is_none() {
            self.find_focusable(root);
            return;
        }
        if dir != 0 {
            self.box_focus_change(root, dir > 0);
        }
        if self.surface(root).is_some() {
            self.draw(root);
        }
    }

    pub fn give_focus_to_child(&mut self, id: WidgetId, child: WidgetId) {
        let Some(root) = self.toplevel(id) else {
            return;
        };
        let now = self.active(root);
        if self.focus_list(root).contains(&child)
            && let Some(state) = self.box_state_mut(root)
        {
            state.active = Some(child);
        }
        if let Some(now) = now
            && now != child
            && self.active(root) == Some(child)
        {
            self.set_focus(now, false);
            self.set_focus(child, true);
        }
        if self.surface(root).is_some() {
            self.draw(root);
        }
    }

    /// Drop `gone` from a root's focus bookkeeping. When the active child is
    /// among them the next eligible survivor takes over, and the focus flags
    /// follow if the root itself is focused.
    pub(crate) fn forget_focus(&mut self, root: WidgetId, gone: &[WidgetId]) {
        let Some(state) = self.box_state(root) else {
            return;
        };
        let focus = state.focus.clone();
        let old = state.active.filter(|a| gone.contains(a));
        if let Some(old) = old {
            let len = focus.len();
            let start = focus.iter().position(|f| *f == old).unwrap_or(0);
            let next = (1..len)
                .map(|k| focus[(start + k) % len])
                .find(|f| !gone.contains(f) && self.focus_eligible(*f));
            if let Some(state) = self.box_state_mut(root) {
                state.active = next;
            }
        }
        if let Some(state) = self.box_state_mut(root) {
            state.focus.retain(|f| !gone.contains(f));
        }
        let Some(old) = old else {
            return;
        };
        self.set_focus(old, false);
        if self.flags(root).is_some_and(|f| f.has_focus())
            && let Some(next) = self.active(root)
        {
            self.set_focus(next, true);
        }
    }

    /// Unlink a widget from its parent box during destruction.
    pub(crate) fn detach(&mut self, id: WidgetId) {
        let Some(parent) = self.parent(id) else {
            return;
        };
        if let Some(state) = self.box_state_mut(parent) {
            state.children.retain(|c| *c != id);
            if state.last_resized == Some(id) {
                state.last_resized = None;
            }
            if state.size_queued == Some(id) {
                state.size_queued = None;
            }
        }
        if let Some(root) = self.toplevel(parent) {
            self.forget_focus(root, &[id]);
        }
        if let Some(core) = self.core_mut(id) {
            core.parent = None;
        }
    }

    // Input

    pub(crate) fn box_key_pressed(&mut self, id: WidgetId, key: &str) -> bool {
        if !self.flags(id).is_some_and(|f| f.disable_actions()) {
            return false;
        }
        let active = match self.active(id) {
            Some(active) => active,
            None => match self.find_focusable(id) {
                Some(active) => active,
                None => return false,
            },
        };
        if self.key_pressed(active, key) {
            return true;
        }
        // Let the box's own bindings run now that the child had its turn.
        if let Some(flags) = self.flags_mut(id) {
            flags.set_disable_actions(false);
        }
        let handled = self.key_pressed(id, key);
        if let Some(flags) = self.flags_mut(id) {
            flags.set_disable_actions(true);
        }
        handled
    }

    pub(crate) fn box_clicked(&mut self, id: WidgetId, event: MouseEvent, x: i32, y: i32) -> bool {
        for child in self.children(id) {
            let Some((cx, cy)) = self.position(child) else {
                continue;
            };
            let (w, h) = self.size_of(child);
            if !SignedRect::new(cx, cy, cells(w), cells(h)).contains(x, y) {
                continue;
            }
            if event.is_press() && self.flags(child).is_some_and(|f| f.take_focus()) {
                self.give_focus_to_child(id, child);
            }
            return self.clicked(child, event, x, y);
        }
        false
    }

    // Geometry

    pub(crate) fn box_size_request(&mut self, id: WidgetId) {
        let Some(state) = self.box_state(id) else {
            return;
        };
        let children = state.children.clone();
        let (vertical, homogeneous, fill) = (state.vertical(), state.homogeneous, state.fill);

        for child in &children {
            self.size_request(*child);
        }
        let (max_w, max_h) = children.iter().fold((0, 0), |(mw, mh), child| {
            let (w, h) = self.size_of(*child);
            (mw.max(w), mh.max(h))
        });

        for child in children {
            let (mut w, mut h) = self.size_of(child);
            if homogeneous {
                if vertical {
                    h = max_h;
                } else {
                    w = max_w;
                }
            }
            if fill {
                if vertical {
                    w = max_w;
                } else {
                    h = max_h;
                }
            }
            if self.confirm_size(child, w, h) {
                self.set_size(child, w, h);
            }
        }
        self.reposition(id);
    }

    /// Place visible children one after another along the main axis and
    /// derive the box's own size from them.
    fn reposition(&mut self, id: WidgetId) {
        let Some(state) = self.box_state(id) else {
            return;
        };
        let children = state.children.clone();
        let (vertical, pad) = (state.vertical(), state.pad);
        let Some(core) = self.core(id) else {
            return;
        };
        let (x, y) = core.position();
        let border = core.border();

        let (mut cur_x, mut cur_y) = (x + border, y + border);
        let mut cross = 0;
        let mut placed = false;
        for child in children {
            if !self.is_visible(child) {
                continue;
            }
            self.set_position(child, cur_x, cur_y);
            let (w, h) = self.size_of(child);
            if vertical && h != 0 {
                cur_y += h + pad;
                cross = cross.max(w);
                placed = true;
            } else if !vertical && w != 0 {
                cur_x += w + pad;
                cross = cross.max(h);
                placed = true;
            }
        }
        if placed {
            if vertical {
                cur_y -= pad;
            } else {
                cur_x -= pad;
            }
        }
        cur_x += border;
        cur_y += border;
        cross += 2 * border;

        if let Some(core) = self.core_mut(id) {
            if vertical {
                core.width = cross;
                core.height = cur_y - y;
            } else {
                core.width = cur_x - x;
                core.height = cross;
            }
        }
    }

    fn can_absorb(&mut self, child: WidgetId, dw: i32, dh: i32) -> bool {
        let (w, h) = self.size_of(child);
        self.is_visible(child) && w > 0 && h > 0 && self.confirm_size(child, w - dw, h - dh)
    }

    pub(crate) fn box_confirm_size(&mut self, id: WidgetId, width: i32, height: i32) -> bool {
        let (Some(state), Some(core)) = (self.box_state(id), self.core(id)) else {
            return false;
        };
        if state.children.is_empty() {
            return true;
        }
        let s = core.shadow();
        let dw = core.width - (width - s);
        let dh = core.height - (height - s);
        if dw == 0 && dh == 0 {
            return true;
        }
        let children = state.children.clone();
        let last = state.last_resized.filter(|l| children.contains(l));
        let vertical = state.vertical();

        let mut flexible = None;
        if let Some(last) = last
            && self.can_absorb(last, dw, dh)
        {
            flexible = Some(last);
        }
        if flexible.is_none() {
            for child in children.iter().copied().filter(|c| Some(*c) != last) {
                if self.can_absorb(child, dw, dh) {
                    flexible = Some(child);
                    break;
                }
            }
        }
        if let Some(state) = self.box_state_mut(id) {
            state.size_queued = flexible;
        }
        let Some(flexible) = flexible else {
            tracing::trace!(widget = %id, dw, dh, "no child can absorb resize");
            return false;
        };

        let (fw, fh) = self.size_of(flexible);
        for child in children.into_iter().filter(|c| *c != flexible) {
            let (w, h) = self.size_of(child);
            let fits = if vertical {
                !(dw > 0 && w >= fw) || self.confirm_size(child, w - dw, h)
            } else {
                !(dh > 0 && h >= fh) || self.confirm_size(child, w, h - dh)
            };
            if !fits {
                tracing::trace!(widget = %id, sibling = %child, "sibling would not fit");
                return false;
            }
        }
        true
    }

    pub(crate) fn box_size_changed(&mut self, id: WidgetId, old_w: i32, old_h: i32) {
        let Some((new_w, new_h)) = self.core(id).map(|core| core.content_size()) else {
            return;
        };
        let (mut dw, mut dh) = (new_w - old_w, new_h - old_h);
        let Some(state) = self.box_state_mut(id) else {
            return;
        };
        let queued = state.size_queued.take();
        let children = state.children.clone();
        let vertical = state.vertical();

        if let Some(queued) = queued {
            let (w, h) = self.size_of(queued);
            self.set_size(queued, w + dw, h + dh);
            if let Some(state) = self.box_state_mut(id) {
                state.last_resized = Some(queued);
            }
        }

        if vertical {
            dh = 0;
        } else {
            dw = 0;
        }
        if dw != 0 || dh != 0 {
            for child in children.into_iter().filter(|c| Some(*c) != queued) {
                let (w, h) = self.size_of(child);
                self.set_size(child, w + dw, h + dh);
            }
        }
        self.reposition(id);
    }

    // Drawing

    pub(crate) fn box_draw(&mut self, id: WidgetId) {
        if self.is_toplevel(id) && self.focus_list(id).is_empty() {
            self.rebuild_focus_list(id);
        }
        for child in self.children(id) {
            if self.is_visible(child) {
                self.draw(child);
            }
        }
        self.paint_title(id);
        self.sync_children(id);
    }

    fn paint_title(&mut self, id: WidgetId) {
        let (Some(state), Some(core)) = (self.box_state(id), self.core(id)) else {
            return;
        };
        let Some(title) = state.title.as_deref() else {
            return;
        };
        if !core.flags.has_border() || core.width <= 4 {
            return;
        }
        let title = truncate_to_width(title, usize::try_from(core.width - 4).unwrap_or(0));
        let len = i32::try_from(title.chars().count()).unwrap_or(0);
        let pos = (core.width - len) / 2;
        let style = if core.flags.has_focus() {
            theme::title()
        } else {
            theme::title_dim()
        };
        let surface = core.surface;
        let Some(buffer) = surface.and_then(|s| self.screen_mut().surface_mut(s)) else {
            return;
        };
        let mut canvas = Canvas::new(buffer);
        canvas.set_cell(pos - 1, 0, "┤", theme::normal());
        canvas.put_str(pos, 0, &title, style);
        canvas.set_cell(pos + len, 0, "├", theme::normal());
    }

    /// Copy each visible child's surface into the box's surface at its
    /// aligned offset and record where the child ended up on screen.
    pub fn sync_children(&mut self, id: WidgetId) {
        if self.active(id).is_none() {
            self.find_focusable(id);
        }
        let (Some(state), Some(core)) = (self.box_state(id), self.core(id)) else {
            return;
        };
        let children = state.children.clone();
        let (vertical, alignment) = (state.vertical(), state.alignment);
        let (bx, by) = core.position();
        let (bw, bh) = core.content_size();
        let pos = core.border();
        let target = core.surface;

        for child in children {
            if !self.is_visible(child) {
                continue;
            }
            if self.is_container(child) {
                self.sync_children(child);
            }
            let (w, h) = self.size_of(child);
            let Some((cx, cy)) = self.position(child) else {
                continue;
            };
            let (mut x, mut y) = (cx - bx, cy - by);
            if vertical {
                x = pos + align_offset(alignment, bw, w);
                if x + w > bw - pos {
                    x = bw - pos - w;
                }
            } else {
                y = pos + align_offset(alignment, bh, h);
                if y + h > bh - pos {
                    y = bh - pos - h;
                }
            }
            if let (Some(src), Some(dst)) = (self.surface(child), target) {
                self.screen_mut().copy_region(
                    src,
                    (0, 0),
                    dst,
                    SignedRect::new(x, y, cells(w), cells(h)),
                );
            }
            self.set_position(child, bx + x, by + y);
        }
    }
}

fn align_offset(alignment: Alignment, outer: i32, inner: i32) -> i32 {
    match alignment {
        Alignment::Start => 0,
        Alignment::Center => (outer - inner) / 2,
        Alignment::End => outer - inner,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::screen::Screen;
    use crate::widget::{Widget, WidgetCore};

    struct Fixed {
        size: (i32, i32),
        flags: WidgetFlags,
    }

    impl Widget for Fixed {
        fn kind_name(&self) -> &'static str {
            "fixed"
        }

        fn initial_flags(&self) -> WidgetFlags {
            self.flags
        }

        fn size_request(&mut self, core: &mut WidgetCore) {
            core.request_size(self.size.0, self.size.1);
        }
    }

    fn plain() -> WidgetFlags {
        WidgetFlags::new().with_border(false).with_shadow(false)
    }

    fn fixed(tree: &mut WidgetTree, w: i32, h: i32, flags: WidgetFlags) -> WidgetId {
        tree.add_widget(Fixed { size: (w, h), flags })
    }

    fn tree() -> WidgetTree {
        WidgetTree::new(Screen::headless(80, 24))
    }

    #[test]
    fn horizontal_box_sums_main_axis() {
        let mut t = tree();
        let bx = t.new_box(false, Orientation::Horizontal);
        t.set_fill(bx, false);
        for (w, h) in [(4, 1), (6, 2), (3, 1)] {
            let c = fixed(&mut t, w, h, plain());
            t.add(bx, c);
        }
        t.size_request(bx);
        assert_eq!(t.size(bx), Some((15, 2)));
        let xs: Vec<i32> = t
            .children(bx)
            .iter()
            .map(|c| t.position(*c).unwrap().0)
            .collect();
        assert_eq!(xs, vec![0, 5, 12]);
    }

    #[test]
    fn bordered_vertical_box_adds_border_and_fill() {
        let mut t = tree();
        let bx = t.new_box(false, Orientation::Vertical);
        t.flags_mut(bx).unwrap().set_has_border(true);
        t.set_pad(bx, 0);
        let a = fixed(&mut t, 3, 1, plain().with_grow_x(true));
        let b = fixed(&mut t, 5, 2, plain());
        t.add(bx, a);
        t.add(bx, b);
        t.size_request(bx);
        assert_eq!(t.size(bx), Some((7, 5)));
        // fill stretched the growable child only
        assert_eq!(t.size(a), Some((5, 1)));
        assert_eq!(t.position(a), Some((1, 1)));
        assert_eq!(t.position(b), Some((1, 2)));
    }

    #[test]
    fn invisible_and_empty_children_take_no_space() {
        let mut t = tree();
        let bx = t.new_box(false, Orientation::Horizontal);
        let a = fixed(&mut t, 2, 1, plain());
        let hidden = fixed(&mut t, 9, 1, plain());
        let empty = fixed(&mut t, 0, 1, plain());
        let b = fixed(&mut t, 2, 1, plain());
        for c in [a, hidden, empty, b] {
            t.add(bx, c);
        }
        t.flags_mut(hidden).unwrap().set_visible(false);
        t.size_request(bx);
        assert_eq!(t.size(bx), Some((5, 1)));
    }

    #[test]
    fn rigid_child_blocks_every_resize() {
        let mut t = tree();
        let bx = t.new_box(false, Orientation::Vertical);
        let c = fixed(&mut t, 4, 2, plain());
        t.add(bx, c);
        t.draw(bx);
        assert!(t.confirm_size(bx, 4, 2));
        assert!(!t.confirm_size(bx, 5, 2));
        assert!(!t.confirm_size(bx, 4, 1));
        assert!(!t.set_size(bx, 6, 3));
        assert_eq!(t.size(bx), Some((4, 2)));
    }

    #[test]
    fn resize_goes_to_a_single_flexible_child() {
        let mut t = tree();
        let bx = t.new_box(false, Orientation::Vertical);
        t.set_pad(bx, 0);
        let rigid = fixed(&mut t, 4, 1, plain().with_grow_x(true));
        let flex = fixed(&mut t, 4, 2, plain().with_grow_x(true).with_grow_y(true));
        t.add(bx, rigid);
        t.add(bx, flex);
        t.draw(bx);
        assert_eq!(t.size(bx), Some((4, 3)));

        assert!(t.set_size(bx, 6, 6));
        assert_eq!(t.size(flex), Some((6, 5)));
        assert_eq!(t.size(rigid), Some((6, 1)), "cross axis follows");
        assert_eq!(t.size(bx), Some((6, 6)));
        assert_eq!(t.position(flex), Some((0, 1)));
        assert_eq!(t.box_state(bx).unwrap().last_resized, Some(flex));
    }

    #[test]
    fn shrinking_width_needs_wide_siblings_to_agree() {
        let mut t = tree();
        let bx = t.new_box(false, Orientation::Vertical);
        let flex = fixed(&mut t, 4, 1, plain().with_grow_x(true).with_grow_y(true));
        let wide = fixed(&mut t, 4, 1, plain());
        t.add(bx, flex);
        t.add(bx, wide);
        t.draw(bx);
        assert!(!t.confirm_size(bx, 3, 3));
        assert!(t.confirm_size(bx, 4, 4));
    }

    #[test]
    fn focus_cycle_skips_hidden_and_wraps() {
        let mut t = tree();
        let win = t.new_window("w");
        let row = t.new_box(false, Orientation::Horizontal);
        let a = fixed(&mut t, 1, 1, plain().with_take_focus(true));
        let b = fixed(&mut t, 1, 1, plain().with_take_focus(true));
        let skip = fixed(&mut t, 1, 1, plain());
        let c = fixed(&mut t, 1, 1, plain().with_take_focus(true));
        t.add(win, a);
        t.add(win, row);
        t.add(row, b);
        t.add(row, skip);
        t.add(win, c);
        t.draw(win);
        assert_eq!(t.focus_list(win), &[a, b, c]);
        assert_eq!(t.active(win), Some(a));

        t.flags_mut(b).unwrap().set_visible(false);
        assert!(t.key_pressed(win, "tab"));
        assert_eq!(t.active(win), Some(c));
        assert!(t.key_pressed(win, "tab"));
        assert_eq!(t.active(win), Some(a));
        assert!(t.key_pressed(win, "back-tab"));
        assert_eq!(t.active(win), Some(c));
        assert!(t.flags(c).unwrap().has_focus());
        assert!(!t.flags(a).unwrap().has_focus());
    }

    #[test]
    fn focus_stays_put_without_candidates() {
        let mut t = tree();
        let win = t.new_window("w");
        let a = fixed(&mut t, 1, 1, plain().with_take_focus(true));
        let b = fixed(&mut t, 1, 1, plain().with_take_focus(true));
        t.add(win, a);
        t.add(win, b);
        t.draw(win);
        t.flags_mut(b).unwrap().set_visible(false);
        t.flags_mut(a).unwrap().set_visible(false);
        assert!(!t.box_focus_change(win, true));
        assert_eq!(t.active(win), Some(a));
    }

    #[test]
    fn removing_the_active_child_moves_focus_on() {
        let mut t = tree();
        let win = t.new_window("w");
        let a = fixed(&mut t, 1, 1, plain().with_take_focus(true));
        let b = fixed(&mut t, 1, 1, plain().with_take_focus(true));
        t.add(win, a);
        t.add(win, b);
        t.draw(win);
        t.remove(win, a);
        assert_eq!(t.active(win), Some(b));
        assert_eq!(t.focus_list(win), &[b]);
        assert_eq!(t.parent(a), None);
        t.destroy(b);
        assert_eq!(t.active(win), None);
        assert!(t.children(win).is_empty());
    }

    #[test]
    fn click_promotes_focusable_child() {
        let mut t = tree();
        let win = t.new_window("w");
        let a = fixed(&mut t, 3, 1, plain().with_take_focus(true));
        let b = fixed(&mut t, 3, 1, plain().with_take_focus(true));
        t.add(win, a);
        t.add(win, b);
        t.set_focus(win, true);
        t.draw(win);
        let (bx, by) = t.position(b).unwrap();
        t.clicked(win, MouseEvent::LeftDown, bx, by);
        assert_eq!(t.active(win), Some(b));
        assert!(t.flags(b).unwrap().has_focus());
    }

    #[test]
    fn children_are_centered_across_a_horizontal_box() {
        let mut t = tree();
        let bx = t.new_box(false, Orientation::Horizontal);
        t.set_fill(bx, false);
        let tall = fixed(&mut t, 1, 3, plain());
        let short = fixed(&mut t, 1, 1, plain());
        t.add(bx, tall);
        t.add(bx, short);
        t.draw(bx);
        assert_eq!(t.position(short), Some((2, 1)));
    }

    #[test]
    fn title_sits_centered_on_the_top_border() {
        let mut t = tree();
        let win = t.new_window("hi");
        let c = fixed(&mut t, 8, 1, plain());
        t.add(win, c);
        t.draw(win);
        let buffer = t.screen().surface(t.surface(win).unwrap()).unwrap();
        let row = crate::ui::row_text(buffer, 0);
        assert!(row.starts_with("┌──┤hi├──┐"), "{row}");
    }

    #[test]
    fn readjust_relays_out_from_scratch() {
        let mut t = tree();
        let win = t.new_window("w");
        let a = fixed(&mut t, 2, 1, plain().with_take_focus(true));
        t.add(win, a);
        t.draw(win);
        let before = t.size(win);
        t.set_pad(win, 3);
        let b = fixed(&mut t, 2, 1, plain().with_take_focus(true));
        t.add(win, b);
        t.readjust(win);
        assert_ne!(t.size(win), before);
        assert_eq!(t.size(win), Some((4, 7)));
        assert_eq!(t.active(win), Some(a));
        assert_eq!(t.focus_list(win), &[a, b]);
    }

    #[test]
    fn remove_all_destroys_children() {
        let mut t = tree();
        let bx = t.new_box(false, Orientation::Vertical);
        let a = fixed(&mut t, 2, 1, plain());
        t.add(bx, a);
        t.draw(bx);
        t.remove_all(bx);
        assert!(t.is_destroyed(a));
        assert_eq!(t.size(bx), Some((0, 0)));
    }
}

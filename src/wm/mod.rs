//! The window manager: workspaces of stacked toplevel widgets, each copied
//! into its own node surface and stacked as a panel on the screen.
//!
//! [`WmCore`] holds the state and the operations that need no policy
//! decision. [`WindowManager`] pairs it with a boxed [`WmPolicy`] and is the
//! entry point for input, window operations and the per-iteration `tick`.

use std::collections::{BTreeMap, HashMap};
use std::time::Duration;

use crate::config::{PolicyKind, WmConfig};
use crate::drivers::{InputEvent, MouseEvent};
use crate::error::{Error, Result};
use crate::keybindings::{Action, KeyBindings};
use crate::screen::Screen;
use crate::ui::SignedRect;
use crate::widget::tree::cells;
use crate::widget::{WidgetId, WidgetTree};

pub mod classic;
pub mod node;
pub mod policy;
pub mod taskbar;
pub mod workspace;

pub use classic::ClassicPolicy;
pub use node::WmNode;
pub use policy::{DefaultPolicy, WmPolicy};
pub use taskbar::Taskbar;
pub use workspace::{EntryState, TaskbarEntry, Workspace};

#[derive(Debug)]
pub struct WmCore {
    tree: WidgetTree,
    workspaces: Vec<Workspace>,
    current: usize,
    nodes: BTreeMap<WidgetId, WmNode>,
    // last position of each moved window, by title
    positions: HashMap<String, (i32, i32)>,
    bindings: KeyBindings,
    config: WmConfig,
    taskbar: Option<Taskbar>,
    // set whenever a window is brought to front; handed to the policy
    focus_notice: Option<WidgetId>,
    quit: bool,
    dirty: bool,
}

impl WmCore {
    pub fn new(mut tree: WidgetTree, config: WmConfig) -> Self {
        let workspaces = if config.workspaces.is_empty() {
            vec![Workspace::default()]
        } else {
            config
                .workspaces
                .iter()
                .map(|name| Workspace::new(Some(name)))
                .collect()
        };
        let taskbar = config.taskbar.then(|| Taskbar::new(tree.screen_mut()));
        Self {
            tree,
            workspaces,
            current: 0,
            nodes: BTreeMap::new(),
            positions: HashMap::new(),
            bindings: KeyBindings::wm_defaults(),
            config,
            taskbar,
            focus_notice: None,
            quit: false,
            dirty: true,
        }
    }

    pub fn tree(&self) -> &WidgetTree {
        &self.tree
    }

    pub fn tree_mut(&mut self) -> &mut WidgetTree {
        &mut self.tree
    }

    pub fn config(&self) -> &WmConfig {
        &self.config
    }

    pub fn bindings(&self) -> &KeyBindings {
        &self.bindings
    }

    pub fn set_bindings(&mut self, bindings: KeyBindings) {
        self.bindings = bindings;
    }

    pub fn taskbar(&self) -> Option<&Taskbar> {
        self.taskbar.as_ref()
    }

    pub fn node(&self, id: WidgetId) -> Option<&WmNode> {
        self.nodes.get(&id)
    }

    pub fn workspaces(&self) -> &[Workspace] {
        &self.workspaces
    }

    pub fn workspace(&self, n: usize) -> Option<&Workspace> {
        self.workspaces.get(n)
    }

    pub fn current_workspace(&self) -> usize {
        self.current
    }

    pub fn current(&self) -> &Workspace {
        &self.workspaces[self.current]
    }

    pub fn terminal_size(&self) -> (i32, i32) {
        let (w, h) = self.tree.screen().terminal_size();
        (i32::from(w), i32::from(h))
    }

    /// Rows available to windows: the terminal minus the taskbar row.
    pub fn usable_height(&self) -> i32 {
        let (_, h) = self.terminal_size();
        (h - i32::from(self.taskbar.is_some())).max(0)
    }

    pub fn idle_time(&self) -> Duration {
        self.tree.screen().idle_time()
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    pub fn request_quit(&mut self) {
        self.quit = true;
    }

    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub fn has_window_position(&self, title: &str) -> bool {
        self.positions.contains_key(title)
    }

    /// Visit every shown window, across all workspaces.
    pub fn foreach(&self, mut f: impl FnMut(WidgetId, &WmNode)) {
        for (id, node) in &self.nodes {
            f(*id, node);
        }
    }

    /// Center a non-transient window in the usable area, unless a position
    /// was remembered for its title.
    pub fn place_window_default(&mut self, id: WidgetId) {
        if self.tree.flags(id).is_none_or(|f| f.transient()) {
            return;
        }
        if let Some(title) = self.tree.title(id)
            && let Some(&(x, y)) = self.positions.get(title)
        {
            self.tree.set_position(id, x, y);
            return;
        }
        let (tw, _) = self.terminal_size();
        let th = self.usable_height();
        let (w, h) = self.tree.size_of(id);
        self.tree
            .set_position(id, ((tw - w) / 2).max(0), ((th - h) / 2).max(0));
    }

    // Visible part of a window: its size clipped to the usable area.
    fn view_size(&self, id: WidgetId) -> (i32, i32) {
        let (tw, _) = self.terminal_size();
        let (w, h) = self.tree.size_of(id);
        (w.min(tw).max(0), h.min(self.usable_height()).max(0))
    }

    /// Give a toplevel its node surface and panel and enter it into the
    /// current workspace. With focus-new-windows off it goes to the bottom
    /// of the stack, flagged urgent.
    pub fn attach_window(&mut self, id: WidgetId) {
        if self.nodes.contains_key(&id) || !self.tree.contains(id) {
            return;
        }
        let (vw, vh) = self.view_size(id);
        let (x, y) = self.tree.position(id).unwrap_or((0, 0));
        let screen = self.tree.screen_mut();
        let surface = screen.alloc_surface(cells(vw), cells(vh));
        let panel = screen.new_panel(surface);
        screen.move_panel(panel, x, y);
        self.nodes.insert(
            id,
            WmNode {
                widget: id,
                surface,
                panel,
                scroll: 0,
                workspace: self.current,
            },
        );
        tracing::debug!(window = %id, x, y, width = vw, height = vh, "window attached");

        let transient = self.tree.flags(id).is_some_and(|f| f.transient());
        let ws = &mut self.workspaces[self.current];
        if self.config.focus_new_windows || transient || ws.is_empty() {
            ws.add_widget(&mut self.tree, id);
            self.focus_window(id);
        } else {
            ws.append_widget(id);
            self.tree.screen_mut().lower_panel(panel);
            if let Some(flags) = self.tree.flags_mut(id) {
                flags.set_urgent(true);
            }
        }
        self.dirty = true;
    }

    /// Copy the visible part of the widget's surface into its node surface
    /// and follow the widget's position.
    pub fn copy_win(&mut self, id: WidgetId) {
        let Some(node) = self.nodes.get(&id).copied() else {
            return;
        };
        let Some(src) = self.tree.surface(id) else {
            return;
        };
        let (vw, vh) = self.view_size(id);
        let (_, h) = self.tree.size_of(id);
        let scroll = node.scroll.clamp(0, (h - vh).max(0));
        let (x, y) = self.tree.position(id).unwrap_or((0, 0));
        let screen = self.tree.screen_mut();
        if screen.surface_size(node.surface) != Some((cells(vw), cells(vh))) {
            screen.resize_surface(node.surface, cells(vw), cells(vh));
        }
        screen.copy_region(
            src,
            (0, cells(scroll)),
            node.surface,
            SignedRect::new(0, 0, cells(vw), cells(vh)),
        );
        screen.move_panel(node.panel, x, y);
        if let Some(node) = self.nodes.get_mut(&id) {
            node.scroll = scroll;
        }
        self.dirty = true;
    }

    /// Scroll the view of a window taller than the usable area. Returns
    /// false when the window fits.
    fn scroll_window(&mut self, id: WidgetId, delta: i32) -> bool {
        let (_, h) = self.tree.size_of(id);
        let (_, vh) = self.view_size(id);
        if h <= vh {
            return false;
        }
        let Some(node) = self.nodes.get_mut(&id) else {
            return false;
        };
        node.scroll = (node.scroll + delta).clamp(0, h - vh);
        true
    }

    /// Bring a window to the front of its own workspace and focus it.
    pub fn focus_window(&mut self, id: WidgetId) {
        let Some(n) = self.widget_find_workspace(id) else {
            tracing::debug!(window = %id, "focus on unmanaged window");
            return;
        };
        self.workspaces[n].bring_to_front(&mut self.tree, id);
        if let Some(node) = self.nodes.get(&id) {
            self.tree.screen_mut().raise_panel(node.panel);
        }
        if let Some(bar) = &self.taskbar {
            self.tree.screen_mut().raise_panel(bar.panel());
        }
        if let Some(flags) = self.tree.flags_mut(id) {
            flags.set_urgent(false);
        }
        self.focus_notice = Some(id);
        self.dirty = true;
    }

    /// Switch to the window's workspace if needed, then focus it.
    pub fn raise_window(&mut self, id: WidgetId) {
        if let Some(n) = self.widget_find_workspace(id)
            && n != self.current
        {
            self.switch_workspace(n);
        }
        self.focus_window(id);
    }

    /// Forget a hidden or destroyed toplevel: drop its node and panel, take
    /// it out of its workspace and focus the new head.
    pub fn window_close(&mut self, id: WidgetId) {
        let node = self.nodes.remove(&id);
        if let Some(node) = node {
            self.tree.screen_mut().release_surface(node.surface);
        }
        let owner = self.widget_find_workspace(id);
        for ws in &mut self.workspaces {
            ws.remove_widget(id);
        }
        if node.is_none() && owner.is_none() {
            return;
        }
        tracing::debug!(window = %id, "window closed");
        if owner == Some(self.current)
            && let Some(top) = self.current().top_widget()
        {
            self.focus_window(top);
        }
        self.dirty = true;
    }

    pub fn destroy_widget(&mut self, id: WidgetId) {
        self.tree.destroy(id);
    }

    /// First window of the current workspace with this name.
    pub fn find_by_name(&self, name: &str) -> Option<WidgetId> {
        self.current()
            .list()
            .iter()
            .copied()
            .find(|id| self.tree.name(*id) == Some(name))
    }

    // Topmost window of the current workspace under the cell.
    fn hit_test(&self, x: i32, y: i32) -> Option<WidgetId> {
        self.current().ordered().iter().copied().find(|id| {
            let Some(node) = self.nodes.get(id) else {
                return false;
            };
            let (Some((wx, wy)), Some((vw, vh))) = (
                self.tree.position(*id),
                self.tree.screen().surface_size(node.surface),
            ) else {
                return false;
            };
            SignedRect::new(wx, wy, vw, vh).contains(x, y)
        })
    }

    pub fn widget_find_workspace(&self, id: WidgetId) -> Option<usize> {
        self.workspaces.iter().position(|ws| ws.contains(id))
    }

    /// Hide the current workspace and show workspace `n`. Window state on
    /// both sides is left alone.
    pub fn switch_workspace(&mut self, n: usize) -> bool {
        if n >= self.workspaces.len() {
            tracing::debug!(workspace = n, "no such workspace");
            return false;
        }
        if n == self.current {
            return true;
        }
        self.workspaces[self.current].hide(&mut self.tree, &self.nodes);
        self.current = n;
        tracing::debug!(workspace = n, name = self.current().name(), "workspace switched");
        self.show_current();
        true
    }

    fn show_current(&mut self) {
        self.workspaces[self.current].show(&mut self.tree, &self.nodes);
        if let Some(bar) = &self.taskbar {
            self.tree.screen_mut().raise_panel(bar.panel());
        }
        if let Some(top) = self.current().top_widget() {
            self.focus_window(top);
        }
        self.dirty = true;
    }

    pub fn switch_workspace_next(&mut self) -> bool {
        let n = (self.current + 1) % self.workspaces.len();
        self.switch_workspace(n)
    }

    pub fn switch_workspace_prev(&mut self) -> bool {
        let len = self.workspaces.len();
        self.switch_workspace((self.current + len - 1) % len)
    }

    /// Move a window to workspace `n`, where it lands on top.
    pub fn widget_move_workspace(&mut self, id: WidgetId, n: usize) -> bool {
        if n >= self.workspaces.len() {
            return false;
        }
        let Some(old) = self.widget_find_workspace(id) else {
            return false;
        };
        if old == n {
            return true;
        }
        self.workspaces[old].remove_widget(id);
        self.workspaces[n].add_widget(&mut self.tree, id);
        if let Some(node) = self.nodes.get_mut(&id) {
            node.workspace = n;
            let panel = node.panel;
            if n == self.current {
                self.tree.screen_mut().show_panel(panel);
            } else {
                self.tree.screen_mut().hide_panel(panel);
            }
        }
        if n == self.current {
            self.focus_window(id);
        } else if old == self.current
            && let Some(top) = self.current().top_widget()
        {
            self.focus_window(top);
        }
        self.dirty = true;
        true
    }

    pub fn add_workspace(&mut self, ws: Workspace) -> usize {
        self.workspaces.push(ws);
        self.dirty = true;
        self.workspaces.len() - 1
    }

    /// Replace every workspace. Windows that none of the new workspaces
    /// hold are kept at the bottom of the first one.
    pub fn set_workspaces(&mut self, workspaces: Vec<Workspace>) -> Result<()> {
        if workspaces.is_empty() {
            return Err(Error::InvalidWorkspace(
                "at least one workspace is required".to_string(),
            ));
        }
        let orphans: Vec<WidgetId> = self
            .workspaces
            .iter()
            .flat_map(|ws| ws.list().iter().copied())
            .filter(|id| !workspaces.iter().any(|ws| ws.contains(*id)))
            .collect();
        for ws in &self.workspaces {
            ws.hide(&mut self.tree, &self.nodes);
        }
        self.workspaces = workspaces;
        for id in orphans {
            self.workspaces[0].append_widget(id);
        }
        for (id, node) in self.nodes.iter_mut() {
            if let Some(n) = self.workspaces.iter().position(|ws| ws.contains(*id)) {
                node.workspace = n;
            }
        }
        self.current = 0;
        self.show_current();
        Ok(())
    }

    pub fn draw_taskbar(&mut self) {
        let entries = self.current().taskbar_entries(&self.tree);
        if let Some(bar) = self.taskbar.as_mut() {
            bar.draw(self.tree.screen_mut(), &entries);
        }
    }
}

/// A [`WmCore`] driven by a policy.
#[derive(Debug)]
pub struct WindowManager {
    core: WmCore,
    policy: Box<dyn WmPolicy>,
}

impl WindowManager {
    pub fn new(tree: WidgetTree, config: WmConfig, policy: Box<dyn WmPolicy>) -> Self {
        Self {
            core: WmCore::new(tree, config),
            policy,
        }
    }

    /// Build the tree on `screen` and pick the policy the config names.
    pub fn from_config(screen: Screen, config: WmConfig) -> Self {
        let policy: Box<dyn WmPolicy> = match config.policy {
            PolicyKind::Default => Box::new(DefaultPolicy),
            PolicyKind::Classic => Box::new(ClassicPolicy),
        };
        tracing::info!(
            policy = policy.name(),
            workspaces = config.workspaces.len().max(1),
            shadows = config.shadows,
            "window manager ready"
        );
        let tree = WidgetTree::new(screen).with_shadows(config.shadows);
        Self::new(tree, config, policy)
    }

    pub fn core(&self) -> &WmCore {
        &self.core
    }

    pub fn core_mut(&mut self) -> &mut WmCore {
        &mut self.core
    }

    pub fn tree(&self) -> &WidgetTree {
        &self.core.tree
    }

    pub fn tree_mut(&mut self) -> &mut WidgetTree {
        &mut self.core.tree
    }

    pub fn policy_name(&self) -> &'static str {
        self.policy.name()
    }

    pub fn should_quit(&self) -> bool {
        self.core.quit
    }

    // Run the close and focus notifications queued by earlier operations.
    fn settle(&mut self) {
        loop {
            let released = self.core.tree.take_released();
            if released.is_empty() {
                break;
            }
            for id in released {
                self.core.window_close(id);
            }
        }
        if let Some(id) = self.core.focus_notice.take()
            && self.core.tree.contains(id)
        {
            self.policy.give_focus(&mut self.core, id);
        }
    }

    /// Make a widget visible and draw it. A toplevel shown for the first
    /// time becomes a window.
    pub fn show(&mut self, id: WidgetId) {
        self.settle();
        let Some(flags) = self.core.tree.flags_mut(id) else {
            tracing::warn!(widget = %id, "show on unknown widget");
            return;
        };
        flags.set_visible(true);
        self.core.tree.draw(id);
        if self.core.tree.is_toplevel(id) && !self.core.nodes.contains_key(&id) {
            self.new_window(id);
        }
        self.settle();
    }

    pub fn new_window(&mut self, id: WidgetId) {
        self.policy.new_window(&mut self.core, id);
        if self.core.nodes.contains_key(&id) {
            self.core.copy_win(id);
            self.window_decorate(id);
        }
        self.core.dirty = true;
        self.settle();
    }

    pub fn window_decorate(&mut self, id: WidgetId) {
        self.policy.decorate_window(&mut self.core, id);
    }

    /// Ask the policy, then destroy. Returns false when the close was
    /// vetoed.
    pub fn close_window(&mut self, id: WidgetId) -> bool {
        if !self.core.tree.contains(id) {
            return false;
        }
        if self.policy.close_window(&mut self.core, id) {
            tracing::debug!(window = %id, policy = self.policy.name(), "close vetoed");
            return false;
        }
        self.destroy_widget(id);
        true
    }

    pub fn window_close(&mut self, id: WidgetId) {
        self.core.window_close(id);
        self.settle();
    }

    pub fn destroy_widget(&mut self, id: WidgetId) {
        self.core.destroy_widget(id);
        self.settle();
    }

    pub fn raise_window(&mut self, id: WidgetId) {
        self.core.raise_window(id);
        self.settle();
    }

    pub fn give_focus(&mut self, id: WidgetId) {
        self.core.focus_window(id);
        self.settle();
    }

    /// Route one decoded input event.
    pub fn handle_event(&mut self, event: &InputEvent) -> bool {
        match event {
            InputEvent::Key(key) => self.process_input(key),
            InputEvent::Mouse { event, x, y } => self.process_click(*event, *x, *y),
            InputEvent::Resize(w, h) => {
                self.terminal_refresh(*w, *h);
                true
            }
        }
    }

    /// Offer a key to the policy, then the manager's bindings, then the
    /// focused window.
    pub fn process_input(&mut self, key: &str) -> bool {
        self.core.tree.screen_mut().touch_input();
        let handled = self.dispatch_key(key);
        self.settle();
        handled
    }

    fn dispatch_key(&mut self, key: &str) -> bool {
        if self.policy.key_pressed(&mut self.core, key) {
            return true;
        }
        if let Some(action) = self.core.bindings.action_for(key)
            && self.perform_action(action)
        {
            return true;
        }
        let Some(top) = self.core.current().top_widget() else {
            return false;
        };
        self.core.tree.key_pressed(top, key)
    }

    fn perform_action(&mut self, action: Action) -> bool {
        match action {
            Action::Quit => {
                tracing::info!("quit requested");
                self.core.quit = true;
                true
            }
            Action::WindowNext => self.cycle_window(1),
            Action::WindowPrev => self.cycle_window(-1),
            Action::WorkspaceNext => self.core.switch_workspace_next(),
            Action::WorkspacePrev => self.core.switch_workspace_prev(),
            Action::CloseWindow => match self.core.current().top_widget() {
                Some(top) => {
                    self.close_window(top);
                    true
                }
                None => false,
            },
            _ => false,
        }
    }

    // Raise the neighbour of the top window in taskbar order.
    fn cycle_window(&mut self, dir: i32) -> bool {
        let list = self.core.current().list();
        let (Some(top), Ok(len)) = (self.core.current().top_widget(), i32::try_from(list.len()))
        else {
            return false;
        };
        if len < 2 {
            return false;
        }
        let Some(pos) = list.iter().position(|id| *id == top) else {
            return false;
        };
        let pos = i32::try_from(pos).unwrap_or(0);
        let next = usize::try_from((pos + dir).rem_euclid(len)).unwrap_or(0);
        let id = list[next];
        self.core.focus_window(id);
        true
    }

    /// Deliver a click at screen coordinates: taskbar first, then the
    /// policy, then the topmost window under the pointer.
    pub fn process_click(&mut self, event: MouseEvent, x: i32, y: i32) -> bool {
        self.core.tree.screen_mut().touch_input();
        let handled = self.dispatch_click(event, x, y);
        self.settle();
        handled
    }

    fn dispatch_click(&mut self, event: MouseEvent, x: i32, y: i32) -> bool {
        let (_, th) = self.core.terminal_size();
        if y == th - 1
            && let Some(bar) = &self.core.taskbar
        {
            if event.is_press()
                && let Some(id) = bar.hit(x)
            {
                self.core.raise_window(id);
            }
            return true;
        }

        let hit = self.core.hit_test(x, y);
        if self
            .policy
            .mouse_clicked(&mut self.core, event, x, y, hit)
        {
            return true;
        }
        let Some(id) = hit else {
            return false;
        };
        if !self.core.tree.contains(id) {
            return true;
        }
        if event.is_press() && !self.core.current().is_top_widget(id) {
            self.core.raise_window(id);
        }
        let delta = match event {
            MouseEvent::ScrollUp => -1,
            MouseEvent::ScrollDown => 1,
            _ => 0,
        };
        if delta != 0 && self.core.scroll_window(id, delta) {
            self.refresh_node(id);
            return true;
        }
        let scroll = self.core.node(id).map_or(0, WmNode::scroll);
        self.core.tree.clicked(id, event, x, y + scroll)
    }

    /// Resize a window after the policy agrees. Returns false when either
    /// the policy or the widget refused.
    pub fn resize_window(&mut self, id: WidgetId, width: i32, height: i32) -> bool {
        let (mut w, mut h) = (width, height);
        if !self
            .policy
            .window_resize_confirm(&mut self.core, id, &mut w, &mut h)
        {
            tracing::debug!(window = %id, width, height, "resize vetoed");
            return false;
        }
        if !self.core.tree.set_size(id, w, h) {
            return false;
        }
        self.policy.window_resized(&mut self.core, id);
        self.core.tree.draw(id);
        self.update_window(id);
        true
    }

    /// Move a window after the policy agrees and remember where it went.
    pub fn move_window(&mut self, id: WidgetId, x: i32, y: i32) -> bool {
        if !self.core.tree.contains(id) {
            return false;
        }
        let (mut x, mut y) = (x, y);
        if !self
            .policy
            .window_move_confirm(&mut self.core, id, &mut x, &mut y)
        {
            tracing::debug!(window = %id, x, y, "move vetoed");
            return false;
        }
        self.core.tree.set_position(id, x, y);
        if let Some(title) = self.core.tree.title(id) {
            self.core.positions.insert(title.to_string(), (x, y));
        }
        self.policy.window_moved(&mut self.core, id);
        self.update_window(id);
        true
    }

    // Copy a window to its node and let the policy redecorate.
    fn refresh_node(&mut self, id: WidgetId) {
        self.core.copy_win(id);
        self.policy.window_update(&mut self.core, id);
    }

    /// Bring the window holding `id` up to date on screen. A drawn toplevel
    /// without a node becomes a new window.
    pub fn update_window(&mut self, id: WidgetId) {
        let Some(top) = self.core.tree.toplevel(id) else {
            return;
        };
        let Some(flags) = self.core.tree.flags(top) else {
            return;
        };
        if flags.destroying() {
            return;
        }
        if !self.core.nodes.contains_key(&top) {
            if flags.visible() && flags.mapped() {
                self.new_window(top);
            }
            return;
        }
        if self.core.tree.is_container(top) {
            self.core.tree.sync_children(top);
        }
        self.refresh_node(top);
        if let Some(n) = self.core.node(top).map(WmNode::workspace)
            && n != self.core.current
            && !flags.urgent()
        {
            if let Some(flags) = self.core.tree.flags_mut(top) {
                flags.set_urgent(true);
            }
            self.core.dirty = true;
        }
    }

    /// Follow a terminal resize: maximized windows track the new size,
    /// every window is pulled back on screen.
    pub fn terminal_refresh(&mut self, width: u16, height: u16) {
        self.core.tree.screen_mut().set_terminal_size(width, height);
        if let Some(bar) = self.core.taskbar.as_mut() {
            bar.relocate(self.core.tree.screen_mut());
        }
        let tw = i32::from(width);
        let th = self.core.usable_height();
        let ids: Vec<WidgetId> = self.core.nodes.keys().copied().collect();
        for id in ids {
            let max = self.core.tree.maximize(id);
            if max.x || max.y {
                let w = if max.x { tw } else { -1 };
                let h = if max.y { th } else { -1 };
                self.resize_window(id, w, h);
            }
            let (w, h) = self.core.tree.size_of(id);
            if let Some((x, y)) = self.core.tree.position(id) {
                let nx = x.min(tw - w).max(0);
                let ny = y.min(th - h).max(0);
                if (nx, ny) != (x, y) {
                    self.core.tree.set_position(id, nx, ny);
                }
            }
            self.update_window(id);
        }
        self.policy.terminal_refresh(&mut self.core);
        self.core.dirty = true;
        tracing::debug!(width, height, "terminal refreshed");
        self.settle();
    }

    /// Copy every window with a queued update to its node, then compose and
    /// present the screen once. Nothing is presented when nothing changed.
    pub fn tick(&mut self) -> Result<()> {
        self.settle();
        let pending = self.core.tree.take_pending_updates();
        let had_work = !pending.is_empty();
        for id in pending {
            if self.core.tree.contains(id) {
                self.update_window(id);
            }
        }
        self.settle();
        if !had_work && !self.core.dirty {
            return Ok(());
        }
        self.core.draw_taskbar();
        self.core.dirty = false;
        self.core.tree.screen_mut().flush()?;
        Ok(())
    }

    // Workspace operations

    pub fn current_workspace(&self) -> usize {
        self.core.current_workspace()
    }

    pub fn add_workspace(&mut self, ws: Workspace) -> usize {
        self.core.add_workspace(ws)
    }

    pub fn set_workspaces(&mut self, workspaces: Vec<Workspace>) -> Result<()> {
        self.core.set_workspaces(workspaces)?;
        self.settle();
        Ok(())
    }

    pub fn switch_workspace(&mut self, n: usize) -> bool {
        let switched = self.core.switch_workspace(n);
        self.settle();
        switched
    }

    pub fn switch_workspace_next(&mut self) -> bool {
        let switched = self.core.switch_workspace_next();
        self.settle();
        switched
    }

    pub fn switch_workspace_prev(&mut self) -> bool {
        let switched = self.core.switch_workspace_prev();
        self.settle();
        switched
    }

    pub fn widget_move_workspace(&mut self, id: WidgetId, n: usize) -> bool {
        let moved = self.core.widget_move_workspace(id, n);
        self.settle();
        moved
    }

    pub fn widget_find_workspace(&self, id: WidgetId) -> Option<usize> {
        self.core.widget_find_workspace(id)
    }

    pub fn foreach(&self, f: impl FnMut(WidgetId, &WmNode)) {
        self.core.foreach(f);
    }

    pub fn idle_time(&self) -> Duration {
        self.core.idle_time()
    }

    pub fn has_window_position(&self, title: &str) -> bool {
        self.core.has_window_position(title)
    }

    pub fn draw_taskbar(&mut self) {
        self.core.draw_taskbar();
    }
}

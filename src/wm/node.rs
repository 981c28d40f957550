use crate::screen::{PanelId, SurfaceId};
use crate::widget::WidgetId;

/// Screen-side bookkeeping for one shown toplevel: the surface the widget is
/// copied into, the panel stacking that surface, and where the view of a
/// widget taller than the terminal starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WmNode {
    pub(crate) widget: WidgetId,
    pub(crate) surface: SurfaceId,
    pub(crate) panel: PanelId,
    pub(crate) scroll: i32,
    pub(crate) workspace: usize,
}

impl WmNode {
    pub fn widget(&self) -> WidgetId {
        self.widget
    }

    pub fn surface(&self) -> SurfaceId {
        self.surface
    }

    pub fn panel(&self) -> PanelId {
        self.panel
    }

    pub fn scroll(&self) -> i32 {
        self.scroll
    }

    pub fn workspace(&self) -> usize {
        self.workspace
    }
}

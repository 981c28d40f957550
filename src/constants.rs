//! Shared crate-wide constants.

/// Extra rows and columns allocated around every widget surface.
///
/// Surfaces are only reallocated once a resize outgrows this slack, so a
/// window that is nudged a few cells larger keeps its existing buffer.
pub const SURFACE_SLACK: u16 = 20;

/// Thickness of a box border on each side, in cells.
pub const BORDER_THICKNESS: i32 = 1;

/// Default number of cells between two consecutive children of a box.
pub const DEFAULT_BOX_PAD: i32 = 1;

/// Name a toplevel must carry to be treated as the classic policy's
/// full-height main window.
pub const MAIN_WINDOW_NAME: &str = "MainWindow";

/// Label painted by the classic policy in the top-right corner of a
/// decorated window. Clicking its middle cell closes the window.
pub const CLOSE_BOX_LABEL: &str = "[X]";

/// Columns between the right edge of a window and the start of the close box.
pub const CLOSE_BOX_OFFSET: i32 = 4;

/// Title used for taskbar entries of windows that never set one.
pub const UNTITLED_WINDOW: &str = "<untitled>";

/// Name given to workspaces created without an explicit name.
pub const UNNAMED_WORKSPACE: &str = "(noname)";

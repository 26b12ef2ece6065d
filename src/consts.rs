//! Shared constants for the layout engine.

// ── Document ────────────────────────────────────────────────────

/// Name given to the single tab of a freshly created document.
pub const DEFAULT_TAB_NAME: &str = "Layout 1";

/// Prefix for tabs added without an explicit name (`"Layout 2"`, ...).
pub const DEFAULT_NEW_TAB_PREFIX: &str = "Layout";

/// Suffix appended to the name of a duplicated tab.
pub const DUPLICATE_TAB_SUFFIX: &str = " (copy)";

// ── Scale ───────────────────────────────────────────────────────

/// Default canvas width in pixels used when the host has not measured one.
pub const DEFAULT_CANVAS_WIDTH_PX: f64 = 800.0;

/// Full turn in degrees; rotations are kept in `[0, FULL_TURN_DEG)`.
pub const FULL_TURN_DEG: f64 = 360.0;

// ── Element catalogue (meters) ──────────────────────────────────

/// Standard round banquet table diameter.
pub const ROUND_TABLE_DIAMETER_M: f64 = 1.8;

/// Standard 6 ft rectangular trestle table.
pub const RECT_TABLE_WIDTH_M: f64 = 1.83;
pub const RECT_TABLE_DEPTH_M: f64 = 0.76;

/// Imperial (long banquet) table.
pub const IMPERIAL_TABLE_WIDTH_M: f64 = 3.0;
pub const IMPERIAL_TABLE_DEPTH_M: f64 = 1.2;

/// Modular dance-floor panel edge and default panel grid.
pub const DANCE_FLOOR_PANEL_M: f64 = 0.6;
pub const DANCE_FLOOR_PANELS: u32 = 6;

/// Default stage footprint.
pub const STAGE_WIDTH_M: f64 = 6.0;
pub const STAGE_DEPTH_M: f64 = 4.0;

/// Corner and center marker footprint.
pub const MARKER_SIZE_M: f64 = 0.3;

/// Scale reference square edge.
pub const SCALE_REFERENCE_M: f64 = 1.0;

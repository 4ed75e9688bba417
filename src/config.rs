//! # Editor Configuration
//!
//! Canvas geometry and editing limits for the layout editor.
//!
//! ## Defaults
//!
//! | Setting | Value |
//! |---------|-------|
//! | Grid size | 20 units |
//! | History capacity | 50 snapshots |
//! | Paste offset | 20 units |
//! | Canvas | 1200 x 800 units |
//! | Storage key | `seatplan.layout` |
//!
//! ## Usage
//!
//! ```
//! use seatplan::config::EditorConfig;
//!
//! let config = EditorConfig {
//!     grid_size: 10,
//!     ..EditorConfig::default()
//! };
//! assert!(config.validate().is_ok());
//! assert_eq!(config.snap(14.0), 10);
//! ```

use crate::error::{Result, SeatplanError};
use crate::layout::Position;

/// Default grid size in canvas units.
pub const DEFAULT_GRID_SIZE: i32 = 20;

/// Default number of history snapshots kept (including the initial one).
pub const DEFAULT_HISTORY_CAPACITY: usize = 50;

/// Default storage slot key.
pub const DEFAULT_STORAGE_KEY: &str = "seatplan.layout";

/// Zoom bounds and step, in percent.
pub const ZOOM_MIN: u16 = 50;
pub const ZOOM_MAX: u16 = 200;
pub const ZOOM_STEP: u16 = 10;
pub const ZOOM_DEFAULT: u16 = 100;

/// # Editor Configuration
///
/// - **grid_size**: every committed position is a multiple of this
/// - **history_capacity**: undo snapshots kept before the oldest is evicted
/// - **paste_offset**: Δ applied to both axes when pasting a copy
/// - **canvas_width / canvas_height**: extent of the design surface; committed
///   positions are clamped inside it
/// - **storage_key**: the single slot used by save/load
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorConfig {
    pub grid_size: i32,
    pub history_capacity: usize,
    pub paste_offset: i32,
    pub canvas_width: i32,
    pub canvas_height: i32,
    pub storage_key: String,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            grid_size: DEFAULT_GRID_SIZE,
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            paste_offset: 20,
            canvas_width: 1200,
            canvas_height: 800,
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
        }
    }
}

impl EditorConfig {
    /// Check that the configuration describes a usable editor.
    pub fn validate(&self) -> Result<()> {
        if self.grid_size <= 0 {
            return Err(SeatplanError::Config(format!(
                "grid size must be positive, got {}",
                self.grid_size
            )));
        }
        if self.history_capacity == 0 {
            return Err(SeatplanError::Config(
                "history capacity must be at least 1".to_string(),
            ));
        }
        if self.canvas_width <= 0 || self.canvas_height <= 0 {
            return Err(SeatplanError::Config(format!(
                "canvas must have a positive size, got {}x{}",
                self.canvas_width, self.canvas_height
            )));
        }
        if self.storage_key.trim().is_empty() {
            return Err(SeatplanError::Config("storage key is empty".to_string()));
        }
        Ok(())
    }

    /// Round a raw coordinate to the nearest grid multiple.
    ///
    /// Halves round up (towards positive infinity), so `snap(10.0)` with a
    /// grid of 20 gives 20 and `snap(-10.0)` gives 0.
    #[inline]
    pub fn snap(&self, value: f64) -> i32 {
        let grid = f64::from(self.grid_size);
        ((value / grid + 0.5).floor() * grid) as i32
    }

    /// Snap an integer coordinate.
    #[inline]
    pub fn snap_i32(&self, value: i32) -> i32 {
        self.snap(f64::from(value))
    }

    /// Snap a raw point to the grid and clamp it onto the canvas.
    ///
    /// The upper bound is the last grid line inside the canvas, so the result
    /// stays grid-aligned whatever the canvas size.
    pub fn snap_position(&self, x: f64, y: f64) -> Position {
        let max_x = self.canvas_width / self.grid_size * self.grid_size;
        let max_y = self.canvas_height / self.grid_size * self.grid_size;
        Position::new(
            self.snap(x).clamp(0, max_x),
            self.snap(y).clamp(0, max_y),
        )
    }
}

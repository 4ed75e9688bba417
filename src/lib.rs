//! # Seatplan - Seat Layout Editor
//!
//! Seatplan models the state of a drag-and-drop canvas for planning seats,
//! areas and amenities in a study hall or coworking space. It provides:
//!
//! - **Editing**: grid-snapped placement and dragging, copy/paste, delete
//! - **History**: bounded undo/redo over full layout snapshots
//! - **Layouts**: a deterministic smart layout, JSON import/export
//! - **Persistence**: a single named storage slot, in memory or on disk
//! - **Shortcuts**: keymaps bound for exactly as long as an editor is mounted
//!
//! ## Quick Start
//!
//! ```
//! use seatplan::{
//!     config::EditorConfig,
//!     editor::{EditorMode, LayoutEditor},
//!     layout::Point,
//!     storage::MemoryStore,
//! };
//!
//! let mut editor = LayoutEditor::new(EditorConfig::default())?;
//!
//! // Seats land on the 20px grid
//! let seat = editor.add_seat(113, 87).id.clone();
//! assert_eq!(editor.element(&seat).unwrap().position.x, 120);
//!
//! // Drag it one cell to the right
//! editor.set_mode(EditorMode::Drag);
//! editor.begin_drag(&seat, Point::new(125.0, 85.0));
//! editor.update_drag(Point::new(145.0, 85.0));
//! editor.end_drag();
//!
//! // Persist, then undo the move
//! let mut store = MemoryStore::new();
//! editor.save_layout(&mut store)?;
//! editor.undo();
//! assert_eq!(editor.element(&seat).unwrap().position.x, 120);
//!
//! # Ok::<(), seatplan::error::SeatplanError>(())
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`layout`] | Element model, templates, smart layout, filters, JSON documents |
//! | [`editor`] | Editor state, history, id generation, mounting |
//! | [`shortcuts`] | Key combos, keymaps, RAII subscriptions |
//! | [`storage`] | The layout storage slot |
//! | [`notify`] | User-facing notifications |
//! | [`session`] | Scriptable command language |
//! | [`config`] | Editor configuration |
//! | [`error`] | Error types |

pub mod config;
pub mod editor;
pub mod error;
pub mod layout;
pub mod notify;
pub mod session;
pub mod shortcuts;
pub mod storage;

// Re-exports for convenience
pub use config::EditorConfig;
pub use editor::{LayoutEditor, MountedEditor};
pub use error::SeatplanError;
pub use layout::{LayoutDocument, LayoutElement};

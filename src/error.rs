//! # Error Types
//!
//! This module defines error types used throughout the seatplan library.
//!
//! Editor operations surface these as error notifications as well as
//! returning them, and always leave the element list untouched on failure.

use thiserror::Error;

use crate::layout::ElementKind;

/// Main error type for seatplan operations
#[derive(Debug, Error)]
pub enum SeatplanError {
    /// Placement requested with an unregistered area/amenity template key
    #[error("Unknown {kind} template '{key}'")]
    UnknownTemplate { kind: ElementKind, key: String },

    /// Malformed or structurally incomplete layout JSON
    #[error("Import failed: {0}")]
    ImportParse(String),

    /// No element with the given id
    #[error("Element not found: {0}")]
    ElementNotFound(String),

    /// Attribute update would change an element's kind
    #[error("Cannot change {expected} into {found}")]
    KindMismatch {
        expected: ElementKind,
        found: ElementKind,
    },

    /// Resize requested for a fixed-size element
    #[error("Element '{0}' is not resizable")]
    NotResizable(String),

    /// Seat-only edit requested for an area or amenity
    #[error("Element '{0}' is not a seat")]
    NotASeat(String),

    /// Storage slot errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Invalid editor configuration
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Session command could not be parsed or executed
    #[error("Command error: {0}")]
    Command(String),

    /// I/O error wrapper
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error wrapper
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SeatplanError>;

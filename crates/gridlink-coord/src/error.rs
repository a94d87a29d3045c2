//! This module defines the error types used by the `gridlink-coord` crate.

#![warn(missing_docs)]

/// Error type for grid coordinate operations.
///
/// Attachment errors are precondition violations: they signal a misuse of
/// the attach/detach state machine and leave the coordinate untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    /// Returned by `attach` when an entity is already bound to the coordinate.
    AlreadyAttached(&'static str),
    /// Returned by `detach` when no entity is bound to the coordinate.
    NotAttached(&'static str),
    /// Returned when a grid space is built with a cell size that is not
    /// a positive, finite number.
    InvalidCellSize(&'static str),
}

impl core::fmt::Display for GridError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            GridError::AlreadyAttached(msg) => write!(f, "Entity already attached: {}", msg),
            GridError::NotAttached(msg) => write!(f, "No entity attached: {}", msg),
            GridError::InvalidCellSize(msg) => write!(f, "Invalid cell size: {}", msg),
        }
    }
}

impl core::error::Error for GridError {}

//! Outline editing helpers shared by both workflows.

use crate::errors::{DraftflowError, Result};
use serde::{Deserialize, Serialize};

/// Direction for moving an outline entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoveDirection {
    /// Towards the start.
    Up,
    /// Towards the end.
    Down,
}

pub(crate) fn check_index(index: usize, len: usize) -> Result<()> {
    if index < len {
        Ok(())
    } else {
        Err(DraftflowError::InvalidIndex { index, len })
    }
}

/// Swaps the entry with its neighbour. Moving past either end is a no-op
/// and returns `false`.
pub(crate) fn move_item<T>(items: &mut [T], index: usize, direction: MoveDirection) -> Result<bool> {
    check_index(index, items.len())?;
    let target = match direction {
        MoveDirection::Up if index > 0 => index - 1,
        MoveDirection::Down if index + 1 < items.len() => index + 1,
        _ => return Ok(false),
    };
    items.swap(index, target);
    Ok(true)
}

pub(crate) fn replace_item<T>(items: &mut [T], index: usize, item: T) -> Result<()> {
    check_index(index, items.len())?;
    items[index] = item;
    Ok(())
}

pub(crate) fn remove_item<T>(items: &mut Vec<T>, index: usize) -> Result<T> {
    check_index(index, items.len())?;
    Ok(items.remove(index))
}

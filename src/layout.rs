//! Grid geometry for the sponsor wall.
//!
//! Avatars are laid out left to right in rows of [`COLUMNS`]. Each row is
//! [`ROW_PITCH`] tall: the avatar, the gap to the next row, and 20px reserved
//! for the name label under the avatar.

pub const AVATAR_SIZE: usize = 60;
pub const SPACING: usize = 10;
pub const COLUMNS: usize = 6;
pub const PADDING: usize = 20;
pub const HEADER_HEIGHT: usize = 40;
pub const LABEL_ALLOWANCE: usize = 20;
pub const ROW_PITCH: usize = AVATAR_SIZE + SPACING + LABEL_ALLOWANCE;

/// Baseline offset of the name label below the avatar's top edge.
pub const LABEL_OFFSET: usize = AVATAR_SIZE + 15;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slot {
    pub col: usize,
    pub row: usize,
    pub x: usize,
    pub y: usize,
    pub center_x: usize,
    pub center_y: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Canvas {
    pub width: usize,
    pub height: usize,
}

pub fn slot(index: usize) -> Slot {
    let col = index % COLUMNS;
    let row = index / COLUMNS;
    let x = PADDING + col * (AVATAR_SIZE + SPACING);
    let y = HEADER_HEIGHT + PADDING + row * ROW_PITCH;

    Slot {
        col,
        row,
        x,
        y,
        center_x: x + AVATAR_SIZE / 2,
        center_y: y + AVATAR_SIZE / 2,
    }
}

pub fn rows(total: usize) -> usize {
    total.div_ceil(COLUMNS)
}

pub fn canvas(total: usize) -> Canvas {
    // The last column has no trailing gap, hence `- SPACING`.
    let width = (AVATAR_SIZE + SPACING) * COLUMNS + PADDING * 2 - SPACING;
    let height = HEADER_HEIGHT + ROW_PITCH * rows(total) + PADDING;

    Canvas { width, height }
}

//! Core domain types and operations
//!
//! This module defines pure domain types that work exclusively with
//! screen pixels and have no knowledge of any window system.

use std::str::FromStr;

use crate::domain::grid::GridError;

/// Rectangle in screen pixel coordinates
///
/// This is the fundamental building block for all geometric calculations:
/// the measured screen area, every grid cell, and every placement target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    /// Creates a new rectangle
    pub fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// Creates a rectangle usable as a screen area
    ///
    /// Width and height must both be strictly positive.
    pub fn screen(x: i32, y: i32, w: i32, h: i32) -> Result<Self, GridError> {
        let rect = Self::new(x, y, w, h);
        rect.validate_screen()?;
        Ok(rect)
    }

    /// Checks the screen-area invariant
    ///
    /// Width and height must be positive and the right and bottom edges
    /// must be representable, so every cell inside the area is too.
    pub fn validate_screen(&self) -> Result<(), GridError> {
        if self.w <= 0
            || self.h <= 0
            || self.x.checked_add(self.w).is_none()
            || self.y.checked_add(self.h).is_none()
        {
            return Err(GridError::InvalidRect { rect: *self });
        }
        Ok(())
    }

    /// Returns the right edge coordinate
    pub fn right(&self) -> i32 {
        self.x + self.w
    }

    /// Returns the bottom edge coordinate
    pub fn bottom(&self) -> i32 {
        self.y + self.h
    }

    /// Returns true if `other` lies entirely within this rectangle
    pub fn contains_rect(&self, other: &Rect) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }

    /// Returns the intersection of two rectangles, or None if they don't intersect
    pub fn intersection(&self, other: &Rect) -> Option<Rect> {
        let left = self.x.max(other.x);
        let top = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());

        if left < right && top < bottom {
            Some(Rect::new(left, top, right - left, bottom - top))
        } else {
            None
        }
    }

    /// Returns the rectangle as an `[x, y, w, h]` array
    pub fn to_array(&self) -> [i32; 4] {
        [self.x, self.y, self.w, self.h]
    }
}

impl From<[i32; 4]> for Rect {
    fn from([x, y, w, h]: [i32; 4]) -> Self {
        Rect::new(x, y, w, h)
    }
}

impl std::fmt::Display for Rect {
    /// Formats as an X11-style geometry string, e.g. `1920x1080+0+0`
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}{:+}{:+}", self.w, self.h, self.x, self.y)
    }
}

impl FromStr for Rect {
    type Err = GridError;

    /// Parses `WxH`, `WxH+X+Y` (offsets may be negative) or `X,Y,W,H`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || GridError::InvalidGeometry {
            input: s.to_string(),
        };
        let s_trim = s.trim();

        if s_trim.contains(',') {
            let parts = s_trim
                .split(',')
                .map(|p| p.trim().parse::<i32>())
                .collect::<Result<Vec<_>, _>>()
                .map_err(|_| invalid())?;
            let [x, y, w, h]: [i32; 4] = parts.try_into().map_err(|_| invalid())?;
            return Ok(Rect::new(x, y, w, h));
        }

        let (size, offsets) = match s_trim.find(['+', '-']) {
            Some(idx) => s_trim.split_at(idx),
            None => (s_trim, ""),
        };

        let (w, h) = size.split_once(['x', 'X']).ok_or_else(invalid)?;
        let w = w.parse::<i32>().map_err(|_| invalid())?;
        let h = h.parse::<i32>().map_err(|_| invalid())?;

        if offsets.is_empty() {
            return Ok(Rect::new(0, 0, w, h));
        }

        // Offsets come as two signed numbers back to back: "+10-20"
        let second = offsets[1..].find(['+', '-']).ok_or_else(invalid)? + 1;
        let (x, y) = offsets.split_at(second);
        let x = x.parse::<i32>().map_err(|_| invalid())?;
        let y = y.parse::<i32>().map_err(|_| invalid())?;

        Ok(Rect::new(x, y, w, h))
    }
}

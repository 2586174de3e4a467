//! Named window positions
//!
//! Every preset is a fixed cell of a small grid. The names follow the
//! `<group>.<slot>` pattern used on the command line, e.g. `split_2x2.ul`.

use std::str::FromStr;

use crate::domain::grid::{GridCoords, GridError, GridPosition};

/// A named window position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Preset {
    /// Whole screen
    Full,
    /// Left half
    Left,
    /// Right half
    Right,
    /// Top half
    Top,
    /// Bottom half
    Bottom,
    Split2x2UpperLeft,
    Split2x2UpperRight,
    Split2x2BottomLeft,
    Split2x2BottomRight,
    Split3x2UpperLeft,
    Split3x2MiddleLeft,
    Split3x2BottomLeft,
    Split3x2UpperRight,
    Split3x2MiddleRight,
    Split3x2BottomRight,
    Split3x1Upper,
    Split3x1Middle,
    Split3x1Bottom,
    Split1x3Left,
    Split1x3Middle,
    Split1x3Right,
}

impl Preset {
    /// Every preset, in listing order
    pub const ALL: [Preset; 21] = [
        Preset::Full,
        Preset::Left,
        Preset::Right,
        Preset::Top,
        Preset::Bottom,
        Preset::Split2x2UpperLeft,
        Preset::Split2x2UpperRight,
        Preset::Split2x2BottomLeft,
        Preset::Split2x2BottomRight,
        Preset::Split3x2UpperLeft,
        Preset::Split3x2MiddleLeft,
        Preset::Split3x2BottomLeft,
        Preset::Split3x2UpperRight,
        Preset::Split3x2MiddleRight,
        Preset::Split3x2BottomRight,
        Preset::Split3x1Upper,
        Preset::Split3x1Middle,
        Preset::Split3x1Bottom,
        Preset::Split1x3Left,
        Preset::Split1x3Middle,
        Preset::Split1x3Right,
    ];

    /// Returns the command-line name of this preset
    pub fn name(&self) -> &'static str {
        match self {
            Preset::Full => "full",
            Preset::Left => "l",
            Preset::Right => "r",
            Preset::Top => "t",
            Preset::Bottom => "b",
            Preset::Split2x2UpperLeft => "split_2x2.ul",
            Preset::Split2x2UpperRight => "split_2x2.ur",
            Preset::Split2x2BottomLeft => "split_2x2.bl",
            Preset::Split2x2BottomRight => "split_2x2.br",
            Preset::Split3x2UpperLeft => "split_3x2.ul",
            Preset::Split3x2MiddleLeft => "split_3x2.ml",
            Preset::Split3x2BottomLeft => "split_3x2.bl",
            Preset::Split3x2UpperRight => "split_3x2.ur",
            Preset::Split3x2MiddleRight => "split_3x2.mr",
            Preset::Split3x2BottomRight => "split_3x2.br",
            Preset::Split3x1Upper => "split_3x1.u",
            Preset::Split3x1Middle => "split_3x1.m",
            Preset::Split3x1Bottom => "split_3x1.b",
            Preset::Split1x3Left => "split_1x3.l",
            Preset::Split1x3Middle => "split_1x3.m",
            Preset::Split1x3Right => "split_1x3.r",
        }
    }

    /// Returns the grid cell this preset occupies
    pub fn position(&self) -> GridPosition {
        let (rows, cols, row, col) = match self {
            Preset::Full => (1, 1, 0, 0),
            Preset::Left => (1, 2, 0, 0),
            Preset::Right => (1, 2, 0, 1),
            Preset::Top => (2, 1, 0, 0),
            Preset::Bottom => (2, 1, 1, 0),
            Preset::Split2x2UpperLeft => (2, 2, 0, 0),
            Preset::Split2x2UpperRight => (2, 2, 0, 1),
            Preset::Split2x2BottomLeft => (2, 2, 1, 0),
            Preset::Split2x2BottomRight => (2, 2, 1, 1),
            Preset::Split3x2UpperLeft => (3, 2, 0, 0),
            Preset::Split3x2MiddleLeft => (3, 2, 1, 0),
            Preset::Split3x2BottomLeft => (3, 2, 2, 0),
            Preset::Split3x2UpperRight => (3, 2, 0, 1),
            Preset::Split3x2MiddleRight => (3, 2, 1, 1),
            Preset::Split3x2BottomRight => (3, 2, 2, 1),
            Preset::Split3x1Upper => (3, 1, 0, 0),
            Preset::Split3x1Middle => (3, 1, 1, 0),
            Preset::Split3x1Bottom => (3, 1, 2, 0),
            Preset::Split1x3Left => (1, 3, 0, 0),
            Preset::Split1x3Middle => (1, 3, 0, 1),
            Preset::Split1x3Right => (1, 3, 0, 2),
        };

        // All table entries are in range, so construct directly
        GridPosition {
            rows,
            cols,
            coords: GridCoords::new(row, col),
        }
    }

    /// Returns all preset names, in listing order
    pub fn names() -> Vec<&'static str> {
        Self::ALL.iter().map(Preset::name).collect()
    }
}

impl std::fmt::Display for Preset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Preset {
    type Err = GridError;

    /// Accepts the listing name, case-insensitively, with `-` or `_`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace('-', "_");
        Self::ALL
            .iter()
            .copied()
            .find(|preset| preset.name() == wanted)
            .ok_or_else(|| GridError::UnknownPreset {
                name: s.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::core::Rect;
    use std::collections::HashSet;

    #[test]
    fn every_preset_has_a_valid_position() {
        for preset in Preset::ALL {
            let p = preset.position();
            let validated = GridPosition::new(p.rows, p.cols, p.coords.row, p.coords.col);
            assert_eq!(validated, Ok(p), "{preset} has an out-of-range cell");
        }
    }

    #[test]
    fn names_are_unique_and_parse_back() {
        let names = Preset::names();
        let unique: HashSet<_> = names.iter().collect();
        assert_eq!(unique.len(), Preset::ALL.len());

        for preset in Preset::ALL {
            assert_eq!(preset.name().parse::<Preset>().unwrap(), preset);
        }
    }

    #[test]
    fn parse_is_lenient_about_case_and_dashes() {
        assert_eq!("FULL".parse::<Preset>().unwrap(), Preset::Full);
        assert_eq!("split-2x2.BR".parse::<Preset>().unwrap(), Preset::Split2x2BottomRight);
        assert!(matches!(
            "split_4x4.ul".parse::<Preset>(),
            Err(GridError::UnknownPreset { .. })
        ));
    }

    #[test]
    fn halves_resolve_on_full_hd() {
        let screen = Rect::new(0, 0, 1920, 1080);
        let cell = |p: Preset| p.position().cell_rect(screen).unwrap();

        assert_eq!(cell(Preset::Full), screen);
        assert_eq!(cell(Preset::Left), Rect::new(0, 0, 960, 1080));
        assert_eq!(cell(Preset::Right), Rect::new(960, 0, 960, 1080));
        assert_eq!(cell(Preset::Top), Rect::new(0, 0, 1920, 540));
        assert_eq!(cell(Preset::Bottom), Rect::new(0, 540, 1920, 540));
        assert_eq!(cell(Preset::Split2x2BottomLeft), Rect::new(0, 540, 960, 540));
        assert_eq!(cell(Preset::Split3x2MiddleRight), Rect::new(960, 360, 960, 360));
        assert_eq!(cell(Preset::Split1x3Right), Rect::new(1280, 0, 640, 1080));
    }
}

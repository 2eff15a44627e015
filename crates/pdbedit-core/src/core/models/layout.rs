use std::fmt;
use std::ops::Range;
use thiserror::Error;

/// A fixed-width field of an `ATOM` record, in column order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Column {
    LineType,
    Serial,
    AtomType,
    ResidueType,
    MoleculeNumber,
    X,
    Y,
    Z,
    OccupancyTemperature,
    Element,
}

impl Column {
    pub const ALL: [Column; 10] = [
        Column::LineType,
        Column::Serial,
        Column::AtomType,
        Column::ResidueType,
        Column::MoleculeNumber,
        Column::X,
        Column::Y,
        Column::Z,
        Column::OccupancyTemperature,
        Column::Element,
    ];

    fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            Column::LineType => "line type",
            Column::Serial => "atom serial",
            Column::AtomType => "atom type",
            Column::ResidueType => "residue type",
            Column::MoleculeNumber => "molecule number",
            Column::X => "x coordinate",
            Column::Y => "y coordinate",
            Column::Z => "z coordinate",
            Column::OccupancyTemperature => "occupancy/temperature factor",
            Column::Element => "element",
        }
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum LayoutError {
    #[error("Column '{column}' must end after column {previous_end} (got {end})")]
    NotIncreasing {
        column: Column,
        end: usize,
        previous_end: usize,
    },
}

/// Column boundaries of an `ATOM` record, stored as the end offset
/// (exclusive, in characters from the start of the line) of every field.
///
/// Different PDB dialects pad their columns differently, so every boundary
/// can be overridden. Whatever follows the element field is carried through
/// untouched as trailing text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnLayout {
    ends: [usize; 10],
}

impl Default for ColumnLayout {
    fn default() -> Self {
        Self {
            ends: [6, 11, 17, 22, 28, 38, 46, 54, 76, 78],
        }
    }
}

impl ColumnLayout {
    pub fn new(ends: [usize; 10]) -> Result<Self, LayoutError> {
        let mut previous_end = 0;
        for (column, &end) in Column::ALL.iter().zip(ends.iter()) {
            if end <= previous_end {
                return Err(LayoutError::NotIncreasing {
                    column: *column,
                    end,
                    previous_end,
                });
            }
            previous_end = end;
        }
        Ok(Self { ends })
    }

    /// Builds a layout from the defaults, replacing the given field ends.
    pub fn with_overrides(
        overrides: impl IntoIterator<Item = (Column, usize)>,
    ) -> Result<Self, LayoutError> {
        let mut ends = Self::default().ends;
        for (column, end) in overrides {
            ends[column.index()] = end;
        }
        Self::new(ends)
    }

    pub fn end(&self, column: Column) -> usize {
        self.ends[column.index()]
    }

    pub fn start(&self, column: Column) -> usize {
        match column.index() {
            0 => 0,
            i => self.ends[i - 1],
        }
    }

    pub fn span(&self, column: Column) -> Range<usize> {
        self.start(column)..self.end(column)
    }

    pub fn trailing_start(&self) -> usize {
        self.end(Column::Element)
    }
}

use crate::core::io::template::RecordTemplate;
use crate::core::models::atom::AtomRecord;
use crate::core::models::layout::{Column, ColumnLayout};
use std::io::{self, Write};
use std::ops::Range;
use thiserror::Error;

/// Largest serial number that fits the 5-wide decimal serial field.
pub const MAX_DECIMAL_SERIAL: u64 = 99_999;
/// Largest molecule number that fits the 4-wide decimal molecule field.
pub const MAX_DECIMAL_MOLECULE: u64 = 9_999;

const SERIAL_WIDTH: usize = 5;
const MOLECULE_WIDTH: usize = 4;

const HEADER_TAGS: [&str; 2] = ["REMARK", "CRYST1"];
const ATOM_TAG: &str = "ATOM  ";

#[derive(Debug, Error)]
pub enum PdbError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Parse error on line {line}: {kind}")]
    Parse { line: usize, kind: PdbParseErrorKind },
}

impl PdbError {
    /// Classifies a failed line read; undecodable text is bad input, not an I/O fault.
    pub fn from_read(source: io::Error, line: usize) -> Self {
        if source.kind() == io::ErrorKind::InvalidData {
            PdbError::Parse {
                line,
                kind: PdbParseErrorKind::InvalidEncoding,
            }
        } else {
            PdbError::Io(source)
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PdbParseErrorKind {
    #[error("Invalid integer in {column} columns {columns} (value: '{value}')")]
    InvalidInt {
        column: Column,
        columns: String,
        value: String,
    },
    #[error("Invalid float in {column} columns {columns} (value: '{value}')")]
    InvalidFloat {
        column: Column,
        columns: String,
        value: String,
    },
    #[error("Line is not valid UTF-8 text")]
    InvalidEncoding,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Header,
    Atom,
    Tail,
}

/// Returns the text of the character columns in `range`, clamped to the
/// line. Short lines yield the available (possibly empty) part.
pub fn slice_columns(line: &str, range: Range<usize>) -> &str {
    let byte_offset = |column: usize| {
        line.char_indices()
            .nth(column)
            .map_or(line.len(), |(offset, _)| offset)
    };
    let end = byte_offset(range.end);
    let start = byte_offset(range.start).min(end);
    &line[start..end]
}

pub fn classify(line: &str, layout: &ColumnLayout) -> LineKind {
    let tag = slice_columns(line, layout.span(Column::LineType));
    if HEADER_TAGS.contains(&tag) {
        LineKind::Header
    } else if tag == ATOM_TAG {
        LineKind::Atom
    } else {
        LineKind::Tail
    }
}

/// The raw column text of one `ATOM` line, with numeric fields parsed.
#[derive(Debug, Clone, PartialEq)]
pub struct AtomFields<'a> {
    pub record_type: &'a str,
    pub atom_type: &'a str,
    pub residue_type: &'a str,
    pub molecule: i64,
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub occupancy_temperature: &'a str,
    pub element: &'a str,
    pub trailing: &'a str,
}

impl<'a> AtomFields<'a> {
    /// Slices an `ATOM` line by `layout`. The serial column is not read: the
    /// engine numbers atoms by position.
    pub fn parse(line: &'a str, line_num: usize, layout: &ColumnLayout) -> Result<Self, PdbError> {
        let field = |column: Column| slice_columns(line, layout.span(column));

        let molecule_text = field(Column::MoleculeNumber);
        let molecule = molecule_text.trim().parse().map_err(|_| PdbError::Parse {
            line: line_num,
            kind: PdbParseErrorKind::InvalidInt {
                column: Column::MoleculeNumber,
                columns: column_label(layout, Column::MoleculeNumber),
                value: molecule_text.to_string(),
            },
        })?;

        let coordinate = |column: Column| -> Result<f64, PdbError> {
            let text = field(column);
            text.trim().parse().map_err(|_| PdbError::Parse {
                line: line_num,
                kind: PdbParseErrorKind::InvalidFloat {
                    column,
                    columns: column_label(layout, column),
                    value: text.to_string(),
                },
            })
        };

        Ok(Self {
            record_type: field(Column::LineType),
            atom_type: field(Column::AtomType),
            residue_type: field(Column::ResidueType),
            molecule,
            x: coordinate(Column::X)?,
            y: coordinate(Column::Y)?,
            z: coordinate(Column::Z)?,
            occupancy_temperature: field(Column::OccupancyTemperature),
            element: field(Column::Element),
            trailing: slice_columns(line, layout.trailing_start()..usize::MAX),
        })
    }
}

fn column_label(layout: &ColumnLayout, column: Column) -> String {
    let span = layout.span(column);
    format!("{}-{}", span.start + 1, span.end)
}

/// A rendered numeric field and whether it spills past its column width.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedNumber {
    pub text: String,
    pub overflows: bool,
}

/// Serials up to [`MAX_DECIMAL_SERIAL`] render as 5-wide decimals, larger
/// ones as lowercase hex.
pub fn render_serial(serial: u64) -> RenderedNumber {
    render_number(serial, MAX_DECIMAL_SERIAL, SERIAL_WIDTH)
}

/// Molecule numbers up to [`MAX_DECIMAL_MOLECULE`] render as 4-wide
/// decimals, larger ones as lowercase hex.
pub fn render_molecule(molecule: u64) -> RenderedNumber {
    render_number(molecule, MAX_DECIMAL_MOLECULE, MOLECULE_WIDTH)
}

fn render_number(value: u64, max_decimal: u64, width: usize) -> RenderedNumber {
    if value > max_decimal {
        let text = format!("{:x}", value);
        RenderedNumber {
            overflows: text.len() > width,
            text,
        }
    } else {
        RenderedNumber {
            text: format!("{:>width$}", value, width = width),
            overflows: false,
        }
    }
}

/// A PDB file split into its three output blocks.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PdbDocument {
    pub header: Vec<String>,
    pub atoms: Vec<AtomRecord>,
    pub tail: Vec<String>,
}

impl PdbDocument {
    /// Writes the header block, the atoms rendered through `template`, then the tail block.
    pub fn write_to(&self, template: &RecordTemplate, writer: &mut impl Write) -> io::Result<()> {
        for line in &self.header {
            writeln!(writer, "{}", line)?;
        }
        for atom in &self.atoms {
            writeln!(writer, "{}", template.render_atom(atom))?;
        }
        for line in &self.tail {
            writeln!(writer, "{}", line)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Point3;

    const WATER_O: &str =
        "ATOM   1234  OH2 TIP3W 401      12.345  -6.789   0.125  1.00  0.00      WT1  O";

    #[test]
    fn classify_uses_line_type_column() {
        let layout = ColumnLayout::default();
        assert_eq!(classify("REMARK generated", &layout), LineKind::Header);
        assert_eq!(classify("CRYST1   10.0", &layout), LineKind::Header);
        assert_eq!(classify(WATER_O, &layout), LineKind::Atom);
        assert_eq!(classify("HETATM    1  C1", &layout), LineKind::Tail);
        assert_eq!(classify("END", &layout), LineKind::Tail);
        assert_eq!(classify("ATOM", &layout), LineKind::Tail);
    }

    #[test]
    fn slice_columns_clamps_short_lines() {
        assert_eq!(slice_columns("ATOM", 0..6), "ATOM");
        assert_eq!(slice_columns("ATOM", 6..11), "");
        assert_eq!(slice_columns("ATOM  12345", 6..11), "12345");
    }

    #[test]
    fn multibyte_text_does_not_shift_later_columns() {
        let line = WATER_O.replace("WT1 ", "PRÅ ");
        let fields = AtomFields::parse(&line, 1, &ColumnLayout::default()).unwrap();
        assert_eq!(fields.occupancy_temperature, "  1.00  0.00      PRÅ ");
        assert_eq!(fields.element, " O");
        assert_eq!(fields.trailing, "");
    }

    #[test]
    fn undecodable_read_is_a_parse_error() {
        let err = io::Error::new(io::ErrorKind::InvalidData, "stream did not contain valid UTF-8");
        assert!(matches!(
            PdbError::from_read(err, 4),
            PdbError::Parse {
                line: 4,
                kind: PdbParseErrorKind::InvalidEncoding
            }
        ));
        let err = io::Error::new(io::ErrorKind::UnexpectedEof, "eof");
        assert!(matches!(PdbError::from_read(err, 4), PdbError::Io(_)));
    }

    #[test]
    fn parse_splits_fields_by_layout() {
        let fields = AtomFields::parse(WATER_O, 3, &ColumnLayout::default()).unwrap();
        assert_eq!(fields.record_type, "ATOM  ");
        assert_eq!(fields.atom_type, "  OH2 ");
        assert_eq!(fields.residue_type, "TIP3W");
        assert_eq!(fields.molecule, 401);
        assert_eq!(fields.x, 12.345);
        assert_eq!(fields.y, -6.789);
        assert_eq!(fields.z, 0.125);
        assert_eq!(fields.occupancy_temperature, "  1.00  0.00      WT1 ");
        assert_eq!(fields.element, " O");
        assert_eq!(fields.trailing, "");
    }

    #[test]
    fn parse_reports_bad_coordinate_with_line_and_columns() {
        let line = WATER_O.replace("12.345", "12.3x5");
        let err = AtomFields::parse(&line, 9, &ColumnLayout::default()).unwrap_err();
        match err {
            PdbError::Parse { line, kind } => {
                assert_eq!(line, 9);
                assert_eq!(
                    kind,
                    PdbParseErrorKind::InvalidFloat {
                        column: Column::X,
                        columns: "29-38".to_string(),
                        value: "    12.3x5".to_string(),
                    }
                );
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn parse_reports_bad_molecule_number() {
        let line = WATER_O.replace(" 401  ", " 4o1  ");
        let err = AtomFields::parse(&line, 1, &ColumnLayout::default()).unwrap_err();
        assert!(matches!(
            err,
            PdbError::Parse {
                kind: PdbParseErrorKind::InvalidInt { .. },
                ..
            }
        ));
    }

    #[test]
    fn serial_switches_to_hex_above_five_digits() {
        assert_eq!(render_serial(7).text, "    7");
        assert_eq!(
            render_serial(99_999),
            RenderedNumber {
                text: "99999".to_string(),
                overflows: false
            }
        );
        assert_eq!(
            render_serial(100_000),
            RenderedNumber {
                text: "186a0".to_string(),
                overflows: false
            }
        );
        assert_eq!(render_serial(0xfffff).text, "fffff");
        assert!(!render_serial(0xfffff).overflows);
        assert_eq!(render_serial(0x100000).text, "100000");
        assert!(render_serial(0x100000).overflows);
    }

    #[test]
    fn molecule_switches_to_hex_above_four_digits() {
        assert_eq!(render_molecule(9_999).text, "9999");
        assert_eq!(render_molecule(10_000).text, "2710");
        assert!(!render_molecule(0xffff).overflows);
        assert!(render_molecule(0x10000).overflows);
    }

    #[test]
    fn document_writes_blocks_in_order() {
        let atom = AtomRecord {
            record_type: "ATOM  ".to_string(),
            position: 1,
            serial: 1,
            serial_text: "    1".to_string(),
            atom_type: "  N   ".to_string(),
            residue_type: "ALA A".to_string(),
            molecule: 1,
            molecule_text: "1".to_string(),
            coords: Point3::new(1.0, 2.0, 3.0),
            occupancy_temperature: "  1.00  0.00      PRO ".to_string(),
            element: " N".to_string(),
            trailing: String::new(),
        };
        let doc = PdbDocument {
            header: vec!["REMARK test".to_string()],
            atoms: vec![atom],
            tail: vec!["END".to_string()],
        };
        let mut out = Vec::new();
        doc.write_to(&RecordTemplate::default(), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(
            text,
            "REMARK test\n\
             ATOM      1  N   ALA A   1       1.000   2.000   3.000  1.00  0.00      PRO  N\n\
             END\n"
        );
    }
}

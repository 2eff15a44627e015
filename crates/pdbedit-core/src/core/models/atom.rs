use nalgebra::Point3;

/// A fully resolved `ATOM` record, ready to be rendered through a record template.
///
/// The opaque columns (`record_type`, `atom_type`, `residue_type`,
/// `occupancy_temperature`, `element`, `trailing`) keep their raw, unstripped
/// text so that an unmodified record is reproduced column for column.
#[derive(Debug, Clone, PartialEq)]
pub struct AtomRecord {
    pub record_type: String,
    /// 1-based positional index of the record in the source file.
    pub position: usize,
    pub serial: u64,
    pub serial_text: String,
    pub atom_type: String,
    pub residue_type: String,
    pub molecule: i64,
    pub molecule_text: String,
    pub coords: Point3<f64>,
    pub occupancy_temperature: String,
    pub element: String,
    pub trailing: String,
}

impl AtomRecord {
    /// The atom-type label without its column padding.
    pub fn label(&self) -> &str {
        self.atom_type.trim()
    }
}

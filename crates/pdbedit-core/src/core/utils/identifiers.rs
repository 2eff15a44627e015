use phf::{Set, phf_set};

pub const ALPHA_CARBON: &str = "CA";
pub const BETA_CARBON: &str = "CB";

/// Expected atom labels of a water molecule, in file order.
pub const WATER_LABELS: [&str; 3] = ["OH2", "H1", "H2"];

// Backbone, terminal-patch and capping atoms that stay in the MM region.
static QMMM_EXCLUDED_LABELS: Set<&'static str> = phf_set! {
    "C", "O", "N", "HN", "HA",
    "NT", "HNT", "CAT", "HT1", "HT2", "HT3",
    "CAY", "HY1", "HY2", "HY3", "CY", "OY",
};

pub fn is_qmmm_excluded(label: &str) -> bool {
    QMMM_EXCLUDED_LABELS.contains(label.trim())
}

pub fn is_alpha_carbon(label: &str) -> bool {
    label.trim() == ALPHA_CARBON
}

pub fn is_beta_carbon(label: &str) -> bool {
    label.trim() == BETA_CARBON
}

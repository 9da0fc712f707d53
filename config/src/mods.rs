use serde::{Deserialize, Serialize};

use crate::{EMBRYONAL_SUMMARY, EPENDYMOMA_SUMMARY};

// ependymoma fusions of interest
pub const EPENDYMOMA_FUSIONS: [&str; 8] = [
    "C11orf95--MAML2",
    "C11orf95--RELA",
    "C11orf95--YAP1",
    "LTBP3--RELA",
    "PTEN--TAS2R1",
    "YAP1--FAM118B",
    "YAP1--MAMLD1",
    "YAP1--MAMLD2",
];
pub const EPENDYMOMA_GENES: [&str; 1] = ["RELA"];

// embryonal fusions of interest
pub const EMBRYONAL_FUSIONS: [&str; 3] = ["CIC--NUTM1", "MN1--BEND2", "MN1--CXXC5"];
pub const EMBRYONAL_GENES: [&str; 3] = ["FOXR2", "MN1", "TTYH1"];

/// tumor subtypes with a fixed fusion-of-interest panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Subtype {
    Ependymoma,
    Embryonal,
}

impl Subtype {
    pub const ALL: [Subtype; 2] = [Subtype::Ependymoma, Subtype::Embryonal];

    /// exact fusion names matched for this subtype
    pub fn fusions(&self) -> &'static [&'static str] {
        match self {
            Subtype::Ependymoma => &EPENDYMOMA_FUSIONS,
            Subtype::Embryonal => &EMBRYONAL_FUSIONS,
        }
    }

    /// gene names matched against any of the four gene fields
    pub fn genes(&self) -> &'static [&'static str] {
        match self {
            Subtype::Ependymoma => &EPENDYMOMA_GENES,
            Subtype::Embryonal => &EMBRYONAL_GENES,
        }
    }

    /// closed list of columns that must be present in the summary,
    /// observed or not. Adding a fusion of interest means adding it here.
    pub fn expected_columns(&self) -> &'static [&'static str] {
        self.fusions()
    }

    pub fn output_name(&self) -> &'static str {
        match self {
            Subtype::Ependymoma => EPENDYMOMA_SUMMARY,
            Subtype::Embryonal => EMBRYONAL_SUMMARY,
        }
    }
}

impl std::fmt::Display for Subtype {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Subtype::Ependymoma => write!(f, "ependymoma"),
            Subtype::Embryonal => write!(f, "embryonal"),
        }
    }
}

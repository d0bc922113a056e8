use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Domain warnings raised while assembling returns. They never stop a
/// calculation; they are shown alongside the figures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "type")]
pub enum Warning {
    /// A cross-border tag could not be matched to a known treatment and the
    /// conservative standard-rated fallback was used.
    UnresolvedCrossBorder { description: String },
    /// The vehicle acquisition date could not be read, so the asset was
    /// treated as acquired in the tax year under review.
    UnparseableAcquisitionDate { reg: String, value: String },
    /// The vehicle is past the capital allowance horizon; no allowance is
    /// claimed this year.
    VehicleAllowancesExhausted { reg: String },
    /// The vehicle was acquired after the tax year under review.
    VehicleNotYetAcquired { reg: String },
}

impl std::fmt::Display for Warning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Warning::UnresolvedCrossBorder { description } => write!(
                f,
                "cross-border treatment for '{description}' could not be determined; standard rate assumed"
            ),
            Warning::UnparseableAcquisitionDate { reg, value } => write!(
                f,
                "vehicle {reg}: acquisition date '{value}' not recognised, tax year used instead"
            ),
            Warning::VehicleAllowancesExhausted { reg } => {
                write!(f, "vehicle {reg}: capital allowances fully claimed")
            }
            Warning::VehicleNotYetAcquired { reg } => {
                write!(f, "vehicle {reg}: acquired after this tax year")
            }
        }
    }
}

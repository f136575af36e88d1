use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier wrapper for residences held by the registry.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ResidenceId(pub String);

/// Opaque student identifier as issued by the school (e.g. `S1001`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct StudentId(pub String);

/// Identifier wrapper for maintenance requests.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RequestId(pub String);

impl fmt::Display for ResidenceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for StudentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

pub const DORM_RATE_PER_SQ_FT: u64 = 10;
pub const APARTMENT_RATE_PER_BEDROOM: u64 = 300;

/// Monthly rent rates in whole dollars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RentSchedule {
    pub dorm_rate_per_sq_ft: u64,
    pub apartment_rate_per_bedroom: u64,
}

impl Default for RentSchedule {
    fn default() -> Self {
        Self {
            dorm_rate_per_sq_ft: DORM_RATE_PER_SQ_FT,
            apartment_rate_per_bedroom: APARTMENT_RATE_PER_BEDROOM,
        }
    }
}

/// What happens to a student's current residence when they are assigned a new one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReassignPolicy {
    /// The previous residence is marked vacant before the new one is occupied.
    #[default]
    VacatePrevious,
    /// The previous residence keeps its occupied flag.
    KeepPrevious,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HousingPolicy {
    pub auto_advance_on_assign: bool,
    pub reassignment: ReassignPolicy,
    pub rent: RentSchedule,
}

impl Default for HousingPolicy {
    fn default() -> Self {
        Self {
            auto_advance_on_assign: true,
            reassignment: ReassignPolicy::default(),
            rent: RentSchedule::default(),
        }
    }
}

/// Rejections raised by housing records. A rejected call leaves state unchanged.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HousingError {
    #[error("invalid {field}: {reason}")]
    InvalidArgument { field: &'static str, reason: String },
    #[error("request cannot move from '{from}' to '{to}'")]
    InvalidStatusTransition { from: String, to: String },
    #[error("student {0} has no assigned residence")]
    UnassignedResidence(StudentId),
    #[error("residence {residence} is already occupied by student {occupant}")]
    ResidenceOccupied {
        residence: ResidenceId,
        occupant: StudentId,
    },
    #[error("student {0} is already enrolled")]
    StudentExists(StudentId),
    #[error("residence {0} not found")]
    ResidenceNotFound(ResidenceId),
    #[error("student {0} not found")]
    StudentNotFound(StudentId),
    #[error("maintenance request {0} not found")]
    RequestNotFound(RequestId),
}

pub(crate) fn require_text(
    field: &'static str,
    value: impl Into<String>,
) -> Result<String, HousingError> {
    let value = value.into();
    if value.trim().is_empty() {
        return Err(HousingError::InvalidArgument {
            field,
            reason: "must not be empty".to_string(),
        });
    }
    Ok(value)
}

pub(crate) fn require_positive(field: &'static str, value: i64) -> Result<u32, HousingError> {
    if value <= 0 {
        return Err(HousingError::InvalidArgument {
            field,
            reason: format!("must be positive (got {value})"),
        });
    }
    u32::try_from(value).map_err(|_| HousingError::InvalidArgument {
        field,
        reason: format!("must not exceed {} (got {value})", u32::MAX),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_text_is_rejected() {
        assert_eq!(require_text("name", "Dorm A").as_deref(), Ok("Dorm A"));
        match require_text("name", "   ") {
            Err(HousingError::InvalidArgument { field, .. }) => assert_eq!(field, "name"),
            other => panic!("expected invalid argument, got {other:?}"),
        }
    }

    #[test]
    fn non_positive_counts_are_rejected() {
        assert_eq!(require_positive("size", 200), Ok(200));
        assert!(require_positive("size", 0).is_err());
        let err = require_positive("size", -5).expect_err("negative size");
        assert_eq!(err.to_string(), "invalid size: must be positive (got -5)");
        assert!(require_positive("size", i64::from(u32::MAX) + 1).is_err());
    }
}

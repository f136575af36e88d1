use serde::{Deserialize, Serialize};

use super::domain::{
    require_positive, require_text, HousingError, RentSchedule, ResidenceId,
    APARTMENT_RATE_PER_BEDROOM, DORM_RATE_PER_SQ_FT,
};

/// Residence variants and the figure their rent is computed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ResidenceKind {
    DormRoom { size_sq_ft: u32 },
    Apartment { bedrooms: u32 },
}

impl ResidenceKind {
    pub const fn label(self) -> &'static str {
        match self {
            Self::DormRoom { .. } => "Dorm Room",
            Self::Apartment { .. } => "Apartment",
        }
    }

    pub fn rent_under(self, schedule: &RentSchedule) -> Result<u64, HousingError> {
        let (units, rate) = match self {
            Self::DormRoom { size_sq_ft } => (size_sq_ft, schedule.dorm_rate_per_sq_ft),
            Self::Apartment { bedrooms } => (bedrooms, schedule.apartment_rate_per_bedroom),
        };
        u64::from(units)
            .checked_mul(rate)
            .ok_or_else(|| HousingError::InvalidArgument {
                field: "rent",
                reason: format!("{units} x ${rate} exceeds the representable amount"),
            })
    }
}

/// A dorm room or apartment that at most one student occupies at a time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Residence {
    id: ResidenceId,
    name: String,
    address: String,
    occupied: bool,
    kind: ResidenceKind,
}

impl Residence {
    pub fn dorm_room(
        id: ResidenceId,
        name: impl Into<String>,
        address: impl Into<String>,
        size_sq_ft: i64,
    ) -> Result<Self, HousingError> {
        let size_sq_ft = require_positive("size", size_sq_ft)?;
        Self::new(id, name, address, ResidenceKind::DormRoom { size_sq_ft })
    }

    pub fn apartment(
        id: ResidenceId,
        name: impl Into<String>,
        address: impl Into<String>,
        bedrooms: i64,
    ) -> Result<Self, HousingError> {
        let bedrooms = require_positive("bedroom count", bedrooms)?;
        Self::new(id, name, address, ResidenceKind::Apartment { bedrooms })
    }

    fn new(
        id: ResidenceId,
        name: impl Into<String>,
        address: impl Into<String>,
        kind: ResidenceKind,
    ) -> Result<Self, HousingError> {
        Ok(Self {
            id,
            name: require_text("name", name)?,
            address: require_text("address", address)?,
            occupied: false,
            kind,
        })
    }

    pub fn id(&self) -> &ResidenceId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn is_occupied(&self) -> bool {
        self.occupied
    }

    pub fn kind(&self) -> ResidenceKind {
        self.kind
    }

    /// Monthly rent at the standard rates: $10 per square foot for dorm rooms,
    /// $300 per bedroom for apartments.
    pub fn calculate_rent(&self) -> u64 {
        // A u32 count at the standard rates always fits in u64.
        match self.kind {
            ResidenceKind::DormRoom { size_sq_ft } => {
                u64::from(size_sq_ft) * DORM_RATE_PER_SQ_FT
            }
            ResidenceKind::Apartment { bedrooms } => {
                u64::from(bedrooms) * APARTMENT_RATE_PER_BEDROOM
            }
        }
    }

    pub fn rent_under(&self, schedule: &RentSchedule) -> Result<u64, HousingError> {
        self.kind.rent_under(schedule)
    }

    pub(crate) fn occupy(&mut self) {
        self.occupied = true;
    }

    pub(crate) fn vacate(&mut self) {
        self.occupied = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dorm(size: i64) -> Result<Residence, HousingError> {
        Residence::dorm_room(
            ResidenceId("res-test".to_string()),
            "Dorm A",
            "123 University St",
            size,
        )
    }

    #[test]
    fn new_residences_start_vacant() {
        let dorm = dorm(200).expect("valid dorm");
        let apartment = Residence::apartment(
            ResidenceId("res-apt".to_string()),
            "Apartment B",
            "456 College Ave",
            3,
        )
        .expect("valid apartment");

        assert!(!dorm.is_occupied());
        assert!(!apartment.is_occupied());
        assert_eq!(dorm.kind(), ResidenceKind::DormRoom { size_sq_ft: 200 });
        assert_eq!(apartment.kind().label(), "Apartment");
    }

    #[test]
    fn rent_follows_the_residence_kind() {
        assert_eq!(dorm(200).expect("valid dorm").calculate_rent(), 2000);

        let apartment = Residence::apartment(
            ResidenceId("res-apt".to_string()),
            "Apartment B",
            "456 College Ave",
            3,
        )
        .expect("valid apartment");
        assert_eq!(apartment.calculate_rent(), 900);

        let schedule = RentSchedule {
            dorm_rate_per_sq_ft: 4,
            apartment_rate_per_bedroom: 450,
        };
        assert_eq!(apartment.rent_under(&schedule), Ok(1350));
        assert_eq!(
            apartment.rent_under(&RentSchedule::default()),
            Ok(apartment.calculate_rent())
        );
    }

    #[test]
    fn rent_overflow_is_rejected() {
        let dorm = dorm(2).expect("valid dorm");
        let schedule = RentSchedule {
            dorm_rate_per_sq_ft: u64::MAX,
            apartment_rate_per_bedroom: 300,
        };

        match dorm.rent_under(&schedule) {
            Err(HousingError::InvalidArgument { field, .. }) => assert_eq!(field, "rent"),
            other => panic!("expected rent overflow error, got {other:?}"),
        }
        assert_eq!(
            ResidenceKind::DormRoom {
                size_sq_ft: u32::MAX
            }
            .rent_under(&RentSchedule::default()),
            Ok(u64::from(u32::MAX) * 10)
        );
    }

    #[test]
    fn rejects_non_positive_dimensions() {
        match dorm(-5) {
            Err(HousingError::InvalidArgument { field, .. }) => assert_eq!(field, "size"),
            other => panic!("expected invalid size, got {other:?}"),
        }
        assert!(dorm(0).is_err());
        assert!(Residence::apartment(ResidenceId("res-apt".to_string()), "B", "Ave", 0).is_err());
    }

    #[test]
    fn rejects_blank_name_and_address() {
        let err = Residence::dorm_room(ResidenceId("res-x".to_string()), " ", "Street", 100)
            .expect_err("blank name");
        assert!(err.to_string().contains("name"));

        let err = Residence::apartment(ResidenceId("res-y".to_string()), "Apt", "", 2)
            .expect_err("blank address");
        assert!(err.to_string().contains("address"));
    }

    #[test]
    fn serializes_occupancy_and_tagged_kind() {
        let value = serde_json::to_value(dorm(200).expect("valid dorm")).expect("serializes");
        assert_eq!(value["occupied"], false);
        assert_eq!(value["kind"]["type"], "dorm_room");
        assert_eq!(value["kind"]["size_sq_ft"], 200);
    }

    #[test]
    fn occupancy_toggles_through_owned_mutators() {
        let mut dorm = dorm(120).expect("valid dorm");
        dorm.occupy();
        assert!(dorm.is_occupied());
        dorm.vacate();
        assert!(!dorm.is_occupied());
    }
}

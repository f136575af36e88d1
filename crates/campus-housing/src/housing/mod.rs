//! Residence, student, and maintenance request records.
//!
//! Records are owned by [`HousingRegistry`]; students and requests refer to
//! residences and students by identifier, and every change that touches both
//! sides of a link (assignment, vacating) goes through the registry.

pub mod domain;
pub mod maintenance;
pub mod registry;
pub mod residence;
pub mod student;

pub use domain::{
    HousingError, HousingPolicy, ReassignPolicy, RentSchedule, RequestId, ResidenceId, StudentId,
};
pub use maintenance::{MaintenanceRequest, MaintenanceRequestView, RequestStatus};
pub use registry::{Assignment, HousingRegistry};
pub use residence::{Residence, ResidenceKind};
pub use student::Student;

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::{debug, info, warn};

use super::domain::{
    HousingError, HousingPolicy, ReassignPolicy, RequestId, ResidenceId, StudentId,
};
use super::maintenance::{MaintenanceRequest, MaintenanceRequestView, RequestStatus};
use super::residence::Residence;
use super::student::Student;

/// Outcome of a residence assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Assignment {
    pub student: StudentId,
    pub residence: ResidenceId,
    /// Residence the student held before, if it differed from the new one.
    pub previous: Option<ResidenceId>,
    /// Whether `previous` was marked vacant as part of the move.
    pub previous_vacated: bool,
}

/// In-memory owner of every residence, student, and maintenance request.
#[derive(Debug, Default)]
pub struct HousingRegistry {
    policy: HousingPolicy,
    residences: BTreeMap<ResidenceId, Residence>,
    students: BTreeMap<StudentId, Student>,
    requests: BTreeMap<RequestId, MaintenanceRequest>,
    next_residence: u64,
    next_request: u64,
}

impl HousingRegistry {
    pub fn new(policy: HousingPolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    pub fn policy(&self) -> &HousingPolicy {
        &self.policy
    }

    pub fn add_dorm_room(
        &mut self,
        name: impl Into<String>,
        address: impl Into<String>,
        size_sq_ft: i64,
    ) -> Result<ResidenceId, HousingError> {
        let id = self.peek_residence_id();
        let residence = Residence::dorm_room(id, name, address, size_sq_ft)
            .inspect_err(|err| warn!(error = %err, "rejected dorm room"))?;
        Ok(self.insert_residence(residence))
    }

    pub fn add_apartment(
        &mut self,
        name: impl Into<String>,
        address: impl Into<String>,
        bedrooms: i64,
    ) -> Result<ResidenceId, HousingError> {
        let id = self.peek_residence_id();
        let residence = Residence::apartment(id, name, address, bedrooms)
            .inspect_err(|err| warn!(error = %err, "rejected apartment"))?;
        Ok(self.insert_residence(residence))
    }

    pub fn residence(&self, id: &ResidenceId) -> Option<&Residence> {
        self.residences.get(id)
    }

    pub fn residences(&self) -> impl Iterator<Item = &Residence> {
        self.residences.values()
    }

    /// The student whose assignment points at `id`.
    pub fn occupant_of(&self, id: &ResidenceId) -> Option<&Student> {
        self.students
            .values()
            .find(|student| student.residence() == Some(id))
    }

    pub fn enroll_student(
        &mut self,
        name: impl Into<String>,
        student_id: impl Into<String>,
        gender: impl Into<String>,
    ) -> Result<StudentId, HousingError> {
        let student = Student::new(name, student_id, gender)
            .inspect_err(|err| warn!(error = %err, "rejected student"))?;
        let id = student.student_id().clone();
        if self.students.contains_key(&id) {
            warn!(student = %id, "student already enrolled");
            return Err(HousingError::StudentExists(id));
        }

        info!(student = %id, name = student.name(), "enrolled student");
        self.students.insert(id.clone(), student);
        Ok(id)
    }

    /// Enroll a student who already has a residence lined up. The residence
    /// is checked first so a failed assignment leaves nothing enrolled.
    pub fn enroll_student_with_residence(
        &mut self,
        name: impl Into<String>,
        student_id: impl Into<String>,
        gender: impl Into<String>,
        residence: &ResidenceId,
    ) -> Result<StudentId, HousingError> {
        self.ensure_available(residence, None)?;
        let id = self.enroll_student(name, student_id, gender)?;
        self.assign_residence(&id, residence)?;
        Ok(id)
    }

    pub fn student(&self, id: &StudentId) -> Option<&Student> {
        self.students.get(id)
    }

    pub fn students(&self) -> impl Iterator<Item = &Student> {
        self.students.values()
    }

    /// Assign `residence` to `student` and mark it occupied. A residence held
    /// by someone else is rejected; the student's previous residence is
    /// handled according to the registry's [`ReassignPolicy`].
    pub fn assign_residence(
        &mut self,
        student: &StudentId,
        residence: &ResidenceId,
    ) -> Result<Assignment, HousingError> {
        let current = self
            .students
            .get(student)
            .ok_or_else(|| HousingError::StudentNotFound(student.clone()))?
            .residence()
            .cloned();

        if current.as_ref() == Some(residence) {
            debug!(student = %student, residence = %residence, "residence already assigned");
            return Ok(Assignment {
                student: student.clone(),
                residence: residence.clone(),
                previous: None,
                previous_vacated: false,
            });
        }

        self.ensure_available(residence, Some(student))?;

        let previous_vacated = match (&current, self.policy.reassignment) {
            (Some(previous), ReassignPolicy::VacatePrevious) => {
                if let Some(old) = self.residences.get_mut(previous) {
                    old.vacate();
                }
                true
            }
            _ => false,
        };

        if let Some(target) = self.residences.get_mut(residence) {
            target.occupy();
        }
        if let Some(record) = self.students.get_mut(student) {
            record.move_into(residence.clone());
        }

        info!(
            student = %student,
            residence = %residence,
            previous = ?current.as_ref().map(|id| id.0.as_str()),
            previous_vacated,
            "assigned residence"
        );

        Ok(Assignment {
            student: student.clone(),
            residence: residence.clone(),
            previous: current,
            previous_vacated,
        })
    }

    /// Clear the student's residence and mark it vacant, returning its id.
    pub fn vacate_residence(&mut self, student: &StudentId) -> Result<ResidenceId, HousingError> {
        let record = self
            .students
            .get_mut(student)
            .ok_or_else(|| HousingError::StudentNotFound(student.clone()))?;

        let Some(residence) = record.move_out() else {
            warn!(student = %student, "vacate requested without a residence");
            return Err(HousingError::UnassignedResidence(student.clone()));
        };

        if let Some(vacated) = self.residences.get_mut(&residence) {
            vacated.vacate();
        }
        info!(student = %student, residence = %residence, "vacated residence");
        Ok(residence)
    }

    /// Monthly rent owed by a student under the registry's rent schedule.
    pub fn rent_for(&self, student: &StudentId) -> Result<u64, HousingError> {
        let record = self
            .students
            .get(student)
            .ok_or_else(|| HousingError::StudentNotFound(student.clone()))?;
        let residence_id = record
            .residence()
            .ok_or_else(|| HousingError::UnassignedResidence(student.clone()))?;
        let residence = self
            .residences
            .get(residence_id)
            .ok_or_else(|| HousingError::ResidenceNotFound(residence_id.clone()))?;
        residence.rent_under(&self.policy.rent)
    }

    pub fn submit_request(
        &mut self,
        description: impl Into<String>,
        student: &StudentId,
    ) -> Result<RequestId, HousingError> {
        let record = self
            .students
            .get(student)
            .ok_or_else(|| HousingError::StudentNotFound(student.clone()))?;
        let id = RequestId(format!("req-{:06}", self.next_request + 1));
        let request = MaintenanceRequest::new(id.clone(), description, record)
            .inspect_err(|err| warn!(error = %err, "rejected maintenance request"))?;

        self.next_request += 1;
        info!(request = %id, student = %student, "submitted maintenance request");
        self.requests.insert(id.clone(), request);
        Ok(id)
    }

    pub fn assign_employee(
        &mut self,
        request: &RequestId,
        employee: impl Into<String>,
    ) -> Result<RequestStatus, HousingError> {
        let auto_advance = self.policy.auto_advance_on_assign;
        let record = self.request_mut(request)?;
        let employee = employee.into();
        record
            .assign_employee(employee.as_str(), auto_advance)
            .inspect_err(|err| warn!(request = %request, error = %err, "rejected assignment"))?;

        info!(
            request = %request,
            employee = %employee,
            status = %record.status(),
            "assigned employee"
        );
        Ok(record.status())
    }

    pub fn update_request_status(
        &mut self,
        request: &RequestId,
        status: RequestStatus,
    ) -> Result<(), HousingError> {
        let record = self.request_mut(request)?;
        let from = record.status();
        record
            .update_status(status)
            .inspect_err(|err| warn!(request = %request, error = %err, "rejected status change"))?;
        debug!(request = %request, %from, to = %status, "request status updated");
        Ok(())
    }

    pub fn update_request_status_label(
        &mut self,
        request: &RequestId,
        raw: &str,
    ) -> Result<(), HousingError> {
        let record = self.request_mut(request)?;
        let from = record.status();
        record
            .update_status_label(raw)
            .inspect_err(|err| warn!(request = %request, error = %err, "rejected status change"))?;
        debug!(request = %request, %from, to = %record.status(), "request status updated");
        Ok(())
    }

    pub fn complete_request(&mut self, request: &RequestId) -> Result<(), HousingError> {
        let record = self.request_mut(request)?;
        record.complete_request();
        info!(request = %request, "completed maintenance request");
        Ok(())
    }

    pub fn request(&self, id: &RequestId) -> Option<&MaintenanceRequest> {
        self.requests.get(id)
    }

    pub fn requests(&self) -> impl Iterator<Item = &MaintenanceRequest> {
        self.requests.values()
    }

    pub fn requests_for<'a>(
        &'a self,
        student: &'a StudentId,
    ) -> impl Iterator<Item = &'a MaintenanceRequest> + 'a {
        self.requests
            .values()
            .filter(move |request| request.student() == student)
    }

    pub fn request_view(&self, id: &RequestId) -> Result<MaintenanceRequestView, HousingError> {
        let request = self
            .requests
            .get(id)
            .ok_or_else(|| HousingError::RequestNotFound(id.clone()))?;
        let student = self
            .students
            .get(request.student())
            .ok_or_else(|| HousingError::StudentNotFound(request.student().clone()))?;
        Ok(request.view(student))
    }

    fn request_mut(&mut self, id: &RequestId) -> Result<&mut MaintenanceRequest, HousingError> {
        self.requests
            .get_mut(id)
            .ok_or_else(|| HousingError::RequestNotFound(id.clone()))
    }

    fn peek_residence_id(&self) -> ResidenceId {
        ResidenceId(format!("res-{:06}", self.next_residence + 1))
    }

    fn insert_residence(&mut self, residence: Residence) -> ResidenceId {
        self.next_residence += 1;
        let id = residence.id().clone();
        info!(
            residence = %id,
            name = residence.name(),
            kind = residence.kind().label(),
            "registered residence"
        );
        self.residences.insert(id.clone(), residence);
        id
    }

    /// The residence exists and is not held by anyone other than `claimant`.
    fn ensure_available(
        &self,
        residence: &ResidenceId,
        claimant: Option<&StudentId>,
    ) -> Result<(), HousingError> {
        if !self.residences.contains_key(residence) {
            return Err(HousingError::ResidenceNotFound(residence.clone()));
        }

        match self.occupant_of(residence) {
            Some(occupant) if Some(occupant.student_id()) != claimant => {
                warn!(
                    residence = %residence,
                    occupant = %occupant.student_id(),
                    "residence occupied"
                );
                Err(HousingError::ResidenceOccupied {
                    residence: residence.clone(),
                    occupant: occupant.student_id().clone(),
                })
            }
            _ => Ok(()),
        }
    }
}

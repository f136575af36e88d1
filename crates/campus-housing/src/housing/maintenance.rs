use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::domain::{require_text, HousingError, RequestId, StudentId};
use super::student::Student;

/// Lifecycle of a maintenance request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestStatus {
    Submitted,
    InProgress,
    Completed,
}

impl RequestStatus {
    pub const fn ordered() -> [Self; 3] {
        [Self::Submitted, Self::InProgress, Self::Completed]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Submitted => "submitted",
            Self::InProgress => "in progress",
            Self::Completed => "completed",
        }
    }

    /// Requests only move forward; staying put is always allowed.
    pub const fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Submitted, _)
                | (Self::InProgress, Self::InProgress | Self::Completed)
                | (Self::Completed, Self::Completed)
        )
    }
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for RequestStatus {
    type Err = HousingError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let normalized = raw.trim().to_ascii_lowercase().replace(['_', '-'], " ");
        Self::ordered()
            .into_iter()
            .find(|status| status.label() == normalized)
            .ok_or_else(|| HousingError::InvalidStatusTransition {
                from: "unknown".to_string(),
                to: raw.to_string(),
            })
    }
}

/// A ticket raised by a student and worked by an employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MaintenanceRequest {
    id: RequestId,
    description: String,
    status: RequestStatus,
    student: StudentId,
    assigned_employee: Option<String>,
}

impl MaintenanceRequest {
    pub fn new(
        id: RequestId,
        description: impl Into<String>,
        student: &Student,
    ) -> Result<Self, HousingError> {
        Ok(Self {
            id,
            description: require_text("description", description)?,
            status: RequestStatus::Submitted,
            student: student.student_id().clone(),
            assigned_employee: None,
        })
    }

    pub fn id(&self) -> &RequestId {
        &self.id
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn status(&self) -> RequestStatus {
        self.status
    }

    pub fn student(&self) -> &StudentId {
        &self.student
    }

    pub fn assigned_employee(&self) -> Option<&str> {
        self.assigned_employee.as_deref()
    }

    /// Hand the request to an employee. With `auto_advance`, a submitted
    /// request moves to in progress at the same time.
    pub fn assign_employee(
        &mut self,
        employee: impl Into<String>,
        auto_advance: bool,
    ) -> Result<(), HousingError> {
        let employee = require_text("employee", employee)?;
        if self.status == RequestStatus::Completed {
            return Err(self.rejected(RequestStatus::InProgress));
        }

        self.assigned_employee = Some(employee);
        if auto_advance && self.status == RequestStatus::Submitted {
            self.status = RequestStatus::InProgress;
        }
        Ok(())
    }

    pub fn update_status(&mut self, next: RequestStatus) -> Result<(), HousingError> {
        if !self.status.can_transition_to(next) {
            return Err(self.rejected(next));
        }
        self.status = next;
        Ok(())
    }

    /// Parse a status label such as `"in progress"` and apply it.
    pub fn update_status_label(&mut self, raw: &str) -> Result<(), HousingError> {
        let next = raw
            .parse::<RequestStatus>()
            .map_err(|_| HousingError::InvalidStatusTransition {
                from: self.status.label().to_string(),
                to: raw.to_string(),
            })?;
        self.update_status(next)
    }

    pub fn complete_request(&mut self) {
        self.status = RequestStatus::Completed;
    }

    pub fn view(&self, student: &Student) -> MaintenanceRequestView {
        MaintenanceRequestView {
            request_id: self.id.clone(),
            description: self.description.clone(),
            status: self.status.label(),
            student_name: student.name().to_string(),
            student_id: self.student.clone(),
            assigned_employee: self.assigned_employee.clone(),
        }
    }

    fn rejected(&self, next: RequestStatus) -> HousingError {
        HousingError::InvalidStatusTransition {
            from: self.status.label().to_string(),
            to: next.label().to_string(),
        }
    }
}

/// Flattened request snapshot for printing and export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MaintenanceRequestView {
    pub request_id: RequestId,
    pub description: String,
    pub status: &'static str,
    pub student_name: String,
    pub student_id: StudentId,
    pub assigned_employee: Option<String>,
}

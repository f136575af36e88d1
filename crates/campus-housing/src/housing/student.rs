use serde::Serialize;

use super::domain::{require_text, HousingError, ResidenceId, StudentId};

/// A student and the residence they are currently assigned to, if any.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Student {
    name: String,
    student_id: StudentId,
    gender: String,
    residence: Option<ResidenceId>,
}

impl Student {
    pub fn new(
        name: impl Into<String>,
        student_id: impl Into<String>,
        gender: impl Into<String>,
    ) -> Result<Self, HousingError> {
        Ok(Self {
            name: require_text("student name", name)?,
            student_id: StudentId(require_text("student id", student_id)?),
            gender: gender.into(),
            residence: None,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn student_id(&self) -> &StudentId {
        &self.student_id
    }

    pub fn gender(&self) -> &str {
        &self.gender
    }

    pub fn residence(&self) -> Option<&ResidenceId> {
        self.residence.as_ref()
    }

    /// Point at a new residence, returning the one previously held.
    pub(crate) fn move_into(&mut self, residence: ResidenceId) -> Option<ResidenceId> {
        self.residence.replace(residence)
    }

    pub(crate) fn move_out(&mut self) -> Option<ResidenceId> {
        self.residence.take()
    }
}

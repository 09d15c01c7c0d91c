//! Elective selection for students.
//!
//! The offered pairs depend on the student's curriculum year and the current
//! semester. Both are derived on every request so that a page render and the
//! following submission agree on the same pairs.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Datelike;
use mockable::Clock;
use tracing::info;

use super::academic_calendar::{admission_year_from_group, course_year_from_group, semester_for};
use super::ports::{
    DirectionRepository, ElectiveCourseRepository, ElectiveSelectionCommand, EnrollmentRepository,
    EnrollmentSettingsRepository, UserRepository,
};
use super::{
    CoursePair, Direction, ElectiveCourse, ElectiveCourseId, Error, ErrorCode, User, pair_courses,
};

/// Submitted choice per zero-based pair index, as raw form values.
pub type PairChoices = BTreeMap<usize, String>;

/// Why a selection request could not be served.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SelectionError {
    #[error("elective selection is available to students only")]
    NotStudent,
    #[error("no curriculum found for your direction and admission year")]
    NoCurriculum,
    #[error("please choose a course in pair {pair_number}")]
    MissingChoice { pair_number: usize },
    #[error("the course chosen in pair {pair_number} is not offered in that pair")]
    InvalidChoice { pair_number: usize },
    #[error("enrollment is closed, the choice cannot be cancelled")]
    EnrollmentClosed,
    #[error(transparent)]
    Storage(#[from] Error),
}

impl SelectionError {
    /// Error category used when the failure has to be rendered.
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::NotStudent => ErrorCode::Forbidden,
            Self::EnrollmentClosed => ErrorCode::Conflict,
            Self::Storage(error) => error.code(),
            _ => ErrorCode::InvalidRequest,
        }
    }
}

/// Everything the selection page shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionPage {
    pub direction: Direction,
    pub admission_year: Option<i32>,
    pub course_year: u32,
    pub semester: i32,
    pub pairs: Vec<CoursePair>,
    pub chosen: Vec<ElectiveCourse>,
    pub enrollment_open: bool,
}

impl SelectionPage {
    /// Whether the student already holds any choice.
    pub fn has_choices(&self) -> bool {
        !self.chosen.is_empty()
    }

    /// Whether `course` is among the current choices.
    pub fn is_chosen(&self, course: ElectiveCourseId) -> bool {
        self.chosen.iter().any(|c| c.id == course)
    }
}

struct Curriculum {
    direction: Direction,
    admission_year: Option<i32>,
    course_year: u32,
    semester: i32,
    pairs: Vec<CoursePair>,
}

/// Default [`ElectiveSelectionCommand`] implementation.
#[derive(Clone)]
pub struct ElectiveSelectionService {
    users: Arc<dyn UserRepository>,
    directions: Arc<dyn DirectionRepository>,
    courses: Arc<dyn ElectiveCourseRepository>,
    enrollments: Arc<dyn EnrollmentRepository>,
    settings: Arc<dyn EnrollmentSettingsRepository>,
    clock: Arc<dyn Clock>,
}

impl ElectiveSelectionService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        directions: Arc<dyn DirectionRepository>,
        courses: Arc<dyn ElectiveCourseRepository>,
        enrollments: Arc<dyn EnrollmentRepository>,
        settings: Arc<dyn EnrollmentSettingsRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            users,
            directions,
            courses,
            enrollments,
            settings,
            clock,
        }
    }

    /// Admission year from the profile, else inferred from the group label.
    ///
    /// A year read from a well-formed group label is written back; a
    /// malformed label falls back to the current year without persisting.
    async fn admission_year(&self, student: &User, current_year: i32) -> Result<Option<i32>, Error> {
        if let Some(year) = student.admission_year() {
            return Ok(Some(year));
        }
        let Some(group) = student.group_number() else {
            return Ok(None);
        };
        match admission_year_from_group(group) {
            Some(year) => {
                self.users.set_admission_year(student.id(), year).await?;
                info!(user_id = %student.id(), year, "admission year inferred from group");
                Ok(Some(year))
            }
            None => Ok(Some(current_year)),
        }
    }

    /// Direction record matching the student's code and admission year,
    /// falling back to the stored one.
    async fn direction(
        &self,
        student: &User,
        admission_year: Option<i32>,
    ) -> Result<Direction, SelectionError> {
        let Some(direction_id) = student.direction_id() else {
            return Err(SelectionError::NoCurriculum);
        };
        let stored = self
            .directions
            .find_by_id(direction_id)
            .await
            .map_err(Error::from)?
            .ok_or(SelectionError::NoCurriculum)?;
        let Some(year) = admission_year else {
            return Ok(stored);
        };
        let versioned = self
            .directions
            .find_by_code_and_year(&stored.code, year)
            .await
            .map_err(Error::from)?;
        Ok(versioned.unwrap_or(stored))
    }

    async fn curriculum(&self, student: &User) -> Result<Curriculum, SelectionError> {
        if !student.is_student() {
            return Err(SelectionError::NotStudent);
        }
        let today = self.clock.local().date_naive();
        let admission_year = self.admission_year(student, today.year()).await?;
        let direction = self.direction(student, admission_year).await?;
        let course_year = course_year_from_group(student.group_number());
        let semester = semester_for(course_year, today.month());
        let courses = self
            .courses
            .list_for_semester(direction.id, semester)
            .await
            .map_err(Error::from)?;

        Ok(Curriculum {
            direction,
            admission_year,
            course_year,
            semester,
            pairs: pair_courses(courses),
        })
    }
}

/// Pick one course per pair from the submitted values.
fn resolve_choices(
    pairs: &[CoursePair],
    choices: &PairChoices,
) -> Result<Vec<ElectiveCourseId>, SelectionError> {
    pairs
        .iter()
        .map(|pair| {
            let raw = choices
                .get(&pair.index())
                .map(|value| value.trim())
                .filter(|value| !value.is_empty())
                .ok_or(SelectionError::MissingChoice {
                    pair_number: pair.number(),
                })?;
            raw.parse::<i32>()
                .ok()
                .map(ElectiveCourseId::new)
                .filter(|id| pair.contains(*id))
                .ok_or(SelectionError::InvalidChoice {
                    pair_number: pair.number(),
                })
        })
        .collect()
}

#[async_trait]
impl ElectiveSelectionCommand for ElectiveSelectionService {
    async fn selection_page(&self, student: &User) -> Result<SelectionPage, SelectionError> {
        let curriculum = self.curriculum(student).await?;
        let chosen = self
            .courses
            .list_chosen_by(student.id())
            .await
            .map_err(Error::from)?;
        let enrollment_open = self
            .settings
            .is_enrollment_open()
            .await
            .map_err(Error::from)?;

        Ok(SelectionPage {
            direction: curriculum.direction,
            admission_year: curriculum.admission_year,
            course_year: curriculum.course_year,
            semester: curriculum.semester,
            pairs: curriculum.pairs,
            chosen,
            enrollment_open,
        })
    }

    async fn submit(&self, student: &User, choices: &PairChoices) -> Result<usize, SelectionError> {
        let curriculum = self.curriculum(student).await?;
        let selected = resolve_choices(&curriculum.pairs, choices)?;
        self.enrollments
            .replace_for_student(student.id(), &selected)
            .await
            .map_err(Error::from)?;
        info!(
            user_id = %student.id(),
            semester = curriculum.semester,
            courses = selected.len(),
            "elective choices saved"
        );
        Ok(selected.len())
    }

    async fn cancel(&self, student: &User) -> Result<usize, SelectionError> {
        if !student.is_student() {
            return Err(SelectionError::NotStudent);
        }
        let open = self
            .settings
            .is_enrollment_open()
            .await
            .map_err(Error::from)?;
        if !open {
            return Err(SelectionError::EnrollmentClosed);
        }
        let removed = self
            .enrollments
            .delete_for_student(student.id())
            .await
            .map_err(Error::from)?;
        info!(user_id = %student.id(), removed, "elective choices cancelled");
        Ok(removed)
    }
}

#[cfg(test)]
mod tests;

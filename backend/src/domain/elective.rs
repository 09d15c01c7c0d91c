//! Elective courses and the pairs students choose between.

use std::fmt;

use super::direction::DirectionId;

/// Courses per pair.
pub const PAIR_SIZE: usize = 2;

/// Database identifier of an elective course.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElectiveCourseId(i32);

impl ElectiveCourseId {
    /// Wrap a raw identifier.
    pub const fn new(id: i32) -> Self {
        Self(id)
    }

    /// Raw identifier.
    pub const fn get(self) -> i32 {
        self.0
    }
}

impl fmt::Display for ElectiveCourseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An optional course belonging to one direction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElectiveCourse {
    pub id: ElectiveCourseId,
    pub name: String,
    pub semester: Option<i32>,
    pub direction_id: DirectionId,
}

/// Mutually exclusive alternatives offered in the same semester.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoursePair {
    index: usize,
    courses: Vec<ElectiveCourse>,
}

impl CoursePair {
    /// Zero-based position among the semester's pairs.
    pub fn index(&self) -> usize {
        self.index
    }

    /// One-based number shown to students.
    pub fn number(&self) -> usize {
        self.index + 1
    }

    /// Form field carrying the choice for this pair.
    pub fn field_name(&self) -> String {
        format!("pair_{}", self.index)
    }

    pub fn courses(&self) -> &[ElectiveCourse] {
        &self.courses
    }

    /// Whether `course` is one of this pair's alternatives.
    pub fn contains(&self, course: ElectiveCourseId) -> bool {
        self.courses.iter().any(|candidate| candidate.id == course)
    }
}

/// Group courses into consecutive pairs, keeping their order. A trailing odd
/// course forms a single-course pair.
///
/// # Examples
/// ```
/// use electives::domain::{pair_courses, DirectionId, ElectiveCourse, ElectiveCourseId};
///
/// let courses: Vec<_> = (1..=3)
///     .map(|id| ElectiveCourse {
///         id: ElectiveCourseId::new(id),
///         name: format!("course {id}"),
///         semester: Some(3),
///         direction_id: DirectionId::new(1),
///     })
///     .collect();
/// let pairs = pair_courses(courses);
/// assert_eq!(pairs.len(), 2);
/// assert_eq!(pairs[1].courses().len(), 1);
/// ```
pub fn pair_courses(courses: Vec<ElectiveCourse>) -> Vec<CoursePair> {
    let mut pairs: Vec<CoursePair> = Vec::with_capacity(courses.len().div_ceil(PAIR_SIZE));
    for course in courses {
        match pairs.last_mut() {
            Some(pair) if pair.courses.len() < PAIR_SIZE => pair.courses.push(course),
            _ => {
                let index = pairs.len();
                pairs.push(CoursePair {
                    index,
                    courses: vec![course],
                });
            }
        }
    }
    pairs
}

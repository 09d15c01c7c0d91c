//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain. Conversions into domain types live next
//! to the rows.

use diesel::prelude::*;
use diesel::sql_types::{Integer, Varchar};

use crate::domain::ports::AssignmentRecord;
use crate::domain::{
    Direction, DirectionId, ElectiveCourse, ElectiveCourseId, NewUser, RoleSet, User, UserId,
};

use super::schema::{direction, elective_course, student_elective_courses, users};

/// Row struct for reading from the direction table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = direction)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct DirectionRow {
    pub id: i32,
    pub code: String,
    pub name: String,
    pub year: Option<i32>,
}

impl From<DirectionRow> for Direction {
    fn from(row: DirectionRow) -> Self {
        Self {
            id: DirectionId::new(row.id),
            code: row.code,
            name: row.name,
            year: row.year,
        }
    }
}

/// Row struct for reading from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: i32,
    pub fio: String,
    pub direction_id: Option<i32>,
    pub group_number: Option<String>,
    pub login: String,
    pub password: String,
    pub role: Option<String>,
    pub admission_year: Option<i32>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User::from_record(
            UserId::new(row.id),
            NewUser {
                login: row.login,
                password_hash: row.password,
                full_name: row.fio,
                roles: RoleSet::from_storage(row.role.as_deref()),
                direction_id: row.direction_id.map(DirectionId::new),
                group_number: row.group_number,
                admission_year: row.admission_year,
            },
        )
    }
}

/// Insertable struct for creating new accounts.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub fio: &'a str,
    pub direction_id: Option<i32>,
    pub group_number: Option<&'a str>,
    pub login: &'a str,
    pub password: &'a str,
    pub role: Option<String>,
    pub admission_year: Option<i32>,
}

impl<'a> From<&'a NewUser> for NewUserRow<'a> {
    fn from(user: &'a NewUser) -> Self {
        Self {
            fio: &user.full_name,
            direction_id: user.direction_id.map(DirectionId::get),
            group_number: user.group_number.as_deref(),
            login: &user.login,
            password: &user.password_hash,
            role: user.roles.to_storage(),
            admission_year: user.admission_year,
        }
    }
}

/// Row struct for reading from the elective_course table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = elective_course)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ElectiveCourseRow {
    pub id: i32,
    pub name: String,
    pub semester: Option<i32>,
    pub direction_id: i32,
}

impl From<ElectiveCourseRow> for ElectiveCourse {
    fn from(row: ElectiveCourseRow) -> Self {
        Self {
            id: ElectiveCourseId::new(row.id),
            name: row.name,
            semester: row.semester,
            direction_id: DirectionId::new(row.direction_id),
        }
    }
}

/// Insertable struct for enrollment rows.
#[derive(Debug, Clone, Copy, Insertable)]
#[diesel(table_name = student_elective_courses)]
pub(crate) struct NewEnrollmentRow {
    pub user_id: i32,
    pub elective_course_id: i32,
}

/// Result row of the raw staff overview query.
#[derive(Debug, Clone, QueryableByName)]
pub(crate) struct AssignmentRow {
    #[diesel(sql_type = Integer)]
    pub user_id: i32,
    #[diesel(sql_type = Varchar)]
    pub fio: String,
    #[diesel(sql_type = Integer)]
    pub course_id: i32,
    #[diesel(sql_type = Varchar)]
    pub course_name: String,
}

impl From<AssignmentRow> for AssignmentRecord {
    fn from(row: AssignmentRow) -> Self {
        Self {
            student_id: UserId::new(row.user_id),
            student_name: row.fio,
            course_id: ElectiveCourseId::new(row.course_id),
            course_name: row.course_name,
        }
    }
}

//! Curriculum resolution and choice handling for [`ElectiveSelectionService`].

use std::sync::Arc;

use rstest::rstest;

use super::*;
use crate::domain::ports::{
    MockDirectionRepository, MockElectiveCourseRepository, MockEnrollmentRepository,
    MockEnrollmentSettingsRepository, MockUserRepository,
};
use crate::domain::roles::{STUDENT, TEACHER};
use crate::domain::{DirectionId, NewUser, RoleSet, UserId};
use crate::test_support::FixedClock;

const CODE: &str = "09.03.01";

fn user(roles: &str, direction: Option<i32>, group: Option<&str>, year: Option<i32>) -> User {
    User::from_record(
        UserId::new(7),
        NewUser {
            login: "sidorov".to_owned(),
            password_hash: "hash".to_owned(),
            full_name: "Сидоров Пётр".to_owned(),
            roles: RoleSet::parse(roles),
            direction_id: direction.map(DirectionId::new),
            group_number: group.map(str::to_owned),
            admission_year: year,
        },
    )
}

fn student(group: &str) -> User {
    user(STUDENT, Some(1), Some(group), None)
}

fn direction(id: i32, year: i32) -> Direction {
    Direction {
        id: DirectionId::new(id),
        code: CODE.to_owned(),
        name: "Informatics".to_owned(),
        year: Some(year),
    }
}

fn course(id: i32, direction: i32) -> ElectiveCourse {
    ElectiveCourse {
        id: ElectiveCourseId::new(id),
        name: format!("Course {id}"),
        semester: Some(6),
        direction_id: DirectionId::new(direction),
    }
}

/// Mocks for a catalog with directions 1 (2023) and 2 (2024).
struct Fixture {
    users: MockUserRepository,
    directions: MockDirectionRepository,
    courses: MockElectiveCourseRepository,
    enrollments: MockEnrollmentRepository,
    settings: MockEnrollmentSettingsRepository,
}

impl Fixture {
    fn new() -> Self {
        let mut directions = MockDirectionRepository::new();
        directions
            .expect_find_by_id()
            .returning(|id| Ok((id.get() == 1).then(|| direction(1, 2023))));
        directions
            .expect_find_by_code_and_year()
            .returning(|code, year| Ok((code == CODE && year == 2024).then(|| direction(2, 2024))));
        let mut courses = MockElectiveCourseRepository::new();
        courses
            .expect_list_for_semester()
            .returning(|direction, _| Ok(vec![course(1, direction.get()), course(2, direction.get()), course(3, direction.get())]));
        courses.expect_list_chosen_by().returning(|_| Ok(Vec::new()));
        let mut users = MockUserRepository::new();
        users.expect_set_admission_year().returning(|_, _| Ok(()));
        Self {
            users,
            directions,
            courses,
            enrollments: MockEnrollmentRepository::new(),
            settings: MockEnrollmentSettingsRepository::new(),
        }
    }

    fn enrollment_open(mut self, open: bool) -> Self {
        self.settings
            .expect_is_enrollment_open()
            .returning(move || Ok(open));
        self
    }

    fn build(self) -> ElectiveSelectionService {
        ElectiveSelectionService::new(
            Arc::new(self.users),
            Arc::new(self.directions),
            Arc::new(self.courses),
            Arc::new(self.enrollments),
            Arc::new(self.settings),
            Arc::new(FixedClock::at_date(2026, 3, 15)),
        )
    }
}

#[tokio::test]
async fn non_students_are_refused() {
    let service = Fixture::new().build();
    let err = service
        .selection_page(&user(TEACHER, Some(1), Some("2431"), None))
        .await
        .expect_err("teacher");
    assert_eq!(err, SelectionError::NotStudent);
}

#[rstest]
#[case(None)]
#[case(Some(99))]
#[tokio::test]
async fn students_without_curriculum_are_refused(#[case] direction: Option<i32>) {
    let service = Fixture::new().build();
    let err = service
        .selection_page(&user(STUDENT, direction, Some("2431"), Some(2024)))
        .await
        .expect_err("no curriculum");
    assert_eq!(err, SelectionError::NoCurriculum);
}

#[tokio::test]
async fn page_uses_catalog_year_direction_and_current_semester() {
    let mut fixture = Fixture::new().enrollment_open(true);
    fixture.users = MockUserRepository::new();
    fixture
        .users
        .expect_set_admission_year()
        .withf(|id, year| *id == UserId::new(7) && *year == 2024)
        .times(1)
        .returning(|_, _| Ok(()));
    let page = fixture
        .build()
        .selection_page(&student("2431"))
        .await
        .expect("page");

    assert_eq!(page.direction.id, DirectionId::new(2));
    assert_eq!(page.admission_year, Some(2024));
    assert_eq!((page.course_year, page.semester), (3, 6));
    assert_eq!(page.pairs.len(), 2);
    assert_eq!(page.pairs[1].courses().len(), 1);
    assert!(page.enrollment_open);
    assert!(!page.has_choices());
}

#[tokio::test]
async fn malformed_group_uses_current_year_without_persisting() {
    let mut fixture = Fixture::new().enrollment_open(false);
    fixture.users = MockUserRepository::new();
    fixture.users.expect_set_admission_year().never();
    let page = fixture
        .build()
        .selection_page(&student("A1"))
        .await
        .expect("page");

    assert_eq!(page.admission_year, Some(2026));
    assert_eq!(page.direction.id, DirectionId::new(1));
    assert_eq!((page.course_year, page.semester), (1, 2));
}

#[tokio::test]
async fn submission_requires_every_pair() {
    let service = Fixture::new().build();
    let choices = PairChoices::from([(0, "1".to_owned())]);
    let err = service
        .submit(&student("2431"), &choices)
        .await
        .expect_err("second pair missing");
    assert_eq!(err, SelectionError::MissingChoice { pair_number: 2 });
    assert_eq!(err.to_string(), "please choose a course in pair 2");
}

#[rstest]
#[case("3")]
#[case("abc")]
#[tokio::test]
async fn submission_rejects_courses_outside_the_pair(#[case] first: &str) {
    let service = Fixture::new().build();
    let choices = PairChoices::from([(0, first.to_owned()), (1, "3".to_owned())]);
    let err = service
        .submit(&student("2431"), &choices)
        .await
        .expect_err("foreign course");
    assert_eq!(err, SelectionError::InvalidChoice { pair_number: 1 });
}

#[tokio::test]
async fn submission_replaces_choices() {
    let mut fixture = Fixture::new();
    fixture
        .enrollments
        .expect_replace_for_student()
        .withf(|student, courses| {
            *student == UserId::new(7)
                && courses == [ElectiveCourseId::new(2), ElectiveCourseId::new(3)]
        })
        .times(1)
        .returning(|_, _| Ok(()));
    let choices = PairChoices::from([(0, "2".to_owned()), (1, " 3 ".to_owned())]);

    let stored = fixture
        .build()
        .submit(&student("2431"), &choices)
        .await
        .expect("saved");
    assert_eq!(stored, 2);
}

#[tokio::test]
async fn cancellation_is_refused_while_closed() {
    let mut fixture = Fixture::new().enrollment_open(false);
    fixture.enrollments.expect_delete_for_student().never();
    let err = fixture
        .build()
        .cancel(&student("2431"))
        .await
        .expect_err("closed");
    assert_eq!(err, SelectionError::EnrollmentClosed);
}

#[tokio::test]
async fn cancellation_clears_choices_while_open() {
    let mut fixture = Fixture::new().enrollment_open(true);
    fixture
        .enrollments
        .expect_delete_for_student()
        .times(1)
        .returning(|_| Ok(2));
    let removed = fixture
        .build()
        .cancel(&student("2431"))
        .await
        .expect("cancelled");
    assert_eq!(removed, 2);
}

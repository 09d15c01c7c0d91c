//! Test doubles shared by unit tests (in `src/`) and integration tests (in
//! `tests/`).
//!
//! Compiled for `cfg(test)` and when the `test-support` feature is enabled.
//! [`InMemoryStore`] implements every driven port over plain vectors and
//! enforces the same uniqueness rules as the database schema.

use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{DateTime, Local, TimeZone, Utc};
use mockable::Clock;

use crate::domain::ports::{
    AssignmentRecord, DirectionRepository, DirectionRepositoryError, ElectiveCourseRepository,
    ElectiveCourseRepositoryError, EnrollmentRepository, EnrollmentRepositoryError,
    EnrollmentSettingsError, EnrollmentSettingsRepository, PasswordHashError, PasswordHasher,
    UserRepository, UserRepositoryError,
};
use crate::domain::{
    Direction, DirectionId, ElectiveCourse, ElectiveCourseId, ElectiveSelectionService,
    EnrollmentAdminService, NewUser, PasswordLoginService, RegistrationService, RoleSet,
    StudentSummary, User, UserId,
};
use crate::inbound::http::state::HttpState;

/// Clock frozen at a single instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(DateTime<Utc>);

impl FixedClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self(now)
    }

    /// Noon UTC on the given day.
    ///
    /// # Panics
    /// Panics when the date does not exist.
    pub fn at_date(year: i32, month: u32, day: u32) -> Self {
        match Utc.with_ymd_and_hms(year, month, day, 12, 0, 0).single() {
            Some(now) => Self(now),
            None => panic!("invalid fixture date {year}-{month}-{day}"),
        }
    }
}

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        self.0.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Reversible stand-in for bcrypt so tests stay fast.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainTextHasher;

impl PlainTextHasher {
    const PREFIX: &'static str = "plain$";

    /// Hash `password` the way [`PasswordHasher::hash`] would.
    pub fn hash_of(password: &str) -> String {
        format!("{}{password}", Self::PREFIX)
    }
}

#[async_trait]
impl PasswordHasher for PlainTextHasher {
    async fn hash(&self, password: &str) -> Result<String, PasswordHashError> {
        Ok(Self::hash_of(password))
    }

    async fn verify(&self, password: &str, hash: &str) -> Result<bool, PasswordHashError> {
        match hash.strip_prefix(Self::PREFIX) {
            Some(stored) => Ok(stored == password),
            None => Err(PasswordHashError::verify("not a plain-text fixture hash")),
        }
    }
}

#[derive(Default)]
struct StoreState {
    users: Vec<User>,
    directions: Vec<Direction>,
    courses: Vec<ElectiveCourse>,
    enrollments: Vec<(UserId, ElectiveCourseId)>,
    enrollment_open: Option<bool>,
    next_id: i32,
}

impl StoreState {
    fn next_id(&mut self) -> i32 {
        self.next_id += 1;
        self.next_id
    }

    fn course(&self, id: ElectiveCourseId) -> Option<&ElectiveCourse> {
        self.courses.iter().find(|course| course.id == id)
    }

    fn user(&self, id: UserId) -> Option<&User> {
        self.users.iter().find(|user| user.id() == id)
    }
}

/// In-memory implementation of every driven port.
#[derive(Default)]
pub struct InMemoryStore(Mutex<StoreState>);

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, StoreState> {
        match self.0.lock() {
            Ok(guard) => guard,
            Err(_) => panic!("in-memory store mutex"),
        }
    }

    /// Seed a direction catalog year.
    pub fn add_direction(&self, code: &str, name: &str, year: Option<i32>) -> DirectionId {
        let mut state = self.lock();
        let id = DirectionId::new(state.next_id());
        state.directions.push(Direction {
            id,
            code: code.to_owned(),
            name: name.to_owned(),
            year,
        });
        id
    }

    /// Seed an elective course.
    pub fn add_course(&self, name: &str, semester: i32, direction: DirectionId) -> ElectiveCourseId {
        let mut state = self.lock();
        let id = ElectiveCourseId::new(state.next_id());
        state.courses.push(ElectiveCourse {
            id,
            name: name.to_owned(),
            semester: Some(semester),
            direction_id: direction,
        });
        id
    }

    /// Seed a user whose password is `password`.
    pub fn add_user(&self, login: &str, password: &str, full_name: &str, roles: &str) -> UserId {
        self.add_user_record(NewUser {
            login: login.to_owned(),
            password_hash: PlainTextHasher::hash_of(password),
            full_name: full_name.to_owned(),
            roles: RoleSet::parse(roles),
            direction_id: None,
            group_number: None,
            admission_year: None,
        })
    }

    /// Seed a fully specified user record.
    pub fn add_user_record(&self, record: NewUser) -> UserId {
        let mut state = self.lock();
        let id = UserId::new(state.next_id());
        state.users.push(User::from_record(id, record));
        id
    }

    /// Seed an enrollment without the duplicate checks.
    pub fn enroll(&self, student: UserId, course: ElectiveCourseId) {
        self.lock().enrollments.push((student, course));
    }

    /// Remove a user and their enrollments.
    pub fn delete_user(&self, id: UserId) {
        let mut state = self.lock();
        state.users.retain(|user| user.id() != id);
        state.enrollments.retain(|(student, _)| *student != id);
    }

    /// Seed the enrollment flag; `None` means no settings row.
    pub fn set_enrollment_flag(&self, open: Option<bool>) {
        self.lock().enrollment_open = open;
    }

    /// Current enrollments of `student`, ascending by course id.
    pub fn enrollments_of(&self, student: UserId) -> Vec<ElectiveCourseId> {
        let mut ids: Vec<_> = self
            .lock()
            .enrollments
            .iter()
            .filter(|(owner, _)| *owner == student)
            .map(|(_, course)| *course)
            .collect();
        ids.sort();
        ids
    }

    /// Snapshot of a stored user.
    pub fn user(&self, id: UserId) -> Option<User> {
        self.lock().user(id).cloned()
    }

    /// Snapshot of the user registered under `login`.
    pub fn user_by_login(&self, login: &str) -> Option<User> {
        self.lock()
            .users
            .iter()
            .find(|user| user.login() == login)
            .cloned()
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserRepositoryError> {
        Ok(self.lock().user(id).cloned())
    }

    async fn find_by_login(&self, login: &str) -> Result<Option<User>, UserRepositoryError> {
        Ok(self.user_by_login(login))
    }

    async fn insert(&self, user: &NewUser) -> Result<UserId, UserRepositoryError> {
        if self.user_by_login(&user.login).is_some() {
            return Err(UserRepositoryError::duplicate_login(user.login.clone()));
        }
        Ok(self.add_user_record(user.clone()))
    }

    async fn set_admission_year(&self, id: UserId, year: i32) -> Result<(), UserRepositoryError> {
        let mut state = self.lock();
        if let Some(user) = state.users.iter_mut().find(|user| user.id() == id) {
            user.set_admission_year(year);
        }
        Ok(())
    }

    async fn list_students(&self) -> Result<Vec<StudentSummary>, UserRepositoryError> {
        let state = self.lock();
        let mut students: Vec<StudentSummary> = state
            .users
            .iter()
            .filter(|user| user.is_student())
            .map(StudentSummary::from)
            .collect();
        students.sort_by(|a, b| a.full_name.cmp(&b.full_name).then(a.id.cmp(&b.id)));
        Ok(students)
    }
}

#[async_trait]
impl DirectionRepository for InMemoryStore {
    async fn list_all(&self) -> Result<Vec<Direction>, DirectionRepositoryError> {
        let mut directions = self.lock().directions.clone();
        directions.sort_by(|a, b| {
            (a.code.as_str(), a.year, a.id).cmp(&(b.code.as_str(), b.year, b.id))
        });
        Ok(directions)
    }

    async fn find_by_id(
        &self,
        id: DirectionId,
    ) -> Result<Option<Direction>, DirectionRepositoryError> {
        Ok(self.lock().directions.iter().find(|d| d.id == id).cloned())
    }

    async fn find_by_code_and_year(
        &self,
        code: &str,
        year: i32,
    ) -> Result<Option<Direction>, DirectionRepositoryError> {
        Ok(self
            .lock()
            .directions
            .iter()
            .find(|d| d.code == code && d.year == Some(year))
            .cloned())
    }
}

#[async_trait]
impl ElectiveCourseRepository for InMemoryStore {
    async fn list_for_semester(
        &self,
        direction: DirectionId,
        semester: i32,
    ) -> Result<Vec<ElectiveCourse>, ElectiveCourseRepositoryError> {
        let mut courses: Vec<_> = self
            .lock()
            .courses
            .iter()
            .filter(|c| c.direction_id == direction && c.semester == Some(semester))
            .cloned()
            .collect();
        courses.sort_by_key(|c| c.id);
        Ok(courses)
    }

    async fn list_all(&self) -> Result<Vec<ElectiveCourse>, ElectiveCourseRepositoryError> {
        let mut courses = self.lock().courses.clone();
        courses.sort_by_key(|c| c.id);
        Ok(courses)
    }

    async fn list_chosen_by(
        &self,
        student: UserId,
    ) -> Result<Vec<ElectiveCourse>, ElectiveCourseRepositoryError> {
        let chosen = self.enrollments_of(student);
        let state = self.lock();
        Ok(chosen
            .into_iter()
            .filter_map(|id| state.course(id).cloned())
            .collect())
    }
}

#[async_trait]
impl EnrollmentRepository for InMemoryStore {
    async fn replace_for_student(
        &self,
        student: UserId,
        courses: &[ElectiveCourseId],
    ) -> Result<(), EnrollmentRepositoryError> {
        let mut state = self.lock();
        if state.user(student).is_none() || courses.iter().any(|c| state.course(*c).is_none()) {
            return Err(EnrollmentRepositoryError::missing_reference(format!(
                "student {student}"
            )));
        }
        let mut unique = courses.to_vec();
        unique.sort();
        unique.dedup();
        if unique.len() != courses.len() {
            return Err(EnrollmentRepositoryError::duplicate(format!("student {student}")));
        }
        state.enrollments.retain(|(owner, _)| *owner != student);
        state
            .enrollments
            .extend(courses.iter().map(|course| (student, *course)));
        Ok(())
    }

    async fn delete_for_student(&self, student: UserId) -> Result<usize, EnrollmentRepositoryError> {
        let mut state = self.lock();
        let before = state.enrollments.len();
        state.enrollments.retain(|(owner, _)| *owner != student);
        Ok(before - state.enrollments.len())
    }

    async fn assign(
        &self,
        student: UserId,
        course: ElectiveCourseId,
    ) -> Result<(), EnrollmentRepositoryError> {
        let mut state = self.lock();
        if state.user(student).is_none() || state.course(course).is_none() {
            return Err(EnrollmentRepositoryError::missing_reference(format!(
                "{student}/{course}"
            )));
        }
        if state.enrollments.contains(&(student, course)) {
            return Err(EnrollmentRepositoryError::duplicate(format!("{student}/{course}")));
        }
        state.enrollments.push((student, course));
        Ok(())
    }

    async fn remove(
        &self,
        student: UserId,
        course: ElectiveCourseId,
    ) -> Result<usize, EnrollmentRepositoryError> {
        let mut state = self.lock();
        let before = state.enrollments.len();
        state.enrollments.retain(|entry| *entry != (student, course));
        Ok(before - state.enrollments.len())
    }

    async fn list_assignments(&self) -> Result<Vec<AssignmentRecord>, EnrollmentRepositoryError> {
        let state = self.lock();
        let mut records: Vec<AssignmentRecord> = state
            .enrollments
            .iter()
            .filter_map(|(student, course)| {
                let user = state.user(*student)?;
                let course = state.course(*course)?;
                Some(AssignmentRecord {
                    student_id: user.id(),
                    student_name: user.full_name().to_owned(),
                    course_id: course.id,
                    course_name: course.name.clone(),
                })
            })
            .collect();
        records.sort_by(|a, b| a.student_name.cmp(&b.student_name));
        Ok(records)
    }
}

#[async_trait]
impl EnrollmentSettingsRepository for InMemoryStore {
    async fn is_enrollment_open(&self) -> Result<bool, EnrollmentSettingsError> {
        Ok(self.lock().enrollment_open.unwrap_or(false))
    }

    async fn set_enrollment_open(&self, open: bool) -> Result<(), EnrollmentSettingsError> {
        self.lock().enrollment_open = Some(open);
        Ok(())
    }
}

/// Wire the real domain services over `store` for handler tests.
pub fn http_state(store: Arc<InMemoryStore>, clock: FixedClock) -> HttpState {
    let clock: Arc<dyn Clock> = Arc::new(clock);
    let hasher = Arc::new(PlainTextHasher);
    HttpState::new(
        Arc::new(PasswordLoginService::new(store.clone(), hasher.clone())),
        Arc::new(RegistrationService::new(
            store.clone(),
            store.clone(),
            hasher,
            clock.clone(),
        )),
        Arc::new(ElectiveSelectionService::new(
            store.clone(),
            store.clone(),
            store.clone(),
            store.clone(),
            store.clone(),
            clock,
        )),
        Arc::new(EnrollmentAdminService::new(
            store.clone(),
            store.clone(),
            store.clone(),
            store,
        )),
    )
}

/// Password shared by every seeded account.
pub const SEED_PASSWORD: &str = "secret";

/// Store seeded with one direction in two catalog years, spring-term
/// electives and one account per role.
pub struct SeededCampus {
    pub store: Arc<InMemoryStore>,
    pub direction_2023: DirectionId,
    pub direction_2024: DirectionId,
    /// Student in group `2431` (admitted 2024, third year).
    pub student: UserId,
    pub teacher: UserId,
    pub staff: UserId,
    /// Semester-6 courses of the 2024 curriculum, ascending by id.
    pub courses: Vec<ElectiveCourseId>,
}

impl SeededCampus {
    pub fn new() -> Self {
        let store = Arc::new(InMemoryStore::new());
        let direction_2023 = store.add_direction("09.03.01", "Informatics", Some(2023));
        let direction_2024 = store.add_direction("09.03.01", "Informatics", Some(2024));
        store.add_course("Legacy systems", 6, direction_2023);
        let courses = vec![
            store.add_course("Machine learning", 6, direction_2024),
            store.add_course("Databases", 6, direction_2024),
            store.add_course("Compilers", 6, direction_2024),
        ];
        store.add_course("Operating systems", 5, direction_2024);

        let student = store.add_user_record(NewUser {
            login: "ivanova".to_owned(),
            password_hash: PlainTextHasher::hash_of(SEED_PASSWORD),
            full_name: "Ivanova Anna".to_owned(),
            roles: RoleSet::parse(crate::domain::STUDENT),
            direction_id: Some(direction_2023),
            group_number: Some("2431".to_owned()),
            admission_year: None,
        });
        let teacher = store.add_user("petrov", SEED_PASSWORD, "Petrov Petr", crate::domain::TEACHER);
        let staff = store.add_user(
            "sidorova",
            SEED_PASSWORD,
            "Sidorova Maria",
            crate::domain::DIRECTION_STAFF,
        );
        store.set_enrollment_flag(Some(true));

        Self {
            store,
            direction_2023,
            direction_2024,
            student,
            teacher,
            staff,
            courses,
        }
    }

    /// Clock inside the spring term of 2026.
    pub fn clock() -> FixedClock {
        FixedClock::at_date(2026, 3, 15)
    }

    /// Real services over the seeded store.
    pub fn http_state(&self) -> HttpState {
        http_state(self.store.clone(), Self::clock())
    }
}

impl Default for SeededCampus {
    fn default() -> Self {
        Self::new()
    }
}

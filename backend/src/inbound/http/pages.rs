//! Server-rendered pages.
//!
//! Each page is an `askama` template struct holding display-ready values, so
//! templates stay free of domain logic. Every page carries the flash messages
//! drained from the session for the base layout.

use actix_web::http::{StatusCode, header};
use actix_web::{HttpResponse, http::header::ContentType};
use askama::Template;

use crate::domain::ports::AssignmentRecord;
use crate::domain::{
    AdminOverview, ElectiveCourse, Error, RegistrationForm, RegistrationOptions, SelectionPage,
    StudentSummary, User,
};

use super::session::Flash;

/// Render `page` as an HTML response with `status`.
pub(crate) fn render<T: Template>(status: StatusCode, page: &T) -> Result<HttpResponse, Error> {
    let body = page
        .render()
        .map_err(|error| Error::internal(format!("failed to render page: {error}")))?;
    Ok(HttpResponse::build(status)
        .content_type(ContentType::html())
        .body(body))
}

/// `303 See Other` to `location`.
pub(crate) fn see_other(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .finish()
}

#[derive(Template)]
#[template(path = "login.html")]
pub struct LoginPage {
    pub flashes: Vec<Flash>,
    pub login: String,
}

/// Role checkbox on the registration form.
pub struct RoleOption {
    pub name: String,
    pub checked: bool,
}

/// Direction entry of the registration form's select box.
pub struct DirectionOption {
    pub id: String,
    pub label: String,
    pub selected: bool,
}

#[derive(Template)]
#[template(path = "register.html")]
pub struct RegisterPage {
    pub flashes: Vec<Flash>,
    pub error: Option<String>,
    pub roles: Vec<RoleOption>,
    pub directions: Vec<DirectionOption>,
    pub full_name: String,
    pub login: String,
    pub group_number: String,
    pub admission_year: String,
    pub min_admission_year: i32,
    pub max_admission_year: i32,
}

impl RegisterPage {
    /// Blank form.
    pub fn new(options: RegistrationOptions, flashes: Vec<Flash>) -> Self {
        Self::refill(options, &RegistrationForm::default(), None, flashes)
    }

    /// Form re-rendered with the submitted values and an error; the
    /// password is never echoed.
    pub fn refill(
        options: RegistrationOptions,
        form: &RegistrationForm,
        error: Option<String>,
        flashes: Vec<Flash>,
    ) -> Self {
        let RegistrationOptions {
            roles,
            directions,
            min_admission_year,
            max_admission_year,
        } = options;
        let selected_direction = form.direction_id.as_deref().map(str::trim);
        Self {
            flashes,
            error,
            roles: roles
                .into_iter()
                .map(|name| RoleOption {
                    checked: form.roles.iter().any(|r| r.trim() == name),
                    name,
                })
                .collect(),
            directions: directions
                .into_iter()
                .map(|direction| {
                    let id = direction.id.to_string();
                    DirectionOption {
                        selected: selected_direction == Some(id.as_str()),
                        label: direction.label(),
                        id,
                    }
                })
                .collect(),
            full_name: form.full_name.clone(),
            login: form.login.clone(),
            group_number: form.group_number.clone().unwrap_or_default(),
            admission_year: form.admission_year.clone().unwrap_or_default(),
            min_admission_year,
            max_admission_year,
        }
    }
}

#[derive(Template)]
#[template(path = "dashboard.html")]
pub struct DashboardPage {
    pub flashes: Vec<Flash>,
    pub full_name: String,
    pub roles: String,
    pub is_student: bool,
    pub is_staff: bool,
}

impl DashboardPage {
    pub fn for_user(user: &User, flashes: Vec<Flash>) -> Self {
        Self {
            flashes,
            full_name: user.full_name().to_owned(),
            roles: user.roles().to_string(),
            is_student: user.is_student(),
            is_staff: user.has_role(crate::domain::DIRECTION_STAFF),
        }
    }
}

#[derive(Template)]
#[template(path = "director_dashboard.html")]
pub struct DirectorDashboardPage {
    pub flashes: Vec<Flash>,
    pub full_name: String,
    pub enrollment_open: bool,
}

/// One selectable course inside a pair.
pub struct CourseOption {
    pub id: String,
    pub name: String,
    pub checked: bool,
}

/// Radio group for one pair.
pub struct PairView {
    pub field_name: String,
    pub number: usize,
    pub courses: Vec<CourseOption>,
}

#[derive(Template)]
#[template(path = "choose_courses.html")]
pub struct ChooseCoursesPage {
    pub flashes: Vec<Flash>,
    pub direction: String,
    pub admission_year: String,
    pub course_year: u32,
    pub semester: i32,
    pub pairs: Vec<PairView>,
    pub chosen: Vec<String>,
    pub has_choices: bool,
    pub enrollment_open: bool,
}

impl ChooseCoursesPage {
    pub fn new(page: SelectionPage, flashes: Vec<Flash>) -> Self {
        let pairs = page
            .pairs
            .iter()
            .map(|pair| PairView {
                field_name: pair.field_name(),
                number: pair.number(),
                courses: pair
                    .courses()
                    .iter()
                    .map(|course| CourseOption {
                        id: course.id.to_string(),
                        name: course.name.clone(),
                        checked: page.is_chosen(course.id),
                    })
                    .collect(),
            })
            .collect();
        Self {
            flashes,
            direction: page.direction.label(),
            admission_year: page
                .admission_year
                .map(|year| year.to_string())
                .unwrap_or_default(),
            course_year: page.course_year,
            semester: page.semester,
            pairs,
            has_choices: page.has_choices(),
            chosen: page.chosen.into_iter().map(|course| course.name).collect(),
            enrollment_open: page.enrollment_open,
        }
    }
}

#[derive(Template)]
#[template(path = "manage_students_courses.html")]
pub struct ManageStudentsCoursesPage {
    pub flashes: Vec<Flash>,
    pub students: Vec<StudentSummary>,
    pub courses: Vec<ElectiveCourse>,
    pub assignments: Vec<AssignmentRecord>,
    pub enrollment_open: bool,
}

impl ManageStudentsCoursesPage {
    pub fn new(overview: AdminOverview, flashes: Vec<Flash>) -> Self {
        let AdminOverview {
            students,
            courses,
            assignments,
            enrollment_open,
        } = overview;
        Self {
            flashes,
            students,
            courses,
            assignments,
            enrollment_open,
        }
    }
}

#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorPage {
    pub flashes: Vec<Flash>,
    pub status: u16,
    pub reason: String,
    pub message: String,
    pub trace_id: Option<String>,
}

impl ErrorPage {
    pub fn new(status: StatusCode, message: &str, trace_id: Option<&str>) -> Self {
        Self {
            flashes: Vec::new(),
            status: status.as_u16(),
            reason: status.canonical_reason().unwrap_or("Error").to_owned(),
            message: message.to_owned(),
            trace_id: trace_id.map(str::to_owned),
        }
    }
}

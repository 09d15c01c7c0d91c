//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. `diesel
//! print-schema` regenerates them from a migrated database.

diesel::table! {
    /// Curriculum lines, one row per `(code, year)`.
    direction (id) {
        id -> Int4,
        #[max_length = 20]
        code -> Varchar,
        #[max_length = 100]
        name -> Varchar,
        /// Catalog year; legacy rows may lack it.
        year -> Nullable<Int4>,
    }
}

diesel::table! {
    /// Accounts. `role` holds comma-joined role names.
    users (id) {
        id -> Int4,
        /// Full name.
        #[max_length = 255]
        fio -> Varchar,
        direction_id -> Nullable<Int4>,
        #[max_length = 50]
        group_number -> Nullable<Varchar>,
        #[max_length = 100]
        login -> Varchar,
        /// Password hash.
        #[max_length = 255]
        password -> Varchar,
        #[max_length = 255]
        role -> Nullable<Varchar>,
        admission_year -> Nullable<Int4>,
    }
}

diesel::table! {
    elective_course (id) {
        id -> Int4,
        #[max_length = 200]
        name -> Varchar,
        semester -> Nullable<Int4>,
        direction_id -> Int4,
    }
}

diesel::table! {
    /// Enrollment rows, unique per `(user_id, elective_course_id)`.
    student_elective_courses (id) {
        id -> Int4,
        user_id -> Int4,
        elective_course_id -> Int4,
    }
}

diesel::table! {
    /// Global switches; only the first row is read.
    settings (id) {
        id -> Int4,
        is_enrollment_open -> Bool,
    }
}

diesel::joinable!(users -> direction (direction_id));
diesel::joinable!(elective_course -> direction (direction_id));
diesel::joinable!(student_elective_courses -> users (user_id));
diesel::joinable!(student_elective_courses -> elective_course (elective_course_id));

diesel::allow_tables_to_appear_in_same_query!(
    direction,
    users,
    elective_course,
    student_elective_courses,
    settings,
);

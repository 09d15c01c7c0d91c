//! Raw inserts for fixture rows the ports never write.

use diesel::pg::PgConnection;
use diesel::sql_types::{Integer, Nullable, Varchar};
use diesel::{QueryableByName, RunQueryDsl};

#[derive(QueryableByName)]
struct InsertedId {
    #[diesel(sql_type = Integer)]
    id: i32,
}

/// Insert a direction and return its id.
///
/// # Panics
/// Panics when the insert fails.
pub fn direction(conn: &mut PgConnection, code: &str, name: &str, year: Option<i32>) -> i32 {
    diesel::sql_query("INSERT INTO direction (code, name, year) VALUES ($1, $2, $3) RETURNING id")
        .bind::<Varchar, _>(code)
        .bind::<Varchar, _>(name)
        .bind::<Nullable<Integer>, _>(year)
        .get_result::<InsertedId>(conn)
        .expect("insert direction")
        .id
}

/// Insert an elective course and return its id.
///
/// # Panics
/// Panics when the insert fails.
pub fn course(conn: &mut PgConnection, name: &str, semester: i32, direction: i32) -> i32 {
    diesel::sql_query(
        "INSERT INTO elective_course (name, semester, direction_id) VALUES ($1, $2, $3) RETURNING id",
    )
    .bind::<Varchar, _>(name)
    .bind::<Integer, _>(semester)
    .bind::<Integer, _>(direction)
    .get_result::<InsertedId>(conn)
    .expect("insert course")
    .id
}

/// Insert an account with the `role` column stored verbatim.
///
/// # Panics
/// Panics when the insert fails.
pub fn user(conn: &mut PgConnection, login: &str, full_name: &str, role: Option<&str>) -> i32 {
    diesel::sql_query(
        "INSERT INTO users (fio, login, password, role) VALUES ($1, $2, 'x', $3) RETURNING id",
    )
    .bind::<Varchar, _>(full_name)
    .bind::<Varchar, _>(login)
    .bind::<Nullable<Varchar>, _>(role)
    .get_result::<InsertedId>(conn)
    .expect("insert user")
    .id
}

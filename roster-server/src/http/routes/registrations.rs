//! Registered student endpoints
//!
//! Mutations answer with the full roster after the change.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    routing::{delete, get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::db::repos::{RegisteredStudent, RegistrationRepo};
use crate::http::error::ApiError;
use crate::http::extractors::{ValidForm, ValidId};
use crate::http::server::AppState;

/// POST /registered_students/add form
#[derive(Deserialize)]
pub struct AddRegistrationForm {
    #[serde(rename = "idOfStudentToAdd")]
    pub student_id: i64,
    #[serde(rename = "idOfClassToAddTo")]
    pub class_id: i64,
}

/// DELETE /registered_students/delete form
#[derive(Deserialize)]
pub struct RemoveRegistrationForm {
    #[serde(rename = "idOfStudentToDelete")]
    pub student_id: i64,
    #[serde(rename = "idOfClassToDeleteFrom")]
    pub class_id: i64,
}

/// Roster row response
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct RegisteredStudentResponse {
    pub student_id: i64,
    pub student_full_name: String,
    pub class_code: String,
    pub class_title: String,
}

impl From<RegisteredStudent> for RegisteredStudentResponse {
    fn from(r: RegisteredStudent) -> Self {
        Self {
            student_id: r.student_id,
            student_full_name: r.student_full_name,
            class_code: r.class_code,
            class_title: r.class_title,
        }
    }
}

fn to_response(rows: Vec<RegisteredStudent>) -> Json<Vec<RegisteredStudentResponse>> {
    Json(rows.into_iter().map(RegisteredStudentResponse::from).collect())
}

/// GET /registered_students - full roster
async fn list_registered(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<RegisteredStudentResponse>>, ApiError> {
    let rows = RegistrationRepo::new(&state.db).list_all().await?;
    Ok(to_response(rows))
}

/// POST /registered_students/add - register a student in a class
async fn add_registration(
    State(state): State<Arc<AppState>>,
    ValidForm(form): ValidForm<AddRegistrationForm>,
) -> Result<Json<Vec<RegisteredStudentResponse>>, ApiError> {
    let repo = RegistrationRepo::new(&state.db);
    repo.add(form.student_id, form.class_id).await?;
    Ok(to_response(repo.list_all().await?))
}

/// DELETE /registered_students/delete - drop a student from a class
async fn remove_registration(
    State(state): State<Arc<AppState>>,
    ValidForm(form): ValidForm<RemoveRegistrationForm>,
) -> Result<Json<Vec<RegisteredStudentResponse>>, ApiError> {
    let repo = RegistrationRepo::new(&state.db);
    repo.remove(form.student_id, form.class_id).await?;
    Ok(to_response(repo.list_all().await?))
}

/// GET /students_taking_class/{classCode}
async fn students_taking_class(
    State(state): State<Arc<AppState>>,
    Path(class_code): Path<String>,
) -> Result<Json<Vec<RegisteredStudentResponse>>, ApiError> {
    let rows = RegistrationRepo::new(&state.db)
        .students_in_class(&class_code)
        .await?;
    Ok(to_response(rows))
}

/// GET /classes_in_which_student_is_enrolled/{studentId}
async fn classes_for_student(
    State(state): State<Arc<AppState>>,
    ValidId(student_id): ValidId,
) -> Result<Json<Vec<RegisteredStudentResponse>>, ApiError> {
    let rows = RegistrationRepo::new(&state.db)
        .classes_for_student(student_id)
        .await?;
    Ok(to_response(rows))
}

/// Registration routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/registered_students", get(list_registered))
        .route("/registered_students/add", post(add_registration))
        .route("/registered_students/delete", delete(remove_registration))
        .route("/students_taking_class/{class_code}", get(students_taking_class))
        .route(
            "/classes_in_which_student_is_enrolled/{student_id}",
            get(classes_for_student),
        )
}

//! Student endpoints

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde::{Deserialize, Serialize};

use crate::db::repos::{Student, StudentRepo};
use crate::http::error::ApiError;
use crate::http::extractors::{ValidForm, ValidId};
use crate::http::server::AppState;
use crate::models::{NewStudent, StudentChanges, DATE_FORMAT};

/// Create/replace student form
#[derive(Deserialize)]
pub struct StudentForm {
    pub first_name: String,
    pub last_name: String,
    pub birth_date: String,
}

/// Partial update form
#[derive(Deserialize)]
pub struct StudentPatchForm {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub birth_date: Option<String>,
}

/// Student response
#[derive(Debug, Serialize, Deserialize)]
pub struct StudentResponse {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub birth_date: String,
}

impl From<Student> for StudentResponse {
    fn from(s: Student) -> Self {
        Self {
            id: s.id,
            first_name: s.first_name,
            last_name: s.last_name,
            birth_date: s.birth_date.format(DATE_FORMAT).to_string(),
        }
    }
}

/// GET /students - list all students
async fn list_students(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<StudentResponse>>, ApiError> {
    let students = StudentRepo::new(&state.db).list().await?;
    Ok(Json(students.into_iter().map(StudentResponse::from).collect()))
}

/// GET /students/{id} - get a single student
async fn get_student(
    State(state): State<Arc<AppState>>,
    ValidId(id): ValidId,
) -> Result<Json<StudentResponse>, ApiError> {
    let student = StudentRepo::new(&state.db)
        .get(id)
        .await?
        .ok_or_else(|| ApiError::NotFound {
            resource: "student",
            id: id.to_string(),
        })?;

    Ok(Json(StudentResponse::from(student)))
}

/// POST /students - create a new student
async fn create_student(
    State(state): State<Arc<AppState>>,
    ValidForm(form): ValidForm<StudentForm>,
) -> Result<(StatusCode, Json<StudentResponse>), ApiError> {
    let new = NewStudent::parse(form.first_name, form.last_name, &form.birth_date)?;
    let student = StudentRepo::new(&state.db).create(new).await?;

    Ok((StatusCode::CREATED, Json(StudentResponse::from(student))))
}

/// PUT /students/{id} - replace an existing student
async fn update_student(
    State(state): State<Arc<AppState>>,
    ValidId(id): ValidId,
    ValidForm(form): ValidForm<StudentForm>,
) -> Result<Json<StudentResponse>, ApiError> {
    let changes = NewStudent::parse(form.first_name, form.last_name, &form.birth_date)?;
    let student = StudentRepo::new(&state.db).update(id, changes).await?;

    Ok(Json(StudentResponse::from(student)))
}

/// PATCH /students/{id} - update only the given fields
async fn patch_student(
    State(state): State<Arc<AppState>>,
    ValidId(id): ValidId,
    ValidForm(form): ValidForm<StudentPatchForm>,
) -> Result<Json<StudentResponse>, ApiError> {
    let changes = StudentChanges::parse(form.first_name, form.last_name, form.birth_date.as_deref())?;
    let student = StudentRepo::new(&state.db).patch(id, changes).await?;

    Ok(Json(StudentResponse::from(student)))
}

/// DELETE /students/{id} - delete a student
async fn delete_student(
    State(state): State<Arc<AppState>>,
    ValidId(id): ValidId,
) -> Result<String, ApiError> {
    StudentRepo::new(&state.db).delete(id).await?;
    Ok(format!("Student with id = {} successfully deleted.", id))
}

/// Student routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/students", get(list_students).post(create_student))
        .route(
            "/students/{id}",
            get(get_student)
                .put(update_student)
                .patch(patch_student)
                .delete(delete_student),
        )
}

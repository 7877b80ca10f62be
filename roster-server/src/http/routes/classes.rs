//! Class endpoints

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde::{Deserialize, Serialize};

use crate::db::repos::{Class, ClassRepo};
use crate::http::error::ApiError;
use crate::http::extractors::{ValidForm, ValidId};
use crate::http::server::AppState;
use crate::models::NewClass;

/// Create/replace class form
#[derive(Deserialize)]
pub struct ClassForm {
    pub code: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub max_students: i64,
}

impl From<ClassForm> for NewClass {
    fn from(f: ClassForm) -> Self {
        NewClass::new(f.code, f.title, f.description, f.max_students)
    }
}

/// Class response
#[derive(Debug, Serialize, Deserialize)]
pub struct ClassResponse {
    pub id: i64,
    pub code: String,
    pub title: String,
    pub description: String,
    pub max_students: i64,
}

impl From<Class> for ClassResponse {
    fn from(c: Class) -> Self {
        Self {
            id: c.id,
            code: c.code,
            title: c.title,
            description: c.description,
            max_students: c.max_students,
        }
    }
}

/// GET /classes - list all classes
async fn list_classes(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<ClassResponse>>, ApiError> {
    let classes = ClassRepo::new(&state.db).list().await?;
    Ok(Json(classes.into_iter().map(ClassResponse::from).collect()))
}

/// GET /classes/{id} - get a single class
async fn get_class(
    State(state): State<Arc<AppState>>,
    ValidId(id): ValidId,
) -> Result<Json<ClassResponse>, ApiError> {
    let class = ClassRepo::new(&state.db)
        .get(id)
        .await?
        .ok_or_else(|| ApiError::NotFound {
            resource: "class",
            id: id.to_string(),
        })?;

    Ok(Json(ClassResponse::from(class)))
}

/// POST /classes - create a new class
async fn create_class(
    State(state): State<Arc<AppState>>,
    ValidForm(form): ValidForm<ClassForm>,
) -> Result<(StatusCode, Json<ClassResponse>), ApiError> {
    let class = ClassRepo::new(&state.db).create(form.into()).await?;
    Ok((StatusCode::CREATED, Json(ClassResponse::from(class))))
}

/// PUT /classes/{id} - replace an existing class
async fn update_class(
    State(state): State<Arc<AppState>>,
    ValidId(id): ValidId,
    ValidForm(form): ValidForm<ClassForm>,
) -> Result<Json<ClassResponse>, ApiError> {
    let class = ClassRepo::new(&state.db).update(id, form.into()).await?;
    Ok(Json(ClassResponse::from(class)))
}

/// DELETE /classes/{id} - delete a class
async fn delete_class(
    State(state): State<Arc<AppState>>,
    ValidId(id): ValidId,
) -> Result<String, ApiError> {
    ClassRepo::new(&state.db).delete(id).await?;
    Ok(format!("Class with id = {} successfully deleted.", id))
}

/// Class routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/classes", get(list_classes).post(create_class))
        .route(
            "/classes/{id}",
            get(get_class).put(update_class).delete(delete_class),
        )
}

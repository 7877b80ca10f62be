//! Router-level tests against a temporary SQLite file

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;

use roster_server::db::{seed, ClassRepo, StudentRepo};
use roster_server::models::NewClass;
use roster_server::{build_router, AppState, Database, ServerConfig};

struct TestApp {
    _dir: TempDir,
    db: Database,
    router: Router,
}

impl TestApp {
    async fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let db = Database::open(dir.path().join("roster.db")).await.unwrap();
        let router = build_router(AppState::new(db.clone()), &ServerConfig::default());
        Self { _dir: dir, db, router }
    }

    async fn send(&self, method: Method, uri: &str, form: Option<&str>) -> (StatusCode, Vec<u8>) {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match form {
            Some(form) => {
                builder = builder.header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
                Body::from(form.to_owned())
            }
            None => Body::empty(),
        };

        let response = self
            .router
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, bytes.to_vec())
    }

    async fn json(&self, method: Method, uri: &str, form: Option<&str>) -> (StatusCode, Value) {
        let (status, bytes) = self.send(method, uri, form).await;
        let value = serde_json::from_slice(&bytes)
            .unwrap_or_else(|e| panic!("{uri}: body is not JSON ({e}): {:?}", String::from_utf8_lossy(&bytes)));
        (status, value)
    }

    async fn create_student(&self, first: &str, last: &str, birth_date: &str) -> i64 {
        let form = format!("first_name={first}&last_name={last}&birth_date={birth_date}");
        let (status, body) = self.json(Method::POST, "/students", Some(&form)).await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        body["id"].as_i64().unwrap()
    }

    async fn create_class(&self, code: &str, title: &str, max_students: i64) -> i64 {
        ClassRepo::new(&self.db)
            .create(NewClass::new(code, title, "", max_students))
            .await
            .unwrap()
            .id
    }
}

#[tokio::test]
async fn health_reports_sqlite_version() {
    let app = TestApp::new().await;
    let (status, body) = app.json(Method::GET, "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert!(body["sqlite_version"].as_str().unwrap().starts_with('3'));
}

#[tokio::test]
async fn birth_date_round_trips() {
    let app = TestApp::new().await;
    let id = app.create_student("Ada", "Lovelace", "2001-05-14").await;

    let (status, body) = app.json(Method::GET, &format!("/students/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "id": id,
            "first_name": "Ada",
            "last_name": "Lovelace",
            "birth_date": "2001-05-14"
        })
    );
}

#[tokio::test]
async fn malformed_birth_date_is_400() {
    let app = TestApp::new().await;
    let (status, body) = app
        .json(
            Method::POST,
            "/students",
            Some("first_name=Ada&last_name=Lovelace&birth_date=14-05-2001"),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "validation_error");
    assert_eq!(StudentRepo::new(&app.db).count().await.unwrap(), 0);
}

#[tokio::test]
async fn missing_form_field_is_400() {
    let app = TestApp::new().await;
    let (status, body) = app
        .json(Method::POST, "/students", Some("first_name=Ada"))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "validation_error");
}

#[tokio::test]
async fn non_numeric_id_is_400() {
    let app = TestApp::new().await;
    let (status, body) = app.json(Method::GET, "/students/abc", None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "validation_error");
}

#[tokio::test]
async fn parameters_are_accepted_from_query_string() {
    let app = TestApp::new().await;
    let (status, body) = app
        .json(
            Method::POST,
            "/students?first_name=Grace&last_name=Hopper&birth_date=1999-12-09",
            None,
        )
        .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["last_name"], "Hopper");
}

#[tokio::test]
async fn get_unknown_student_is_404() {
    let app = TestApp::new().await;
    let (status, body) = app.json(Method::GET, "/students/41", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "not_found");
}

#[tokio::test]
async fn list_students_in_insert_order() {
    let app = TestApp::new().await;
    app.create_student("Ada", "Lovelace", "2001-05-14").await;
    app.create_student("Alan", "Turing", "2000-06-23").await;

    let (status, body) = app.json(Method::GET, "/students", None).await;
    assert_eq!(status, StatusCode::OK);
    let names: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["first_name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Ada", "Alan"]);
}

#[tokio::test]
async fn put_replaces_and_unknown_id_is_404() {
    let app = TestApp::new().await;
    let id = app.create_student("Ada", "Lovelace", "2001-05-14").await;

    let form = "first_name=Augusta&last_name=King&birth_date=2001-05-15";
    let (status, body) = app
        .json(Method::PUT, &format!("/students/{id}"), Some(form))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["first_name"], "Augusta");
    assert_eq!(body["birth_date"], "2001-05-15");

    let (status, _) = app.json(Method::PUT, "/students/9999", Some(form)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn patch_updates_only_given_fields() {
    let app = TestApp::new().await;
    let id = app.create_student("Ada", "Lovelace", "2001-05-14").await;

    let (status, body) = app
        .json(Method::PATCH, &format!("/students/{id}"), Some("last_name=King"))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["first_name"], "Ada");
    assert_eq!(body["last_name"], "King");
    assert_eq!(body["birth_date"], "2001-05-14");
}

#[tokio::test]
async fn delete_student_returns_confirmation() {
    let app = TestApp::new().await;
    let id = app.create_student("Ada", "Lovelace", "2001-05-14").await;

    let (status, bytes) = app.send(Method::DELETE, &format!("/students/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        String::from_utf8(bytes).unwrap(),
        format!("Student with id = {id} successfully deleted.")
    );
    assert_eq!(StudentRepo::new(&app.db).count().await.unwrap(), 0);
}

#[tokio::test]
async fn delete_unknown_student_is_404_and_leaves_table_unchanged() {
    let app = TestApp::new().await;
    app.create_student("Ada", "Lovelace", "2001-05-14").await;
    app.create_student("Alan", "Turing", "2000-06-23").await;
    let before = StudentRepo::new(&app.db).count().await.unwrap();

    let (status, body) = app.json(Method::DELETE, "/students/12345", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "not_found");
    assert_eq!(StudentRepo::new(&app.db).count().await.unwrap(), before);
}

#[tokio::test]
async fn delete_enrolled_student_is_422() {
    let app = TestApp::new().await;
    let student = app.create_student("Ada", "Lovelace", "2001-05-14").await;
    let class = app.create_class("CS208", "Intro to Databases", 30).await;

    let form = format!("idOfStudentToAdd={student}&idOfClassToAddTo={class}");
    let (status, _) = app
        .json(Method::POST, "/registered_students/add", Some(&form))
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = app
        .json(Method::DELETE, &format!("/students/{student}"), None)
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "unprocessable_entity");
    assert_eq!(StudentRepo::new(&app.db).count().await.unwrap(), 1);
}

#[tokio::test]
async fn enrolling_ada_in_cs208_yields_one_roster_row() {
    let app = TestApp::new().await;
    let class = app.create_class("CS208", "Intro to Databases", 30).await;
    let student = app.create_student("Ada", "Lovelace", "2001-05-14").await;

    let form = format!("idOfStudentToAdd={student}&idOfClassToAddTo={class}");
    let (status, added) = app
        .json(Method::POST, "/registered_students/add", Some(&form))
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, roster) = app.json(Method::GET, "/registered_students", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(roster, added);
    assert_eq!(
        roster,
        json!([{
            "student_id": student,
            "student_full_name": "Ada Lovelace",
            "class_code": "CS208",
            "class_title": "Intro to Databases"
        }])
    );
}

#[tokio::test]
async fn enrolling_unknown_ids_is_404_without_insert() {
    let app = TestApp::new().await;
    let class = app.create_class("CS208", "Intro to Databases", 30).await;
    let student = app.create_student("Ada", "Lovelace", "2001-05-14").await;

    let unknown_student = format!("idOfStudentToAdd=999&idOfClassToAddTo={class}");
    let (status, body) = app
        .json(Method::POST, "/registered_students/add", Some(&unknown_student))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "student '999' not found");

    let unknown_class = format!("idOfStudentToAdd={student}&idOfClassToAddTo=999");
    let (status, body) = app
        .json(Method::POST, "/registered_students/add", Some(&unknown_class))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "class '999' not found");

    let (_, roster) = app.json(Method::GET, "/registered_students", None).await;
    assert_eq!(roster, json!([]));
}

#[tokio::test]
async fn dropping_a_registration() {
    let app = TestApp::new().await;
    let class = app.create_class("CS208", "Intro to Databases", 30).await;
    let student = app.create_student("Ada", "Lovelace", "2001-05-14").await;

    let add = format!("idOfStudentToAdd={student}&idOfClassToAddTo={class}");
    app.json(Method::POST, "/registered_students/add", Some(&add)).await;

    let unknown = format!("idOfStudentToDelete=999&idOfClassToDeleteFrom={class}");
    let (status, _) = app
        .json(Method::DELETE, "/registered_students/delete", Some(&unknown))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let drop = format!("idOfStudentToDelete={student}&idOfClassToDeleteFrom={class}");
    let (status, roster) = app
        .json(Method::DELETE, "/registered_students/delete", Some(&drop))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(roster, json!([]));
}

#[tokio::test]
async fn filtered_roster_routes() {
    let app = TestApp::new().await;
    seed(&app.db).await.unwrap();

    let (status, body) = app.json(Method::GET, "/students_taking_class/CS208", None).await;
    assert_eq!(status, StatusCode::OK);
    let names: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["student_full_name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Ada Lovelace", "Alan Turing"]);

    let (status, body) = app.json(Method::GET, "/students_taking_class/NOPE1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));

    let ada = StudentRepo::new(&app.db)
        .list()
        .await
        .unwrap()
        .into_iter()
        .find(|s| s.last_name == "Lovelace")
        .unwrap();
    let (status, body) = app
        .json(
            Method::GET,
            &format!("/classes_in_which_student_is_enrolled/{}", ada.id),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    let codes: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["class_code"].as_str().unwrap())
        .collect();
    assert_eq!(codes, vec!["CS208", "CS310"]);

    let (status, _) = app
        .json(Method::GET, "/classes_in_which_student_is_enrolled/4242", None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn class_crud() {
    let app = TestApp::new().await;

    let form = "code=CS208&title=Intro+to+Databases&description=SQL&max_students=30";
    let (status, created) = app.json(Method::POST, "/classes", Some(form)).await;
    assert_eq!(status, StatusCode::CREATED);
    let id = created["id"].as_i64().unwrap();

    let (status, fetched) = app.json(Method::GET, &format!("/classes/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);
    assert_eq!(fetched["title"], "Intro to Databases");
    assert_eq!(fetched["max_students"], 30);

    // duplicate code violates the unique constraint
    let (status, _) = app.json(Method::POST, "/classes", Some(form)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, updated) = app
        .json(
            Method::PUT,
            &format!("/classes/{id}"),
            Some("code=CS208&title=Databases&max_students=40"),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["max_students"], 40);
    assert_eq!(updated["description"], "");

    let (status, _) = app
        .json(
            Method::PUT,
            "/classes/777",
            Some("code=X&title=Y&max_students=1"),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app.send(Method::DELETE, &format!("/classes/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = app.json(Method::DELETE, &format!("/classes/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, listed) = app.json(Method::GET, "/classes", None).await;
    assert_eq!(listed, json!([]));
}

#[tokio::test]
async fn non_numeric_capacity_is_400() {
    let app = TestApp::new().await;
    let (status, body) = app
        .json(
            Method::POST,
            "/classes",
            Some("code=CS208&title=Databases&max_students=thirty"),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "validation_error");
}

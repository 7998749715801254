use axum::{extract::{Path, Query, State}, http::StatusCode, Json};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::info;

use common::pagination::Pagination;
use models::student::{validate_email, validate_name};
use service::errors::StudentError;
use service::student::{Gender, Student};

use crate::{errors::JsonApiError, state::ServerState};

#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListQuery {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct CreateStudentInput {
    pub name: String,
    pub email: String,
    pub gender: Gender,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct UpdateStudentInput {
    pub email: String,
}

/// Response shape; `date_of_birth` and `age` are derived for display.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct StudentView {
    pub id: Option<i64>,
    pub name: String,
    pub email: String,
    pub gender: Gender,
    pub date_of_birth: NaiveDate,
    pub age: u32,
}

impl From<Student> for StudentView {
    fn from(s: Student) -> Self {
        let date_of_birth = s.date_of_birth();
        let age = s.age();
        Self { id: s.id, name: s.name, email: s.email, gender: s.gender, date_of_birth, age }
    }
}

fn views(students: Vec<Student>) -> Vec<StudentView> {
    students.into_iter().map(StudentView::from).collect()
}

#[utoipa::path(
    get, path = "/api/v1/students", tag = "students",
    params(ListQuery),
    responses(
        (status = 200, description = "List OK", body = [crate::openapi::StudentViewDoc]),
        (status = 500, description = "List Failed")
    )
)]
pub async fn list(State(state): State<ServerState>, Query(q): Query<ListQuery>) -> Result<Json<Vec<StudentView>>, JsonApiError> {
    let students = match (q.page, q.per_page) {
        (None, None) => state.students.get_all_students().await?,
        (page, per_page) => {
            let d = Pagination::default();
            let opts = Pagination { page: page.unwrap_or(d.page), per_page: per_page.unwrap_or(d.per_page) };
            state.students.list_students_paginated(opts).await?
        }
    };
    info!(count = students.len(), "list students");
    Ok(Json(views(students)))
}

#[utoipa::path(
    get, path = "/api/v1/students/{id}", tag = "students",
    params(("id" = i64, Path, description = "Student ID")),
    responses(
        (status = 200, description = "OK", body = crate::openapi::StudentViewDoc),
        (status = 404, description = "Not Found")
    )
)]
pub async fn get(State(state): State<ServerState>, Path(id): Path<i64>) -> Result<Json<StudentView>, JsonApiError> {
    let student = state.students.get_student(id).await?;
    Ok(Json(student.into()))
}

#[utoipa::path(
    post, path = "/api/v1/students", tag = "students",
    request_body = crate::openapi::CreateStudentRequest,
    responses(
        (status = 201, description = "Created"),
        (status = 400, description = "Email taken or invalid body"),
        (status = 500, description = "Create Failed")
    )
)]
pub async fn create(State(state): State<ServerState>, Json(input): Json<CreateStudentInput>) -> Result<StatusCode, JsonApiError> {
    validate_name(&input.name).map_err(StudentError::from)?;
    validate_email(&input.email).map_err(StudentError::from)?;

    info!(email = %input.email, "student_create_request");
    state.students.add_student(Student::new(input.name, input.email, input.gender)).await?;
    Ok(StatusCode::CREATED)
}

#[utoipa::path(
    put, path = "/api/v1/students/{id}", tag = "students",
    params(("id" = i64, Path, description = "Student ID")),
    request_body = crate::openapi::UpdateStudentRequest,
    responses(
        (status = 204, description = "Updated"),
        (status = 400, description = "Invalid email"),
        (status = 404, description = "Not Found"),
        (status = 500, description = "Update Failed")
    )
)]
pub async fn update(State(state): State<ServerState>, Path(id): Path<i64>, Json(input): Json<UpdateStudentInput>) -> Result<StatusCode, JsonApiError> {
    validate_email(&input.email).map_err(StudentError::from)?;
    state.students.update_student(id, &input.email).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    delete, path = "/api/v1/students/{id}", tag = "students",
    params(("id" = i64, Path, description = "Student ID")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "Not Found"),
        (status = 500, description = "Delete Failed")
    )
)]
pub async fn delete(State(state): State<ServerState>, Path(id): Path<i64>) -> Result<StatusCode, JsonApiError> {
    state.students.delete_student(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

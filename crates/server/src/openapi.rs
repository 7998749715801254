use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

/// `gender` is `MALE` or `FEMALE`.
#[derive(ToSchema)]
pub struct CreateStudentRequest { pub name: String, pub email: String, pub gender: String }

#[derive(ToSchema)]
pub struct UpdateStudentRequest { pub email: String }

#[derive(ToSchema)]
pub struct StudentViewDoc {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub gender: String,
    /// ISO date, e.g. `2000-01-05`
    pub date_of_birth: String,
    pub age: u32,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::students::list,
        crate::routes::students::get,
        crate::routes::students::create,
        crate::routes::students::update,
        crate::routes::students::delete,
    ),
    components(
        schemas(
            HealthResponse,
            CreateStudentRequest,
            UpdateStudentRequest,
            StudentViewDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "students")
    )
)]
pub struct ApiDoc;

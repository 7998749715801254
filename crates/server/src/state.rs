use std::sync::Arc;

use sea_orm::DatabaseConnection;
use service::student::{repository::StudentRepository, repo::seaorm::SeaOrmStudentRepository, StudentService};

/// Shared handler state; the store is picked at startup.
#[derive(Clone)]
pub struct ServerState {
    pub students: Arc<StudentService<dyn StudentRepository>>,
}

impl ServerState {
    pub fn new(repo: Arc<dyn StudentRepository>) -> Self {
        Self { students: Arc::new(StudentService::new(repo)) }
    }

    pub fn with_db(db: DatabaseConnection) -> Self {
        Self::new(Arc::new(SeaOrmStudentRepository { db }))
    }
}

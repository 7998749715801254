use sea_orm::DatabaseConnection;

use crate::errors::StudentError;
use crate::student::domain::Student;
use crate::student::repository::StudentRepository;

/// Postgres-backed repository. The `student.email` unique key makes a
/// racing duplicate insert fail here as a `Repository` error.
pub struct SeaOrmStudentRepository {
    pub db: DatabaseConnection,
}

#[async_trait::async_trait]
impl StudentRepository for SeaOrmStudentRepository {
    async fn find_all(&self) -> Result<Vec<Student>, StudentError> {
        let rows = models::student::list(&self.db).await?;
        Ok(rows.into_iter().map(Student::from).collect())
    }

    async fn exists_by_id(&self, id: i64) -> Result<bool, StudentError> {
        Ok(models::student::exists(&self.db, id).await?)
    }

    async fn select_exists_email(&self, email: &str) -> Result<bool, StudentError> {
        Ok(models::student::email_exists(&self.db, email).await?)
    }

    async fn save(&self, student: Student) -> Result<Student, StudentError> {
        let saved = match student.id {
            None => models::student::create(&self.db, &student.name, &student.email, student.gender).await?,
            Some(id) => models::student::update(&self.db, id, &student.name, &student.email, student.gender).await?,
        };
        Ok(saved.into())
    }

    async fn delete_by_id(&self, id: i64) -> Result<(), StudentError> {
        models::student::hard_delete(&self.db, id).await?;
        Ok(())
    }

    async fn get_one(&self, id: i64) -> Result<Student, StudentError> {
        models::student::find(&self.db, id)
            .await?
            .map(Student::from)
            .ok_or_else(|| StudentError::Repository(format!("no student row for id {}", id)))
    }

    async fn delete_all(&self) -> Result<(), StudentError> {
        models::student::delete_all(&self.db).await?;
        Ok(())
    }
}

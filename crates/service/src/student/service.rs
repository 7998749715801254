use std::sync::Arc;

use common::pagination::Pagination;
use tracing::{debug, info, instrument, warn};

use super::domain::Student;
use super::repository::StudentRepository;
use crate::errors::StudentError;

/// Student business service independent of web framework.
///
/// Stateless apart from the store handle; each call runs a guard query and
/// at most one write. Neither guard is atomic with its write: two concurrent
/// registrations with the same email can both pass `select_exists_email`.
pub struct StudentService<R: StudentRepository + ?Sized> {
    repo: Arc<R>,
}

impl<R: StudentRepository + ?Sized> StudentService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    /// Every student the store knows about.
    #[instrument(skip(self))]
    pub async fn get_all_students(&self) -> Result<Vec<Student>, StudentError> {
        self.repo.find_all().await
    }

    /// One page of `get_all_students`.
    #[instrument(skip(self))]
    pub async fn list_students_paginated(&self, opts: Pagination) -> Result<Vec<Student>, StudentError> {
        let mut all = self.repo.find_all().await?;
        let (start, end) = opts.bounds(all.len());
        Ok(all.drain(start..end).collect())
    }

    #[instrument(skip(self))]
    pub async fn get_student(&self, id: i64) -> Result<Student, StudentError> {
        if !self.repo.exists_by_id(id).await? {
            return Err(StudentError::NotFound(id));
        }
        self.repo.get_one(id).await
    }

    /// Register a student whose email is not yet taken.
    ///
    /// # Examples
    /// ```
    /// use service::student::{Gender, Student, StudentService, repository::mock::MockStudentRepository};
    /// use std::sync::Arc;
    /// let repo = Arc::new(MockStudentRepository::default());
    /// let svc = StudentService::new(repo.clone());
    /// let jamila = Student::new("Jamila", "jamila@gmail.com", Gender::Female);
    /// tokio_test::block_on(svc.add_student(jamila.clone())).unwrap();
    /// assert_eq!(repo.saved(), vec![jamila.clone()]);
    /// let err = tokio_test::block_on(svc.add_student(jamila)).unwrap_err();
    /// assert_eq!(err.to_string(), "Email jamila@gmail.com taken");
    /// ```
    #[instrument(skip(self, student), fields(email = %student.email))]
    pub async fn add_student(&self, student: Student) -> Result<(), StudentError> {
        if self.repo.select_exists_email(&student.email).await? {
            debug!("email already registered");
            return Err(StudentError::email_taken(&student.email));
        }
        let saved = self.repo.save(student).await?;
        info!(student_id = ?saved.id, email = %saved.email, "student_added");
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn delete_student(&self, id: i64) -> Result<(), StudentError> {
        if !self.repo.exists_by_id(id).await? {
            return Err(StudentError::NotFound(id));
        }
        self.repo.delete_by_id(id).await?;
        info!(student_id = id, "student_deleted");
        Ok(())
    }

    /// Replace a student's email.
    ///
    /// The new address is not checked against other students, so this can
    /// introduce a duplicate that `add_student` would have refused.
    #[instrument(skip(self, email), fields(email = %email))]
    pub async fn update_student(&self, id: i64, email: &str) -> Result<(), StudentError> {
        if !self.repo.exists_by_id(id).await? {
            warn!(student_id = id, "update of unknown student");
            return Err(StudentError::NotFound(id));
        }
        let mut student = self.repo.get_one(id).await?;
        student.email = email.to_string();
        self.repo.save(student).await?;
        info!(student_id = id, "student_email_updated");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::student::domain::Gender;
    use crate::student::repository::mock::{Call, MockStudentRepository, Op};

    fn jamila() -> Student {
        Student::new("Jamila", "jamila@gmail.com", Gender::Female)
    }

    fn service_over(repo: &Arc<MockStudentRepository>) -> StudentService<MockStudentRepository> {
        StudentService::new(Arc::clone(repo))
    }

    fn save_calls(repo: &MockStudentRepository) -> usize {
        repo.count_calls(|c| matches!(c, Call::Save(_)))
    }

    #[tokio::test]
    async fn can_get_all_students() {
        let repo = Arc::new(MockStudentRepository::with_students([
            jamila(),
            Student::new("Alex", "alex@example.com", Gender::Male),
        ]));
        let under_test = service_over(&repo);

        let all = under_test.get_all_students().await.unwrap();

        assert_eq!(repo.calls(), vec![Call::FindAll]);
        assert_eq!(all, repo.snapshot());
        assert_eq!(all.len(), 2);
    }

    #[tokio::test]
    async fn can_add_student() {
        let repo = Arc::new(MockStudentRepository::default());
        let under_test = service_over(&repo);
        let student = jamila();

        under_test.add_student(student.clone()).await.unwrap();

        assert_eq!(
            repo.calls(),
            vec![Call::SelectExistsEmail(student.email.clone()), Call::Save(student.clone())]
        );
        assert_eq!(repo.saved(), vec![student]);
    }

    #[tokio::test]
    async fn will_throw_when_email_is_taken() {
        let repo = Arc::new(MockStudentRepository::with_students([Student::with_id(1, "Other", "jamila@gmail.com", Gender::Male)]));
        let under_test = service_over(&repo);
        let student = Student::with_id(1, "Jamila", "jamila@gmail.com", Gender::Female);

        let err = under_test.add_student(student.clone()).await.unwrap_err();

        assert!(matches!(err, StudentError::BadRequest(_)));
        assert!(err.to_string().contains(&format!("Email {} taken", student.email)));
        assert_eq!(save_calls(&repo), 0);
    }

    #[tokio::test]
    async fn delete_student() {
        let repo = Arc::new(MockStudentRepository::with_students([Student::with_id(10, "Jamila", "jamila@gmail.com", Gender::Female)]));
        let under_test = service_over(&repo);

        under_test.delete_student(10).await.unwrap();

        assert_eq!(repo.count_calls(|c| *c == Call::DeleteById(10)), 1);
        assert!(repo.snapshot().is_empty());
    }

    #[tokio::test]
    async fn will_throw_when_delete_student_not_found() {
        let repo = Arc::new(MockStudentRepository::default());
        let under_test = service_over(&repo);

        let err = under_test.delete_student(10).await.unwrap_err();

        assert!(matches!(err, StudentError::NotFound(10)));
        assert!(err.to_string().contains("Student with id 10 does not exists"));
        assert_eq!(repo.count_calls(|c| matches!(c, Call::DeleteById(_))), 0);
    }

    #[tokio::test]
    async fn can_update_student() {
        let student = Student::with_id(10, "Jamila", "jamila@gmail.com", Gender::Female);
        let repo = Arc::new(MockStudentRepository::with_students([student.clone()]));
        let under_test = service_over(&repo);

        under_test.update_student(10, "npham4533@gmail.com").await.unwrap();

        let expected = Student { email: "npham4533@gmail.com".into(), ..student };
        assert_eq!(
            repo.calls(),
            vec![Call::ExistsById(10), Call::GetOne(10), Call::Save(expected.clone())]
        );
        assert_eq!(repo.snapshot(), vec![expected]);
    }

    #[tokio::test]
    async fn will_throw_when_update_student_not_found() {
        let repo = Arc::new(MockStudentRepository::default());
        let under_test = service_over(&repo);

        let err = under_test.update_student(10, "npham4533@gmail").await.unwrap_err();

        assert!(matches!(err, StudentError::NotFound(10)));
        assert!(err.to_string().contains("Student with id 10 does not exists"));
        assert_eq!(save_calls(&repo), 0);
        assert_eq!(repo.count_calls(|c| matches!(c, Call::GetOne(_))), 0);
    }

    #[tokio::test]
    async fn update_does_not_recheck_email_uniqueness() {
        let repo = Arc::new(MockStudentRepository::with_students([
            Student::with_id(1, "Jamila", "jamila@gmail.com", Gender::Female),
            Student::with_id(2, "Alex", "alex@example.com", Gender::Male),
        ]));
        let under_test = service_over(&repo);

        under_test.update_student(2, "jamila@gmail.com").await.unwrap();

        let emails: Vec<String> = repo.snapshot().into_iter().map(|s| s.email).collect();
        assert_eq!(emails, vec!["jamila@gmail.com", "jamila@gmail.com"]);
        assert_eq!(repo.count_calls(|c| matches!(c, Call::SelectExistsEmail(_))), 0);
    }

    #[tokio::test]
    async fn get_student_requires_existence() {
        let repo = Arc::new(MockStudentRepository::with_students([jamila()]));
        let under_test = service_over(&repo);

        assert_eq!(under_test.get_student(1).await.unwrap().email, "jamila@gmail.com");
        assert!(matches!(under_test.get_student(2).await, Err(StudentError::NotFound(2))));
        assert_eq!(repo.count_calls(|c| *c == Call::GetOne(2)), 0);
    }

    #[tokio::test]
    async fn paginated_listing_slices_in_id_order() {
        let repo = Arc::new(MockStudentRepository::with_students(
            (1..=5).map(|i| Student::new(format!("S{}", i), format!("s{}@example.com", i), Gender::Male)),
        ));
        let under_test = service_over(&repo);

        let page = under_test.list_students_paginated(Pagination { page: 2, per_page: 2 }).await.unwrap();
        let ids: Vec<Option<i64>> = page.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![Some(3), Some(4)]);

        let past_end = under_test.list_students_paginated(Pagination { page: 9, per_page: 2 }).await.unwrap();
        assert!(past_end.is_empty());
    }

    fn is_repository(result: Result<impl std::fmt::Debug, StudentError>, message: &str) -> bool {
        matches!(result, Err(StudentError::Repository(ref m)) if m == message)
    }

    #[tokio::test]
    async fn store_failures_pass_through_untouched() {
        let repo = Arc::new(MockStudentRepository::with_students([Student::with_id(10, "Jamila", "jamila@gmail.com", Gender::Female)]));
        let under_test = service_over(&repo);
        repo.fail_on(Op::FindAll, "find down");
        repo.fail_on(Op::Save, "save down");
        repo.fail_on(Op::DeleteById, "delete down");

        assert!(is_repository(under_test.get_all_students().await, "find down"));
        assert!(is_repository(under_test.add_student(Student::new("Alex", "alex@example.com", Gender::Male)).await, "save down"));
        assert!(is_repository(under_test.delete_student(10).await, "delete down"));
        assert!(is_repository(under_test.update_student(10, "new@example.com").await, "save down"));
        assert_eq!(repo.snapshot()[0].email, "jamila@gmail.com");
    }

    #[tokio::test]
    async fn failing_guard_query_stops_the_write() {
        let repo = Arc::new(MockStudentRepository::with_students([Student::with_id(10, "Jamila", "jamila@gmail.com", Gender::Female)]));
        let under_test = service_over(&repo);
        repo.fail_on(Op::SelectExistsEmail, "email lookup down");
        repo.fail_on(Op::ExistsById, "exists down");

        assert!(is_repository(under_test.add_student(Student::new("Alex", "alex@example.com", Gender::Male)).await, "email lookup down"));
        assert!(is_repository(under_test.delete_student(10).await, "exists down"));
        assert_eq!(save_calls(&repo), 0);
        assert_eq!(repo.count_calls(|c| matches!(c, Call::DeleteById(_))), 0);
    }

    #[tokio::test]
    async fn update_surfaces_get_one_failure_after_existence_check() {
        // row vanishes between exists_by_id and get_one
        let repo = Arc::new(MockStudentRepository::with_students([Student::with_id(10, "Jamila", "jamila@gmail.com", Gender::Female)]));
        let under_test = service_over(&repo);
        repo.fail_on(Op::GetOne, "get down");

        assert!(is_repository(under_test.update_student(10, "new@example.com").await, "get down"));
        assert_eq!(repo.calls(), vec![Call::ExistsById(10), Call::GetOne(10)]);
        assert_eq!(save_calls(&repo), 0);
    }

    #[tokio::test]
    async fn works_behind_a_trait_object() {
        let repo: Arc<dyn StudentRepository> = Arc::new(MockStudentRepository::default());
        let under_test = StudentService::new(repo);

        under_test.add_student(jamila()).await.unwrap();
        assert_eq!(under_test.get_all_students().await.unwrap().len(), 1);
    }
}

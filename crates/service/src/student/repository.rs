use async_trait::async_trait;

use super::domain::Student;
use crate::errors::StudentError;

/// Repository abstraction for student persistence.
#[async_trait]
pub trait StudentRepository: Send + Sync {
    /// Every student, ordered by id.
    async fn find_all(&self) -> Result<Vec<Student>, StudentError>;
    async fn exists_by_id(&self, id: i64) -> Result<bool, StudentError>;
    /// True iff some student has exactly this email.
    async fn select_exists_email(&self, email: &str) -> Result<bool, StudentError>;
    /// Insert when `id` is `None`, otherwise overwrite the row with that id.
    /// Saving with an id that has no row is a repository error.
    async fn save(&self, student: Student) -> Result<Student, StudentError>;
    /// No-op when absent.
    async fn delete_by_id(&self, id: i64) -> Result<(), StudentError>;
    /// Fetch for update. Absence is a repository error, so callers check
    /// `exists_by_id` first.
    async fn get_one(&self, id: i64) -> Result<Student, StudentError>;
    async fn delete_all(&self) -> Result<(), StudentError>;
}

/// In-memory repository for tests and doc examples. Records every call so
/// tests can assert on what the service asked of its store.
///
/// Unlike the Postgres schema it does not enforce unique emails.
pub mod mock {
    use super::*;
    use std::collections::{BTreeMap, HashMap};
    use std::sync::Mutex;

    /// Store operation, used to make one of them fail.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub enum Op {
        FindAll,
        ExistsById,
        SelectExistsEmail,
        Save,
        DeleteById,
        GetOne,
        DeleteAll,
    }

    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum Call {
        FindAll,
        ExistsById(i64),
        SelectExistsEmail(String),
        Save(Student),
        DeleteById(i64),
        GetOne(i64),
        DeleteAll,
    }

    #[derive(Default)]
    struct Table {
        rows: BTreeMap<i64, Student>,
        last_id: i64,
    }

    impl Table {
        fn insert(&mut self, mut student: Student) -> Student {
            let id = match student.id {
                Some(id) => id,
                None => self.last_id + 1,
            };
            self.last_id = self.last_id.max(id);
            student.id = Some(id);
            self.rows.insert(id, student.clone());
            student
        }
    }

    #[derive(Default)]
    pub struct MockStudentRepository {
        table: Mutex<Table>,
        calls: Mutex<Vec<Call>>,
        failures: Mutex<HashMap<Op, String>>,
    }

    impl MockStudentRepository {
        /// Pre-populate without recording calls.
        pub fn with_students(students: impl IntoIterator<Item = Student>) -> Self {
            let repo = Self::default();
            {
                let mut table = repo.table.lock().unwrap();
                for s in students {
                    table.insert(s);
                }
            }
            repo
        }

        pub fn calls(&self) -> Vec<Call> {
            self.calls.lock().unwrap().clone()
        }

        /// How many recorded calls satisfy `pred`.
        pub fn count_calls(&self, pred: impl Fn(&Call) -> bool) -> usize {
            self.calls.lock().unwrap().iter().filter(|c| pred(c)).count()
        }

        /// Arguments of every `save` call, in order.
        pub fn saved(&self) -> Vec<Student> {
            self.calls
                .lock()
                .unwrap()
                .iter()
                .filter_map(|c| match c {
                    Call::Save(s) => Some(s.clone()),
                    _ => None,
                })
                .collect()
        }

        pub fn clear_calls(&self) {
            self.calls.lock().unwrap().clear();
        }

        /// Current rows, bypassing call recording.
        pub fn snapshot(&self) -> Vec<Student> {
            self.table.lock().unwrap().rows.values().cloned().collect()
        }

        /// Make every later `op` call return `Repository(message)`. The call
        /// is still recorded.
        pub fn fail_on(&self, op: Op, message: impl Into<String>) {
            self.failures.lock().unwrap().insert(op, message.into());
        }

        fn record(&self, call: Call, op: Op) -> Result<(), StudentError> {
            self.calls.lock().unwrap().push(call);
            match self.failures.lock().unwrap().get(&op) {
                Some(message) => Err(StudentError::Repository(message.clone())),
                None => Ok(()),
            }
        }
    }

    #[async_trait]
    impl StudentRepository for MockStudentRepository {
        async fn find_all(&self) -> Result<Vec<Student>, StudentError> {
            self.record(Call::FindAll, Op::FindAll)?;
            Ok(self.snapshot())
        }

        async fn exists_by_id(&self, id: i64) -> Result<bool, StudentError> {
            self.record(Call::ExistsById(id), Op::ExistsById)?;
            Ok(self.table.lock().unwrap().rows.contains_key(&id))
        }

        async fn select_exists_email(&self, email: &str) -> Result<bool, StudentError> {
            self.record(Call::SelectExistsEmail(email.to_string()), Op::SelectExistsEmail)?;
            Ok(self.table.lock().unwrap().rows.values().any(|s| s.email == email))
        }

        async fn save(&self, student: Student) -> Result<Student, StudentError> {
            self.record(Call::Save(student.clone()), Op::Save)?;
            let mut table = self.table.lock().unwrap();
            if let Some(id) = student.id {
                if !table.rows.contains_key(&id) {
                    return Err(StudentError::Repository(format!("no student row for id {}", id)));
                }
            }
            Ok(table.insert(student))
        }

        async fn delete_by_id(&self, id: i64) -> Result<(), StudentError> {
            self.record(Call::DeleteById(id), Op::DeleteById)?;
            self.table.lock().unwrap().rows.remove(&id);
            Ok(())
        }

        async fn get_one(&self, id: i64) -> Result<Student, StudentError> {
            self.record(Call::GetOne(id), Op::GetOne)?;
            self.table
                .lock()
                .unwrap()
                .rows
                .get(&id)
                .cloned()
                .ok_or_else(|| StudentError::Repository(format!("no student row for id {}", id)))
        }

        async fn delete_all(&self) -> Result<(), StudentError> {
            self.record(Call::DeleteAll, Op::DeleteAll)?;
            self.table.lock().unwrap().rows.clear();
            Ok(())
        }
    }
}

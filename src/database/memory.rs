use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use super::UserStore;
use crate::models::{RegistrationInput, UserRecord};
use crate::utils::StoreError;

/// In-process stand-in for the users collection, enforcing the same
/// (email, phone) uniqueness rule.
#[derive(Default)]
pub struct MemoryStore {
    records: Mutex<Vec<UserRecord>>,
    inserts: AtomicUsize,
    unavailable: bool,
}

impl MemoryStore {
    /// A store whose every operation fails as if the server were down.
    pub fn unavailable() -> Self {
        Self {
            unavailable: true,
            ..Self::default()
        }
    }

    /// Number of insert attempts that reached the store.
    pub fn insert_calls(&self) -> usize {
        self.inserts.load(Ordering::SeqCst)
    }

    fn check(&self) -> Result<(), StoreError> {
        if self.unavailable {
            return Err(StoreError::Unavailable("server selection timeout".to_string()));
        }
        Ok(())
    }

    fn find(&self, matches: impl Fn(&UserRecord) -> bool, lookup: &str) -> Result<UserRecord, StoreError> {
        self.check()?;
        self.records
            .lock()
            .unwrap()
            .iter()
            .find(|record| matches(record))
            .cloned()
            .ok_or_else(|| StoreError::NotFound(format!("no user matches {}", lookup)))
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn insert(&self, input: &RegistrationInput) -> Result<String, StoreError> {
        self.inserts.fetch_add(1, Ordering::SeqCst);
        self.check()?;

        let mut records = self.records.lock().unwrap();
        if records
            .iter()
            .any(|r| r.email == input.email && r.phone == input.phone)
        {
            return Err(StoreError::DuplicateKey(format!(
                "E11000 duplicate key error collection: users index: email_1_phone_1 dup key: {{ email: \"{}\", phone: \"{}\" }}",
                input.email, input.phone
            )));
        }

        let id = ObjectId::new().to_hex();
        records.push(UserRecord::from_input(id.clone(), input.clone()));
        Ok(id)
    }

    async fn get_by_id(&self, id: &str) -> Result<UserRecord, StoreError> {
        self.find(|r| r.id == id, "id")
    }

    async fn get_by_email(&self, email: &str) -> Result<UserRecord, StoreError> {
        self.find(|r| r.email == email, "email")
    }

    async fn get_by_phone(&self, phone: &str) -> Result<UserRecord, StoreError> {
        self.find(|r| r.phone == phone, "phone")
    }

    async fn list_all(&self) -> Result<Vec<UserRecord>, StoreError> {
        self.check()?;
        Ok(self.records.lock().unwrap().clone())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.check()
    }
}

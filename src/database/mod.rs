use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId, Document};
use mongodb::error::{ErrorKind, WriteFailure};
use mongodb::options::{ClientOptions, IndexOptions};
use mongodb::{Client, Collection, Database, IndexModel};
use std::future::IntoFuture;
use std::time::Duration;

use crate::config::MongoConfig;
use crate::models::{RegistrationInput, UserRecord};
use crate::utils::StoreError;

#[cfg(test)]
pub mod memory;

const USERS_COLLECTION: &str = "users";

/// Every storage call gets its own deadline, independent of the caller.
const OPERATION_TIMEOUT: Duration = Duration::from_secs(10);

const DUPLICATE_KEY_CODE: i32 = 11000;

/// Persistence seam for registration records.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Inserts a validated registration and returns the generated id.
    async fn insert(&self, input: &RegistrationInput) -> Result<String, StoreError>;

    async fn get_by_id(&self, id: &str) -> Result<UserRecord, StoreError>;

    async fn get_by_email(&self, email: &str) -> Result<UserRecord, StoreError>;

    async fn get_by_phone(&self, phone: &str) -> Result<UserRecord, StoreError>;

    async fn list_all(&self) -> Result<Vec<UserRecord>, StoreError>;

    async fn ping(&self) -> Result<(), StoreError>;
}

#[derive(Clone)]
pub struct MongoDB {
    client: Client,
    db: Database,
}

impl MongoDB {
    /// Connects, pings and makes sure the (email, phone) unique index exists.
    pub async fn new(config: &MongoConfig) -> Result<Self, StoreError> {
        let uri = config.uri();
        let mut client_options = ClientOptions::parse(uri.as_str()).await.map_err(classify)?;

        client_options.app_name = Some("linuxdiary-registration".to_string());
        client_options.max_pool_size = Some(20);
        client_options.min_pool_size = Some(2);
        client_options.max_idle_time = Some(Duration::from_secs(300));
        client_options.connect_timeout = Some(Duration::from_secs(5));
        client_options.server_selection_timeout = Some(Duration::from_secs(5));

        let client = Client::with_options(client_options).map_err(classify)?;
        let db = client.database(&config.database);

        let mongodb = Self { client, db };
        mongodb.ping().await?;
        mongodb.ensure_indexes().await?;

        Ok(mongodb)
    }

    /// Idempotent: re-creating an identical index is a no-op on the server.
    async fn ensure_indexes(&self) -> Result<(), StoreError> {
        log::info!("🔧 Creating database indexes...");

        let index = IndexModel::builder()
            .keys(doc! { "email": 1, "phone": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();

        bounded(self.collection::<Document>().create_index(index))
            .await
            .map_err(|e| {
                log::error!("❌ Failed to create index users(email, phone): {}", e);
                e
            })?;

        log::info!("   ✅ Index ready: users(email, phone) unique");
        Ok(())
    }

    fn collection<T: Send + Sync>(&self) -> Collection<T> {
        self.db.collection(USERS_COLLECTION)
    }

    async fn find_one_by(&self, filter: Document, lookup: &str) -> Result<UserRecord, StoreError> {
        bounded(self.collection::<UserRecord>().find_one(filter))
            .await
            .map_err(|e| {
                log::error!("❌ Error getting user by {}: {}", lookup, e);
                e
            })?
            .ok_or_else(|| StoreError::NotFound(format!("no user matches {}", lookup)))
    }

    /// Closes the connection pool.
    pub async fn close(self) {
        self.client.shutdown().await;
        log::info!("🔌 MongoDB connection closed");
    }
}

#[async_trait]
impl UserStore for MongoDB {
    async fn insert(&self, input: &RegistrationInput) -> Result<String, StoreError> {
        let inserted = bounded(self.collection::<RegistrationInput>().insert_one(input))
            .await
            .map_err(|e| {
                log::error!("❌ Error creating user: {}", e);
                e
            })?;

        inserted
            .inserted_id
            .as_object_id()
            .map(|oid| oid.to_hex())
            .ok_or_else(|| StoreError::Other("inserted id is not an ObjectId".to_string()))
    }

    async fn get_by_id(&self, id: &str) -> Result<UserRecord, StoreError> {
        // A malformed id can never match a stored document.
        let oid = ObjectId::parse_str(id)
            .map_err(|_| StoreError::NotFound(format!("invalid user id {}", id)))?;

        self.find_one_by(doc! { "_id": oid }, "id").await
    }

    async fn get_by_email(&self, email: &str) -> Result<UserRecord, StoreError> {
        self.find_one_by(doc! { "email": email }, "email").await
    }

    async fn get_by_phone(&self, phone: &str) -> Result<UserRecord, StoreError> {
        self.find_one_by(doc! { "phone": phone }, "phone").await
    }

    async fn list_all(&self) -> Result<Vec<UserRecord>, StoreError> {
        let users = self.collection::<UserRecord>();

        bounded(async move {
            let cursor = users.find(doc! {}).await?;
            cursor.try_collect::<Vec<_>>().await
        })
        .await
        .map_err(|e| {
            log::error!("❌ Error getting users: {}", e);
            e
        })
    }

    async fn ping(&self) -> Result<(), StoreError> {
        bounded(self.db.run_command(doc! { "ping": 1 })).await.map(|_| ())
    }
}

/// Runs a driver operation under `OPERATION_TIMEOUT`.
async fn bounded<F, T>(operation: F) -> Result<T, StoreError>
where
    F: IntoFuture<Output = mongodb::error::Result<T>>,
{
    match tokio::time::timeout(OPERATION_TIMEOUT, operation.into_future()).await {
        Ok(result) => result.map_err(classify),
        Err(_) => Err(StoreError::Timeout),
    }
}

fn classify(err: mongodb::error::Error) -> StoreError {
    match err.kind.as_ref() {
        ErrorKind::Write(WriteFailure::WriteError(write_error))
            if write_error.code == DUPLICATE_KEY_CODE =>
        {
            StoreError::DuplicateKey(write_error.message.clone())
        }
        ErrorKind::Command(command_error) if command_error.code == DUPLICATE_KEY_CODE => {
            StoreError::DuplicateKey(command_error.message.clone())
        }
        ErrorKind::ServerSelection { .. }
        | ErrorKind::Io(_)
        | ErrorKind::ConnectionPoolCleared { .. }
        | ErrorKind::DnsResolve { .. } => StoreError::Unavailable(err.to_string()),
        _ => StoreError::Other(err.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;

    fn sample(email: &str, phone: &str) -> RegistrationInput {
        RegistrationInput {
            name: "Tux".to_string(),
            email: email.to_string(),
            phone: phone.to_string(),
            college_name: "Walchand College of Engineering".to_string(),
            year_of_study: "3".to_string(),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_operations_time_out_after_fixed_deadline() {
        let pending = tokio::spawn(bounded(std::future::pending::<mongodb::error::Result<()>>()));
        // Let the task register its deadline before moving the clock.
        tokio::task::yield_now().await;

        tokio::time::advance(OPERATION_TIMEOUT - Duration::from_millis(1)).await;
        tokio::task::yield_now().await;
        assert!(!pending.is_finished());

        tokio::time::advance(Duration::from_millis(2)).await;
        assert_eq!(pending.await.unwrap(), Err(StoreError::Timeout));
    }

    #[tokio::test(start_paused = true)]
    async fn test_completed_operations_pass_through() {
        let result = bounded(async { Ok::<_, mongodb::error::Error>(7) }).await;
        assert_eq!(result, Ok(7));
    }

    #[tokio::test]
    #[ignore] // Requires MongoDB to be running
    async fn test_mongodb_insert_and_lookup() {
        dotenv::dotenv().ok();

        let config = AppConfig::from_env().unwrap();
        let store = MongoDB::new(&config.mongo).await.unwrap();

        let suffix = ObjectId::new().to_hex();
        let input = sample(&format!("{}@example.com", suffix), &suffix);

        let id = store.insert(&input).await.unwrap();
        assert!(!id.is_empty());

        let by_email = store.get_by_email(&input.email).await.unwrap();
        assert_eq!(by_email.id, id);
        assert_eq!(by_email.college_name, input.college_name);

        let by_id = store.get_by_id(&id).await.unwrap();
        assert_eq!(by_id.phone, input.phone);

        let duplicate = store.insert(&input).await;
        assert!(matches!(duplicate, Err(StoreError::DuplicateKey(_))));
    }

    #[tokio::test]
    #[ignore] // Requires MongoDB to be running
    async fn test_mongodb_lookup_misses() {
        dotenv::dotenv().ok();

        let config = AppConfig::from_env().unwrap();
        let store = MongoDB::new(&config.mongo).await.unwrap();

        assert!(matches!(
            store.get_by_id("not-an-object-id").await,
            Err(StoreError::NotFound(_))
        ));
        assert!(matches!(
            store.get_by_phone(&ObjectId::new().to_hex()).await,
            Err(StoreError::NotFound(_))
        ));
    }
}

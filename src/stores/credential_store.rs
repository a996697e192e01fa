use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set, SqlErr};
use uuid::Uuid;

use crate::errors::internal::CredentialError;
use crate::errors::InternalError;
use crate::types::db::user::{self, ActiveModel, Entity as Users};
use crate::types::internal::{User, UserDraft};

/// Persistence for user records
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Insert a new user; a taken email fails with `CredentialError::DuplicateEmail`
    async fn insert(&self, draft: UserDraft) -> Result<User, InternalError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, InternalError>;
}

/// SeaORM-backed credential store; email uniqueness is enforced by the unique index
pub struct DbCredentialStore {
    db: DatabaseConnection,
}

impl DbCredentialStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CredentialStore for DbCredentialStore {
    async fn insert(&self, draft: UserDraft) -> Result<User, InternalError> {
        let now = Utc::now().timestamp();
        let email = draft.email.clone();

        let new_user = ActiveModel {
            id: Set(Uuid::new_v4().to_string()),
            name: Set(draft.name),
            email: Set(draft.email),
            password_hash: Set(draft.password_hash),
            status: Set(draft.status.as_str().to_string()),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let model = new_user.insert(&self.db).await.map_err(|e| {
            if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) {
                InternalError::from(CredentialError::duplicate_email(email))
            } else {
                InternalError::database("insert_user", e)
            }
        })?;

        User::try_from(model)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, InternalError> {
        Users::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(|e| InternalError::database("find_user_by_email", e))?
            .map(User::try_from)
            .transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorKind;
    use crate::test::utils::setup_test_db;
    use crate::types::internal::UserStatus;

    fn draft(email: &str) -> UserDraft {
        UserDraft {
            name: "Alice".to_string(),
            email: email.to_string(),
            password_hash: "$argon2id$v=19$m=1024,t=1,p=1$c2FsdA$aGFzaA".to_string(),
            status: UserStatus::Free,
        }
    }

    #[tokio::test]
    async fn test_insert_assigns_id_and_timestamps() {
        let db = setup_test_db().await;
        let store = DbCredentialStore::new(db);

        let user = store.insert(draft("alice@example.com")).await.unwrap();

        assert!(Uuid::parse_str(&user.id).is_ok());
        assert_eq!(user.email, "alice@example.com");
        assert_eq!(user.status, UserStatus::Free);
        assert!(user.created_at > 0);
        assert_eq!(user.created_at, user.updated_at);
    }

    #[tokio::test]
    async fn test_find_by_email_round_trips_status() {
        let db = setup_test_db().await;
        let store = DbCredentialStore::new(db);
        let mut premium = draft("bob@example.com");
        premium.status = UserStatus::Premium;

        let inserted = store.insert(premium).await.unwrap();
        let found = store.find_by_email("bob@example.com").await.unwrap().unwrap();

        assert_eq!(found, inserted);
        assert_eq!(found.status, UserStatus::Premium);
    }

    #[tokio::test]
    async fn test_find_by_email_absent() {
        let db = setup_test_db().await;
        let store = DbCredentialStore::new(db);

        assert!(store.find_by_email("nobody@example.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected() {
        let db = setup_test_db().await;
        let store = DbCredentialStore::new(db);

        store.insert(draft("dup@example.com")).await.unwrap();
        let err = store.insert(draft("dup@example.com")).await.unwrap_err();

        assert!(matches!(
            err,
            InternalError::Credential(CredentialError::DuplicateEmail { ref email }) if email == "dup@example.com"
        ));
        assert_eq!(err.kind(), ErrorKind::Validation);
    }
}

use std::sync::Arc;

use bookhouse_db::{Store, StoreError};

use super::models::{User, UserDocument};

pub struct UserRepository {
    store: Arc<dyn Store<UserDocument>>,
}

impl UserRepository {
    pub fn new(store: Arc<dyn Store<UserDocument>>) -> Self {
        Self { store }
    }

    /// Insert `document` unless its email is taken; `Ok(None)` when it is.
    ///
    /// The lookup and the insert are separate store calls, so two concurrent
    /// registrations for one email can both succeed.
    pub async fn check_and_create(
        &self,
        document: UserDocument,
    ) -> Result<Option<User>, StoreError> {
        let existing = self.store.find_all().await?;
        if existing
            .iter()
            .any(|user| user.document.email == document.email)
        {
            return Ok(None);
        }

        self.store.insert(document).await.map(Some)
    }
}

use thiserror::Error;
use time::OffsetDateTime;

use super::{
    models::{User, UserDocument, UserRegistration},
    repository::UserRepository,
};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum UserError {
    #[error("{0}")]
    Policy(String),
    #[error("{0}")]
    Store(String),
}

pub struct UserService {
    repository: UserRepository,
}

impl UserService {
    pub fn new(repository: UserRepository) -> Self {
        Self { repository }
    }

    pub async fn check_and_create(&self, registration: UserRegistration) -> Result<User, UserError> {
        if registration.has_blank_field() {
            return Err(policy_failure("All details are needed to create the user"));
        }
        if registration.password != registration.confirm_password {
            return Err(policy_failure("Passwords do not match"));
        }

        let document = UserDocument::from_registration(&registration, OffsetDateTime::now_utc());
        match self.repository.check_and_create(document).await {
            Ok(Some(user)) => Ok(user),
            Ok(None) => Err(policy_failure("User already registered")),
            Err(err) => {
                tracing::error!(error = %err, "user store operation failed");
                Err(UserError::Store(err.to_string()))
            }
        }
    }
}

fn policy_failure(message: &str) -> UserError {
    tracing::error!("{}", message);
    UserError::Policy(message.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use bookhouse_db::MemoryStore;
    use std::sync::Arc;

    fn service() -> UserService {
        UserService::new(UserRepository::new(Arc::new(MemoryStore::new())))
    }

    fn registration(email: &str) -> UserRegistration {
        UserRegistration {
            name: "Grace".to_string(),
            email: email.to_string(),
            password: "cobol-rules".to_string(),
            confirm_password: "cobol-rules".to_string(),
        }
    }

    #[tokio::test]
    async fn test_registers_user() {
        let user = service()
            .check_and_create(registration("grace@navy.mil"))
            .await
            .unwrap();
        assert_eq!(user.document.email, "grace@navy.mil");
    }

    #[tokio::test]
    async fn test_rejects_empty_registration() {
        assert_eq!(
            service()
                .check_and_create(UserRegistration::default())
                .await,
            Err(UserError::Policy(
                "All details are needed to create the user".to_string()
            ))
        );
    }

    #[tokio::test]
    async fn test_rejects_mismatched_passwords() {
        let mut form = registration("grace@navy.mil");
        form.confirm_password = "other".to_string();

        assert_eq!(
            service().check_and_create(form).await,
            Err(UserError::Policy("Passwords do not match".to_string()))
        );
    }

    #[tokio::test]
    async fn test_rejects_duplicate_email_case_insensitively() {
        let service = service();
        service
            .check_and_create(registration("grace@navy.mil"))
            .await
            .unwrap();

        assert_eq!(
            service
                .check_and_create(registration("Grace@Navy.mil"))
                .await,
            Err(UserError::Policy("User already registered".to_string()))
        );
    }
}

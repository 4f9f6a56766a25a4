//! Authenticated-user profile logic

use crate::domain::UserDto;
use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::repository::UserRepository;
use std::sync::Arc;

pub struct UserService<R: UserRepository> {
    repo: Arc<R>,
}

impl<R: UserRepository> UserService<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Profile of the authenticated principal. A valid token whose user no
    /// longer exists is treated as an authentication failure, not a 404.
    pub async fn get_me(&self, principal: &AuthUser) -> Result<UserDto> {
        let user = self
            .repo
            .find_by_id(principal.id)
            .await?
            .ok_or_else(|| AppError::Unauthorized("User not found".to_string()))?;

        Ok(UserDto::from(user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Role, User};
    use crate::repository::user::MockUserRepository;
    use mockall::predicate::*;

    fn principal() -> AuthUser {
        AuthUser {
            id: 1,
            email: "maria@gmail.com".to_string(),
            roles: vec![Role::Client],
        }
    }

    #[tokio::test]
    async fn test_get_me_returns_profile() {
        let mut mock = MockUserRepository::new();
        mock.expect_find_by_id().with(eq(1)).returning(|_| {
            Ok(Some(User {
                id: 1,
                name: "Maria Brown".to_string(),
                email: "maria@gmail.com".to_string(),
                roles: vec![Role::Client],
            }))
        });

        let service = UserService::new(Arc::new(mock));
        let dto = service.get_me(&principal()).await.unwrap();

        assert_eq!(dto.id, 1);
        assert_eq!(dto.email, "maria@gmail.com");
        assert_eq!(dto.roles, vec![Role::Client]);
    }

    #[tokio::test]
    async fn test_get_me_rejects_vanished_user() {
        let mut mock = MockUserRepository::new();
        mock.expect_find_by_id().returning(|_| Ok(None));

        let service = UserService::new(Arc::new(mock));
        let err = service.get_me(&principal()).await.unwrap_err();

        assert!(matches!(err, AppError::Unauthorized(_)));
    }
}

//! User repository

use crate::domain::{Role, User};
use crate::error::Result;
use async_trait::async_trait;
use sqlx::{FromRow, MySqlPool};
use std::str::FromStr;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: i64) -> Result<Option<User>>;
}

#[derive(Debug, FromRow)]
struct UserRow {
    id: i64,
    name: String,
    email: String,
}

pub struct UserRepositoryImpl {
    pool: MySqlPool,
}

impl UserRepositoryImpl {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for UserRepositoryImpl {
    async fn find_by_id(&self, id: i64) -> Result<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, name, email
            FROM users
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let authorities: Vec<String> =
            sqlx::query_scalar("SELECT authority FROM user_roles WHERE user_id = ? ORDER BY authority")
                .bind(row.id)
                .fetch_all(&self.pool)
                .await?;

        let roles = authorities
            .iter()
            .map(|a| Role::from_str(a).map_err(|e| anyhow::anyhow!(e)))
            .collect::<std::result::Result<Vec<Role>, _>>()?;

        Ok(Some(User {
            id: row.id,
            name: row.name,
            email: row.email,
            roles,
        }))
    }
}

//! User domain model and role taxonomy

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Access role carried in the token claims and mirrored in `user_roles`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Client,
    Admin,
}

impl Role {
    /// Authority string as stored in the `user_roles` table
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Client => "CLIENT",
            Role::Admin => "ADMIN",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CLIENT" => Ok(Role::Client),
            "ADMIN" => Ok(Role::Admin),
            other => Err(format!("unknown role: {other}")),
        }
    }
}

/// User entity
///
/// Registration is owned by the external auth collaborator; during request
/// handling this record is read-only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub roles: Vec<Role>,
}

impl User {
    pub fn has_role(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }
}

/// Wire-format projection of a user (`GET /users/me`)
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserDto {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub roles: Vec<Role>,
}

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            roles: user.roles,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_role_round_trip() {
        assert_eq!(Role::from_str("ADMIN").unwrap(), Role::Admin);
        assert_eq!(Role::from_str("CLIENT").unwrap(), Role::Client);
        assert!(Role::from_str("MANAGER").is_err());
        assert_eq!(Role::Admin.as_str(), "ADMIN");
    }

    #[test]
    fn test_role_serde_uses_screaming_snake_case() {
        let json = serde_json::to_string(&Role::Client).unwrap();
        assert_eq!(json, r#""CLIENT""#);
    }

    #[test]
    fn test_has_role() {
        let user = User {
            id: 1,
            name: "Maria Brown".to_string(),
            email: "maria@gmail.com".to_string(),
            roles: vec![Role::Client],
        };
        assert!(user.has_role(Role::Client));
        assert!(!user.has_role(Role::Admin));
    }
}

//! Roles of the routing surface, resolved once at route entry.

use serde::{Deserialize, Serialize};

/// Authenticated user as returned by `/auth/me` and `/auth/login`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub role: String,
    #[serde(default)]
    pub jabatan: Option<String>,
    #[serde(default)]
    pub bidang: Option<String>,
}

impl SessionUser {
    /// Resolved role, or `None` for a role string this client does not know.
    pub fn role(&self) -> Option<Role> {
        Role::parse(&self.role)
    }
}

/// One of the four dashboards.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    Admin,
    Sekretaris,
    /// Department head; the backend calls this role `user`.
    Kabid,
    Staff,
}

impl Role {
    pub const ALL: [Role; 4] = [Role::Admin, Role::Sekretaris, Role::Kabid, Role::Staff];

    /// Parse the backend role string.
    pub fn parse(raw: &str) -> Option<Role> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "admin" => Some(Role::Admin),
            "sekretaris" => Some(Role::Sekretaris),
            "user" | "kabid" => Some(Role::Kabid),
            "staff" => Some(Role::Staff),
            _ => None,
        }
    }

    /// Role string as the backend expects it.
    pub fn as_backend_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Sekretaris => "sekretaris",
            Role::Kabid => "user",
            Role::Staff => "staff",
        }
    }

    /// Home path of this role's dashboard.
    pub fn home_path(&self) -> &'static str {
        match self {
            Role::Admin => "/admin",
            Role::Sekretaris => "/sekretaris",
            Role::Kabid => "/",
            Role::Staff => "/staff",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Role::Admin => "Admin",
            Role::Sekretaris => "Sekretaris",
            Role::Kabid => "Kepala Bidang",
            Role::Staff => "Staff",
        }
    }
}

/// Outcome of entering a role-gated route.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Access {
    Granted,
    /// Not signed in.
    Login,
    /// Signed in with another role.
    Unauthorized,
}

/// Decide whether `user` may enter a route gated on `required`.
pub fn authorize(user: Option<&SessionUser>, required: Role) -> Access {
    match user {
        None => Access::Login,
        Some(u) if u.role() == Some(required) => Access::Granted,
        Some(_) => Access::Unauthorized,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(role: &str) -> SessionUser {
        SessionUser {
            id: 1,
            name: "Budi".to_string(),
            email: "budi@bappeda.go.id".to_string(),
            role: role.to_string(),
            jabatan: None,
            bidang: None,
        }
    }

    #[test]
    fn test_parse_backend_roles() {
        assert_eq!(Role::parse("admin"), Some(Role::Admin));
        assert_eq!(Role::parse("Sekretaris"), Some(Role::Sekretaris));
        assert_eq!(Role::parse("user"), Some(Role::Kabid));
        assert_eq!(Role::parse(" staff "), Some(Role::Staff));
        assert_eq!(Role::parse("root"), None);
        for role in Role::ALL {
            assert_eq!(Role::parse(role.as_backend_str()), Some(role));
        }
    }

    #[test]
    fn test_authorize() {
        assert_eq!(authorize(None, Role::Admin), Access::Login);
        assert_eq!(authorize(Some(&user("admin")), Role::Admin), Access::Granted);
        assert_eq!(authorize(Some(&user("user")), Role::Kabid), Access::Granted);
        assert_eq!(
            authorize(Some(&user("staff")), Role::Admin),
            Access::Unauthorized
        );
        assert_eq!(
            authorize(Some(&user("unknown")), Role::Staff),
            Access::Unauthorized
        );
    }
}

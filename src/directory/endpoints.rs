//! Catalogue of remote operations exposed by the user directory.
//!
//! Each variant declares its verb, path, whether the ambient bearer token is
//! attached and which cache tags it provides or invalidates.

use std::fmt::{Display, Formatter};

use reqwest::Method;

use crate::domain::types::UserId;

/// Label attached to cached query results.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CacheTag {
    pub kind: &'static str,
    pub id: &'static str,
}

/// Every page of the user listing.
pub const USER_LIST: CacheTag = CacheTag {
    kind: "User",
    id: "LIST",
};

impl Display for CacheTag {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.id == "LIST" {
            write!(f, "{} list", self.kind)
        } else {
            write!(f, "{} {}", self.kind, self.id)
        }
    }
}

/// How the `Authorization` header is populated for an endpoint.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuthHeader {
    /// Bearer token attached when the caller holds one.
    Ambient,
    /// Explicit empty header so no stale credential leaks into the call.
    Suppressed,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Endpoint {
    Login,
    Register,
    Logout,
    RefreshToken,
    ReactivateUser(UserId),
    GetCurrentUser,
    GetUsers,
}

impl Endpoint {
    pub fn name(&self) -> &'static str {
        match self {
            Endpoint::Login => "login",
            Endpoint::Register => "register",
            Endpoint::Logout => "logout",
            Endpoint::RefreshToken => "refreshToken",
            Endpoint::ReactivateUser(_) => "reactivateUser",
            Endpoint::GetCurrentUser => "getCurrentUser",
            Endpoint::GetUsers => "getUsers",
        }
    }

    pub fn method(&self) -> Method {
        match self {
            Endpoint::GetCurrentUser | Endpoint::GetUsers => Method::GET,
            _ => Method::POST,
        }
    }

    pub fn path(&self) -> String {
        match self {
            Endpoint::Login => "/auth/login".to_string(),
            Endpoint::Register => "/auth/register".to_string(),
            Endpoint::Logout => "/auth/logout".to_string(),
            Endpoint::RefreshToken => "/auth/refresh".to_string(),
            Endpoint::ReactivateUser(user_id) => {
                format!("/auth/reactivate/{}", urlencoding::encode(user_id.as_str()))
            }
            Endpoint::GetCurrentUser => "/users/me".to_string(),
            // TODO: confirm the listing route with the directory team, it is
            // not part of the published auth contract.
            Endpoint::GetUsers => "/users".to_string(),
        }
    }

    pub fn auth(&self) -> AuthHeader {
        match self {
            Endpoint::Login | Endpoint::Register => AuthHeader::Suppressed,
            _ => AuthHeader::Ambient,
        }
    }

    /// Tags attached to results of this query.
    pub fn provides(&self) -> &'static [CacheTag] {
        match self {
            Endpoint::GetUsers => &[USER_LIST],
            _ => &[],
        }
    }

    /// Tags marked stale once this mutation succeeds.
    pub fn invalidates(&self) -> &'static [CacheTag] {
        match self {
            Endpoint::ReactivateUser(_) => &[USER_LIST],
            _ => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reactivate() -> Endpoint {
        Endpoint::ReactivateUser(UserId::new("u-7").unwrap())
    }

    #[test]
    fn routes_match_directory_contract() {
        let table = [
            (Endpoint::Login, Method::POST, "/auth/login"),
            (Endpoint::Register, Method::POST, "/auth/register"),
            (Endpoint::Logout, Method::POST, "/auth/logout"),
            (Endpoint::RefreshToken, Method::POST, "/auth/refresh"),
            (reactivate(), Method::POST, "/auth/reactivate/u-7"),
            (Endpoint::GetCurrentUser, Method::GET, "/users/me"),
            (Endpoint::GetUsers, Method::GET, "/users"),
        ];

        for (endpoint, method, path) in table {
            assert_eq!(endpoint.method(), method, "{}", endpoint.name());
            assert_eq!(endpoint.path(), path, "{}", endpoint.name());
        }
    }

    #[test]
    fn reactivate_path_escapes_the_user_id() {
        let endpoint = Endpoint::ReactivateUser(UserId::new("a b/c?d").unwrap());

        assert_eq!(endpoint.path(), "/auth/reactivate/a%20b%2Fc%3Fd");
    }

    #[test]
    fn only_login_and_register_suppress_auth() {
        assert_eq!(Endpoint::Login.auth(), AuthHeader::Suppressed);
        assert_eq!(Endpoint::Register.auth(), AuthHeader::Suppressed);
        assert_eq!(Endpoint::Logout.auth(), AuthHeader::Ambient);
        assert_eq!(reactivate().auth(), AuthHeader::Ambient);
        assert_eq!(Endpoint::GetUsers.auth(), AuthHeader::Ambient);
    }

    #[test]
    fn reactivate_invalidates_what_get_users_provides() {
        assert_eq!(reactivate().invalidates(), &[USER_LIST]);
        assert_eq!(Endpoint::GetUsers.provides(), &[USER_LIST]);
        assert!(Endpoint::GetCurrentUser.provides().is_empty());
        assert!(Endpoint::Login.invalidates().is_empty());
    }

    #[test]
    fn user_list_tag_display() {
        assert_eq!(USER_LIST.to_string(), "User list");
    }
}

//! Client for the remote user directory.

use async_trait::async_trait;
use serde::Serialize;

use crate::domain::auth::{
    AuthResponse, CurrentUser, LoginRequest, LogoutRequest, ReactivateResponse,
    RefreshTokenRequest, RefreshTokenResponse, RegisterRequest, RegisterResponse,
};
use crate::domain::customer::{Customer, Page};
use crate::domain::types::UserId;
use crate::directory::errors::DirectoryResult;
use crate::pagination::DEFAULT_ITEMS_PER_PAGE;

pub mod cache;
pub mod endpoints;
pub mod errors;
pub mod http;
#[cfg(feature = "test-mocks")]
pub mod mock;

pub use cache::{DirectoryDispatch, DirectoryService, QueryCache};
pub use http::{HttpDirectory, Transport};

/// Query string of the user listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserListQuery {
    pub page_number: usize,
    pub page_size: usize,
}

impl UserListQuery {
    pub fn new(page_number: usize) -> Self {
        Self {
            page_number,
            page_size: DEFAULT_ITEMS_PER_PAGE,
        }
    }

    pub fn paginate(mut self, page_number: usize, page_size: usize) -> Self {
        self.page_number = page_number;
        self.page_size = page_size;
        self
    }
}

#[async_trait]
pub trait AuthApi {
    async fn login(&self, credentials: &LoginRequest) -> DirectoryResult<AuthResponse>;
    async fn register(&self, registration: &RegisterRequest)
    -> DirectoryResult<RegisterResponse>;
    async fn logout(&self, request: &LogoutRequest) -> DirectoryResult<()>;
    async fn refresh_token(
        &self,
        request: &RefreshTokenRequest,
    ) -> DirectoryResult<RefreshTokenResponse>;
}

#[async_trait]
pub trait UserReader {
    async fn get_current_user(&self) -> DirectoryResult<CurrentUser>;
    async fn get_users(&self, query: &UserListQuery) -> DirectoryResult<Page<Customer>>;
}

#[async_trait]
pub trait UserWriter {
    async fn reactivate_user(&self, user_id: &UserId) -> DirectoryResult<ReactivateResponse>;
}

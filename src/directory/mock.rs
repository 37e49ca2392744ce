//! Mock directory implementations for isolating services in tests.

use async_trait::async_trait;
use mockall::mock;

use crate::directory::endpoints::CacheTag;
use crate::directory::errors::DirectoryResult;
use crate::directory::{AuthApi, DirectoryDispatch, UserListQuery, UserReader, UserWriter};
use crate::domain::auth::{
    AuthResponse, CurrentUser, LoginRequest, LogoutRequest, ReactivateResponse,
    RefreshTokenRequest, RefreshTokenResponse, RegisterRequest, RegisterResponse,
};
use crate::domain::customer::{Customer, Page};
use crate::domain::types::UserId;

mock! {
    pub Directory {}

    #[async_trait]
    impl AuthApi for Directory {
        async fn login(&self, credentials: &LoginRequest) -> DirectoryResult<AuthResponse>;
        async fn register(&self, registration: &RegisterRequest) -> DirectoryResult<RegisterResponse>;
        async fn logout(&self, request: &LogoutRequest) -> DirectoryResult<()>;
        async fn refresh_token(
            &self,
            request: &RefreshTokenRequest,
        ) -> DirectoryResult<RefreshTokenResponse>;
    }

    #[async_trait]
    impl UserReader for Directory {
        async fn get_current_user(&self) -> DirectoryResult<CurrentUser>;
        async fn get_users(&self, query: &UserListQuery) -> DirectoryResult<Page<Customer>>;
    }

    #[async_trait]
    impl UserWriter for Directory {
        async fn reactivate_user(&self, user_id: &UserId) -> DirectoryResult<ReactivateResponse>;
    }
}

mock! {
    pub Dispatch {}

    #[async_trait]
    impl DirectoryDispatch for Dispatch {
        async fn get_users(&self, query: UserListQuery) -> DirectoryResult<Page<Customer>>;
        async fn refetch_users(&self, query: UserListQuery) -> DirectoryResult<Page<Customer>>;
        async fn reactivate_user(&self, user_id: &UserId) -> DirectoryResult<ReactivateResponse>;
        fn invalidate_tags(&self, tags: &[CacheTag]);
    }
}

//! reqwest-backed transport and directory client.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;

use crate::directory::endpoints::{AuthHeader, Endpoint};
use crate::directory::errors::{DirectoryError, DirectoryResult};
use crate::directory::{AuthApi, UserListQuery, UserReader, UserWriter};
use crate::domain::auth::{
    AuthResponse, CurrentUser, Envelope, LoginRequest, LogoutRequest, ReactivateResponse,
    RefreshTokenRequest, RefreshTokenResponse, RegisterRequest, RegisterResponse,
};
use crate::domain::customer::{Customer, Page};
use crate::domain::types::{AccessToken, UserId};

/// Shared HTTP plumbing: base URL resolution and `Authorization` handling.
#[derive(Debug)]
pub struct Transport {
    client: Client,
    base_url: String,
}

impl Transport {
    pub fn new(base_url: &str, timeout: Duration) -> DirectoryResult<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(client, base_url))
    }

    pub fn with_client(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn url(&self, endpoint: &Endpoint) -> String {
        format!("{}{}", self.base_url, endpoint.path())
    }

    /// Starts a request for `endpoint`, attaching `token` unless the endpoint
    /// suppresses ambient credentials.
    pub fn request(&self, endpoint: &Endpoint, token: Option<&AccessToken>) -> RequestBuilder {
        let builder = self.client.request(endpoint.method(), self.url(endpoint));

        match (endpoint.auth(), token) {
            (AuthHeader::Suppressed, _) => builder.header(AUTHORIZATION, ""),
            (AuthHeader::Ambient, Some(token)) => builder.bearer_auth(token.as_str()),
            (AuthHeader::Ambient, None) => builder,
        }
    }

    /// Sends the request and turns non-2xx statuses into [`DirectoryError::Api`].
    pub async fn execute(
        &self,
        endpoint: &Endpoint,
        builder: RequestBuilder,
    ) -> DirectoryResult<Response> {
        let response = builder.send().await?;
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        let body = response.bytes().await?;
        let err = DirectoryError::from_body(status.as_u16(), &body);
        log::error!("Directory call {} failed: {err}", endpoint.name());
        Err(err)
    }
}

/// Directory client bound to one (optional) access token.
#[derive(Clone, Debug)]
pub struct HttpDirectory {
    transport: Arc<Transport>,
    token: Option<AccessToken>,
}

impl HttpDirectory {
    pub fn new(transport: Arc<Transport>) -> Self {
        Self {
            transport,
            token: None,
        }
    }

    pub fn with_token(mut self, token: AccessToken) -> Self {
        self.token = Some(token);
        self
    }

    fn request(&self, endpoint: &Endpoint) -> RequestBuilder {
        self.transport.request(endpoint, self.token.as_ref())
    }

    async fn call<T: DeserializeOwned>(
        &self,
        endpoint: &Endpoint,
        builder: RequestBuilder,
    ) -> DirectoryResult<T> {
        let response = self.transport.execute(endpoint, builder).await?;
        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

#[async_trait]
impl AuthApi for HttpDirectory {
    async fn login(&self, credentials: &LoginRequest) -> DirectoryResult<AuthResponse> {
        let endpoint = Endpoint::Login;
        let builder = self.request(&endpoint).json(credentials);
        self.call(&endpoint, builder).await
    }

    async fn register(
        &self,
        registration: &RegisterRequest,
    ) -> DirectoryResult<RegisterResponse> {
        let endpoint = Endpoint::Register;
        let builder = self.request(&endpoint).json(registration);
        self.call(&endpoint, builder).await
    }

    async fn logout(&self, request: &LogoutRequest) -> DirectoryResult<()> {
        let endpoint = Endpoint::Logout;
        let builder = self.request(&endpoint).json(request);
        self.transport.execute(&endpoint, builder).await?;
        Ok(())
    }

    async fn refresh_token(
        &self,
        request: &RefreshTokenRequest,
    ) -> DirectoryResult<RefreshTokenResponse> {
        let endpoint = Endpoint::RefreshToken;
        let builder = self.request(&endpoint).json(request);
        self.call(&endpoint, builder).await
    }
}

#[async_trait]
impl UserReader for HttpDirectory {
    async fn get_current_user(&self) -> DirectoryResult<CurrentUser> {
        let endpoint = Endpoint::GetCurrentUser;
        let builder = self.request(&endpoint);
        let envelope: Envelope<CurrentUser> = self.call(&endpoint, builder).await?;
        Ok(envelope.result)
    }

    async fn get_users(&self, query: &UserListQuery) -> DirectoryResult<Page<Customer>> {
        let endpoint = Endpoint::GetUsers;
        let builder = self.request(&endpoint).query(query);
        self.call(&endpoint, builder).await
    }
}

#[async_trait]
impl UserWriter for HttpDirectory {
    async fn reactivate_user(&self, user_id: &UserId) -> DirectoryResult<ReactivateResponse> {
        let endpoint = Endpoint::ReactivateUser(user_id.clone());
        let builder = self.request(&endpoint);
        let response: ReactivateResponse = self.call(&endpoint, builder).await?;
        log::info!("Reactivated user {user_id}: {}", response.message);
        Ok(response)
    }
}

//! Sign-in, registration and token lifecycle against the directory.

use crate::directory::{AuthApi, UserReader};
use crate::domain::auth::{
    AuthResponse, CurrentUser, LoginRequest, RefreshTokenRequest, RefreshTokenResponse,
    RegisterRequest,
};
use crate::forms::auth::{LoginForm, RegisterForm};
use crate::services::{ServiceError, ServiceResult};
use crate::storage::{TokenStore, logout_request, refresh_token};

/// Exchanges the login form for directory tokens.
pub async fn login<A>(api: &A, form: LoginForm) -> ServiceResult<AuthResponse>
where
    A: AuthApi + Sync + ?Sized,
{
    let credentials = LoginRequest::try_from(form)?;

    match api.login(&credentials).await {
        Ok(response) => Ok(response),
        Err(err) => {
            log::error!("Failed to sign in {}: {err}", credentials.email);
            Err(err.into())
        }
    }
}

/// Registers a new operator account.
pub async fn register<A>(api: &A, form: RegisterForm) -> ServiceResult<CurrentUser>
where
    A: AuthApi + Sync + ?Sized,
{
    let registration = RegisterRequest::try_from(form)?;

    let response = api.register(&registration).await.map_err(|err| {
        log::error!("Failed to register {}: {err}", registration.email);
        ServiceError::from(err)
    })?;

    Ok(response.result)
}

/// Revokes the stored refresh token, if the store has one.
pub async fn logout<A>(api: &A, store: &dyn TokenStore) -> ServiceResult<()>
where
    A: AuthApi + Sync + ?Sized,
{
    let request = logout_request(store);
    api.logout(&request).await.map_err(ServiceError::from)
}

/// Trades the stored refresh token for a fresh token pair.
pub async fn refresh_session<A>(
    api: &A,
    store: &dyn TokenStore,
) -> ServiceResult<RefreshTokenResponse>
where
    A: AuthApi + Sync + ?Sized,
{
    let token = refresh_token(store).ok_or(ServiceError::Unauthorized)?;

    api.refresh_token(&RefreshTokenRequest { token })
        .await
        .map_err(ServiceError::from)
}

/// Loads the signed-in operator's profile.
pub async fn current_user<R>(reader: &R) -> ServiceResult<CurrentUser>
where
    R: UserReader + Sync + ?Sized,
{
    reader.get_current_user().await.map_err(ServiceError::from)
}

use actix_identity::Identity;
use actix_session::Session;
use actix_web::{Responder, get, post, web};

use crate::directory::Transport;
use crate::routes::{CUSTOMERS_PATH, LOGIN_PATH, redirect, session_directory};
use crate::services::auth as auth_service;
use crate::storage::SessionTokenStore;

#[get("/")]
pub async fn show_index() -> impl Responder {
    redirect(CUSTOMERS_PATH)
}

#[post("/logout")]
pub async fn logout(
    identity: Option<Identity>,
    session: Session,
    transport: web::Data<Transport>,
) -> impl Responder {
    let api = session_directory(&session, &transport);
    let store = SessionTokenStore::new(&session);

    if let Err(err) = auth_service::logout(&api, &store).await {
        log::warn!("Failed to revoke the refresh token: {err}");
    }

    store.clear();
    if let Some(identity) = identity {
        identity.logout();
    }
    redirect(LOGIN_PATH)
}

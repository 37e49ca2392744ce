use actix_identity::Identity;
use actix_session::Session;
use actix_web::{HttpMessage, HttpRequest, HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::directory::{HttpDirectory, Transport};
use crate::domain::types::{AccessToken, RefreshToken};
use crate::forms::auth::{LoginForm, RegisterForm};
use crate::routes::{
    CUSTOMERS_PATH, LOGIN_PATH, base_context, redirect, render_template, session_directory,
    session_expired,
};
use crate::services::{ServiceError, auth as auth_service};
use crate::storage::SessionTokenStore;

const REGISTER_PATH: &str = "/auth/register";

/// Persists a fresh token pair and marks the request as signed in.
fn start_session(
    req: &HttpRequest,
    session: &Session,
    subject: &str,
    access_token: &AccessToken,
    refresh_token: &RefreshToken,
) -> Result<(), HttpResponse> {
    if let Err(err) = SessionTokenStore::new(session).store_tokens(access_token, refresh_token) {
        log::error!("Failed to store directory tokens: {err}");
        return Err(HttpResponse::InternalServerError().finish());
    }

    if let Err(err) = Identity::login(&req.extensions(), subject.to_string()) {
        log::error!("Failed to attach identity: {err}");
        return Err(HttpResponse::InternalServerError().finish());
    }

    Ok(())
}

#[get("/auth/login")]
pub async fn show_login(
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let context = base_context(&flash_messages, "login");
    render_template(&tera, "auth/login.html", &context)
}

#[post("/auth/login")]
pub async fn login(
    req: HttpRequest,
    session: Session,
    transport: web::Data<Transport>,
    web::Form(form): web::Form<LoginForm>,
) -> impl Responder {
    let api = HttpDirectory::new(transport.into_inner());
    let email = form.email.trim().to_lowercase();

    match auth_service::login(&api, form).await {
        Ok(response) => {
            let subject = response
                .user
                .as_ref()
                .map_or(email, |user| user.id.to_string());

            if let Err(response) = start_session(
                &req,
                &session,
                &subject,
                &response.access_token,
                &response.refresh_token,
            ) {
                return response;
            }
            log::info!("Operator {subject} signed in");
            redirect(CUSTOMERS_PATH)
        }
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
            redirect(LOGIN_PATH)
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Invalid email or password.").send();
            redirect(LOGIN_PATH)
        }
        Err(err) => {
            FlashMessage::error(
                err.server_message()
                    .unwrap_or("Failed to sign in. Please try again."),
            )
            .send();
            redirect(LOGIN_PATH)
        }
    }
}

#[get("/auth/register")]
pub async fn show_register(
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let context = base_context(&flash_messages, "register");
    render_template(&tera, "auth/register.html", &context)
}

#[post("/auth/register")]
pub async fn register(
    transport: web::Data<Transport>,
    web::Form(form): web::Form<RegisterForm>,
) -> impl Responder {
    let api = HttpDirectory::new(transport.into_inner());

    match auth_service::register(&api, form).await {
        Ok(user) => {
            log::info!("Registered operator {}", user.id);
            FlashMessage::success("Account created. Please sign in.").send();
            redirect(LOGIN_PATH)
        }
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
            redirect(REGISTER_PATH)
        }
        Err(err) => {
            FlashMessage::error(
                err.server_message()
                    .unwrap_or("Failed to create the account. Please try again."),
            )
            .send();
            redirect(REGISTER_PATH)
        }
    }
}

#[post("/auth/refresh")]
pub async fn refresh(
    identity: Option<Identity>,
    session: Session,
    transport: web::Data<Transport>,
) -> impl Responder {
    let api = session_directory(&session, &transport);
    let store = SessionTokenStore::new(&session);

    match auth_service::refresh_session(&api, &store).await {
        Ok(tokens) => {
            if let Err(err) = store.store_tokens(&tokens.access_token, &tokens.refresh_token) {
                log::error!("Failed to store refreshed tokens: {err}");
                return HttpResponse::InternalServerError().finish();
            }
            redirect(CUSTOMERS_PATH)
        }
        Err(err) => {
            log::warn!("Failed to refresh the session: {err}");
            session_expired(identity, &session)
        }
    }
}

use actix_identity::Identity;
use actix_session::Session;
use actix_web::HttpResponse;
use actix_web::http::header;
use actix_web::web;
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages, Level};
use serde::Serialize;
use tera::{Context, Tera};

use crate::directory::{DirectoryService, HttpDirectory, QueryCache, Transport};
use crate::storage::{SessionTokenStore, access_token};

pub mod auth;
pub mod customers;
pub mod main;

pub const LOGIN_PATH: &str = "/auth/login";
pub const CUSTOMERS_PATH: &str = "/customers";

pub fn alert_level_to_str(level: &Level) -> &'static str {
    match level {
        Level::Error => "danger",
        Level::Warning => "warning",
        Level::Success => "success",
        _ => "info",
    }
}

pub fn redirect(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .finish()
}

pub fn render_template(tera: &Tera, template: &str, context: &Context) -> HttpResponse {
    match tera.render(template, context) {
        Ok(body) => HttpResponse::Ok().content_type("text/html").body(body),
        Err(err) => {
            log::error!("Failed to render template '{template}': {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

/// Context shared by every page: pending alerts and the active menu entry.
pub fn base_context(flash_messages: &IncomingFlashMessages, current_page: &str) -> Context {
    let alerts = flash_messages
        .iter()
        .map(|f| (f.content(), alert_level_to_str(&f.level())))
        .collect::<Vec<_>>();

    let mut context = Context::new();
    context.insert("alerts", &alerts);
    context.insert("current_page", current_page);
    context
}

#[derive(Serialize)]
struct CustomersLocation<'a> {
    page: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    search: Option<&'a str>,
}

/// Link back to the customer list, keeping the page and search term.
pub fn customers_url(page: usize, search: Option<&str>) -> String {
    match serde_urlencoded::to_string(CustomersLocation { page, search }) {
        Ok(query) => format!("{CUSTOMERS_PATH}?{query}"),
        Err(err) => {
            log::warn!("Failed to encode customers location: {err}");
            CUSTOMERS_PATH.to_string()
        }
    }
}

/// Directory dispatcher acting with the signed-in operator's access token.
///
/// Requests without an identity or a stored token get a bare 401, which
/// [`crate::middleware::RedirectUnauthorized`] turns into the sign-in redirect.
/// Cached reads are scoped to the operator's identity.
pub fn operator_directory(
    identity: Option<&Identity>,
    session: &Session,
    transport: &web::Data<Transport>,
    cache: &web::Data<QueryCache>,
) -> Result<DirectoryService<HttpDirectory>, HttpResponse> {
    let operator = identity
        .and_then(|identity| identity.id().ok())
        .ok_or_else(|| HttpResponse::Unauthorized().finish())?;

    let token = access_token(&SessionTokenStore::new(session))
        .ok_or_else(|| HttpResponse::Unauthorized().finish())?;

    let directory = HttpDirectory::new(transport.clone().into_inner()).with_token(token);
    Ok(DirectoryService::new(
        directory,
        cache.clone().into_inner(),
        operator,
    ))
}

/// Directory client carrying the session's access token when one is stored.
pub fn session_directory(session: &Session, transport: &web::Data<Transport>) -> HttpDirectory {
    let directory = HttpDirectory::new(transport.clone().into_inner());
    match access_token(&SessionTokenStore::new(session)) {
        Some(token) => directory.with_token(token),
        None => directory,
    }
}

/// Drops the local session after the directory rejected its token.
pub fn session_expired(identity: Option<Identity>, session: &Session) -> HttpResponse {
    SessionTokenStore::new(session).clear();
    if let Some(identity) = identity {
        identity.logout();
    }
    FlashMessage::error("Your session has expired. Please sign in again.").send();
    redirect(LOGIN_PATH)
}

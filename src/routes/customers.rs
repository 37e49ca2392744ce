use actix_identity::Identity;
use actix_session::Session;
use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::directory::{QueryCache, Transport};
use crate::dto::customers::CustomersQuery;
use crate::forms::customers::CustomerActionForm;
use crate::notifications::FlashNotifier;
use crate::routes::{
    base_context, customers_url, operator_directory, redirect, render_template, session_expired,
};
use crate::services::{ServiceError, auth as auth_service, customers as customers_service};
use crate::view::customers::reactivate_failure_message;

#[get("/customers")]
pub async fn show_customers(
    identity: Option<Identity>,
    session: Session,
    params: web::Query<CustomersQuery>,
    transport: web::Data<Transport>,
    cache: web::Data<QueryCache>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let dispatch = match operator_directory(identity.as_ref(), &session, &transport, &cache) {
        Ok(dispatch) => dispatch,
        Err(response) => return response,
    };

    let operator = match auth_service::current_user(dispatch.directory()).await {
        Ok(operator) => Some(operator),
        Err(ServiceError::Unauthorized) => return session_expired(identity, &session),
        Err(err) => {
            log::warn!("Failed to load the operator profile: {err}");
            None
        }
    };

    match customers_service::load_customers_page(&dispatch, params.into_inner()).await {
        Ok(data) => {
            let mut context = base_context(&flash_messages, "customers");
            context.insert("current_user", &operator);
            context.insert("page", &data);
            render_template(&tera, "customers/index.html", &context)
        }
        Err(ServiceError::Unauthorized) => session_expired(identity, &session),
        Err(err) => {
            log::error!("Failed to render customers: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/customers/{customer_id}/reactivate")]
pub async fn reactivate_customer(
    customer_id: web::Path<String>,
    identity: Option<Identity>,
    session: Session,
    transport: web::Data<Transport>,
    cache: web::Data<QueryCache>,
    web::Form(form): web::Form<CustomerActionForm>,
) -> impl Responder {
    let dispatch = match operator_directory(identity.as_ref(), &session, &transport, &cache) {
        Ok(dispatch) => dispatch,
        Err(response) => return response,
    };
    let back = customers_url(form.page(), form.search());

    match customers_service::reactivate_customer(
        &dispatch,
        &FlashNotifier,
        customer_id.as_str(),
        form.page(),
    )
    .await
    {
        Ok(_) => redirect(&back),
        Err(ServiceError::Unauthorized) => session_expired(identity, &session),
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Customer not found.").send();
            redirect(&back)
        }
        Err(err) => {
            log::error!("Failed to reactivate customer {customer_id}: {err}");
            FlashMessage::error(reactivate_failure_message(err.server_message())).send();
            redirect(&back)
        }
    }
}

#[post("/customers/{customer_id}/delete")]
pub async fn delete_customer(
    customer_id: web::Path<String>,
    identity: Option<Identity>,
    session: Session,
    transport: web::Data<Transport>,
    cache: web::Data<QueryCache>,
    web::Form(form): web::Form<CustomerActionForm>,
) -> impl Responder {
    let dispatch = match operator_directory(identity.as_ref(), &session, &transport, &cache) {
        Ok(dispatch) => dispatch,
        Err(response) => return response,
    };
    let back = customers_url(form.page(), form.search());

    match customers_service::delete_customer(&dispatch, customer_id.as_str(), form.page()).await {
        Ok(_) => redirect(&back),
        Err(ServiceError::Unauthorized) => session_expired(identity, &session),
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Customer not found.").send();
            redirect(&back)
        }
        Err(err) => {
            log::error!("Failed to delete customer {customer_id}: {err}");
            redirect(&back)
        }
    }
}

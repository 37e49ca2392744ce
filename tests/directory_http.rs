use std::sync::Arc;
use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

use pushkind_customers::directory::errors::DirectoryError;
use pushkind_customers::directory::{
    AuthApi, HttpDirectory, Transport, UserListQuery, UserReader, UserWriter,
};
use pushkind_customers::domain::auth::{LoginRequest, LogoutRequest, RegisterRequest};
use pushkind_customers::domain::types::{AccessToken, UserId};

fn directory(server: &MockServer) -> HttpDirectory {
    let transport = Transport::new(&server.uri(), Duration::from_secs(5)).unwrap();
    HttpDirectory::new(Arc::new(transport))
}

fn signed_in(server: &MockServer) -> HttpDirectory {
    directory(server).with_token(AccessToken::new("a-1").unwrap())
}

#[actix_web::test]
async fn login_sends_empty_authorization_header() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .and(|req: &Request| {
            req.headers
                .get("authorization")
                .is_some_and(|value| value.is_empty())
        })
        .and(body_json(json!({"email": "ann@example.com", "password": "secret"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "accessToken": "a-1",
            "refreshToken": "r-1"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let response = signed_in(&server)
        .login(&LoginRequest {
            email: "ann@example.com".into(),
            password: "secret".into(),
        })
        .await
        .unwrap();

    assert_eq!(response.access_token.as_str(), "a-1");
    assert!(response.user.is_none());
}

#[actix_web::test]
async fn register_sends_empty_authorization_header() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/register"))
        .and(|req: &Request| {
            req.headers
                .get("authorization")
                .is_some_and(|value| value.is_empty())
        })
        .and(body_json(json!({
            "firstName": "Ann",
            "lastName": "Lee",
            "email": "ann@example.com",
            "password": "secret"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": 200,
            "message": "Registered",
            "result": {"id": "u-9", "firstName": "Ann", "lastName": "Lee", "email": "ann@example.com"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let response = signed_in(&server)
        .register(&RegisterRequest {
            first_name: "Ann".into(),
            last_name: "Lee".into(),
            email: "ann@example.com".into(),
            password: "secret".into(),
        })
        .await
        .unwrap();

    assert_eq!(response.result.id.as_str(), "u-9");
}

#[actix_web::test]
async fn reactivate_attaches_bearer_token() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/reactivate/u-7"))
        .and(header("authorization", "Bearer a-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": 200,
            "message": "User reactivated",
            "result": null
        })))
        .expect(1)
        .mount(&server)
        .await;

    let response = signed_in(&server)
        .reactivate_user(&UserId::new("u-7").unwrap())
        .await
        .unwrap();

    assert_eq!(response.message, "User reactivated");
}

#[actix_web::test]
async fn reactivate_failure_carries_server_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/reactivate/u-404"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({"code": 404, "message": "user not found"})),
        )
        .mount(&server)
        .await;

    let err = signed_in(&server)
        .reactivate_user(&UserId::new("u-404").unwrap())
        .await
        .unwrap_err();

    assert!(matches!(err, DirectoryError::Api { status: 404, .. }));
    assert_eq!(err.server_message(), Some("user not found"));
}

#[actix_web::test]
async fn failure_without_body_has_no_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/reactivate/u-1"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let err = signed_in(&server)
        .reactivate_user(&UserId::new("u-1").unwrap())
        .await
        .unwrap_err();

    assert_eq!(err.server_message(), None);
}

#[actix_web::test]
async fn current_user_is_unwrapped_from_envelope() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/me"))
        .and(header("authorization", "Bearer a-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": 200,
            "message": "",
            "result": {"id": "1", "firstName": "Ann", "lastName": "Lee", "email": "ann@example.com", "roles": ["admin"]}
        })))
        .mount(&server)
        .await;

    let user = signed_in(&server).get_current_user().await.unwrap();

    assert_eq!(user.id.as_str(), "1");
    assert_eq!(user.roles, vec!["admin".to_string()]);
}

#[actix_web::test]
async fn users_are_listed_with_paging_query() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users"))
        .and(query_param("pageNumber", "2"))
        .and(query_param("pageSize", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [
                {"id": "7", "firstName": "Ann", "lastName": "Lee", "email": "a@x.com", "active": false},
                {"id": "8", "firstName": "Bob", "lastName": "Ng", "email": "b@y.com"}
            ],
            "totalItems": 12,
            "totalPages": 2
        })))
        .expect(1)
        .mount(&server)
        .await;

    let page = signed_in(&server)
        .get_users(&UserListQuery::new(2))
        .await
        .unwrap();

    assert_eq!(page.total_pages, 2);
    assert!(!page.items[0].is_active());
    assert!(page.items[1].is_active());
}

#[actix_web::test]
async fn logout_body_depends_on_stored_token() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/logout"))
        .and(body_json(json!({"token": "r-1"})))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/auth/logout"))
        .and(body_json(json!({})))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let api = signed_in(&server);
    api.logout(&LogoutRequest {
        token: Some("r-1".into()),
    })
    .await
    .unwrap();
    api.logout(&LogoutRequest::default()).await.unwrap();
}

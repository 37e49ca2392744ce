use std::sync::Mutex;

use async_trait::async_trait;

use pushkind_customers::directory::DirectoryDispatch;
use pushkind_customers::directory::UserListQuery;
use pushkind_customers::directory::endpoints::{CacheTag, USER_LIST};
use pushkind_customers::directory::errors::{DirectoryError, DirectoryResult};
use pushkind_customers::domain::auth::{Envelope, ReactivateResponse};
use pushkind_customers::domain::customer::{Customer, Page};
use pushkind_customers::domain::types::UserId;
use pushkind_customers::notifications::{Notification, RecordingNotifier};
use pushkind_customers::view::{ActionOutcome, CustomerListView};

#[derive(Debug, Clone, PartialEq)]
enum Call {
    Get(usize),
    Refetch(usize),
    Reactivate(String),
    Invalidate(Vec<CacheTag>),
}

/// In-memory directory that records every call it receives.
struct FakeDispatch {
    customers: Mutex<Vec<Customer>>,
    reactivate_error: Option<String>,
    calls: Mutex<Vec<Call>>,
}

impl FakeDispatch {
    fn new(customers: Vec<Customer>) -> Self {
        Self {
            customers: Mutex::new(customers),
            reactivate_error: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    fn failing(customers: Vec<Customer>, message: &str) -> Self {
        Self {
            reactivate_error: Some(message.to_string()),
            ..Self::new(customers)
        }
    }

    fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn page(&self) -> Page<Customer> {
        let items = self.customers.lock().unwrap().clone();
        Page {
            total_items: items.len(),
            items,
            total_pages: 1,
        }
    }
}

#[async_trait]
impl DirectoryDispatch for FakeDispatch {
    async fn get_users(&self, query: UserListQuery) -> DirectoryResult<Page<Customer>> {
        self.calls.lock().unwrap().push(Call::Get(query.page_number));
        Ok(self.page())
    }

    async fn refetch_users(&self, query: UserListQuery) -> DirectoryResult<Page<Customer>> {
        self.calls
            .lock()
            .unwrap()
            .push(Call::Refetch(query.page_number));
        Ok(self.page())
    }

    async fn reactivate_user(&self, user_id: &UserId) -> DirectoryResult<ReactivateResponse> {
        self.calls
            .lock()
            .unwrap()
            .push(Call::Reactivate(user_id.to_string()));

        if let Some(message) = &self.reactivate_error {
            return Err(DirectoryError::Api {
                status: 404,
                message: Some(message.clone()),
            });
        }

        for customer in self.customers.lock().unwrap().iter_mut() {
            if &customer.id == user_id {
                customer.active = Some(true);
            }
        }
        Ok(Envelope {
            code: 200,
            message: "ok".into(),
            result: serde_json::Value::Null,
        })
    }

    fn invalidate_tags(&self, tags: &[CacheTag]) {
        self.calls
            .lock()
            .unwrap()
            .push(Call::Invalidate(tags.to_vec()));
    }
}

fn customer(id: &str, first: &str, last: &str, active: Option<bool>) -> Customer {
    Customer {
        id: UserId::new(id).unwrap(),
        first_name: first.into(),
        last_name: last.into(),
        email: format!("{}@example.com", first.to_lowercase()),
        active,
        created_at: None,
    }
}

#[actix_web::test]
async fn reactivation_success_notifies_invalidates_and_refetches() {
    let dispatch = FakeDispatch::new(vec![customer("7", "Ann", "Lee", Some(false))]);
    let notifier = RecordingNotifier::default();
    let mut view = CustomerListView::new(1);
    view.load(&dispatch).await;

    let target = view.find_customer("7").cloned().unwrap();
    view.confirm_reactivate(target);
    let outcome = view.handle_reactivate(&dispatch, &notifier).await;

    assert_eq!(outcome, ActionOutcome::Succeeded);
    assert_eq!(
        notifier.sent(),
        vec![Notification::Success(
            "Customer Ann Lee has been reactivated successfully.".into()
        )]
    );
    assert_eq!(
        dispatch.calls(),
        vec![
            Call::Get(1),
            Call::Reactivate("7".into()),
            Call::Invalidate(vec![USER_LIST]),
            Call::Refetch(1),
        ]
    );
    assert!(!view.reactivate_dialog().is_open());
    assert!(view.reactivate_dialog().target().is_none());

    let rows = view.render().customers;
    assert_eq!(rows[0].status, "Active");
    assert!(!rows[0].can_reactivate);
}

#[actix_web::test]
async fn reactivation_failure_reports_server_message_once() {
    let dispatch = FakeDispatch::failing(
        vec![customer("7", "Ann", "Lee", Some(false))],
        "user not found",
    );
    let notifier = RecordingNotifier::default();
    let mut view = CustomerListView::new(1);
    view.load(&dispatch).await;

    let target = view.find_customer("7").cloned().unwrap();
    view.confirm_reactivate(target);
    let outcome = view.handle_reactivate(&dispatch, &notifier).await;

    assert_eq!(outcome, ActionOutcome::Failed);
    let sent = notifier.sent();
    assert_eq!(sent.len(), 1);
    assert!(
        matches!(&sent[0], Notification::Error(text) if text.contains("user not found")),
        "unexpected notification: {sent:?}"
    );
    assert!(!view.reactivate_dialog().is_open());
    assert!(!view.reactivate_dialog().in_flight());
    assert!(!dispatch
        .calls()
        .iter()
        .any(|call| matches!(call, Call::Refetch(_) | Call::Invalidate(_))));
}

#[actix_web::test]
async fn reactivation_without_target_does_nothing() {
    let dispatch = FakeDispatch::new(Vec::new());
    let notifier = RecordingNotifier::default();
    let mut view = CustomerListView::new(1);

    let outcome = view.handle_reactivate(&dispatch, &notifier).await;

    assert_eq!(outcome, ActionOutcome::Skipped);
    assert!(dispatch.calls().is_empty());
    assert!(notifier.sent().is_empty());
}

#[actix_web::test]
async fn missing_active_flag_never_offers_reactivation() {
    let dispatch = FakeDispatch::new(vec![
        customer("1", "Ann", "Lee", None),
        customer("2", "Bob", "Ng", Some(true)),
        customer("3", "Cy", "Fox", Some(false)),
    ]);
    let mut view = CustomerListView::new(1);
    view.load(&dispatch).await;

    let rows = view.render().customers;

    let offers: Vec<bool> = rows.iter().map(|row| row.can_reactivate).collect();
    assert_eq!(offers, vec![false, false, true]);
}

#[actix_web::test]
async fn search_filters_only_the_loaded_page() {
    let dispatch = FakeDispatch::new(vec![
        customer("1", "Ann", "Lee", None),
        customer("2", "Bob", "Ng", None),
    ]);
    let mut view = CustomerListView::new(1);
    view.load(&dispatch).await;

    view.set_search_term("bob@");
    view.submit_search();
    let data = view.render();

    assert_eq!(data.customers.len(), 1);
    assert_eq!(data.total_customers, 2);
    assert_eq!(dispatch.calls(), vec![Call::Get(1)]);
}

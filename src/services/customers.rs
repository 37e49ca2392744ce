//! Services driving the customer list view from route inputs.

use crate::directory::{DirectoryDispatch, UserListQuery};
use crate::domain::types::UserId;
use crate::dto::customers::{CustomersPageData, CustomersQuery};
use crate::notifications::Notifier;
use crate::services::{ServiceError, ServiceResult};
use crate::view::customers::fetch_page;
use crate::view::{ActionOutcome, CustomerListView};

/// Builds the customers page for the requested cursor.
///
/// Fetch failures do not abort rendering; they surface as the inline error
/// banner of the returned page data.
pub async fn load_customers_page<D>(
    dispatch: &D,
    query: CustomersQuery,
) -> ServiceResult<CustomersPageData>
where
    D: DirectoryDispatch + ?Sized,
{
    let page = bounded_page(dispatch, query.page.unwrap_or(1)).await;
    let mut view = CustomerListView::new(page);
    if let Some(search) = query.search.as_deref() {
        view.set_search_term(search.trim());
    }

    view.load(dispatch).await;

    let total_pages = view.total_pages();
    if total_pages > 0 && view.cursor().page > total_pages {
        view.go_to_page(total_pages, dispatch).await;
    }

    if let Some(id) = query.reactivate.as_deref() {
        match view.find_customer(id).cloned() {
            Some(customer) if !customer.is_active() => view.confirm_reactivate(customer),
            Some(_) => log::warn!("Customer {id} is already active"),
            None => log::warn!("Customer {id} is not on the current page"),
        }
    }

    if let Some(id) = query.delete.as_deref() {
        match view.find_customer(id).cloned() {
            Some(customer) => view.confirm_delete(customer),
            None => log::warn!("Customer {id} is not on the current page"),
        }
    }

    Ok(view.render())
}

/// Loads the page holding `customer_id` and runs it through the view's
/// confirm-then-reactivate flow.
pub async fn reactivate_customer<D, N>(
    dispatch: &D,
    notifier: &N,
    customer_id: &str,
    page: usize,
) -> ServiceResult<ActionOutcome>
where
    D: DirectoryDispatch + ?Sized,
    N: Notifier + ?Sized,
{
    let customer_id = UserId::new(customer_id)?;
    let mut view = open_page(dispatch, page).await?;

    let customer = view
        .find_customer(customer_id.as_str())
        .cloned()
        .ok_or(ServiceError::NotFound)?;

    view.confirm_reactivate(customer);
    Ok(view.handle_reactivate(dispatch, notifier).await)
}

/// Runs the delete confirmation for `customer_id`. Nothing is removed from
/// the directory.
pub async fn delete_customer<D>(
    dispatch: &D,
    customer_id: &str,
    page: usize,
) -> ServiceResult<ActionOutcome>
where
    D: DirectoryDispatch + ?Sized,
{
    let customer_id = UserId::new(customer_id)?;
    let mut view = open_page(dispatch, page).await?;

    let customer = view
        .find_customer(customer_id.as_str())
        .cloned()
        .ok_or(ServiceError::NotFound)?;

    view.confirm_delete(customer);
    Ok(view.handle_delete().await)
}

async fn open_page<D>(dispatch: &D, page: usize) -> ServiceResult<CustomerListView>
where
    D: DirectoryDispatch + ?Sized,
{
    let page = bounded_page(dispatch, page).await;
    let mut view = CustomerListView::new(page);
    let ticket = view.begin_fetch();
    let loaded = fetch_page(dispatch, ticket).await?;
    view.complete_fetch(ticket, Ok(loaded));
    Ok(view)
}

/// Caps a requested page at the listing's page count, read from the first
/// page, so arbitrary numbers never reach the directory or the cache.
async fn bounded_page<D>(dispatch: &D, requested: usize) -> usize
where
    D: DirectoryDispatch + ?Sized,
{
    if requested <= 1 {
        return 1;
    }

    match dispatch.get_users(UserListQuery::new(1)).await {
        Ok(first) => requested.min(first.total_pages.max(1)),
        Err(err) => {
            log::warn!("Failed to read the page count, falling back to page 1: {err}");
            1
        }
    }
}

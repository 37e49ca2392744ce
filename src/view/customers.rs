//! View model of the customer management screen.
//!
//! The view owns the pagination cursor, the search term, both confirmation
//! dialogs and the last fetched page. It never patches customers locally: the
//! only way rows change is a fetch through the injected [`DirectoryDispatch`].

use crate::directory::endpoints::USER_LIST;
use crate::directory::errors::DirectoryResult;
use crate::directory::{DirectoryDispatch, UserListQuery};
use crate::domain::customer::{Customer, Page};
use crate::dto::customers::{CustomerRow, CustomersPageData};
use crate::notifications::Notifier;
use crate::pagination::{DEFAULT_ITEMS_PER_PAGE, PaginationControls, next_page, previous_page};
use crate::view::dialog::DialogState;

pub const LOAD_ERROR_MESSAGE: &str = "Failed to load customers. Please try again later.";
pub const REACTIVATE_FALLBACK_MESSAGE: &str = "Please try again.";

/// Error text shown when a reactivation fails.
pub fn reactivate_failure_message(server_message: Option<&str>) -> String {
    format!(
        "Failed to reactivate customer. {}",
        server_message.unwrap_or(REACTIVATE_FALLBACK_MESSAGE)
    )
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageCursor {
    pub page: usize,
    pub page_size: usize,
}

impl PageCursor {
    pub fn query(&self) -> UserListQuery {
        UserListQuery {
            page_number: self.page,
            page_size: self.page_size,
        }
    }
}

/// Identifies one fetch; results for an outdated ticket are dropped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FetchTicket {
    generation: u64,
    cursor: PageCursor,
}

impl FetchTicket {
    pub fn cursor(&self) -> PageCursor {
        self.cursor
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActionOutcome {
    /// No target was set or the action was already running.
    Skipped,
    Succeeded,
    Failed,
}

/// Keeps the customers whose first name, last name or email contains `term`,
/// ignoring case. Only the already loaded page is searched.
pub fn filter_customers<'a>(items: &'a [Customer], term: &str) -> Vec<&'a Customer> {
    let term = term.to_lowercase();
    items
        .iter()
        .filter(|customer| customer.matches(&term))
        .collect()
}

/// Fetches the page a ticket was issued for.
pub async fn fetch_page<D>(dispatch: &D, ticket: FetchTicket) -> DirectoryResult<Page<Customer>>
where
    D: DirectoryDispatch + ?Sized,
{
    dispatch.get_users(ticket.cursor.query()).await
}

/// Deletion is not offered by the directory yet.
// TODO: call the directory once it exposes a delete-user endpoint.
fn delete_customer(_customer: &Customer) -> DirectoryResult<()> {
    Ok(())
}

#[derive(Clone, Debug)]
pub struct CustomerListView {
    cursor: PageCursor,
    search_term: String,
    page: Option<Page<Customer>>,
    loading: bool,
    load_failed: bool,
    generation: u64,
    reactivate_dialog: DialogState,
    delete_dialog: DialogState,
}

impl Default for CustomerListView {
    fn default() -> Self {
        Self::new(1)
    }
}

impl CustomerListView {
    pub fn new(page: usize) -> Self {
        Self {
            cursor: PageCursor {
                page: page.max(1),
                page_size: DEFAULT_ITEMS_PER_PAGE,
            },
            search_term: String::new(),
            page: None,
            loading: false,
            load_failed: false,
            generation: 0,
            reactivate_dialog: DialogState::default(),
            delete_dialog: DialogState::default(),
        }
    }

    pub fn cursor(&self) -> PageCursor {
        self.cursor
    }

    pub fn current_page(&self) -> Option<&Page<Customer>> {
        self.page.as_ref()
    }

    pub fn total_pages(&self) -> usize {
        self.page.as_ref().map_or(0, |page| page.total_pages)
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn load_failed(&self) -> bool {
        self.load_failed
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
    }

    /// Search submission does nothing beyond the live filter on the term.
    pub fn submit_search(&mut self) {}

    pub fn reactivate_dialog(&self) -> &DialogState {
        &self.reactivate_dialog
    }

    pub fn delete_dialog(&self) -> &DialogState {
        &self.delete_dialog
    }

    /// Moves the cursor to `page` and starts a fetch for it.
    ///
    /// Callers pass numbers taken from the pagination window, which are
    /// always in range, so no clamping happens here.
    pub fn set_page(&mut self, page: usize) -> FetchTicket {
        self.cursor.page = page;
        self.begin_fetch()
    }

    pub fn previous_page(&mut self) -> FetchTicket {
        self.set_page(previous_page(self.cursor.page))
    }

    pub fn next_page(&mut self) -> FetchTicket {
        self.set_page(next_page(self.cursor.page, self.total_pages()))
    }

    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.generation += 1;
        self.loading = true;
        FetchTicket {
            generation: self.generation,
            cursor: self.cursor,
        }
    }

    /// Applies a fetch result, returning `false` when the ticket is stale.
    pub fn complete_fetch(
        &mut self,
        ticket: FetchTicket,
        result: DirectoryResult<Page<Customer>>,
    ) -> bool {
        if ticket.generation != self.generation || ticket.cursor != self.cursor {
            log::debug!(
                "Ignoring response for page {} after the cursor moved to {}",
                ticket.cursor.page,
                self.cursor.page
            );
            return false;
        }

        self.loading = false;
        match result {
            Ok(page) => {
                self.page = Some(page);
                self.load_failed = false;
            }
            Err(err) => {
                log::error!("Failed to load customers: {err}");
                self.load_failed = true;
            }
        }
        true
    }

    /// Loads the current page, using the cache when it is fresh.
    pub async fn load<D>(&mut self, dispatch: &D)
    where
        D: DirectoryDispatch + ?Sized,
    {
        let ticket = self.begin_fetch();
        let result = fetch_page(dispatch, ticket).await;
        self.complete_fetch(ticket, result);
    }

    /// Reloads the current page straight from the directory.
    pub async fn refetch<D>(&mut self, dispatch: &D)
    where
        D: DirectoryDispatch + ?Sized,
    {
        let ticket = self.begin_fetch();
        let result = dispatch.refetch_users(ticket.cursor.query()).await;
        self.complete_fetch(ticket, result);
    }

    /// Moves to `page` and loads it.
    pub async fn go_to_page<D>(&mut self, page: usize, dispatch: &D)
    where
        D: DirectoryDispatch + ?Sized,
    {
        let ticket = self.set_page(page);
        let result = fetch_page(dispatch, ticket).await;
        self.complete_fetch(ticket, result);
    }

    /// Customers of the loaded page matching the search term.
    pub fn filtered_customers(&self) -> Vec<&Customer> {
        self.page
            .as_ref()
            .map(|page| filter_customers(&page.items, &self.search_term))
            .unwrap_or_default()
    }

    /// Finds a customer of the loaded page by id.
    pub fn find_customer(&self, id: &str) -> Option<&Customer> {
        self.page
            .as_ref()
            .and_then(|page| page.items.iter().find(|customer| customer.id.as_str() == id))
    }

    pub fn confirm_reactivate(&mut self, customer: Customer) {
        self.reactivate_dialog.open(customer);
    }

    pub fn confirm_delete(&mut self, customer: Customer) {
        self.delete_dialog.open(customer);
    }

    pub fn cancel_reactivate(&mut self) {
        self.reactivate_dialog.close();
    }

    pub fn cancel_delete(&mut self) {
        self.delete_dialog.close();
    }

    /// Reactivates the dialog's target.
    ///
    /// On success the "User list" tag is invalidated and the current page is
    /// refetched. Either way the dialog ends closed with no target.
    pub async fn handle_reactivate<D, N>(&mut self, dispatch: &D, notifier: &N) -> ActionOutcome
    where
        D: DirectoryDispatch + ?Sized,
        N: Notifier + ?Sized,
    {
        let Some(customer) = self.reactivate_dialog.begin() else {
            return ActionOutcome::Skipped;
        };

        let outcome = match dispatch.reactivate_user(&customer.id).await {
            Ok(_) => {
                notifier.success(&format!(
                    "Customer {} {} has been reactivated successfully.",
                    customer.first_name, customer.last_name
                ));
                dispatch.invalidate_tags(&[USER_LIST]);
                self.refetch(dispatch).await;
                ActionOutcome::Succeeded
            }
            Err(err) => {
                log::error!("Error reactivating customer {}: {err}", customer.id);
                notifier.error(&reactivate_failure_message(err.server_message()));
                ActionOutcome::Failed
            }
        };

        self.reactivate_dialog.finish_and_clear();
        outcome
    }

    /// Runs the delete confirmation through its lifecycle without touching the
    /// directory. Failures are logged and never shown to the operator.
    pub async fn handle_delete(&mut self) -> ActionOutcome {
        let Some(customer) = self.delete_dialog.begin() else {
            return ActionOutcome::Skipped;
        };

        let outcome = match delete_customer(&customer) {
            Ok(()) => ActionOutcome::Succeeded,
            Err(err) => {
                log::error!("Error deleting customer {}: {err}", customer.id);
                ActionOutcome::Failed
            }
        };

        self.delete_dialog.finish();
        outcome
    }

    /// Snapshot of everything the template needs.
    pub fn render(&self) -> CustomersPageData {
        CustomersPageData {
            loading: self.loading && self.page.is_none(),
            error: self.load_failed.then_some(LOAD_ERROR_MESSAGE),
            total_customers: self.page.as_ref().map_or(0, |page| page.total_items),
            search_term: self.search_term.clone(),
            customers: self
                .filtered_customers()
                .into_iter()
                .map(CustomerRow::from)
                .collect(),
            pagination: PaginationControls::new(self.cursor.page, self.total_pages()),
            reactivate_dialog: self
                .reactivate_dialog
                .to_view("Reactivate", "Reactivating..."),
            delete_dialog: self.delete_dialog.to_view("Delete", "Deleting..."),
        }
    }
}

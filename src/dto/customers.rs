use serde::{Deserialize, Serialize};

use crate::domain::customer::Customer;
use crate::pagination::PaginationControls;

/// Placeholder for missing contact details and dates.
pub const NOT_AVAILABLE: &str = "N/A";

/// Query parameters accepted by the customers page.
#[derive(Debug, Default, Deserialize)]
pub struct CustomersQuery {
    /// Page number requested by the user interface.
    pub page: Option<usize>,
    /// Filter applied to the loaded page.
    pub search: Option<String>,
    /// Customer whose reactivation dialog should be open.
    pub reactivate: Option<String>,
    /// Customer whose delete dialog should be open.
    pub delete: Option<String>,
}

/// One rendered row of the customers table.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct CustomerRow {
    pub id: String,
    pub full_name: String,
    pub email: String,
    /// Contact column, currently mirrors the email address.
    pub contact: String,
    pub joined: String,
    pub status: &'static str,
    pub active: bool,
    /// Only blocked customers offer the "Reactivate Account" action.
    pub can_reactivate: bool,
}

impl From<&Customer> for CustomerRow {
    fn from(customer: &Customer) -> Self {
        let active = customer.is_active();
        let contact = if customer.email.is_empty() {
            NOT_AVAILABLE.to_string()
        } else {
            customer.email.clone()
        };

        Self {
            id: customer.id.to_string(),
            full_name: customer.full_name(),
            email: customer.email.clone(),
            contact,
            joined: customer
                .created_at
                .map(|created_at| created_at.format("%Y-%m-%d").to_string())
                .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            status: if active { "Active" } else { "Blocked" },
            active,
            can_reactivate: !active,
        }
    }
}

/// Confirmation dialog as shown to the operator.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct DialogView {
    pub open: bool,
    pub target_id: Option<String>,
    pub target_name: Option<String>,
    pub in_flight: bool,
    pub confirm_label: &'static str,
}

/// Data required to render the customers template.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct CustomersPageData {
    /// First fetch still outstanding, render the skeleton instead of the table.
    pub loading: bool,
    /// Inline banner shown next to the rest of the page when the fetch failed.
    pub error: Option<&'static str>,
    pub total_customers: usize,
    pub search_term: String,
    pub customers: Vec<CustomerRow>,
    pub pagination: PaginationControls,
    pub reactivate_dialog: DialogView,
    pub delete_dialog: DialogView,
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;
    use crate::domain::types::UserId;

    fn customer() -> Customer {
        Customer {
            id: UserId::new("9").unwrap(),
            first_name: "Bob".into(),
            last_name: "Ng".into(),
            email: String::new(),
            active: Some(false),
            created_at: Some(Utc.with_ymd_and_hms(2024, 3, 5, 10, 0, 0).unwrap()),
        }
    }

    #[test]
    fn blocked_customer_row() {
        let row = CustomerRow::from(&customer());

        assert_eq!(row.status, "Blocked");
        assert!(row.can_reactivate);
        assert_eq!(row.contact, NOT_AVAILABLE);
        assert_eq!(row.joined, "2024-03-05");
    }

    #[test]
    fn active_customer_row_without_dates() {
        let mut customer = customer();
        customer.active = None;
        customer.created_at = None;
        customer.email = "b@y.com".into();

        let row = CustomerRow::from(&customer);

        assert_eq!(row.status, "Active");
        assert!(!row.can_reactivate);
        assert_eq!(row.contact, "b@y.com");
        assert_eq!(row.joined, NOT_AVAILABLE);
    }
}

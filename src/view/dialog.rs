use crate::domain::customer::Customer;
use crate::dto::customers::DialogView;

/// State of one confirmation dialog.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DialogState {
    open: bool,
    target: Option<Customer>,
    in_flight: bool,
}

impl DialogState {
    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn target(&self) -> Option<&Customer> {
        self.target.as_ref()
    }

    pub fn in_flight(&self) -> bool {
        self.in_flight
    }

    pub fn open(&mut self, customer: Customer) {
        self.target = Some(customer);
        self.open = true;
    }

    /// Hides the dialog; a leftover target stays inert until the next open.
    pub fn close(&mut self) {
        self.open = false;
    }

    /// Marks the action as running and hands out its target.
    ///
    /// Returns `None` without a target or while a previous confirm is still
    /// in flight.
    pub fn begin(&mut self) -> Option<Customer> {
        if self.in_flight {
            return None;
        }
        let target = self.target.clone()?;
        self.in_flight = true;
        Some(target)
    }

    /// Ends the action and closes the dialog.
    pub fn finish(&mut self) {
        self.in_flight = false;
        self.open = false;
    }

    /// Ends the action, closes the dialog and forgets the target.
    pub fn finish_and_clear(&mut self) {
        self.finish();
        self.target = None;
    }

    pub fn to_view(&self, idle_label: &'static str, busy_label: &'static str) -> DialogView {
        DialogView {
            open: self.open,
            target_id: self.target.as_ref().map(|target| target.id.to_string()),
            target_name: self.target.as_ref().map(Customer::full_name),
            in_flight: self.in_flight,
            confirm_label: if self.in_flight {
                busy_label
            } else {
                idle_label
            },
        }
    }
}

use serde::Deserialize;

/// Hidden fields posted by the confirmation dialogs so the operator lands
/// back on the same page.
#[derive(Debug, Default, Deserialize)]
pub struct CustomerActionForm {
    pub page: Option<usize>,
    pub search: Option<String>,
}

impl CustomerActionForm {
    pub fn page(&self) -> usize {
        self.page.unwrap_or(1).max(1)
    }

    pub fn search(&self) -> Option<&str> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|search| !search.is_empty())
    }
}

// Mirrors table sort state into the page query string (`?sort=name&desc=true`).

use serde::{Deserialize, Serialize};

/// Sort field meaning "no explicit sort"; it is never written to the URL.
pub const DEFAULT_SORT_FIELD: &str = "health";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortState {
    pub field: String,
    #[serde(default)]
    pub descending: bool,
}

impl Default for SortState {
    fn default() -> Self {
        Self {
            field: DEFAULT_SORT_FIELD.to_string(),
            descending: false,
        }
    }
}

impl SortState {
    pub fn search(&self) -> String {
        sort_search(&self.field, self.descending)
    }
}

/// Query string for a sort state, always starting with `?`.
///
/// `sort` is omitted for the default field, `desc=true` only appears when descending,
/// so the default ascending state yields a bare `"?"` that clears earlier params.
pub fn sort_search(field: &str, descending: bool) -> String {
    let mut query = form_urlencoded::Serializer::new(String::new());
    if !field.is_empty() && field != DEFAULT_SORT_FIELD {
        query.append_pair("sort", field);
    }
    if descending {
        query.append_pair("desc", "true");
    }
    format!("?{}", query.finish())
}

/// Navigation owned by the host UI. `replace` swaps the current entry's query
/// string without pushing a new history entry.
pub trait History {
    fn replace(&mut self, search: &str);
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct SortDeps {
    field: String,
    descending: bool,
    data_ready: bool,
}

/// Re-runs the sort -> URL rule whenever the field, the direction or the dataset
/// readiness changes, writing at most once per change.
pub struct SortUrlSync<H> {
    history: H,
    last: Option<SortDeps>,
}

impl<H: History> SortUrlSync<H> {
    pub fn new(history: H) -> Self {
        Self {
            history,
            last: None,
        }
    }

    /// Feeds the current table state. Returns true when the URL was replaced.
    ///
    /// Nothing is written while `dataset` is empty, so a table that is still loading
    /// does not wipe a sort restored from the URL.
    pub fn observe<T>(&mut self, field: &str, descending: bool, dataset: &[T]) -> bool {
        let deps = SortDeps {
            field: field.to_string(),
            descending,
            data_ready: !dataset.is_empty(),
        };
        if self.last.as_ref() == Some(&deps) {
            return false;
        }
        let data_ready = deps.data_ready;
        self.last = Some(deps);
        if !data_ready {
            return false;
        }

        let search = sort_search(field, descending);
        tracing::debug!(field, descending, search = %search, "sort state mirrored to URL");
        self.history.replace(&search);
        true
    }

    pub fn history(&self) -> &H {
        &self.history
    }

    pub fn into_history(self) -> H {
        self.history
    }
}

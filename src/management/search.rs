use crate::{
    CliError, Res,
    types::{Item, Kind, SearchResults},
};

/// The most recent search response, kept for ordinal references.
///
/// Empty until the first search of a session; every successful search
/// replaces it wholesale.
#[derive(Debug, Default)]
pub struct SearchCache {
    last: Option<SearchResults>,
}

impl SearchCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn store(&mut self, results: SearchResults) {
        self.last = Some(results);
    }

    pub fn last(&self) -> Option<&SearchResults> {
        self.last.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.last.is_none()
    }

    /// Looks up the `ordinal`-th (1-based) result of `kind`.
    pub fn lookup(&self, kind: Kind, ordinal: usize) -> Res<Item> {
        let results = self.last.as_ref().ok_or(CliError::NoSearchResults)?;
        let len = results.len(kind);
        if ordinal == 0 || ordinal > len {
            return Err(CliError::IndexOutOfRange {
                index: ordinal,
                len,
            });
        }

        results
            .get(kind, ordinal - 1)
            .ok_or(CliError::IndexOutOfRange {
                index: ordinal,
                len,
            })
    }
}

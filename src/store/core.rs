//! Base Store Machinery
//!
//! Every entity store composes a [`StoreCore`] and brackets each action with
//! `begin`/`settle`: loading and any stale error are cleared when the action
//! starts, and on failure the normalized message is recorded *and* the error
//! is returned, so a caller can both read store state and react to the value.

use crate::utils::error::StoreResult;

/// Loading/error lifecycle shared by every entity store.
#[derive(Debug, Default)]
pub struct StoreCore {
    loading: bool,
    error: Option<String>,
}

impl StoreCore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start an action: loading on, stale error cleared.
    pub fn begin(&mut self) {
        self.loading = true;
        self.error = None;
    }

    /// Finish an action: loading off; a failure's message is recorded before
    /// the result is handed back unchanged.
    pub fn settle<T>(&mut self, result: StoreResult<T>) -> StoreResult<T> {
        self.loading = false;
        if let Err(err) = &result {
            self.error = Some(err.to_string());
        }
        result
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::StoreError;

    #[test]
    fn test_begin_clears_stale_error() {
        let mut core = StoreCore::new();
        let _ = core.settle::<()>(Err(StoreError::fetch("boom")));
        assert_eq!(core.error(), Some("Fetch error: boom"));

        core.begin();
        assert!(core.loading());
        assert_eq!(core.error(), None);
    }

    #[test]
    fn test_settle_records_and_returns_the_same_error() {
        let mut core = StoreCore::new();
        core.begin();
        let result = core.settle::<()>(Err(StoreError::validation("empty title")));
        assert!(!core.loading());
        let err = result.unwrap_err();
        assert_eq!(core.error(), Some(err.to_string().as_str()));
    }

    #[test]
    fn test_settle_success_leaves_no_error() {
        let mut core = StoreCore::new();
        core.begin();
        let result = core.settle(Ok(7));
        assert_eq!(result.unwrap(), 7);
        assert!(!core.loading());
        assert_eq!(core.error(), None);
    }
}

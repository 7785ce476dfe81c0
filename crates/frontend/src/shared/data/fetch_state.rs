use contracts::shared::database_error::DatabaseError;

/// Snapshot owned by a list hook: last good data, loading flag, last error.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchState<T> {
    pub data: Vec<T>,
    pub loading: bool,
    pub error: Option<DatabaseError>,
    generation: u64,
}

impl<T> Default for FetchState<T> {
    fn default() -> Self {
        Self {
            data: Vec::new(),
            loading: false,
            error: None,
            generation: 0,
        }
    }
}

impl<T> FetchState<T> {
    /// Start a request; returns the tag its response must present.
    pub fn begin(&mut self) -> u64 {
        self.generation += 1;
        self.loading = true;
        self.generation
    }

    /// Apply a response. Responses from superseded requests are ignored
    /// and `false` is returned.
    pub fn complete(&mut self, generation: u64, result: Result<Vec<T>, DatabaseError>) -> bool {
        if generation != self.generation {
            return false;
        }
        self.loading = false;
        match result {
            Ok(data) => {
                self.data = data;
                self.error = None;
            }
            // Last known data stays visible
            Err(e) => self.error = Some(e),
        }
        true
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_replaces_data_and_clears_error() {
        let mut state = FetchState::<u32>::default();
        let first = state.begin();
        assert!(state.loading);
        state.complete(first, Err(DatabaseError::new("Failed to fetch bug reports")));
        assert!(state.error.is_some());

        let second = state.begin();
        assert!(state.complete(second, Ok(vec![3, 2, 1])));
        assert!(!state.loading);
        assert_eq!(state.error, None);
        assert_eq!(state.data, vec![3, 2, 1]);
    }

    #[test]
    fn failure_keeps_last_snapshot() {
        let mut state = FetchState::<u32>::default();
        let gen = state.begin();
        state.complete(gen, Ok(vec![1, 2]));

        let gen = state.begin();
        state.complete(gen, Err(DatabaseError::new("Failed to fetch suggestions")));
        assert_eq!(state.data, vec![1, 2]);
        assert_eq!(
            state.error.as_ref().map(|e| e.message.as_str()),
            Some("Failed to fetch suggestions")
        );
    }

    #[test]
    fn stale_response_is_discarded() {
        let mut state = FetchState::<u32>::default();
        let old = state.begin();
        let latest = state.begin();

        assert!(!state.complete(old, Ok(vec![9])));
        assert!(state.loading);
        assert!(state.is_empty());

        assert!(state.complete(latest, Ok(vec![])));
        assert!(!state.loading);
        assert_eq!(state.len(), 0);
    }
}

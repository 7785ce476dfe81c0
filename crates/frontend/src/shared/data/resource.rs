use contracts::shared::database_error::DatabaseError;
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use super::fetch_state::FetchState;

pub type ListFuture<T> = Pin<Box<dyn Future<Output = Result<Vec<T>, DatabaseError>>>>;
type Loader<T> = Arc<dyn Fn() -> ListFuture<T> + Send + Sync>;

/// Load/refetch wrapper around one gateway list call.
///
/// Each instance holds its own snapshot; two views using the same hook
/// fetch independently.
pub struct ListResource<T: Send + Sync + 'static> {
    state: RwSignal<FetchState<T>>,
    loader: StoredValue<Loader<T>>,
}

impl<T: Send + Sync + 'static> Clone for ListResource<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: Send + Sync + 'static> Copy for ListResource<T> {}

impl<T: Clone + Send + Sync + 'static> ListResource<T> {
    /// Borrow the current snapshot (tracked)
    pub fn with_data<R>(&self, f: impl FnOnce(&[T]) -> R) -> R {
        self.state.with(|s| f(&s.data))
    }

    pub fn count(&self) -> usize {
        self.state.with(|s| s.len())
    }

    pub fn loading(&self) -> bool {
        self.state.with(|s| s.loading)
    }

    pub fn error(&self) -> Option<DatabaseError> {
        self.state.with(|s| s.error.clone())
    }

    /// Issue a new request. A response arriving after a newer request, or
    /// after the owner is disposed, is dropped.
    pub fn refetch(&self) {
        let state = self.state;
        let Some(generation) = state.try_update(|s| s.begin()) else {
            return;
        };
        let Some(request) = self.loader.try_with_value(|load| load()) else {
            return;
        };

        spawn_local(async move {
            let result = request.await;
            let applied = state.try_update(|s| s.complete(generation, result));
            if applied != Some(true) {
                log::debug!("discarding stale list response (generation {})", generation);
            }
        });
    }
}

/// Create a resource and start the first fetch immediately.
pub fn use_list_resource<T, F>(loader: F) -> ListResource<T>
where
    T: Clone + Send + Sync + 'static,
    F: Fn() -> ListFuture<T> + Send + Sync + 'static,
{
    let resource = ListResource {
        state: RwSignal::new(FetchState::default()),
        loader: StoredValue::new(Arc::new(loader) as Loader<T>),
    };
    resource.refetch();
    resource
}

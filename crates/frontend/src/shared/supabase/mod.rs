//! Handle to the backend-as-a-service.
//!
//! Holds the runtime configuration, the current session and the list of
//! session-change subscribers. Cloning is cheap; all clones share state.

pub mod http;

use contracts::shared::config::ClientConfig;
use contracts::system::auth::Session;
use leptos::prelude::*;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, Weak};

type Listener = Arc<dyn Fn(Option<&Session>) + Send + Sync>;

struct Inner {
    config: ClientConfig,
    session: Mutex<Option<Session>>,
    listeners: Mutex<Vec<(u64, Listener)>>,
    next_listener_id: AtomicU64,
}

#[derive(Clone)]
pub struct SupabaseClient {
    inner: Arc<Inner>,
}

impl SupabaseClient {
    pub fn new(config: ClientConfig, session: Option<Session>) -> Self {
        Self {
            inner: Arc::new(Inner {
                config,
                session: Mutex::new(session),
                listeners: Mutex::new(Vec::new()),
                next_listener_id: AtomicU64::new(1),
            }),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.inner.config.supabase_url
    }

    pub fn anon_key(&self) -> &str {
        &self.inner.config.supabase_anon_key
    }

    pub fn session(&self) -> Option<Session> {
        lock(&self.inner.session).clone()
    }

    /// Token sent as `Authorization: Bearer`; the anon key when signed out
    pub fn bearer_token(&self) -> String {
        self.session()
            .map(|s| s.access_token)
            .unwrap_or_else(|| self.anon_key().to_string())
    }

    /// Replace the session and notify every subscriber
    pub fn set_session(&self, session: Option<Session>) {
        *lock(&self.inner.session) = session.clone();

        // Snapshot so listeners may subscribe/unsubscribe while being called
        let listeners: Vec<Listener> = lock(&self.inner.listeners)
            .iter()
            .map(|(_, l)| l.clone())
            .collect();

        log::debug!(
            "session changed: {} ({} subscribers)",
            if session.is_some() { "present" } else { "cleared" },
            listeners.len()
        );

        for listener in listeners {
            listener(session.as_ref());
        }
    }

    /// Register a session-change callback. Dropping the handle unsubscribes.
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(Option<&Session>) + Send + Sync + 'static,
    {
        let id = self.inner.next_listener_id.fetch_add(1, Ordering::Relaxed);
        lock(&self.inner.listeners).push((id, Arc::new(listener)));
        Subscription {
            client: Arc::downgrade(&self.inner),
            id,
        }
    }

    #[cfg(test)]
    fn subscriber_count(&self) -> usize {
        lock(&self.inner.listeners).len()
    }
}

/// Live session-change subscription
pub struct Subscription {
    client: Weak<Inner>,
    id: u64,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(inner) = self.client.upgrade() {
            lock(&inner.listeners).retain(|(id, _)| *id != self.id);
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Shared gateway handle; panics outside the application root
pub fn use_gateway() -> SupabaseClient {
    use_context::<SupabaseClient>().expect("SupabaseClient not provided; mount inside App")
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::system::auth::User;
    use std::sync::atomic::AtomicUsize;

    fn client() -> SupabaseClient {
        SupabaseClient::new(
            ClientConfig {
                supabase_url: "https://demo.supabase.co".into(),
                supabase_anon_key: "anon".into(),
            },
            None,
        )
    }

    fn session(token: &str) -> Session {
        Session {
            access_token: token.into(),
            refresh_token: "rt".into(),
            expires_at: 0,
            user: User {
                id: "u1".into(),
                email: "admin@example.com".into(),
            },
        }
    }

    #[test]
    fn bearer_falls_back_to_anon_key() {
        let client = client();
        assert_eq!(client.bearer_token(), "anon");
        client.set_session(Some(session("at")));
        assert_eq!(client.bearer_token(), "at");
    }

    #[test]
    fn subscribers_see_every_change_until_dropped() {
        let client = client();
        let seen = Arc::new(AtomicUsize::new(0));
        let signed_in = Arc::new(AtomicUsize::new(0));

        let sub = {
            let seen = seen.clone();
            let signed_in = signed_in.clone();
            client.subscribe(move |s| {
                seen.fetch_add(1, Ordering::SeqCst);
                if s.is_some() {
                    signed_in.fetch_add(1, Ordering::SeqCst);
                }
            })
        };

        client.set_session(Some(session("at")));
        client.set_session(None);
        assert_eq!(seen.load(Ordering::SeqCst), 2);
        assert_eq!(signed_in.load(Ordering::SeqCst), 1);

        drop(sub);
        assert_eq!(client.subscriber_count(), 0);
        client.set_session(Some(session("again")));
        assert_eq!(seen.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn subscription_outliving_client_is_harmless() {
        let sub = client().subscribe(|_| {});
        drop(sub);
    }
}

//! The application builder.
//!
//! [`App`] combines settings, a store, and an actor provider into an
//! Axum router or a runnable HTTP server, in the shape of a
//! builder-then-`run` pipeline.

use std::sync::Arc;

use formsmith_auth::provider::{ActorProvider, SignedTokenProvider};
use formsmith_core::error::{FormsmithError, FormsmithResult};
use formsmith_core::settings::Settings;
use formsmith_store::base::FormStore;
use formsmith_store::memory::MemoryStore;
use formsmith_store::records::FormRecord;

use crate::routes;

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    /// Service settings.
    pub settings: Arc<Settings>,
    /// The storage backend.
    pub store: Arc<dyn FormStore>,
    /// The actor provider for owner routes.
    pub provider: Arc<dyn ActorProvider>,
}

/// The formsmith HTTP application.
///
/// Defaults to an in-memory store and a signed-token actor provider
/// keyed by the settings' secret key; both can be swapped out.
///
/// # Examples
///
/// ```no_run
/// use formsmith_core::settings::Settings;
/// use formsmith_http::App;
///
/// # async fn example() -> Result<(), formsmith_core::FormsmithError> {
/// let settings = Settings::default();
/// let addr = settings.bind_addr.clone();
/// App::new(settings).run(&addr).await?;
/// # Ok(())
/// # }
/// ```
pub struct App {
    settings: Settings,
    store: Arc<dyn FormStore>,
    provider: Arc<dyn ActorProvider>,
}

impl App {
    /// Creates an application with the given settings, an in-memory
    /// store, and a signed-token actor provider.
    pub fn new(settings: Settings) -> Self {
        let provider = Arc::new(SignedTokenProvider::new(settings.secret_key.clone()));
        Self {
            settings,
            store: Arc::new(MemoryStore::new()),
            provider,
        }
    }

    /// Sets the storage backend.
    #[must_use]
    pub fn store(mut self, store: Arc<dyn FormStore>) -> Self {
        self.store = store;
        self
    }

    /// Sets the actor provider.
    #[must_use]
    pub fn actor_provider(mut self, provider: Arc<dyn ActorProvider>) -> Self {
        self.provider = provider;
        self
    }

    /// Returns a reference to the application settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Converts the application into an Axum router.
    pub fn into_router(self) -> axum::Router {
        let state = AppState {
            settings: Arc::new(self.settings),
            store: self.store,
            provider: self.provider,
        };
        routes::router(state)
    }

    /// Runs the application as an HTTP server on the given address.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the address cannot be bound, or
    /// an internal error if the server fails while running.
    pub async fn run(self, addr: &str) -> FormsmithResult<()> {
        let debug = self.settings.debug;
        let router = self.into_router();
        let listener = tokio::net::TcpListener::bind(addr).await.map_err(|e| {
            FormsmithError::ConfigurationError(format!("Failed to bind to {addr}: {e}"))
        })?;

        if debug {
            tracing::info!("Starting development server at http://{addr}/");
        }

        axum::serve(listener, router)
            .await
            .map_err(|e| FormsmithError::InternalServerError(format!("Server error: {e}")))?;

        Ok(())
    }
}

impl std::fmt::Debug for App {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("App")
            .field("debug", &self.settings.debug)
            .field("bind_addr", &self.settings.bind_addr)
            .finish_non_exhaustive()
    }
}

/// Formats the public share link for a form:
/// `{public_base_url}/f/{share_url}`.
pub fn share_link(settings: &Settings, form: &FormRecord) -> String {
    let mut base = settings.public_base_url.clone();
    if !base.ends_with('/') {
        base.push('/');
    }
    url::Url::parse(&base)
        .and_then(|parsed| parsed.join(&format!("f/{}", form.share_url)))
        .map_or_else(
            |_| format!("{base}f/{}", form.share_url),
            |joined| joined.to_string(),
        )
}

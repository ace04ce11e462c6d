//! Page-level bootstrap for the admin console.
//!
//! Provides `Page` (the built-in list pages), `ClientFactory` (how a page
//! reaches its backend), `AdminConsole` (owner of the open page's
//! controller) and `AdminConsoleBuilder`.

use std::fmt;
use std::sync::Arc;

use admin_console_client::{
    ClientConfig, ClientError, ConfigError, HttpResourceClient, ResourceClient,
    Result as ClientResult,
};
use admin_console_core::resources::{role_schema, success_indicator_schema};
use admin_console_core::{ControllerSettings, CoreError, ListController, ResourceSchema};
use thiserror::Error;

/// Bootstrap errors.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Client(#[from] ClientError),

    #[error(transparent)]
    Core(#[from] CoreError),
}

pub type AppResult<T> = std::result::Result<T, AppError>;

/// Built-in list pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Page {
    Roles,
    SuccessIndicators,
}

impl Page {
    pub const ALL: [Page; 2] = [Page::Roles, Page::SuccessIndicators];

    /// Schema driving this page's controller.
    #[must_use]
    pub fn schema(self) -> ResourceSchema {
        match self {
            Self::Roles => role_schema(),
            Self::SuccessIndicators => success_indicator_schema(),
        }
    }

    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Self::Roles => "Role Management",
            Self::SuccessIndicators => "Success Indicators",
        }
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// Produces the backend client for a resource.
pub trait ClientFactory: Send + Sync {
    fn client(&self, resource: &str) -> ClientResult<Arc<dyn ResourceClient>>;
}

/// HTTP clients sharing one connection pool.
pub struct HttpClientFactory {
    config: ClientConfig,
    http: reqwest::Client,
}

impl HttpClientFactory {
    pub fn new(config: ClientConfig) -> ClientResult<Self> {
        let http = config
            .build_http_client()
            .map_err(|e| ClientError::Transport {
                resource: String::new(),
                detail: format!("Failed to build HTTP client: {e}"),
            })?;
        Ok(Self { config, http })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }
}

impl ClientFactory for HttpClientFactory {
    fn client(&self, resource: &str) -> ClientResult<Arc<dyn ResourceClient>> {
        Ok(Arc::new(HttpResourceClient::with_client(
            self.http.clone(),
            &self.config,
            resource,
        )))
    }
}

/// The admin console: at most one list page open at a time.
///
/// Opening a page builds a fresh controller and performs the mount-time
/// load. Navigating away drops the controller and its records.
pub struct AdminConsole {
    factory: Arc<dyn ClientFactory>,
    settings: ControllerSettings,
    current: Option<(Page, ListController)>,
}

impl AdminConsole {
    #[must_use]
    pub fn new(factory: Arc<dyn ClientFactory>) -> Self {
        Self {
            factory,
            settings: ControllerSettings::default(),
            current: None,
        }
    }

    #[must_use]
    pub fn builder() -> AdminConsoleBuilder {
        AdminConsoleBuilder::new()
    }

    /// Open `page`, replacing whatever was open.
    ///
    /// A failed initial load still opens the page; the failure shows in the
    /// controller's error banner.
    pub async fn open(&mut self, page: Page) -> AppResult<&mut ListController> {
        self.close();

        let schema = page.schema();
        let client = self.factory.client(&schema.resource)?;
        let mut controller = ListController::with_settings(client, schema, self.settings);
        if let Err(e) = controller.load().await {
            log::warn!("Initial load of {page} failed: {e}");
        }
        log::info!("Opened {page}");

        let (_, controller) = self.current.insert((page, controller));
        Ok(controller)
    }

    pub fn current_page(&self) -> Option<Page> {
        self.current.as_ref().map(|(page, _)| *page)
    }

    pub fn controller(&self) -> Option<&ListController> {
        self.current.as_ref().map(|(_, c)| c)
    }

    pub fn controller_mut(&mut self) -> Option<&mut ListController> {
        self.current.as_mut().map(|(_, c)| c)
    }

    /// Navigate away from the open page, if any.
    pub fn close(&mut self) {
        if let Some((page, _)) = self.current.take() {
            log::debug!("Closed {page}");
        }
    }

    pub fn settings(&self) -> &ControllerSettings {
        &self.settings
    }
}

/// Builder for `AdminConsole`.
///
/// The backend comes from, in order: an explicit `factory`, an explicit
/// `config`, or `ClientConfig::from_env()`.
#[derive(Default)]
pub struct AdminConsoleBuilder {
    config: Option<ClientConfig>,
    factory: Option<Arc<dyn ClientFactory>>,
    settings: ControllerSettings,
}

impl AdminConsoleBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn config(mut self, config: ClientConfig) -> Self {
        self.config = Some(config);
        self
    }

    #[must_use]
    pub fn factory(mut self, factory: Arc<dyn ClientFactory>) -> Self {
        self.factory = Some(factory);
        self
    }

    #[must_use]
    pub fn settings(mut self, settings: ControllerSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Build the `AdminConsole`.
    ///
    /// # Errors
    /// `AppError::Config` if no backend was given and `ADMIN_API_BASE` is
    /// missing or invalid; `AppError::Client` if the HTTP client cannot be
    /// built.
    pub fn build(self) -> AppResult<AdminConsole> {
        let factory: Arc<dyn ClientFactory> = match (self.factory, self.config) {
            (Some(factory), _) => factory,
            (None, Some(config)) => Arc::new(HttpClientFactory::new(config)?),
            (None, None) => Arc::new(HttpClientFactory::new(ClientConfig::from_env()?)?),
        };
        Ok(AdminConsole {
            factory,
            settings: self.settings,
            current: None,
        })
    }
}

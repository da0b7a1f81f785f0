//! Caller-side orchestration: lookup, bounds check, generate.

use crate::config::{ReportSettings, Settings, SettingsError};
use crate::context::{Clock, IdentityProvider, ReportContext, StaticIdentity, SystemClock};
use crate::error::ReportResult;
use crate::executor::QueryExecutor;
use crate::model::{ReportDefinition, ReportPage, ReportRequest};
use crate::registry::ReportRegistry;
use crate::report::ExplainedQuery;
use crate::sql::Dialect;

/// Owns the registry and the collaborators every generation runs against.
pub struct ReportService {
    registry: ReportRegistry,
    executor: Box<dyn QueryExecutor>,
    identity: Box<dyn IdentityProvider>,
    clock: Box<dyn Clock>,
    limits: ReportSettings,
}

impl ReportService {
    pub fn new(
        registry: ReportRegistry,
        executor: Box<dyn QueryExecutor>,
        identity: Box<dyn IdentityProvider>,
        clock: Box<dyn Clock>,
    ) -> Self {
        Self {
            registry,
            executor,
            identity,
            clock,
            limits: ReportSettings::default(),
        }
    }

    /// A service over the built-in catalog, configured from `settings`.
    pub fn from_settings(
        settings: &Settings,
        executor: Box<dyn QueryExecutor>,
    ) -> Result<Self, SettingsError> {
        settings.validate()?;
        let registry = ReportRegistry::with_defaults().with_lookahead(settings.reports.lookahead);
        let identity = StaticIdentity::new(settings.identity.resolved_user()?);
        Ok(Self::new(registry, executor, Box::new(identity), Box::new(SystemClock))
            .with_limits(settings.reports.clone()))
    }

    pub fn with_limits(mut self, limits: ReportSettings) -> Self {
        self.limits = limits;
        self
    }

    pub fn registry(&self) -> &ReportRegistry {
        &self.registry
    }

    pub fn definition(&self, category: &str, identifier: &str) -> ReportResult<&ReportDefinition> {
        Ok(self.registry.lookup(category, identifier)?.report_definition())
    }

    /// Generate one page. `size` falls back to the configured default.
    pub fn generate(
        &self,
        category: &str,
        identifier: &str,
        request: &ReportRequest,
        page_index: u32,
        size: Option<u32>,
    ) -> ReportResult<ReportPage> {
        let spec = self.registry.lookup(category, identifier)?;
        let size = self.limits.resolve_page_size(size)?;
        let ctx = ReportContext::new(self.executor.as_ref(), self.identity.as_ref(), self.clock.as_ref());
        spec.generate_report(&ctx, request, page_index, size)
    }

    /// The statements [`generate`](Self::generate) would issue, rendered for `dialect`.
    pub fn explain(
        &self,
        category: &str,
        identifier: &str,
        request: &ReportRequest,
        page_index: u32,
        size: Option<u32>,
        dialect: Dialect,
    ) -> ReportResult<Vec<ExplainedQuery>> {
        let spec = self.registry.lookup(category, identifier)?;
        let size = self.limits.resolve_page_size(size)?;
        spec.explain(request, page_index, size, dialect)
    }
}

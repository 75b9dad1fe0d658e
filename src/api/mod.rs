//! API Router Registry
//!
//! Composes the feature routers into one namespaced procedure surface. Operations are
//! addressed as `namespace.procedure` (e.g. `jobOffers.list`) and reached either over
//! HTTP (`POST /api/trpc/{path}`) or in-process through a [`ServerCaller`].

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;
use thiserror::Error;

use crate::{
    auth::{AdminGuard, AuthError, CookieReader},
    error::ApiError,
    repository::RepositoryState,
};

pub mod routers;

/// RequestContext
///
/// Per-request facts a procedure may depend on. Built fresh for every call; the
/// admin flag is the result of the guard's soft check on the caller's cookies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RequestContext {
    admin: bool,
}

impl RequestContext {
    pub fn anonymous() -> Self {
        Self { admin: false }
    }

    /// Context for trusted in-process callers acting as an administrator.
    pub fn admin() -> Self {
        Self { admin: true }
    }

    pub fn from_cookies<C: CookieReader + ?Sized>(guard: &AdminGuard, cookies: &C) -> Self {
        Self {
            admin: guard.verify_admin_auth(cookies),
        }
    }

    pub fn is_admin(&self) -> bool {
        self.admin
    }

    /// Same contract as the guard's hard check, over the already-verified flag.
    pub fn require_admin(&self) -> Result<bool, AuthError> {
        if self.admin {
            Ok(true)
        } else {
            Err(AuthError::Unauthorized)
        }
    }
}

/// FeatureRouter
///
/// One namespace of procedures. Implementations own whatever state they need; the
/// registry never shares anything between them.
#[async_trait]
pub trait FeatureRouter: Send + Sync {
    fn namespace(&self) -> &'static str;

    /// Names of the procedures this router answers, without the namespace prefix.
    fn procedures(&self) -> &'static [&'static str];

    async fn call(
        &self,
        procedure: &str,
        input: Value,
        ctx: &RequestContext,
    ) -> Result<Value, ApiError>;
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("namespace `{0}` is already registered")]
    DuplicateNamespace(&'static str),
}

/// ApiRegistry
///
/// Static namespace-to-router map. Built once at startup and shared read-only.
#[derive(Default, Clone)]
pub struct ApiRegistry {
    routers: HashMap<&'static str, Arc<dyn FeatureRouter>>,
}

impl ApiRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a router. Namespaces are unique; a second router claiming the same
    /// namespace is rejected and the registry is left unchanged.
    pub fn register<R>(&mut self, router: R) -> Result<&mut Self, RegistryError>
    where
        R: FeatureRouter + 'static,
    {
        let namespace = router.namespace();
        if self.routers.contains_key(namespace) {
            return Err(RegistryError::DuplicateNamespace(namespace));
        }
        self.routers.insert(namespace, Arc::new(router));
        Ok(self)
    }

    /// Registered namespaces, sorted.
    pub fn namespaces(&self) -> Vec<&'static str> {
        let mut namespaces: Vec<_> = self.routers.keys().copied().collect();
        namespaces.sort_unstable();
        namespaces
    }

    pub fn contains(&self, namespace: &str) -> bool {
        self.routers.contains_key(namespace)
    }

    /// dispatch
    ///
    /// Resolves `namespace.procedure` and invokes it. Unknown namespaces and
    /// procedures are reported as `NotFound` without touching any router.
    pub async fn dispatch(
        &self,
        path: &str,
        input: Value,
        ctx: &RequestContext,
    ) -> Result<Value, ApiError> {
        let (namespace, procedure) = path
            .split_once('.')
            .ok_or_else(|| ApiError::NotFound(format!("no procedure `{path}`")))?;

        let router = self
            .routers
            .get(namespace)
            .ok_or_else(|| ApiError::NotFound(format!("no procedure `{path}`")))?;

        if !router.procedures().contains(&procedure) {
            return Err(ApiError::NotFound(format!("no procedure `{path}`")));
        }

        tracing::debug!(namespace, procedure, admin = ctx.is_admin(), "dispatching procedure");
        router.call(procedure, input, ctx).await
    }

    /// Server-side caller bound to `ctx`, for invoking procedures without HTTP.
    pub fn caller(&self, ctx: RequestContext) -> ServerCaller<'_> {
        ServerCaller {
            registry: self,
            ctx,
        }
    }
}

/// ServerCaller
///
/// Direct, in-process access to every registered procedure.
pub struct ServerCaller<'a> {
    registry: &'a ApiRegistry,
    ctx: RequestContext,
}

impl ServerCaller<'_> {
    pub async fn call_raw(&self, path: &str, input: Value) -> Result<Value, ApiError> {
        self.registry.dispatch(path, input, &self.ctx).await
    }

    /// Typed call: serializes `input`, deserializes the procedure's output.
    pub async fn call<I, O>(&self, path: &str, input: &I) -> Result<O, ApiError>
    where
        I: Serialize + ?Sized,
        O: DeserializeOwned,
    {
        let input = serde_json::to_value(input).map_err(|e| ApiError::Internal(e.to_string()))?;
        let output = self.call_raw(path, input).await?;
        serde_json::from_value(output).map_err(|e| ApiError::Internal(e.to_string()))
    }
}

/// app_router
///
/// The platform's API surface: every feature router, registered once.
pub fn app_router(repo: RepositoryState) -> Result<ApiRegistry, RegistryError> {
    let mut registry = ApiRegistry::new();
    registry
        .register(routers::AuthRouter::new(repo.clone()))?
        .register(routers::JobOffersRouter::new(repo.clone()))?
        .register(routers::ApplicationsRouter::new(repo.clone()))?
        .register(routers::MessagesRouter::new(repo.clone()))?
        .register(routers::NotificationsRouter::new(repo.clone()))?
        .register(routers::AnalyticsRouter::new(repo))?;
    Ok(registry)
}

/// Reads a procedure's input. A missing input (`null`) is read as `{}` so that
/// inputs made only of optional fields can be omitted.
pub(crate) fn parse_input<T: DeserializeOwned>(input: Value) -> Result<T, ApiError> {
    let input = if input.is_null() {
        Value::Object(Default::default())
    } else {
        input
    };
    Ok(serde_json::from_value(input)?)
}

pub(crate) fn to_output<T: Serialize>(output: T) -> Result<Value, ApiError> {
    serde_json::to_value(output).map_err(|e| ApiError::Internal(e.to_string()))
}

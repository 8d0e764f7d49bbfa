//! Resources: the named, typed, asynchronous capabilities a host exposes
//!
//! A resource is built once when the host assembles an environment and is
//! invoked zero or more times per evaluation. Invocations are independent;
//! nothing here caches or memoizes resolver results. The resolver itself is
//! an opaque async operation from the VM's point of view, and its failures
//! travel back to the caller unchanged.

use async_trait::async_trait;
use std::fmt;
use std::future::Future;
use std::sync::Arc;

use crate::core::{DataType, Value};

/// what a single resolver invocation settles to
pub type ResolverResult = anyhow::Result<Value>;

/// the async seam between the VM and host capabilities
#[async_trait]
pub trait Resolve: Send + Sync {
    async fn resolve(&self, args: Vec<Value>) -> ResolverResult;
}

/// adapter that lets a plain async closure act as a resolver
pub struct FnResolver<F>(pub F);

#[async_trait]
impl<F, Fut> Resolve for FnResolver<F>
where
    F: Fn(Vec<Value>) -> Fut + Send + Sync,
    Fut: Future<Output = ResolverResult> + Send,
{
    async fn resolve(&self, args: Vec<Value>) -> ResolverResult {
        (self.0)(args).await
    }
}

/// A named capability record: declared return type, declared args-type
/// (`Empty` for nullary) and the resolver that produces the value
#[derive(Clone)]
pub struct Resource {
    pub name: String,
    pub rtype: DataType,
    pub args_type: DataType,
    pub resolver: Arc<dyn Resolve>,
}

impl Resource {
    pub fn new(
        name: impl Into<String>,
        rtype: DataType,
        args_type: DataType,
        resolver: impl Resolve + 'static,
    ) -> Self {
        Resource {
            name: name.into(),
            rtype,
            args_type,
            resolver: Arc::new(resolver),
        }
    }

    /// builds a resource straight from an async closure
    pub fn from_fn<F, Fut>(
        name: impl Into<String>,
        rtype: DataType,
        args_type: DataType,
        f: F,
    ) -> Self
    where
        F: Fn(Vec<Value>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ResolverResult> + Send + 'static,
    {
        Self::new(name, rtype, args_type, FnResolver(f))
    }
}

impl fmt::Debug for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resource")
            .field("name", &self.name)
            .field("rtype", &self.rtype)
            .field("args_type", &self.args_type)
            .finish_non_exhaustive()
    }
}

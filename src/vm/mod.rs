//! The runtime: interprets Ask code against an environment
//!
//! Evaluation is a depth-first walk of the tree. Literals settle
//! immediately; the walk suspends only while a `Call` node awaits its
//! resolver, so every node is either pending, suspended on a resolver, or
//! settled, and no node runs twice within one evaluation. Sibling
//! arguments are never interleaved: each one runs to completion before the
//! next starts, which pins down the observable side-effect order of
//! resolvers.
//!
//! The environment is read-only here. Failures are returned, never logged
//! and never retried; a resolver that does not settle stalls the
//! evaluation, and any timeout is the embedding host's business.

use futures::future::{BoxFuture, FutureExt};
use std::result::Result as StdResult;
use thiserror::Error;
use tracing::{debug, trace};

use crate::core::*;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Unknown identifier '{name}'!")]
    UnknownIdentifier { ast_id: usize, name: String },

    #[error("'{name}' is not callable")]
    NotCallable { ast_id: usize, name: String },

    #[error("type mismatch at '{resource}': expected {expected}, got {actual}")]
    TypeMismatch {
        ast_id: usize,
        resource: String,
        expected: DataType,
        actual: DataType,
    },

    #[error("resource '{resource}' failed: {error}")]
    Resolver {
        ast_id: usize,
        resource: String,
        error: anyhow::Error,
    },
}

impl Error {
    /// the id of the node the error originated at
    ///
    /// Indexes the span-vec returned by [`crate::parser::parse`], so a
    /// host can render the error against the source text.
    pub fn ast_id(&self) -> usize {
        match self {
            Self::UnknownIdentifier { ast_id, .. }
            | Self::NotCallable { ast_id, .. }
            | Self::TypeMismatch { ast_id, .. }
            | Self::Resolver { ast_id, .. } => *ast_id,
        }
    }
}

pub type Result<T> = StdResult<T, Error>;

/// whether call sites are validated against declared resource signatures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Typed,
    Untyped,
}

/// evaluates Ask code, validating every resource call site against the
/// resource's declared args-type before invoking, and its declared return
/// type after the resolver settles
pub async fn run_typed(env: &Environment, code: &AskCode) -> Result<Value> {
    debug!("starting typed evaluation");
    eval(env, &code.root, Mode::Typed).await
}

/// evaluates Ask code without static validation; whatever shape a resolver
/// receives or returns is its own business
pub async fn run_untyped(env: &Environment, code: &AskCode) -> Result<Value> {
    debug!("starting untyped evaluation");
    eval(env, &code.root, Mode::Untyped).await
}

fn eval<'a>(env: &'a Environment, node: &'a AskNode, mode: Mode) -> BoxFuture<'a, Result<Value>> {
    async move {
        match node {
            AskNode::StrLit(_, s) => Ok(Value::Str(s.clone())),
            AskNode::IntLit(_, i) => Ok(Value::Int(*i)),
            AskNode::Ident(id, name) => eval_ident(env, *id, name, mode).await,
            AskNode::Call { id, callee, args } => {
                // strictly left to right, each argument settles before the
                // next one starts
                let mut arg_values = Vec::with_capacity(args.len());
                for arg in args {
                    arg_values.push(eval(env, arg, mode).await?);
                }
                match env.resources.get(callee) {
                    Some(resource) => invoke(resource, arg_values, *id, mode).await,
                    // a constant, or nothing at all, cannot be called
                    None => Err(Error::NotCallable {
                        ast_id: *id,
                        name: callee.clone(),
                    }),
                }
            }
        }
    }
    .boxed()
}

async fn eval_ident(env: &Environment, ast_id: usize, name: &str, mode: Mode) -> Result<Value> {
    // constants win over resources on name collisions
    if let Some(value) = env.values.get(name) {
        return Ok(value.clone());
    }
    match env.resources.get(name) {
        // a bare identifier naming a resource is an implicit nullary call
        Some(resource) => invoke(resource, vec![], ast_id, mode).await,
        None => Err(Error::UnknownIdentifier {
            ast_id,
            name: name.to_owned(),
        }),
    }
}

async fn invoke(resource: &Resource, args: Vec<Value>, ast_id: usize, mode: Mode) -> Result<Value> {
    if mode == Mode::Typed {
        let actual = args_type_of(&args);
        if !is_assignable(&actual, &resource.args_type) {
            return Err(Error::TypeMismatch {
                ast_id,
                resource: resource.name.clone(),
                expected: resource.args_type.clone(),
                actual,
            });
        }
    }

    trace!(resource = %resource.name, "invoking resolver");
    let value = resource
        .resolver
        .resolve(args)
        .await
        .map_err(|error| Error::Resolver {
            ast_id,
            resource: resource.name.clone(),
            error,
        })?;

    if mode == Mode::Typed {
        let actual = type_of(&value);
        if !is_assignable(&actual, &resource.rtype) {
            return Err(Error::TypeMismatch {
                ast_id,
                resource: resource.name.clone(),
                expected: resource.rtype.clone(),
                actual,
            });
        }
    }
    Ok(value)
}

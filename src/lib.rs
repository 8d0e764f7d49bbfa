//! AskScript: a small embeddable expression language
//!
//! A script is a single `ask { ... }` block that evaluates to one value.
//! Identifiers inside it are bound by the embedding host: either to named
//! constants, or to named typed resources whose async resolvers are awaited
//! before their result is known.
//!
//! What you need to do to evaluate a script:
//! 1. load the source into a string
//! 1. parse it into an AST using [`parser::parse`]
//! 1. lower the AST into Ask code using [`compiler::lower`]
//! 1. build an [`core::Environment`] holding the values and resources the
//!    script may name
//! 1. hand both to [`vm::run_typed`] or [`vm::run_untyped`] and await the
//!    result:
//!
//!    ```
//!    use askscript::core::{DataType, Environment, Resource, Value};
//!    use askscript::{compiler, parser, vm};
//!
//!    async fn answer() -> anyhow::Result<Value> {
//!        let (program, _spans) = parser::parse("ask { now() }")?;
//!        let code = compiler::lower(&program);
//!
//!        let env = Environment::new()
//!            .with_value("greeting", "Hello, this is your Ask server!")
//!            .with_resource(Resource::from_fn(
//!                "now",
//!                DataType::Str,
//!                DataType::Empty,
//!                |_| async { Ok(Value::from("12:00")) },
//!            ));
//!
//!        Ok(vm::run_typed(&env, &code).await?)
//!    }
//!    ```
//!
//! The typed entry point validates every resource call site against the
//! resource's declared argument and return types; the untyped one invokes
//! resolvers directly and leaves shape checks to them. Ask code is plain
//! data: evaluate it as often as you like, against different environments,
//! or persist it with [`core::AskCode::to_bytes`].

pub mod compiler;
pub mod core;
pub mod parser;
pub mod vm;

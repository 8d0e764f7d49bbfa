//! Contains the AST types. All nodes start with a usize, which is their
//! id. The id refers to the index in the span-vec that is returned together
//! with the ast

use serde::{Deserialize, Serialize};

/// a whole source file: one or more top-level ask blocks
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Program(pub usize, pub Vec<Block>);

/// one `ask { ... }` block, containing exactly one expression
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Block(pub usize, pub Expr);

/// represents an expression
#[derive(Debug, Serialize, Deserialize, Clone)]
pub enum Expr {
    /// string literal, quotes stripped and escapes resolved
    StrLit(usize, String),
    /// integer literal
    IntLit(usize, i64),
    /// a bare identifier
    Symbol(usize, String),
    /// a call. `receiver` is `Some` for the method-call spelling
    /// `recv.callee(args)`; that sugar survives parsing untouched and is
    /// resolved during lowering
    Call {
        id: usize,
        callee: String,
        receiver: Option<Box<Expr>>,
        args: Vec<Expr>,
    },
}

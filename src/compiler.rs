//! Lowers the parser's AST into Ask code
//!
//! Lowering is a total structural rewrite: it resolves the method-call
//! sugar and retags nodes, nothing more. It has no access to an
//! environment, so it cannot fail on unknown identifiers; binding names is
//! the VM's job. Span ids survive the rewrite node for node.

use crate::core::*;

pub trait Lowerable {
    fn lower(&self) -> AskNode;
}

/// lowers a parsed program into runnable Ask code
///
/// [`crate::parser::parse`] guarantees exactly one top-level block; its
/// expression becomes the root node.
pub fn lower(program: &Program) -> AskCode {
    let Program(_, blocks) = program;
    AskCode::new(blocks[0].lower())
}

impl Lowerable for Block {
    fn lower(&self) -> AskNode {
        let Block(_, expr) = self;
        expr.lower()
    }
}

impl Lowerable for Expr {
    fn lower(&self) -> AskNode {
        use Expr::*;
        match self {
            StrLit(id, s) => AskNode::StrLit(*id, s.clone()),
            IntLit(id, i) => AskNode::IntLit(*id, *i),
            Symbol(id, name) => AskNode::Ident(*id, name.clone()),
            Call {
                id,
                callee,
                receiver,
                args,
            } => {
                // the method-call receiver becomes the first ordinary argument
                let mut lowered_args = Vec::with_capacity(args.len() + 1);
                if let Some(recv) = receiver {
                    lowered_args.push(recv.lower());
                }
                lowered_args.extend(args.iter().map(|a| a.lower()));
                AskNode::Call {
                    id: *id,
                    callee: callee.clone(),
                    args: lowered_args,
                }
            }
        }
    }
}

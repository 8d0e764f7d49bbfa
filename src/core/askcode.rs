//! The VM's executable representation, Ask code
//!
//! Isomorphic to the AST with the surface sugar gone: method calls have
//! been rewritten to ordinary calls, so the VM only ever sees literals,
//! identifiers and calls. Node ids still point into the parser's span-vec,
//! which is how runtime errors find their source location.
//!
//! Ask code is immutable and owned by the caller; one lowered tree can be
//! evaluated any number of times, against different environments, and can
//! be persisted in a compact binary form.

use serde::{Deserialize, Serialize};

/// one node of the lowered tree
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub enum AskNode {
    StrLit(usize, String),
    IntLit(usize, i64),
    Ident(usize, String),
    Call {
        id: usize,
        callee: String,
        args: Vec<AskNode>,
    },
}

/// a lowered program, ready to run
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct AskCode {
    /// version of the crate that lowered this code
    pub version: [u16; 3],
    /// the single top-level block's expression
    pub root: AskNode,
}

// stamped into every serialized tree so a host can tell which build of the
// crate lowered it
fn crate_version() -> [u16; 3] {
    let mut parts = env!("CARGO_PKG_VERSION")
        .splitn(3, '.')
        .map(|p| p.parse::<u16>().unwrap_or(0));
    let mut next = || parts.next().unwrap_or(0);
    [next(), next(), next()]
}

impl AskCode {
    pub fn new(root: AskNode) -> Self {
        AskCode {
            version: crate_version(),
            root,
        }
    }

    /// serializes to the compact on-disk form
    pub fn to_bytes(&self) -> postcard::Result<Vec<u8>> {
        postcard::to_stdvec(self)
    }

    /// reloads code produced by [`AskCode::to_bytes`]
    pub fn from_bytes(bytes: &[u8]) -> postcard::Result<Self> {
        postcard::from_bytes(bytes)
    }
}

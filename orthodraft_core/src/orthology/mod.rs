//! Ortholog search and selection: blast invocation, alignment record parsing,
//! multi-criteria hit filtering, and draft-model assembly.

pub mod blast;
pub mod draft;
pub mod filter;
pub mod pipeline;
pub mod record;
pub mod results;

//! Block Drop (workspace facade crate).
//!
//! This package keeps a stable `block_drop::{core,input,store,term,types}`
//! public API while the implementation lives in dedicated crates under
//! `crates/`.

pub use block_drop_core as core;
pub use block_drop_input as input;
pub use block_drop_store as store;
pub use block_drop_term as term;
pub use block_drop_types as types;

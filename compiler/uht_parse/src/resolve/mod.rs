//! Cross-header resolution phases.
//!
//! These run after every header has been parsed and the type table is
//! complete, in this order:
//!
//! 1. [`bind_bases`]: global, over all headers at once
//! 2. [`resolve_properties`]: per header
//! 3. [`resolve_final`]: per header
//! 4. [`validate`]: per header, reading the whole session
//!
//! The per-header phases take one header at a time so the driver can run
//! them in parallel. Headers are indexed by [`HeaderId`](uht_types::HeaderId)
//! everywhere: `headers[i].id.0 == i`.

mod bind;
mod finalize;
mod properties;
mod validate;

pub use bind::bind_bases;
pub use finalize::resolve_final;
pub use properties::resolve_properties;
pub use validate::validate;

use uht_types::{HeaderFile, Node, TypeRef};

#[inline]
fn header_index(id: TypeRef) -> usize {
    id.header.0 as usize
}

fn node_at(headers: &[HeaderFile], id: TypeRef) -> Option<&Node> {
    headers.get(header_index(id))?.get(id.node)
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;

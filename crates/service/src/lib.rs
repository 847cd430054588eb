//! Service layer for the `product` resource.
//! - `product::repository` defines the data-access seam and its SeaORM backing.
//! - `product::memory` is a process-local stand-in with the same semantics.
//! - `pagination` turns raw list query values into a bounded window.

pub mod errors;
pub mod pagination;
pub mod product;
#[cfg(test)]
pub mod test_support;

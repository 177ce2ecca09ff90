//! Attack simulations against stored artifacts and the storage boundary.

pub mod path_traversal;

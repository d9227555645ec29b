//! Sales domain module.
//!
//! Orders reserve stock directly against shared catalog products.

pub mod order;

pub use order::Order;

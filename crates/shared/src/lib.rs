//! Order wire types shared by the order service client and its front ends.

pub mod domain;
pub mod error;
pub mod protocol;

//! Odds and ends shared by the other henge crates that don't belong anywhere else.

pub mod logger;
mod utils;

pub use crate::utils::{plain_list_names, prettyprint_usize};

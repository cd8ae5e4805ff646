//! Cart Total
//!
//! This crate computes shopping-cart subtotals, flat tax and free-shipping
//! eligibility, and hands the results to display collaborators supplied by
//! the caller.

pub mod cli;
pub mod config;
pub mod core;
pub mod display;
pub mod import;

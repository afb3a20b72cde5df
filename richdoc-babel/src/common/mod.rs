//! Helpers shared by more than one format.

pub mod links;

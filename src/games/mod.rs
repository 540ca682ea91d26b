//! Complete games built on cards and phases.

pub mod duel;

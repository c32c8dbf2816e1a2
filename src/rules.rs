//! Rule sets shipped with the crate.
//!
//! Each set is plain rule-file text embedded in the binary, parsed once on
//! first use and run through the regular engine.

pub mod du2ich;

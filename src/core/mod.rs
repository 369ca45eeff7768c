// Core modules implementing arithmetic, file access, and error modeling.
pub mod arith;
pub mod error;
pub mod file;

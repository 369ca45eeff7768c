//! Purpose: Define the stable public Rust API boundary for examplecode.
//! Exports: Arithmetic helpers, file open helpers, and the error model.
//! Role: Public, additive-only surface used by the CLI.
//! Invariants: Callers outside the crate should not need `core` paths.

#[doc(hidden)]
pub use crate::core::error::to_exit_code;
pub use crate::core::arith::{Scalar, cube, cube_all, square, square_all};
pub use crate::core::error::{Error, ErrorKind};
pub use crate::core::file::{DEFAULT_FILE_NAME, open_file, open_file_in};

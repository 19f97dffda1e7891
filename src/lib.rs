//! # Ownership Idioms
//!
//! Two small, unrelated idioms:
//!
//! 1. **Exclusive ownership** - [`OwningBox`], a value type that owns zero or
//!    one heap resource and gets copy, move, self-assignment and release right.
//! 2. **Build-time diagnostics** - [`diagnostics`], pointer printing that
//!    compiles to nothing unless the `to-cout` feature is enabled, plus
//!    [`symbolize`] to make its output diffable.
//!
//! ## Running
//!
//! ```bash
//! cargo run --bin rule_of_five_demo
//! cargo run --features to-cout --bin rule_of_five_demo
//! cargo run --features to-cout --bin rule_of_five_demo | cargo run --bin symbolize_pointers -- -
//! ```

pub mod diagnostics;
pub mod error;
pub mod owning_box;
pub mod symbolize;

pub use error::{OwnershipError, Result, SymbolizeError};
pub use owning_box::{copy_assign_at, move_assign_at, try_copy_assign_at, OwningBox, Resource};
pub use symbolize::PointerSymbolizer;

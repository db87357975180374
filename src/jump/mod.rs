//! Remembered positions and the jump stack that manages them.
//!
//! # Modules
//!
//! - `position`: a remembered (document, pane, cursor) triple and how to jump back to it
//! - `batch`: the argument of the push-then-run-commands entry point
//! - `manager`: `JumpStack`, which owns the stack of positions
//!
//! # Example
//!
//! ```
//! use jumpstack::jump::manager::JumpStack;
//! use jumpstack::surface::memory::MemorySurface;
//! use jumpstack::surface::{Cursor, Pane};
//!
//! let mut surface = MemorySurface::new();
//! surface.add_document("main.rs", "fn main() {}\n");
//! surface.open("main.rs", Pane::Active).unwrap();
//!
//! let mut jumps = JumpStack::new(surface);
//! jumps.push_position().unwrap();
//! assert_eq!(jumps.len(), 1);
//! assert_eq!(jumps.peek().unwrap().cursor, Cursor::new(0, 0));
//! ```

pub mod batch;
pub mod manager;
pub mod position;

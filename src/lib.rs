//! Jump Stack - remember cursor positions and pop back to them.
//!
//! The crate keeps a stack of remembered (document, pane, cursor) positions
//! on behalf of an editor. Pushing records where the user is, popping jumps
//! back, and document edits shift remembered lines so they stay put.
//!
//! # Modules
//!
//! - `stack`: bounded LIFO container
//! - `jump`: remembered positions and the `JumpStack` manager
//! - `surface`: the editor capabilities the jump stack depends on
//! - `host`: activate/deactivate lifecycle and the named commands
//! - `config`: TOML configuration
//! - `replay`: scripted sessions against an in-memory editor

pub mod config;
pub mod host;
pub mod jump;
pub mod replay;
pub mod stack;
pub mod surface;

//! `dk-index` — the ordered entity index.
//!
//! # Crate layout
//!
//! | Module      | Contents                                          |
//! |-------------|---------------------------------------------------|
//! | [`tree`]    | `EntityIndex` (owning BST), `InOrder` iterator    |
//!
//! # Known limitation
//!
//! The tree is never rebalanced.  Search, insert and delete cost O(height),
//! which degrades to O(n) when keys arrive in sorted order.  All traversals
//! are iterative, so a degenerate tree costs time but never stack depth.

pub mod tree;


pub use tree::{EntityIndex, InOrder};

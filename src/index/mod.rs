//! Index Module
//!
//! In-memory structures a table is composed of.
//!
//! ## Responsibilities
//! - Own record storage behind stable handles (`RecordArena`)
//! - Keep the insertion order of live records (`RecordSequence`)
//! - Map keys to handles in fixed-bucket hash chains (`HashIndex`)
//!
//! ## Layout
//! ```text
//!   RecordSequence          RecordArena              HashIndex<i32>
//!  ┌──────────────┐      ┌───────────────────┐     ┌──────────────────┐
//!  │ h2 → h0 → h1 │ ───► │ slot0 │ slot1 │ … │ ◄── │ [k mod n] → h, … │
//!  └──────────────┘      └───────────────────┘     └──────────────────┘
//!                                 ▲
//!                                 └──────────────── HashIndex<String>
//! ```
//!
//! Neither the sequence nor the indexes own records: they hold `Handle`s,
//! and a handle to a freed slot simply stops resolving.

mod arena;
mod hash;
mod sequence;

pub use arena::{Handle, RecordArena};
pub use hash::{djb2, HashIndex, IndexEntry, IndexKey};
pub use sequence::RecordSequence;

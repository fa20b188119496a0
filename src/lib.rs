//! A tiny stack machine built around a mark-and-sweep collected heap.
//!
//! The machine owns a fixed pool of cells. Clients build objects through the
//! execution stack (`push_atom`, `push_pair`, `pop`), which doubles as the
//! collector's root set. Collections run synchronously: when the live-object
//! count reaches the configured threshold, or when an allocation finds the
//! free list empty.
#[macro_use]
extern crate log;

pub mod heap;
pub mod runtime;

pub use heap::{GcStats, Heap};
pub use runtime::cell::{Cell, CellRef, CellValue};
pub use runtime::config::Config;
pub use runtime::error::VmError;
pub use runtime::vm::Vm;

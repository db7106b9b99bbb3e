//! STC Tetris (workspace facade crate).
//!
//! Re-exports the workspace crates under one name so the binary, the
//! integration tests and the benchmarks use `stc_tetris::{core,input,term,types}`.

pub use stc_tetris_core as core;
pub use stc_tetris_input as input;
pub use stc_tetris_term as term;
pub use stc_tetris_types as types;

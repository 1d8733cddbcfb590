//! In-place rewrites of CI configuration files

pub mod block;
pub mod matrix;

pub use block::{BlockPatcher, MergedBlock, PatchOutcome, merge_block};
pub use matrix::{ChannelFields, TestMatrix, patch_matrix, update_matrix_file};

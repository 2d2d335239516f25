/// Decode and branch resolution.
pub mod decode;
/// Data memory access.
pub mod memory;
/// Register-file commit.
pub mod writeback;

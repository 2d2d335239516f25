/// Load-use stall timing.
pub mod load_use;

/// Hazard detection, forwarding, and branch flush timing.
pub mod hazards;
/// Individual stage transfer functions.
pub mod stages;

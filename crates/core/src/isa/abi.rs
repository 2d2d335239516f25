//! MIPS register ABI names.
//!
//! The conventional names for the 32 general-purpose registers, used by the
//! assembler (both `$t0` and `$8` forms are accepted) and by state dumps.

/// ABI names indexed by register number, without the `$` sigil.
pub const REG_NAMES: [&str; 32] = [
    "zero", "at", "v0", "v1", "a0", "a1", "a2", "a3", "t0", "t1", "t2", "t3", "t4", "t5", "t6",
    "t7", "s0", "s1", "s2", "s3", "s4", "s5", "s6", "s7", "t8", "t9", "k0", "k1", "gp", "sp",
    "fp", "ra",
];

/// The link register written by `jal`.
pub const LINK_REG: u8 = 31;

/// Returns the display name for a register index, e.g. `"$t0"` for 8.
///
/// Indices outside 0..32 fall back to `"$?"`.
pub fn name(idx: u8) -> String {
    REG_NAMES
        .get(idx as usize)
        .map_or_else(|| "$?".to_string(), |n| format!("${n}"))
}

/// Parses a register token into its index.
///
/// Accepts the ABI name (`$t0`) or numeric (`$8`) form; the `$` sigil is
/// required.
///
/// # Returns
///
/// `None` when the token is not a valid register reference.
pub fn parse(token: &str) -> Option<u8> {
    let body = token.strip_prefix('$')?;
    if let Ok(num) = body.parse::<u8>() {
        return (num < 32).then_some(num);
    }
    REG_NAMES.iter().position(|&n| n == body).map(|i| i as u8)
}

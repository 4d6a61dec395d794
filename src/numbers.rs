/// Implements sign extension as described at [Sign extension](https://en.wikipedia.org/wiki/Sign_extension).
///
/// Only the lowest `valid_bits` bits of `bits` are considered. If the highest of those is set
/// the value is 1-extended to 16 bits, so it reads as the same negative number in 2's complement.
#[must_use]
pub const fn sign_extend(bits: u16, valid_bits: u8) -> u16 {
    debug_assert!(valid_bits > 0 && valid_bits < 16, "invalid bit width");
    let bits = bits & ((1 << valid_bits) - 1);
    let most_significant_bit = (bits >> (valid_bits - 1)) & 1;
    if most_significant_bit == 1 {
        // negative: 1-extend
        bits | (0xFFFF << valid_bits)
    } else {
        // positive, already 0-extended
        bits
    }
}

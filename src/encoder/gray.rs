//! Reflected binary (Gray) code conversion.
//!
//! Absolute sensors emit Gray code so that a sample taken while the shaft is
//! between two codes is off by at most one count.

/// Convert a binary count to its Gray code.
#[inline]
pub const fn encode(binary: u32) -> u32 {
    binary ^ (binary >> 1)
}

/// Convert a Gray code back to a binary count.
///
/// Folds the code onto itself one shift at a time until the shifted mask is
/// empty, so bit `i` of the result is the XOR of all code bits at or above
/// `i`.
#[inline]
pub const fn decode(gray: u32) -> u32 {
    let mut binary = gray;
    let mut mask = gray >> 1;
    while mask != 0 {
        binary ^= mask;
        mask >>= 1;
    }
    binary
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_codes() {
        // (binary, gray)
        let table = [(0, 0b000), (1, 0b001), (2, 0b011), (3, 0b010), (4, 0b110), (7, 0b100)];
        for (binary, gray) in table {
            assert_eq!(encode(binary), gray);
            assert_eq!(decode(gray), binary);
        }
    }

    #[test]
    fn test_roundtrip_all_12_bit_codes() {
        for code in 0..4096u32 {
            assert_eq!(decode(encode(code)), code);
        }
    }

    #[test]
    fn test_adjacent_codes_differ_in_one_bit() {
        for code in 0..4095u32 {
            assert_eq!((encode(code) ^ encode(code + 1)).count_ones(), 1);
        }
    }

    #[test]
    fn test_full_width() {
        assert_eq!(decode(encode(u32::MAX)), u32::MAX);
        assert_eq!(decode(encode(0x00FF_FFFF)), 0x00FF_FFFF);
    }
}

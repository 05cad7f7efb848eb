//! MSB-first bit addressing into byte strings, used to steer path traversal.

/// Depth of the full sparse tree: one level per key bit.
pub const MAX_DEPTH: usize = 256;

/// Returns the bit of `data` at `position`, counting from the most
/// significant bit of the first byte.
///
/// A set bit steers traversal to the right child at that level.
pub fn get_bit_at_from_msb(data: &[u8], position: usize) -> bool {
    assert!(position < data.len() * 8, "Index out of bounds");
    data[position / 8] & (1u8 << (7 - position % 8)) != 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_msb_first() {
        let data = [0b1000_0001u8, 0b0100_0000];

        assert!(get_bit_at_from_msb(&data, 0));
        assert!(!get_bit_at_from_msb(&data, 1));
        assert!(get_bit_at_from_msb(&data, 7));
        assert!(!get_bit_at_from_msb(&data, 8));
        assert!(get_bit_at_from_msb(&data, 9));
        assert!(!get_bit_at_from_msb(&data, 15));
    }

    #[test]
    #[should_panic(expected = "Index out of bounds")]
    fn rejects_out_of_range_positions() {
        get_bit_at_from_msb(&[0xFF], 8);
    }
}

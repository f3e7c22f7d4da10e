//! Deterministic pixel pattern generation.
//!
//! The pattern is the byte ramp `buf[i] = i mod 256`, the same sequence the
//! vendor stub has always written. Kept free of any I/O so tests can check
//! frame contents without a provider.

/// Fill `buf` with the ramp pattern.
pub fn fill_pattern(buf: &mut [u8]) {
    for (i, byte) in buf.iter_mut().enumerate() {
        *byte = (i % 256) as u8;
    }
}

/// First `len` bytes of the ramp pattern.
pub fn pattern_bytes(len: usize) -> Vec<u8> {
    let mut buf = vec![0u8; len];
    fill_pattern(&mut buf);
    buf
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ramp_is_index_mod_256() {
        let buf = pattern_bytes(600);
        for (i, byte) in buf.iter().enumerate() {
            assert_eq!(*byte, (i % 256) as u8);
        }
    }

    #[test]
    fn ramp_wraps_at_256() {
        let buf = pattern_bytes(257);
        assert_eq!(buf[255], 255);
        assert_eq!(buf[256], 0);
    }

    #[test]
    fn fill_overwrites_existing_contents() {
        let mut buf = [0xffu8; 32];
        fill_pattern(&mut buf);
        let expected: Vec<u8> = (0u8..32).collect();
        assert_eq!(&buf[..], &expected[..]);
    }

    #[test]
    fn empty_buffer_is_a_no_op() {
        let mut buf: [u8; 0] = [];
        fill_pattern(&mut buf);
    }
}

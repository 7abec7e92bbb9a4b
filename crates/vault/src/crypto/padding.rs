//! Length-marker padding that keeps the packed blob a multiple of 3 bytes.
//!
//! ```text
//! [p] || zeros(p - 1) || plaintext        p ∈ 1..=3
//! ```
//!
//! This only makes the base64 form free of `=` characters. It hides nothing
//! about the plaintext length.

use zeroize::Zeroizing;

use common::protocol::{HEADER_LEN, TAG_LEN};

/// Length of the padding prefix for a plaintext of `plaintext_len` bytes.
pub fn padding_len(plaintext_len: usize) -> usize {
    3 - ((HEADER_LEN + plaintext_len + TAG_LEN) % 3)
}

/// Prefix `plaintext` with its padding marker.
pub fn pad(plaintext: &[u8]) -> Zeroizing<Vec<u8>> {
    let p = padding_len(plaintext.len());
    let mut padded = Zeroizing::new(Vec::with_capacity(p + plaintext.len()));
    // p <= 3, so the marker always fits in one byte.
    padded.push(p as u8);
    padded.resize(p, 0);
    padded.extend_from_slice(plaintext);
    padded
}

/// Strip the padding prefix, returning the original plaintext bytes.
///
/// The marker must be in `1..=padded.len()`. An empty buffer, a zero marker
/// or a marker past the end returns `None` rather than slicing leniently;
/// only an authenticated blob from a non-conforming encoder can get here.
pub fn unpad(padded: &[u8]) -> Option<&[u8]> {
    let p = usize::from(*padded.first()?);
    if p == 0 || p > padded.len() {
        return None;
    }
    Some(&padded[p..])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn padding_is_between_one_and_three() {
        for len in 0..64 {
            let p = padding_len(len);
            assert!((1..=3).contains(&p), "len {len} gave padding {p}");
        }
    }

    #[test]
    fn packed_length_is_multiple_of_three() {
        for len in 0..300 {
            let padded = pad(&vec![0xAB; len]);
            assert_eq!((HEADER_LEN + padded.len() + TAG_LEN) % 3, 0, "len {len}");
        }
    }

    #[test]
    fn aligned_length_gets_three_byte_prefix() {
        // 76 + 1 + 16 = 93
        assert_eq!(*pad(b"x"), vec![3, 0, 0, b'x']);
        // 76 + 0 + 16 = 92
        assert_eq!(*pad(b""), vec![1]);
        // 76 + 2 + 16 = 94
        assert_eq!(*pad(b"ab"), vec![2, 0, b'a', b'b']);
    }

    #[test]
    fn unpad_reverses_pad() {
        for text in ["", "a", "ab", "abc", "Hello, world!", "héllo wörld ✓"] {
            let padded = pad(text.as_bytes());
            assert_eq!(unpad(&padded), Some(text.as_bytes()));
        }
    }

    #[test]
    fn unpad_rejects_empty_buffer() {
        assert_eq!(unpad(&[]), None);
    }

    #[test]
    fn unpad_rejects_zero_marker() {
        assert_eq!(unpad(&[0, b'a']), None);
    }

    #[test]
    fn unpad_rejects_marker_past_end() {
        assert_eq!(unpad(&[3, 0]), None);
    }

    #[test]
    fn unpad_accepts_marker_equal_to_length() {
        assert_eq!(unpad(&[2, 0]), Some(&[][..]));
    }
}

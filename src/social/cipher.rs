//! Repeating-key XOR used to obfuscate message bodies.
//!
//! Output byte `i` is input byte `i` XOR key byte `i % key.len()`. The key is
//! the sender's username, which is public, so this hides text from casual
//! inspection only. Applying the transform twice with the same key restores
//! the input.

/// XOR `data` in place with the repeating `key`. An empty key leaves `data` unchanged.
pub fn xor_in_place(data: &mut [u8], key: &[u8]) {
    if key.is_empty() {
        return;
    }
    for (byte, k) in data.iter_mut().zip(key.iter().cycle()) {
        *byte ^= k;
    }
}

/// Obfuscate `plaintext` with the sender's username as key.
pub fn obfuscate(plaintext: &[u8], sender: &str) -> Vec<u8> {
    let mut body = plaintext.to_vec();
    xor_in_place(&mut body, sender.as_bytes());
    body
}

/// Reverse [`obfuscate`]; the same transform, named for readability at call sites.
pub fn reveal(body: &[u8], sender: &str) -> Vec<u8> {
    obfuscate(body, sender)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_known_vector() {
        // 'h' ^ 'a' = 0x09, 'i' ^ 'l' = 0x05
        assert_eq!(obfuscate(b"hi", "alice"), vec![0x09, 0x05]);
    }

    #[test]
    fn key_repeats_cyclically() {
        let out = obfuscate(&[0u8; 5], "ab");
        assert_eq!(out, b"ababa");
    }

    #[test]
    fn round_trip_recovers_plaintext() {
        for (text, key) in [
            ("hello world", "alice"),
            ("", "bob"),
            ("a much longer message than the key itself", "k"),
            ("ünïcödé ✓", "zoë"),
        ] {
            let sealed = obfuscate(text.as_bytes(), key);
            assert_eq!(reveal(&sealed, key), text.as_bytes());
        }
    }

    #[test]
    fn byte_equal_to_key_survives() {
        // "aaa" under key "a" becomes all zero bytes; nothing may be dropped.
        let sealed = obfuscate(b"aaa", "a");
        assert_eq!(sealed, vec![0, 0, 0]);
        assert_eq!(reveal(&sealed, "a"), b"aaa");
    }

    #[test]
    fn wrong_key_does_not_recover() {
        let sealed = obfuscate(b"secret", "alice");
        assert_ne!(reveal(&sealed, "bob"), b"secret");
    }

    #[test]
    fn empty_key_is_identity() {
        let mut data = b"abc".to_vec();
        xor_in_place(&mut data, b"");
        assert_eq!(data, b"abc");
    }
}

use crc32fast::Hasher;

const BASE36: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// CRC32 of a string, rendered in base 36
pub fn hash(input: &str) -> String {
    let mut hasher = Hasher::new();
    hasher.update(input.as_bytes());
    to_base36(hasher.finalize())
}

fn to_base36(mut value: u32) -> String {
    if value == 0 {
        return "0".to_string();
    }

    let mut digits = Vec::with_capacity(7);
    while value > 0 {
        digits.push(BASE36[(value % 36) as usize]);
        value /= 36;
    }
    digits.reverse();
    String::from_utf8_lossy(&digits).into_owned()
}

/// Class name for a canonical rule string
pub fn class_name(prefix: &str, canonical: &str) -> String {
    format!("{}{}", prefix, hash(&format!("<>{}", canonical)))
}

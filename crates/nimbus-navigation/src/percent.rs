//! Minimal percent encode/decode for query components and display
//! addresses. Unreserved characters per RFC 3986.

pub fn encode(input: &str) -> String {
    let mut result = String::with_capacity(input.len() * 3);
    for byte in input.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                result.push(byte as char);
            }
            _ => {
                result.push_str(&format!("%{:02X}", byte));
            }
        }
    }
    result
}

/// Decode %XX escapes. Malformed escapes are kept verbatim rather than
/// erroring, since this feeds a display string.
pub fn decode(input: &str) -> String {
    let bytes = input.as_bytes();
    let mut result = Vec::with_capacity(bytes.len());
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] == b'%' {
            if let (Some(hi), Some(lo)) = (
                bytes.get(i + 1).and_then(|b| (*b as char).to_digit(16)),
                bytes.get(i + 2).and_then(|b| (*b as char).to_digit(16)),
            ) {
                result.push((hi * 16 + lo) as u8);
                i += 3;
                continue;
            }
        }
        result.push(bytes[i]);
        i += 1;
    }

    String::from_utf8_lossy(&result).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode() {
        assert_eq!(encode("hello world"), "hello%20world");
        assert_eq!(encode("a-b_c.d~e"), "a-b_c.d~e");
        assert_eq!(encode("q=1&r=2"), "q%3D1%26r%3D2");
    }

    #[test]
    fn test_decode() {
        assert_eq!(decode("hello%20world"), "hello world");
        assert_eq!(decode("https%3A%2F%2Fexample.com"), "https://example.com");
    }

    #[test]
    fn test_decode_malformed_kept_verbatim() {
        assert_eq!(decode("50%"), "50%");
        assert_eq!(decode("%zz"), "%zz");
    }

    #[test]
    fn test_roundtrip() {
        let original = "rust programming: ownership & borrowing?";
        assert_eq!(decode(&encode(original)), original);
    }
}

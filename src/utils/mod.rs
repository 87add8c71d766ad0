/// Length of every generated short code.
pub const CODE_LEN: usize = 6;

/// Longest accepted long URL, in characters.
pub const MAX_URL_LEN: usize = 2048;

/// Largest `POST /shorten` body read, in bytes.
pub const MAX_BODY_LEN: usize = 6 * 1024 * 1024;

const CODE_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

pub fn generate_random_code(length: usize) -> String {
    use std::iter;

    // 随机选择字母和数字，62 个字符等概率
    iter::repeat_with(|| CODE_ALPHABET[rand::random_range(0..CODE_ALPHABET.len())] as char)
        .take(length)
        .collect()
}

/// Exactly `CODE_LEN` ASCII letters or digits.
#[inline]
pub fn is_valid_short_code(code: &str) -> bool {
    code.len() == CODE_LEN && code.bytes().all(|b| b.is_ascii_alphanumeric())
}

/// Codes shadowed by fixed routes; never handed out.
const RESERVED_CODES: &[&str] = &["health"];

#[inline]
pub fn is_reserved_short_code(code: &str) -> bool {
    RESERVED_CODES.contains(&code)
}

/// Current time as unix seconds.
#[inline]
pub fn unix_now() -> i64 {
    chrono::Utc::now().timestamp()
}

/// Weights applied to the ten digits of a code, leftmost first.
pub const WEIGHTS: [u32; 10] = [4, 3, 2, 7, 6, 5, 4, 3, 2, 1];

/// Weighted digit sum of a `DDMMYYNNNN` or `DDMMYY-NNNN` code.
///
/// Returns `None` unless the input is exactly ten ASCII digits, optionally
/// with a dash before the last four.
pub fn weighted_sum(code: &str) -> Option<u32> {
    let digits = strip_dash(code)?;
    if digits.len() != WEIGHTS.len() {
        return None;
    }

    let mut sum = 0;
    for (byte, weight) in digits.bytes().zip(WEIGHTS) {
        if !byte.is_ascii_digit() {
            return None;
        }
        sum += u32::from(byte - b'0') * weight;
    }
    Some(sum)
}

/// True when the weighted digit sum is divisible by 11.
///
/// Malformed input is never valid.
pub fn is_valid_checksum(code: &str) -> bool {
    weighted_sum(code).is_some_and(|sum| sum % 11 == 0)
}

fn strip_dash(code: &str) -> Option<String> {
    match code.len() {
        10 => Some(code.to_string()),
        11 if code.as_bytes()[6] == b'-' => Some(format!("{}{}", &code[..6], &code[7..])),
        _ => None,
    }
}

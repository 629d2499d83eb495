//! Operator-entered address validation.

/// Returns true iff `candidate` is exactly four dot-separated decimal groups,
/// each in `0..=255`.
///
/// Whitespace is never trimmed here; callers that accept padded input trim
/// it first. Groups are limited to three digits, so `"010.0.0.1"` is valid
/// but `"0001.0.0.1"` is not.
///
/// ```
/// use firewall_console::data::is_valid_ip;
///
/// assert!(is_valid_ip("10.0.0.1"));
/// assert!(!is_valid_ip("10.0.0.256"));
/// assert!(!is_valid_ip(" 10.0.0.1"));
/// ```
pub fn is_valid_ip(candidate: &str) -> bool {
    let mut groups = 0;
    for group in candidate.split('.') {
        groups += 1;
        if groups > 4 || group.is_empty() || group.len() > 3 {
            return false;
        }
        if !group.bytes().all(|b| b.is_ascii_digit()) {
            return false;
        }
        match group.parse::<u16>() {
            Ok(octet) if octet <= 255 => {}
            _ => return false,
        }
    }
    groups == 4
}

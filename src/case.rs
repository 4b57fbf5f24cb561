//! Canonical-case conversion for derived environment keys.

/// Convert a resolved field name to the canonical `UPPER_SNAKE` form used to
/// build lookup keys.
///
/// A separator is inserted where a lowercase letter or digit is followed by
/// an uppercase letter. A run of two or more uppercase letters followed by a
/// lowercase letter is an acronym whose last letter starts the next word
/// (`HTTPServer` → `HTTP_SERVER`); a run followed by a digit or the end of
/// the input stays joined (`IPv4Config` → `IPV4_CONFIG`). Digits never start
/// a word on their own. Literal `.` separators are normalized to `_`.
///
/// The conversion is idempotent: feeding the output back in returns it
/// unchanged.
pub(crate) fn env_case(name: &str) -> String {
    let chars: Vec<char> = name.chars().collect();
    let mut out = String::with_capacity(name.len() + 4);
    let mut upper_run = 0usize;

    for (i, &curr) in chars.iter().enumerate() {
        let next = chars.get(i + 1).copied();
        let next_next = chars.get(i + 2).copied();

        if curr == '.' {
            out.push('_');
            upper_run = 0;
        } else if curr.is_ascii_uppercase() {
            if upper_run == 0
                && i > 0
                && (chars[i - 1].is_ascii_lowercase() || chars[i - 1].is_ascii_digit())
            {
                out.push('_');
            }
            if upper_run >= 2
                && next.is_some_and(|c| c.is_ascii_lowercase())
                && !next_next.is_some_and(|c| c.is_ascii_digit())
            {
                out.push('_');
                upper_run = 0;
            }
            out.push(curr);
            upper_run += 1;
        } else if curr.is_ascii_lowercase() {
            if upper_run >= 2 && !next.is_some_and(|c| c.is_ascii_digit()) {
                out.push('_');
            }
            out.push(curr.to_ascii_uppercase());
            upper_run = 0;
        } else {
            out.push(curr);
            upper_run = 0;
        }
    }

    out
}

/// Trims leading and trailing whitespace and collapses internal runs of
/// whitespace to a single space. Idempotent.
pub fn normalize(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut prev_space = false;
    for ch in raw.trim().chars() {
        if ch.is_whitespace() {
            if prev_space {
                continue;
            }
            prev_space = true;
            out.push(' ');
        } else {
            prev_space = false;
            out.push(ch);
        }
    }
    out
}

/// Student numbers are digit runs; whitespace inside them is stripped
/// entirely rather than collapsed.
pub fn normalize_student_number(raw: &str) -> String {
    raw.chars().filter(|ch| !ch.is_whitespace()).collect()
}

/// True iff `s` is 3 to 10 ASCII digits with no other characters.
pub fn is_valid_student_number(s: &str) -> bool {
    (3..=10).contains(&s.len()) && s.bytes().all(|b| b.is_ascii_digit())
}

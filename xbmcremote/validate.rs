use std::net::Ipv4Addr;

/// Verdict for a value typed into an edit box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Validity {
    Invalid,
    /// Not usable yet, but could become valid with more typing.
    Intermediate,
    Acceptable,
}

/// `a.b.c.d` with an optional `:port`.
pub fn validate_address(text: &str) -> Validity {
    if text.is_empty() {
        return Validity::Intermediate;
    }

    let mut host = text;
    if let Some((h, port)) = text.split_once(':') {
        if port.contains(':') {
            return Validity::Invalid;
        }
        if port.is_empty() {
            return Validity::Intermediate;
        }
        if !port.bytes().all(|b| b.is_ascii_digit()) {
            return Validity::Invalid;
        }
        match port.parse::<u32>() {
            Ok(p) if p <= 65535 => {}
            _ => return Validity::Invalid,
        }
        host = h;
    }

    if host.parse::<Ipv4Addr>().is_ok() {
        return Validity::Acceptable;
    }

    let colons = text.matches(':').count();
    let dots = text.matches('.').count();
    let digits_only = text.bytes().all(|b| b.is_ascii_digit() || b == b'.' || b == b':');
    if digits_only && text.bytes().any(|b| b.is_ascii_digit()) && colons < 2 && dots < 4 {
        return Validity::Intermediate;
    }
    Validity::Invalid
}

/// Integer within `[min, max]`.
pub fn validate_int(text: &str, min: i64, max: i64) -> Validity {
    if text.is_empty() || (text == "-" && min < 0) {
        return Validity::Intermediate;
    }
    match text.parse::<i64>() {
        Ok(v) if (min..=max).contains(&v) => Validity::Acceptable,
        // Still short of the lower bound, another digit may fix it.
        Ok(v) if v >= 0 && v < min && digit_count(v) < digit_count(max) => {
            Validity::Intermediate
        }
        _ => Validity::Invalid,
    }
}

fn digit_count(v: i64) -> usize {
    v.unsigned_abs().to_string().len()
}

/// Parses an operand token as `f64`.
///
/// Literals too large for `f64` are rejected instead of becoming infinite. Only the
/// spelled-out `inf`, `infinity` and `nan` (any case, optional sign) may be non-finite.
pub fn parse_number(token: &str) -> Option<f64> {
    let v = token.parse::<f64>().ok()?;
    if v.is_finite() || is_special(token) {
        Some(v)
    } else {
        None
    }
}

fn is_special(token: &str) -> bool {
    let unsigned = token.strip_prefix(&['+', '-'][..]).unwrap_or(token);
    ["inf", "infinity", "nan"]
        .iter()
        .any(|name| unsigned.eq_ignore_ascii_case(name))
}

/// Parse a filter pore size cell.
///
/// Tries the whole (trimmed) cell first, then falls back to its first
/// whitespace-delimited token so values with a trailing unit such as
/// `"1.6 uM"` still parse. Non-finite values are rejected.
pub fn parse_pore_size(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    let value = match trimmed.parse::<f64>() {
        Ok(v) => v,
        Err(_) => trimmed.split_whitespace().next()?.parse::<f64>().ok()?,
    };
    value.is_finite().then_some(value)
}

/// Render a pore size in its natural text form: integral values keep one
/// decimal place (`1.0`), everything else uses the shortest round-trip form.
pub fn format_pore_size(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e16 {
        format!("{value:.1}")
    } else {
        format!("{value}")
    }
}

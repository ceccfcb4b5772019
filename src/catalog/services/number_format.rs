/// Formats an integer with `,` thousands separators (`1234567` → `1,234,567`)
pub fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Compact human form: `1.2K`, `3.4M`, `5.6B`, or the grouped integer below 1000.
///
/// One decimal place, rounded.
pub fn compact_number(n: u64) -> String {
    const UNITS: [(f64, &str); 3] = [(1e3, "K"), (1e6, "M"), (1e9, "B")];

    let value = n as f64;
    if value < 1e3 {
        return group_thousands(n);
    }
    let mut index = UNITS
        .iter()
        .rposition(|(scale, _)| value >= *scale)
        .unwrap_or(0);
    // 999.95K rounds to 1000.0K, which reads as 1.0M
    if index + 1 < UNITS.len() && (value / UNITS[index].0 * 10.0).round() >= 10_000.0 {
        index += 1;
    }
    let (scale, suffix) = UNITS[index];
    format!("{:.1}{}", value / scale, suffix)
}

/// Score label with at most one fraction digit (`80`, `42.5`, `1,234.6`)
pub fn format_score(score: f64) -> String {
    if !score.is_finite() {
        return "0".to_string();
    }
    let tenths = (score.abs() * 10.0).round() as u64;
    let whole = group_thousands(tenths / 10);
    let fraction = tenths % 10;
    let sign = if score < 0.0 && tenths > 0 { "-" } else { "" };
    if fraction == 0 {
        format!("{}{}", sign, whole)
    } else {
        format!("{}{}.{}", sign, whole, fraction)
    }
}

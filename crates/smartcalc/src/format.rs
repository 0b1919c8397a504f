//! Text formatting for calculation results

/// Insert `,` between groups of three digits.
fn group_thousands(whole: u64) -> String {
    let digits = whole.to_string();
    let mut result = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }
    result
}

/// Format a monetary amount with thousands separators and two decimals
pub fn format_amount(value: f64) -> String {
    let cents_total = (value.abs() * 100.0).round() as u64;
    let whole = cents_total / 100;
    let cents = cents_total % 100;
    let sign = if value < 0.0 && cents_total > 0 { "-" } else { "" };
    format!("{sign}{}.{cents:02}", group_thousands(whole))
}

/// Format an annual rate given in percent
pub fn format_rate(percent: f64) -> String {
    format!("{percent:.3}%")
}

/// Format an expression result the way a calculator display would: up to
/// seven decimals with trailing zeros removed.
pub fn format_number(value: f64) -> String {
    let text = format!("{value:.7}");
    let text = text.trim_end_matches('0').trim_end_matches('.');
    match text {
        "-0" => "0".to_string(),
        other => other.to_string(),
    }
}

/// Group the integer part of `value` with thousands separators
fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut result = String::new();
    for (i, c) in digits.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }
    result.chars().rev().collect()
}

/// Format a currency value
pub fn format_currency(value: f64) -> String {
    let cents_total = (value.abs() * 100.0).round() as u64;
    let dollars = cents_total / 100;
    let cents = cents_total % 100;

    if value < 0.0 && cents_total > 0 {
        format!("-${}.{:02}", group_thousands(dollars), cents)
    } else {
        format!("${}.{:02}", group_thousands(dollars), cents)
    }
}

/// Format a value that is already a percentage (12.5 -> "12.50%")
pub fn format_percent(value: f64) -> String {
    format!("{:.2}%", value)
}

/// Percentage with an explicit sign, for returns
pub fn format_signed_percent(value: f64) -> String {
    format!("{:+.2}%", value)
}

/// Optional percentage; `None` renders as "N/A"
pub fn format_optional_percent(value: Option<f64>) -> String {
    value.map(format_percent).unwrap_or_else(|| "N/A".to_string())
}

/// Fractional share count
pub fn format_shares(value: f64) -> String {
    format!("{:.4}", value)
}

//! Number rendering for chat replies

/// `$1,234.56`; negatives render as `-$1,234.56`.
pub fn currency(value: f64) -> String {
    let body = grouped(value.abs(), 2);
    let is_zero = !body.bytes().any(|b| matches!(b, b'1'..=b'9'));

    if value < 0.0 && !is_zero {
        format!("-${}", body)
    } else {
        format!("${}", body)
    }
}

/// One decimal place, used for ages and years.
pub fn one_decimal(value: f64) -> String {
    format!("{:.1}", value)
}

/// A rate such as 0.07 rendered as `7.0%`.
pub fn percent(rate: f64) -> String {
    format!("{:.1}%", rate * 100.0)
}

/// Fixed decimals with comma thousands separators.
fn grouped(value: f64, decimals: usize) -> String {
    let fixed = format!("{:.*}", decimals, value);
    if !value.is_finite() {
        return fixed;
    }

    let (sign, unsigned) = match fixed.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", fixed.as_str()),
    };
    let (integer, fraction) = match unsigned.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (unsigned, None),
    };

    let mut out = String::with_capacity(fixed.len() + integer.len() / 3);
    out.push_str(sign);
    for (i, digit) in integer.chars().enumerate() {
        if i > 0 && (integer.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(digit);
    }
    if let Some(fraction) = fraction {
        out.push('.');
        out.push_str(fraction);
    }
    out
}

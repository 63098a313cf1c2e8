use crate::config::GOAL_MILES;

/// Coerce loosely-typed text into a number, treating anything that isn't
/// a finite number as zero. Surrounding whitespace is ignored and an empty
/// string is zero. Spellings such as `inf` or `NaN` are not numbers here.
///
/// # Examples
/// ```
/// use mile_tracker::utils::coerce_number;
/// assert_eq!(coerce_number(" 1200 "), 1200.0);
/// assert_eq!(coerce_number("1e3"), 1000.0);
/// assert_eq!(coerce_number("twelve"), 0.0);
/// ```
pub fn coerce_number(input: &str) -> f64 {
    match input.trim().parse::<f64>() {
        Ok(n) if n.is_finite() => n,
        _ => 0.0,
    }
}

/// Format an integer with comma thousands separators ("24000" -> "24,000").
pub fn group_thousands(n: u32) -> String {
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

/// Generic numeric input validation
pub fn validate_numeric_input<T>(
    input: &str,
    min: Option<T>,
    max: Option<T>,
    field_name: &str,
) -> Result<T, String>
where
    T: std::str::FromStr + std::fmt::Display + PartialOrd,
{
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(format!("{} cannot be empty", field_name));
    }

    match trimmed.parse::<T>() {
        Ok(val) => {
            if let Some(min_val) = min {
                if val < min_val {
                    return Err(format!("{} must be at least {}", field_name, min_val));
                }
            }
            if let Some(max_val) = max {
                if val > max_val {
                    return Err(format!("{} cannot exceed {}", field_name, max_val));
                }
            }
            Ok(val)
        }
        Err(_) => Err(format!("{} must be a valid number", field_name)),
    }
}

/// Validate owner-entered miles. Commas are accepted as digit grouping.
pub fn validate_miles(input: &str) -> Result<u32, String> {
    let cleaned: String = input.chars().filter(|c| *c != ',').collect();
    validate_numeric_input(&cleaned, Some(0), Some(GOAL_MILES), "Miles")
}

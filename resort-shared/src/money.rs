/// Monetary amounts in paise (minor units of INR). Intermediate sums stay
/// in exact integer arithmetic; rounding happens only at the tax/display
/// boundary.
pub type Paise = i64;

/// All amounts in the system are quoted in a single fixed currency.
pub const CURRENCY: &str = "INR";

/// Formats a paise amount as rupees with South-Asian digit grouping
/// (last three digits, then groups of two): `₹1,00,000.00`.
pub fn format_inr(amount: Paise) -> String {
    let sign = if amount < 0 { "-" } else { "" };
    let rupees = (amount / 100).abs();
    let paise = (amount % 100).abs();
    format!("{}₹{}.{:02}", sign, group_indian(&rupees.to_string()), paise)
}

fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }
    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 2 {
        groups.push(&head[end - 2..end]);
        end -= 2;
    }
    groups.push(&head[..end]);
    groups.reverse();
    format!("{},{}", groups.join(","), tail)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_small_amounts_ungrouped() {
        assert_eq!(format_inr(0), "₹0.00");
        assert_eq!(format_inr(99_950), "₹999.50");
    }

    #[test]
    fn test_indian_grouping() {
        assert_eq!(format_inr(7_080_000), "₹70,800.00");
        assert_eq!(format_inr(10_000_000), "₹1,00,000.00");
        assert_eq!(format_inr(123_456_789_00), "₹12,34,56,789.00");
    }

    #[test]
    fn test_negative_amounts() {
        assert_eq!(format_inr(-1_050), "-₹10.50");
    }
}

//! Rupee formatting with Indian digit grouping.

use crate::types::Amount;

/// Format an amount as rupees: the last three digits form one group and the
/// rest are grouped in pairs, e.g. `1234567` becomes `"₹12,34,567"`.
pub fn format_inr(amount: Amount) -> String {
    let digits = amount.to_string();
    if digits.len() <= 3 {
        return format!("₹{}", digits);
    }

    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(2);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();

    format!("₹{},{}", groups.join(","), tail)
}

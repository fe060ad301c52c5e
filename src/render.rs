//! Human-readable rendering of cell values for the preview table.

use crate::format::FormatDecision;
use crate::grid::CellValue;

/// Render one cell value under its format decision. Total: rendering never
/// fails, and display text is one-directional output, never parsed back.
pub fn render(value: &CellValue, decision: &FormatDecision) -> String {
    match value {
        CellValue::Empty => String::new(),
        CellValue::Number(n) => render_number(*n, decision),
        CellValue::DateTime(dt) => dt.format("%d/%m/%Y").to_string(),
        CellValue::Text(s) => s.clone(),
    }
}

fn render_number(n: f64, decision: &FormatDecision) -> String {
    // Percentage formatting is exclusive: no grouping, currency, or
    // parentheses on this path.
    if decision.percentage {
        return format!("{:.*}%", decision.decimal_places as usize, n * 100.0);
    }

    if !decision.explicit {
        return natural(n);
    }

    let currency = if decision.currency { "$" } else { "" };
    if decision.parenthesized_negative && n < 0.0 {
        let body = fixed(n.abs(), decision.decimal_places, decision.grouped);
        return format!("({}{})", currency, body);
    }
    let body = fixed(n, decision.decimal_places, decision.grouped);
    format!("{}{}", currency, body)
}

fn fixed(n: f64, places: u32, grouped: bool) -> String {
    let s = format!("{:.*}", places as usize, n);
    if grouped {
        group_thousands(&s)
    } else {
        s
    }
}

/// Insert thousands separators into the integer digits of an already
/// fixed-point-formatted number, keeping sign and fraction intact.
fn group_thousands(s: &str) -> String {
    let (sign, rest) = match s.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", s),
    };
    let (int_part, frac_part) = match rest.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (rest, None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    match frac_part {
        Some(f) => format!("{}{}.{}", sign, grouped, f),
        None => format!("{}{}", sign, grouped),
    }
}

/// Natural string form: integers print without a trailing `.0`.
pub fn natural(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{:.0}", n)
    } else {
        n.to_string()
    }
}

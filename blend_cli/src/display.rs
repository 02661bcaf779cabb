//! Text rendering of blend results.

use std::fmt::Write;

use blend_core::units::{Fraction, Percent};
use blend_core::{BlendResult, BlendSolution};

use crate::settings::DisplaySettings;

/// Shown in place of a number that is not finite.
pub const NOT_AVAILABLE: &str = "–";

/// Formula line printed under every solved blend.
pub const FORMULA: &str = "Formula: (Vg·Eg + Ve·Ea) / (Vg + Ve) = Et  ->  Ve = Vg·(Et−Eg)/(Ea−Et)";

/// Format a number with fixed fraction digits and the configured separators.
pub fn format_number(value: f64, settings: &DisplaySettings) -> String {
    if !value.is_finite() {
        return NOT_AVAILABLE.to_string();
    }

    let fixed = format!("{:.*}", settings.decimals, value);
    let (sign, digits) = match fixed.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", fixed.as_str()),
    };
    let (int_part, frac_part) = match digits.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (digits, None),
    };

    let mut out = String::from(sign);
    match settings.thousands_separator {
        Some(sep) => out.push_str(&group_digits(int_part, sep)),
        None => out.push_str(int_part),
    }
    if let Some(frac) = frac_part {
        out.push(settings.decimal_separator);
        out.push_str(frac);
    }
    out
}

fn group_digits(digits: &str, sep: char) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(sep);
        }
        out.push(ch);
    }
    out
}

/// Format a volume in liters.
pub fn format_liters(value: f64, settings: &DisplaySettings) -> String {
    format!("{} L", format_number(value, settings))
}

/// Format a ratio as a percentage.
pub fn format_percent(fraction: f64, settings: &DisplaySettings) -> String {
    let pct = Percent::from(Fraction(fraction));
    format!("{}%", format_number(pct.0, settings))
}

/// Render a result as human-readable text.
pub fn render(result: &BlendResult, settings: &DisplaySettings) -> String {
    match result {
        BlendResult::Solved(s) => render_solution(s, settings),
        BlendResult::Invalid { errors } => {
            let mut out = String::from("Cannot compute blend:\n");
            for e in errors {
                let _ = writeln!(out, "  - {e}");
            }
            out
        }
    }
}

fn render_solution(s: &BlendSolution, settings: &DisplaySettings) -> String {
    let rows = [
        ("Additive to add", format_liters(s.additive_volume_l, settings)),
        ("Total mixture", format_liters(s.total_volume_l, settings)),
        ("Final ethanol (calculated)", format_percent(s.final_fraction, settings)),
        ("Water introduced (estimate)", format_liters(s.water_volume_l, settings)),
    ];
    let label_width = rows.iter().map(|(label, _)| label.len()).max().unwrap_or(0);
    let value_width = rows.iter().map(|(_, v)| v.chars().count()).max().unwrap_or(0);

    let mut out = String::new();
    for (label, value) in &rows {
        let _ = writeln!(out, "  {label:<label_width$}  {value:>value_width$}");
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "  {}", s.note);
    let _ = writeln!(out, "  {FORMULA}");
    out
}

use crate::domain::model::RevenueTotal;
use std::cmp::Ordering;

pub const DEFAULT_HEADER: &str = "name;total";

/// Highest total first; equal totals in ascending name order.
pub fn ranking_order(a: &RevenueTotal, b: &RevenueTotal) -> Ordering {
    b.total
        .cmp(&a.total)
        .then_with(|| a.salesperson.cmp(&b.salesperson))
}

pub fn rank(mut totals: Vec<RevenueTotal>) -> Vec<RevenueTotal> {
    totals.sort_by(ranking_order);
    totals
}

/// Header, blank line, then one `name;total` line per entry, each ending in `\n`.
pub fn render(ranked: &[RevenueTotal], header: &str) -> String {
    let mut lines = Vec::with_capacity(ranked.len() + 2);
    lines.push(header.to_string());
    lines.push(String::new());
    for entry in ranked {
        lines.push(format!("{};{}", entry.salesperson, entry.total));
    }

    let mut output = lines.join("\n");
    output.push('\n');
    output
}

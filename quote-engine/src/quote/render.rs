//! Plain-text quote rendering for exports and emails

use super::types::Quote;
use crate::pricing::money::format_money;
use crate::pricing::{ImpactStage, PriceBreakdown};
use std::fmt::Write;

const LABEL_WIDTH: usize = 48;

/// Render the current revision of a quote as line items.
///
/// Factor and add-on descriptions come from the breakdown verbatim.
pub fn render_quote(quote: &Quote, currency: &str) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Quote {} (version {}, {})",
        quote.quote_number, quote.version, quote.status
    );
    let _ = writeln!(out, "Client: {}", quote.client_name);
    let _ = writeln!(out, "Service: {}", quote.service_name);

    let Some(revision) = quote.current() else {
        return out;
    };
    if let Some(note) = &revision.note {
        let _ = writeln!(out, "Note: {}", note);
    }
    out.push('\n');
    render_breakdown(&mut out, &revision.breakdown, currency);
    out
}

/// Breakdown lines only
pub fn render_breakdown(out: &mut String, b: &PriceBreakdown, currency: &str) {
    line(out, "Base price", &format_money(b.base_price, currency));

    for d in b.details_for(ImpactStage::Fixed) {
        line(out, &d.description, &format_money(d.amount, currency));
    }
    for d in b.details_for(ImpactStage::Percentage) {
        line(out, &d.description, &format_money(d.amount, currency));
    }
    line(
        out,
        "Subtotal",
        &format_money(b.subtotal_before_multipliers, currency),
    );

    let multipliers: Vec<_> = b.details_for(ImpactStage::Multiplier).collect();
    if !multipliers.is_empty() {
        for d in multipliers {
            line(out, &d.description, "");
        }
        line(
            out,
            &format!("Combined multiplier ×{}", b.multiplier_effect),
            &format_money(b.subtotal_after_multipliers, currency),
        );
    }

    if b.entity_type_multiplier != 1.0 {
        line(
            out,
            &format!("Entity type ×{}", b.entity_type_multiplier),
            &format_money(b.subtotal_after_entity_type, currency),
        );
    }

    for a in &b.addon_details {
        line(out, &format!("Add-on: {}", a.name), &format_money(a.price, currency));
    }

    line(out, "Total", &format_money(b.final_price, currency));
}

fn line(out: &mut String, label: &str, amount: &str) {
    if amount.is_empty() {
        let _ = writeln!(out, "  {}", label);
    } else {
        let _ = writeln!(out, "{:<width$} {:>12}", label, amount, width = LABEL_WIDTH);
    }
}

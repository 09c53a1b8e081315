//! Summary dashboard command

use std::fmt::Write;
use std::path::Path;

use anyhow::Result;
use payoff_core::explanation::{format_kr, format_rate, format_years};
use payoff_core::insights;
use payoff_core::{AgentState, Priority, RecommendationTarget};

use super::{run_analysis, truncate};

pub fn cmd_summary(config: Option<&Path>, input: &Path, user: Option<&str>) -> Result<()> {
    let state = run_analysis(config, input, user)?;
    print!("{}", render_summary(&state)?);
    Ok(())
}

/// Render the dashboard for a finished analysis
pub fn render_summary(state: &AgentState) -> Result<String> {
    let summary = insights::summarize(state);
    let mut out = String::new();

    writeln!(out)?;
    writeln!(out, "╭─────────────────────────────────────────╮")?;
    writeln!(out, "│         💳 Nedbetalingsoversikt         │")?;
    writeln!(out, "╰─────────────────────────────────────────╯")?;
    writeln!(out)?;
    writeln!(out, "  Bruker:            {}", state.user_id)?;
    writeln!(out, "  Antall lån:        {}", summary.debt_count)?;
    writeln!(out, "  Total gjeld:       {}", format_kr(state.total_debt))?;
    writeln!(
        out,
        "  Minstebeløp:       {}/mnd",
        format_kr(state.total_minimum_payments)
    )?;
    writeln!(
        out,
        "  Månedsbudsjett:    {}/mnd",
        format_kr(state.monthly_budget)
    )?;
    writeln!(
        out,
        "  Snittrente:        {}",
        format_rate(summary.average_interest_rate)
    )?;
    match summary.debt_to_income_ratio {
        Some(dti) => writeln!(out, "  Gjeldsgrad:        {}", format_rate(dti))?,
        None => writeln!(out, "  Gjeldsgrad:        (ingen inntekt oppgitt)")?,
    }
    writeln!(out)?;

    if state.debts.is_empty() {
        writeln!(out, "🎉 Ingen gjeld å planlegge.")?;
        return Ok(out);
    }

    writeln!(out, "📊 Strategier")?;
    writeln!(
        out,
        "   ─────────────────────────────────────────────────────────────"
    )?;
    writeln!(
        out,
        "   {:<3} {:<16} {:>16} {:>10} {:>6}",
        "", "Strategi", "Renter", "År", "Tillit"
    )?;
    for strategy in &state.strategies {
        let marker = if strategy.strategy == state.current_strategy {
            "▶"
        } else {
            " "
        };
        writeln!(
            out,
            "   {:<3} {:<16} {:>16} {:>10} {:>5}%",
            marker,
            strategy.name,
            format_kr(strategy.total_interest),
            format_years(strategy.payoff_months),
            strategy.confidence
        )?;
    }
    writeln!(out)?;

    if let Some(selected) = state.selected_strategy() {
        writeln!(out, "✅ Anbefalt: {}", selected.name)?;
        writeln!(out, "   {}", selected.explanation)?;
        let order: Vec<&str> = selected
            .payoff_order
            .iter()
            .filter_map(|p| state.debt(&p.debt_id))
            .map(|d| d.name.as_str())
            .collect();
        writeln!(out, "   Rekkefølge: {}", order.join(" → "))?;
        writeln!(out)?;
    }

    if let Some(advantage) = summary.avalanche_interest_advantage {
        if advantage > 0.0 {
            writeln!(
                out,
                "  💡 Skredmetoden sparer {} i renter sammenlignet med snøballmetoden",
                format_kr(advantage)
            )?;
            writeln!(out)?;
        }
    }

    if state.recommendations.is_empty() {
        writeln!(out, "✅ Ingen anbefalinger. Fortsett med planen!")?;
    } else {
        writeln!(out, "📋 Anbefalinger ({})", state.recommendations.len())?;
        writeln!(
            out,
            "   ─────────────────────────────────────────────────────────────"
        )?;
        for rec in &state.recommendations {
            let icon = match rec.priority {
                Priority::Critical => "🚨",
                Priority::High => "🔥",
                Priority::Medium => "📌",
                Priority::Low => "💤",
            };
            let target = match &rec.debt_id {
                RecommendationTarget::Debt(id) => state
                    .debt(id)
                    .map(|d| d.name.clone())
                    .unwrap_or_else(|| id.clone()),
                RecommendationTarget::General => "alle lån".to_string(),
            };
            writeln!(out, "   {} {} ({})", icon, rec.title, truncate(&target, 30))?;
            writeln!(
                out,
                "      Sparer ~{} · {} · {}",
                format_kr(rec.expected_savings),
                rec.timeframe,
                rec.action.as_str()
            )?;
        }
        writeln!(out)?;
        writeln!(
            out,
            "  💸 Mulig besparelse: {}",
            format_kr(summary.total_expected_savings)
        )?;
    }
    writeln!(out)?;

    Ok(out)
}

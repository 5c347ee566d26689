//! Terminal summary rendering for match reports.

use crate::parser::schema::MatchReport;
use crate::rating::{RatedStatLine, SkillTier};
use colored::*;

/// Number of multi-kill rounds listed in the summary
const MAX_MULTI_KILLS_SHOWN: usize = 10;

/// Render a human-readable summary of a match report for the terminal
pub fn render_terminal_summary(report: &MatchReport) -> String {
    let mut out = String::new();

    out.push_str(&render_header(report));
    out.push_str(&render_overview(report));
    out.push_str(&render_leaderboard(&report.rated_stats));
    out.push_str(&render_multi_kills(report));
    out.push_str(&render_warnings(&report.warnings));

    out
}

fn render_header(report: &MatchReport) -> String {
    let mut out = String::new();
    out.push('\n');
    out.push_str(&"Match Analysis Summary".bold().to_string());
    out.push_str("\n---------------------------------------------------\n");
    out.push_str(&format!("Source:  {}\n", report.source));
    out.push_str(&format!(
        "Weights: kd {:.2} | hs {:.2} | adr {:.2} | multikill {:.2}\n",
        report.effective_weights.kd,
        report.effective_weights.hs,
        report.effective_weights.adr,
        report.effective_weights.multikill
    ));
    out.push_str("---------------------------------------------------\n");
    out
}

fn render_overview(report: &MatchReport) -> String {
    format!("{}\n\n", report.overview.summary())
}

fn render_leaderboard(lines: &[RatedStatLine]) -> String {
    if lines.is_empty() {
        return "No players found\n".to_string();
    }

    let mut out = String::new();
    out.push_str(&format!(
        "{:>4}  {:<20} {:>3} {:>3} {:>3} {:>6} {:>6} {:>6} {:>7}  {}\n",
        "Rank", "Player", "K", "D", "A", "K/D", "HS%", "ADR", "Rating", "Tier"
    ));

    for line in lines {
        let s = &line.stats;
        out.push_str(&format!(
            "{:>4}  {:<20} {:>3} {:>3} {:>3} {:>6.2} {:>6.1} {:>6.1} {}  {}\n",
            line.rank,
            truncate_name(&s.player_name, 20),
            s.kills,
            s.deaths,
            s.assists,
            s.kd_ratio,
            s.hs_percentage,
            s.adr,
            color_rating(line.overall_rating),
            line.tier
        ));
    }
    out
}

fn render_multi_kills(report: &MatchReport) -> String {
    if report.multi_kills.is_empty() {
        return String::new();
    }

    let mut events: Vec<_> = report.multi_kills.iter().collect();
    events.sort_by(|a, b| {
        b.kill_count
            .cmp(&a.kill_count)
            .then_with(|| a.round_index.cmp(&b.round_index))
    });

    let mut out = String::from("\nMulti-kills:\n");
    for event in events.iter().take(MAX_MULTI_KILLS_SHOWN) {
        out.push_str(&format!(
            "  {} {} in round {}\n",
            event.kind.label().bold(),
            event.player_name,
            event.round_index
        ));
    }
    if events.len() > MAX_MULTI_KILLS_SHOWN {
        out.push_str(&format!(
            "  ... and {} more\n",
            events.len() - MAX_MULTI_KILLS_SHOWN
        ));
    }
    out
}

fn render_warnings(warnings: &[String]) -> String {
    let mut out = String::from("\n---------------------------------------------------\n");
    if warnings.is_empty() {
        out.push_str(&"STATUS: OK".green().bold().to_string());
        out.push('\n');
        return out;
    }
    for warning in warnings {
        out.push_str(&format!("{} {}\n", "WARNING:".yellow().bold(), warning));
    }
    out
}

/// Rating padded to the column width; escape codes must stay outside the padding
fn color_rating(rating: f64) -> ColoredString {
    let text = format!("{:>7.1}", rating);
    match SkillTier::from_rating(rating) {
        SkillTier::GlobalElite | SkillTier::Supreme | SkillTier::LegendaryEagle => text.green(),
        SkillTier::DistinguishedMasterGuardian | SkillTier::MasterGuardian => text.normal(),
        SkillTier::GoldNova => text.yellow(),
        SkillTier::SilverElite | SkillTier::Silver => text.red(),
    }
}

fn truncate_name(name: &str, max: usize) -> String {
    if name.chars().count() <= max {
        name.to_string()
    } else {
        let cut: String = name.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", cut)
    }
}

//! Chat-style text rendering over envelopes. A command transport resolves
//! one extractor call and prints the returned message as-is; failure
//! envelopes pass their message through instead of a record list.

use crate::envelope::Envelope;
use crate::types::{
    EventInfo, MatchSummary, PlayerProfile, RankingEntry, ResultEntry, TeamProfile,
};

pub const MATCHES_SHOWN: usize = 8;
pub const RESULTS_SHOWN: usize = 5;
pub const RANKINGS_SHOWN: usize = 10;
pub const EVENTS_SHOWN: usize = 10;

pub fn matches_message(envelope: &Envelope<Vec<MatchSummary>>) -> String {
    if !envelope.success {
        return envelope.message.clone();
    }

    let mut out = String::from("[ Upcoming CS2 matches ]\n");
    for (i, m) in envelope.data.iter().take(MATCHES_SHOWN).enumerate() {
        out.push_str(&format!("{}. {} vs {}\n", i + 1, m.team1, m.team2));
        out.push_str(&format!("   Time: {} | {}\n", m.time, m.bo_type.to_uppercase()));
        out.push_str(&format!("   Event: {}\n", m.event));
    }
    out
}

pub fn rankings_message(envelope: &Envelope<Vec<RankingEntry>>) -> String {
    if !envelope.success {
        return envelope.message.clone();
    }

    let shown = envelope.data.len().min(RANKINGS_SHOWN);
    let mut out = format!("[ CS2 team ranking — top {} ]\n", shown);
    for entry in envelope.data.iter().take(RANKINGS_SHOWN) {
        out.push_str(&format!(
            "{}. {} ({} points)\n",
            entry.rank, entry.title, entry.points
        ));
    }
    out
}

pub fn results_message(envelope: &Envelope<Vec<ResultEntry>>) -> String {
    if !envelope.success {
        return envelope.message.clone();
    }

    let mut out = String::from("[ Recent match results ]\n");
    for (i, r) in envelope.data.iter().take(RESULTS_SHOWN).enumerate() {
        let winner = if r.score1 > r.score2 { &r.team1 } else { &r.team2 };
        out.push_str(&format!(
            "{}. {} {}-{} {}\n",
            i + 1,
            r.team1,
            r.score1,
            r.score2,
            r.team2
        ));
        out.push_str(&format!("   Winner: {} | Event: {}\n", winner, r.event));
    }
    out
}

pub fn events_message(envelope: &Envelope<Vec<EventInfo>>) -> String {
    if !envelope.success {
        return envelope.message.clone();
    }

    let mut out = String::from("[ Upcoming top-tier events ]\n");
    for (i, e) in envelope.data.iter().take(EVENTS_SHOWN).enumerate() {
        let dates = match (e.start_date, e.end_date) {
            (Some(start), Some(end)) => format!("{} to {}", start, end),
            (Some(start), None) => start.to_string(),
            _ => "TBD".to_string(),
        };
        out.push_str(&format!("{}. [{}] {}\n", i + 1, e.tier.grade(), e.name));
        out.push_str(&format!("   {} | {}\n", dates, e.location));
    }
    out
}

pub fn player_message(envelope: &Envelope<PlayerProfile>) -> String {
    if !envelope.success {
        return envelope.message.clone();
    }

    let p = &envelope.data;
    let mut out = format!("[ {} ]\n", p.full_name);
    out.push_str(&format!("Nickname: {}\n", p.name));
    out.push_str(&format!("Team: {}\n", p.team));
    out.push_str(&format!("Country: {}\n", p.country));
    for (label, value) in [
        ("Rating", &p.rating),
        ("K/D", &p.kd_ratio),
        ("KPR", &p.kpr),
        ("ADR", &p.adr),
        ("KAST", &p.kast),
    ] {
        if value != "N/A" {
            out.push_str(&format!("{}: {}\n", label, value));
        }
    }
    out.push_str(&format!("Profile: {}\n", p.url));
    out
}

pub fn team_message(envelope: &Envelope<TeamProfile>) -> String {
    if !envelope.success {
        return envelope.message.clone();
    }

    let t = &envelope.data;
    let mut out = format!("[ {} ]\n", t.name);
    out.push_str(&format!("Rank: {}\n", t.rank));
    if !t.members.is_empty() {
        out.push_str(&format!("Lineup: {}\n", t.members.join(", ")));
    }
    if t.coach != "Unknown" {
        out.push_str(&format!("Coach: {}\n", t.coach));
    }
    out.push_str(&format!("Profile: {}\n", t.url));
    out
}

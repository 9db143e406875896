use std::fmt::Display;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchSummary {
    pub team1: String,
    pub team2: String,
    pub event: String,
    pub time: String,
    pub bo_type: String,
    pub url: String,
    pub score1: u32,
    pub score2: u32,
}

impl Display for MatchSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} vs {} ({}) — {} {}",
            self.team1, self.team2, self.event, self.time, self.bo_type
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankingEntry {
    pub rank: u32,
    pub title: String,
    pub points: u32,
    pub members: Vec<String>,
    pub url: String,
}

impl Display for RankingEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{} {} ({} points)", self.rank, self.title, self.points)?;
        if !self.members.is_empty() {
            write!(f, " — {}", self.members.join(", "))?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultEntry {
    pub team1: String,
    pub team2: String,
    pub score1: u32,
    pub score2: u32,
    pub event: String,
    pub url: String,
}

impl Display for ResultEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {}-{} {} — {}",
            self.team1, self.score1, self.score2, self.team2, self.event
        )
    }
}

// Statistic fields hold display strings as scraped; "N/A" marks a value the
// source pages did not expose.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct PlayerProfile {
    pub name: String,
    pub full_name: String,
    pub team: String,
    pub country: String,
    pub rating: String,
    pub kd_ratio: String,
    pub dpr: String,
    pub kast: String,
    pub impact: String,
    pub adr: String,
    pub kpr: String,
    pub apr: String,
    pub headshot_pct: String,
    pub maps_played: String,
    pub rounds_played: String,
    pub total_kills: String,
    pub total_deaths: String,
    pub url: String,
}

impl Display for PlayerProfile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{} ({})", self.name, self.full_name)?;
        writeln!(f, "  Team:    {}", self.team)?;
        writeln!(f, "  Country: {}", self.country)?;
        for (label, value) in [
            ("Rating", &self.rating),
            ("K/D", &self.kd_ratio),
            ("ADR", &self.adr),
            ("KAST", &self.kast),
        ] {
            if value != "N/A" {
                writeln!(f, "  {}:  {}", label, value)?;
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct TeamProfile {
    pub name: String,
    pub rank: String,
    pub members: Vec<String>,
    pub coach: String,
    pub url: String,
}

impl Display for TeamProfile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} (rank {})", self.name, self.rank)?;
        if !self.members.is_empty() {
            write!(f, " — {}", self.members.join(", "))?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventTier {
    Major,
    IntlLan,
}

impl EventTier {
    pub const ALL: [EventTier; 2] = [EventTier::Major, EventTier::IntlLan];

    /// Value of the listing page's eventType query parameter.
    pub fn query_slug(&self) -> &'static str {
        match self {
            EventTier::Major => "MAJOR",
            EventTier::IntlLan => "INTLLAN",
        }
    }

    pub fn grade(&self) -> &'static str {
        match self {
            EventTier::Major => "S",
            EventTier::IntlLan => "A",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            EventTier::Major => "Major",
            EventTier::IntlLan => "International LAN",
        }
    }
}

impl Display for EventTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventInfo {
    pub name: String,
    pub tier: EventTier,
    pub location: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub url: String,
}

impl Display for EventInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {} — {}", self.tier.grade(), self.name, self.location)?;
        if let Some(start) = self.start_date {
            write!(f, " ({}", start)?;
            if let Some(end) = self.end_date {
                write!(f, " to {}", end)?;
            }
            write!(f, ")")?;
        }
        Ok(())
    }
}

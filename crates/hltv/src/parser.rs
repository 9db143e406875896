use std::collections::HashMap;
use std::sync::LazyLock;

use chrono::{DateTime, NaiveDate};
use regex::Regex;
use scraper::{ElementRef, Html, Selector};

use crate::types::{
    EventInfo, EventTier, MatchSummary, PlayerProfile, RankingEntry, ResultEntry, TeamProfile,
};

pub const MATCH_LIMIT: usize = 15;
pub const DEFAULT_RANKING_LIMIT: usize = 30;
pub const RESULT_LIMIT: usize = 20;
pub const TEAM_SIZE: usize = 5;

static RE_RANK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#?(\d+)$").expect("invalid regex: rank label"));
static RE_INT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+$").expect("invalid regex: integer"));
static RE_NON_DIGIT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^0-9]").expect("invalid regex: non-digit"));

fn elem_text(element: ElementRef) -> String {
    element.text().collect::<String>()
}

fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

// Extract-or-default: the first matching fragment's text, or None when the
// fragment is absent or blank. Callers supply the documented default.
fn first_text(scope: ElementRef, selector: &Selector) -> Option<String> {
    scope
        .select(selector)
        .next()
        .map(|e| normalize_whitespace(&elem_text(e)))
        .filter(|s| !s.is_empty())
}

fn first_href(scope: ElementRef, selector: &Selector) -> Option<String> {
    scope
        .select(selector)
        .next()
        .and_then(|e| e.value().attr("href"))
        .map(str::to_string)
}

pub(crate) fn absolutize(base_url: &str, href: &str) -> String {
    if href.starts_with("http") {
        href.to_string()
    } else {
        format!("{}{}", base_url, href)
    }
}

fn title_case(text: &str) -> String {
    text.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn digits(text: &str) -> String {
    RE_NON_DIGIT.replace_all(text, "").into_owned()
}

fn parse_score_side(text: &str) -> u32 {
    let text = text.trim();
    if RE_INT.is_match(text) {
        text.parse().unwrap_or(0)
    } else {
        0
    }
}

// Each side of an "N-M" score fragment parses independently; a side that is
// not a pure non-negative integer becomes 0.
pub(crate) fn parse_score(text: &str) -> (u32, u32) {
    let mut sides = text.splitn(2, '-');
    let score1 = sides.next().map(parse_score_side).unwrap_or(0);
    let score2 = sides.next().map(parse_score_side).unwrap_or(0);
    (score1, score2)
}

// The event name hides in the match URL slug after the "-vs-" marker and
// the second team's name: /matches/<id>/<team1>-vs-<team2>-<event-slug>.
fn event_from_match_href(href: &str) -> Option<String> {
    let segment = href.rsplit('/').next()?;
    let (_, after_marker) = segment.split_once("-vs-")?;
    let (_, event_slug) = after_marker.split_once('-')?;
    let event = title_case(&event_slug.replace('-', " "));
    (!event.is_empty()).then_some(event)
}

pub fn parse_matches(html: &str, base_url: &str) -> Vec<MatchSummary> {
    let document = Html::parse_document(html);
    let match_sel = Selector::parse("div.match").unwrap();
    let link_sel = Selector::parse("a[href*='/matches/']").unwrap();
    let time_sel = Selector::parse(".match-time").unwrap();
    let meta_sel = Selector::parse(".match-meta").unwrap();
    let team_sel = Selector::parse("div.match-teamname").unwrap();

    let mut matches = Vec::new();

    for item in document.select(&match_sel).take(MATCH_LIMIT) {
        // The match link is the only hard requirement; every other field
        // degrades to a default.
        let Some(href) = first_href(item, &link_sel) else {
            continue;
        };

        let teams: Vec<String> = item
            .select(&team_sel)
            .map(|e| normalize_whitespace(&elem_text(e)))
            .collect();
        if teams.len() < 2 {
            continue;
        }

        let time = first_text(item, &time_sel).unwrap_or_else(|| "TBD".to_string());
        let bo_type = first_text(item, &meta_sel).unwrap_or_else(|| "bo3".to_string());
        let event = event_from_match_href(&href).unwrap_or_else(|| "Unknown".to_string());

        matches.push(MatchSummary {
            team1: teams[0].clone(),
            team2: teams[1].clone(),
            event,
            time,
            bo_type,
            url: absolutize(base_url, &href),
            score1: 0,
            score2: 0,
        });
    }

    matches
}

pub fn parse_rankings(html: &str, limit: usize, base_url: &str) -> Vec<RankingEntry> {
    let document = Html::parse_document(html);
    let team_sel = Selector::parse(".ranked-team").unwrap();
    let position_sel = Selector::parse("span.position").unwrap();
    let name_sel = Selector::parse("span.name").unwrap();
    let points_sel = Selector::parse("span.points").unwrap();
    let nick_sel = Selector::parse(".rankingNicknames").unwrap();
    let link_sel = Selector::parse("a[href*='/team/']").unwrap();

    let mut entries = Vec::new();

    for item in document.select(&team_sel).take(limit) {
        // A malformed "#N" label falls back to the 1-based position among
        // the entries parsed so far, so ranks stay dense but can repeat an
        // earlier number after a skipped entry.
        let rank = first_text(item, &position_sel)
            .and_then(|label| RE_RANK.captures(&label).and_then(|c| c[1].parse().ok()))
            .unwrap_or(entries.len() as u32 + 1);

        let title = first_text(item, &name_sel).unwrap_or_else(|| "Unknown".to_string());

        let points = first_text(item, &points_sel)
            .map(|label| digits(&label))
            .and_then(|d| d.parse().ok())
            .unwrap_or(0);

        let members = item
            .select(&nick_sel)
            .take(TEAM_SIZE)
            .map(|e| normalize_whitespace(&elem_text(e)))
            .collect();

        let url = first_href(item, &link_sel)
            .map(|href| absolutize(base_url, &href))
            .unwrap_or_default();

        entries.push(RankingEntry {
            rank,
            title,
            points,
            members,
            url,
        });
    }

    entries
}

pub fn parse_results(html: &str, base_url: &str) -> Vec<ResultEntry> {
    let document = Html::parse_document(html);
    let con_sel = Selector::parse(".result-con").unwrap();
    let result_sel = Selector::parse("div.result").unwrap();
    let team1_sel = Selector::parse("div.team1 .team").unwrap();
    let team1_alt_sel = Selector::parse(".line-align.team1 .team").unwrap();
    let team2_sel = Selector::parse("div.team2 .team").unwrap();
    let team2_alt_sel = Selector::parse(".line-align.team2 .team").unwrap();
    let score_sel = Selector::parse("td.result-score").unwrap();
    let event_sel = Selector::parse(".event-name").unwrap();
    let cell_sel = Selector::parse("td").unwrap();
    let link_sel = Selector::parse("a[href*='/matches/']").unwrap();

    let mut results = Vec::new();

    for con in document.select(&con_sel).take(RESULT_LIMIT) {
        let Some(result) = con.select(&result_sel).next() else {
            continue;
        };

        let team1 = first_text(result, &team1_sel)
            .or_else(|| first_text(result, &team1_alt_sel))
            .unwrap_or_else(|| "Unknown".to_string());

        let team2 = first_text(result, &team2_sel)
            .or_else(|| first_text(result, &team2_alt_sel))
            .unwrap_or_else(|| "Unknown".to_string());

        let (score1, score2) = first_text(result, &score_sel)
            .map(|text| parse_score(&text))
            .unwrap_or((0, 0));

        // Older markup drops .event-name; the event then sits in the final
        // table column.
        let event = first_text(con, &event_sel)
            .or_else(|| {
                con.select(&cell_sel)
                    .last()
                    .map(|e| normalize_whitespace(&elem_text(e)))
                    .filter(|s| !s.is_empty())
            })
            .unwrap_or_else(|| "Unknown".to_string());

        let url = first_href(con, &link_sel)
            .map(|href| absolutize(base_url, &href))
            .unwrap_or_default();

        results.push(ResultEntry {
            team1,
            team2,
            score1,
            score2,
            event,
            url,
        });
    }

    results
}

pub fn find_profile_href(html: &str, marker: &str) -> Option<String> {
    let document = Html::parse_document(html);
    let selector = Selector::parse(&format!("a[href*='{marker}']")).ok()?;
    document
        .select(&selector)
        .next()
        .and_then(|e| e.value().attr("href"))
        .map(str::to_string)
}

// Profile hrefs look like /player/<id>/<slug>; a shorter path leaves the
// missing segments empty.
pub fn split_profile_path(href: &str) -> (String, String) {
    let parts: Vec<&str> = href.trim_matches('/').split('/').collect();
    let id = parts.get(1).copied().unwrap_or("").to_string();
    let slug = parts.get(2).copied().unwrap_or("").to_string();
    (id, slug)
}

#[derive(Debug, Default)]
pub struct PlayerPageFields {
    pub full_name: Option<String>,
    pub team: Option<String>,
    pub country: Option<String>,
    pub rating: Option<String>,
}

pub fn parse_player_page(html: &str) -> PlayerPageFields {
    let document = Html::parse_document(html);
    let root = document.root_element();
    let realname_sel = Selector::parse(".playerRealname").unwrap();
    let team_sel = Selector::parse(".playerTeam a").unwrap();
    let flag_sel = Selector::parse(".playerRealname .flag").unwrap();
    let rating_sel = Selector::parse(".player-stat .statsVal").unwrap();

    PlayerPageFields {
        full_name: first_text(root, &realname_sel),
        team: first_text(root, &team_sel),
        country: root
            .select(&flag_sel)
            .next()
            .and_then(|e| e.value().attr("title"))
            .map(str::to_string)
            .filter(|s| !s.is_empty()),
        rating: first_text(root, &rating_sel),
    }
}

const SUMMARY_KEYS: [&str; 5] = ["KAST", "DPR", "ADR", "KPR", "Rating"];

#[derive(Debug, Default)]
pub struct StatsPageFields {
    rows: HashMap<String, String>,
    summary: HashMap<String, String>,
}

impl StatsPageFields {
    fn row(&self, label: &str) -> Option<&str> {
        self.rows.get(label).map(String::as_str)
    }

    fn summary(&self, key: &str) -> Option<&str> {
        self.summary.get(key).map(String::as_str)
    }
}

pub fn parse_stats_page(html: &str) -> StatsPageFields {
    let document = Html::parse_document(html);
    let row_sel = Selector::parse(".stats-row").unwrap();
    let span_sel = Selector::parse("span").unwrap();
    let wrapper_sel = Selector::parse(".player-summary-stat-box-data-wrapper").unwrap();
    let box_label_sel = Selector::parse(".player-summary-stat-box-data-text").unwrap();
    let box_value_sel = Selector::parse(".player-summary-stat-box-data").unwrap();

    let mut fields = StatsPageFields::default();

    for row in document.select(&row_sel) {
        let spans: Vec<_> = row.select(&span_sel).collect();
        if spans.len() >= 2 {
            let label = normalize_whitespace(&elem_text(spans[0])).to_lowercase();
            let value = normalize_whitespace(&elem_text(spans[1]));
            if !label.is_empty() {
                fields.rows.insert(label, value);
            }
        }
    }

    // The summary boxes repeat a handful of headline statistics; labels are
    // matched by prefix since the site suffixes them with explanations.
    for wrapper in document.select(&wrapper_sel) {
        let Some(label) = first_text(wrapper, &box_label_sel) else {
            continue;
        };
        let Some(value) = first_text(wrapper, &box_value_sel) else {
            continue;
        };
        if let Some(key) = SUMMARY_KEYS.iter().find(|key| label.starts_with(*key)) {
            fields.summary.insert(key.to_lowercase(), value);
        }
    }

    fields
}

#[derive(Debug, Clone, Copy)]
enum StatSource {
    /// Headline value from the profile page.
    Headline,
    /// Labelled .stats-row entry, keyed by lower-cased label.
    Row(&'static str),
    /// Summary box, keyed by its matched prefix.
    Summary(&'static str),
}

use StatSource::{Headline, Row, Summary};

// Ordered fallback sources per statistic, first match wins. Markup versions
// differ in which fields they expose where; new sources go here, not into
// control flow.
const STAT_SOURCES: &[(&str, &[StatSource])] = &[
    ("rating", &[Headline, Row("rating 2.0")]),
    ("kd_ratio", &[Row("k/d ratio")]),
    ("dpr", &[Row("deaths / round"), Summary("dpr")]),
    ("kast", &[Row("kast"), Summary("kast")]),
    ("impact", &[Row("impact rating")]),
    ("adr", &[Row("damage / round"), Summary("adr")]),
    ("kpr", &[Row("kills / round"), Summary("kpr")]),
    ("apr", &[Row("assists / round")]),
    ("headshot_pct", &[Row("headshot %")]),
    ("maps_played", &[Row("maps played")]),
    ("rounds_played", &[Row("rounds played")]),
    ("total_kills", &[Row("total kills")]),
    ("total_deaths", &[Row("total deaths")]),
];

fn resolve_stat(field: &str, headline: Option<&str>, stats: &StatsPageFields) -> String {
    let sources = STAT_SOURCES
        .iter()
        .find(|(name, _)| *name == field)
        .map(|(_, sources)| *sources)
        .unwrap_or(&[]);

    for source in sources {
        let value = match source {
            Headline => headline,
            Row(label) => stats.row(label),
            Summary(key) => stats.summary(key),
        };
        if let Some(value) = value {
            return value.to_string();
        }
    }

    "N/A".to_string()
}

pub fn assemble_player(
    name: &str,
    url: &str,
    page: PlayerPageFields,
    stats: &StatsPageFields,
) -> PlayerProfile {
    let PlayerPageFields {
        full_name,
        team,
        country,
        rating,
    } = page;

    let headline = rating.as_deref();
    let stat = |field: &str| resolve_stat(field, headline, stats);

    PlayerProfile {
        name: name.to_string(),
        full_name: full_name.unwrap_or_else(|| name.to_string()),
        team: team.unwrap_or_else(|| "Unknown".to_string()),
        country: country.unwrap_or_else(|| "Unknown".to_string()),
        rating: stat("rating"),
        kd_ratio: stat("kd_ratio"),
        dpr: stat("dpr"),
        kast: stat("kast"),
        impact: stat("impact"),
        adr: stat("adr"),
        kpr: stat("kpr"),
        apr: stat("apr"),
        headshot_pct: stat("headshot_pct"),
        maps_played: stat("maps_played"),
        rounds_played: stat("rounds_played"),
        total_kills: stat("total_kills"),
        total_deaths: stat("total_deaths"),
        url: url.to_string(),
    }
}

pub fn parse_team_page(html: &str, query: &str, url: &str) -> TeamProfile {
    let document = Html::parse_document(html);
    let root = document.root_element();
    let name_sel = Selector::parse(".profile-team-name").unwrap();
    let rank_sel = Selector::parse(".profile-team-stat .right").unwrap();
    let member_sel = Selector::parse(".bodyshot-team-bg a").unwrap();
    let nick_sel = Selector::parse(".text-ellipsis").unwrap();
    let coach_sel = Selector::parse(".profile-team-coach .text-ellipsis").unwrap();

    let name = first_text(root, &name_sel).unwrap_or_else(|| query.to_string());
    // The first profile-stat block is the world ranking.
    let rank = first_text(root, &rank_sel).unwrap_or_else(|| "N/A".to_string());
    let members = root
        .select(&member_sel)
        .take(TEAM_SIZE)
        .filter_map(|anchor| first_text(anchor, &nick_sel))
        .collect();
    let coach = first_text(root, &coach_sel).unwrap_or_else(|| "Unknown".to_string());

    TeamProfile {
        name,
        rank,
        members,
        coach,
        url: url.to_string(),
    }
}

pub fn parse_events(html: &str, tier: EventTier, base_url: &str) -> Vec<EventInfo> {
    let document = Html::parse_document(html);
    let big_sel = Selector::parse("a.big-event[href*='/events/']").unwrap();
    let big_name_sel = Selector::parse(".big-event-name").unwrap();
    let big_location_sel = Selector::parse(".big-event-location").unwrap();
    let small_sel = Selector::parse("a.small-event[href*='/events/']").unwrap();
    let small_name_sel = Selector::parse(".table-cell.name").unwrap();
    let unix_sel = Selector::parse("[data-unix]").unwrap();

    let mut events = Vec::new();

    for block in document.select(&big_sel) {
        let Some(href) = block.value().attr("href") else {
            continue;
        };
        let name = first_text(block, &big_name_sel).unwrap_or_else(|| "Unknown".to_string());
        let location = first_text(block, &big_location_sel).unwrap_or_else(|| "TBD".to_string());
        let (start_date, end_date) = event_dates(block, &unix_sel);
        events.push(EventInfo {
            name,
            tier,
            location,
            start_date,
            end_date,
            url: absolutize(base_url, href),
        });
    }

    for block in document.select(&small_sel) {
        let Some(href) = block.value().attr("href") else {
            continue;
        };
        let name = first_text(block, &small_name_sel).unwrap_or_else(|| "Unknown".to_string());
        let (start_date, end_date) = event_dates(block, &unix_sel);
        events.push(EventInfo {
            name,
            tier,
            location: "TBD".to_string(),
            start_date,
            end_date,
            url: absolutize(base_url, href),
        });
    }

    events
}

// Listing blocks carry start and end as the first two data-unix millisecond
// attributes; a block with fewer than two stays undated.
fn event_dates(block: ElementRef, unix_sel: &Selector) -> (Option<NaiveDate>, Option<NaiveDate>) {
    let mut stamps = block
        .select(unix_sel)
        .filter_map(|e| e.value().attr("data-unix"))
        .filter_map(|raw| raw.parse::<i64>().ok());

    match (stamps.next(), stamps.next()) {
        (Some(start), Some(end)) => (date_from_millis(start), date_from_millis(end)),
        _ => (None, None),
    }
}

fn date_from_millis(millis: i64) -> Option<NaiveDate> {
    DateTime::from_timestamp_millis(millis).map(|dt| dt.date_naive())
}

// Soonest first; undated events sink to the end.
pub(crate) fn sort_events(events: &mut [EventInfo]) {
    events.sort_by_key(|e| (e.start_date.is_none(), e.start_date));
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://www.hltv.org";

    const MATCHES_HTML: &str = r#"
        <div class="upcomingMatchesSection">
            <div class="match">
                <a href="/matches/2382719/vitality-vs-spirit-blast-premier-finals">
                    <div class="match-time">18:30</div>
                    <div class="match-meta">bo5</div>
                    <div class="match-teamname">Vitality</div>
                    <div class="match-teamname">Spirit</div>
                </a>
            </div>
            <div class="match">
                <a href="/matches/2382720/faze-vs-navi-iem-cologne">
                    <div class="match-teamname">FaZe</div>
                    <div class="match-teamname">NAVI</div>
                </a>
            </div>
            <div class="match">
                <div class="match-teamname">Orphan</div>
                <div class="match-teamname">NoLink</div>
            </div>
            <div class="match">
                <a href="/matches/2382721/solo-iem-cologne">
                    <div class="match-teamname">Solo</div>
                </a>
            </div>
        </div>
    "#;

    #[test]
    fn test_parse_matches_complete_and_degraded() {
        let matches = parse_matches(MATCHES_HTML, BASE);

        assert_eq!(matches.len(), 2);

        let first = &matches[0];
        assert_eq!(first.team1, "Vitality");
        assert_eq!(first.team2, "Spirit");
        assert_eq!(first.time, "18:30");
        assert_eq!(first.bo_type, "bo5");
        assert_eq!(first.event, "Blast Premier Finals");
        assert_eq!(
            first.url,
            "https://www.hltv.org/matches/2382719/vitality-vs-spirit-blast-premier-finals"
        );
        assert_eq!((first.score1, first.score2), (0, 0));

        let second = &matches[1];
        assert_eq!(second.time, "TBD");
        assert_eq!(second.bo_type, "bo3");
        assert_eq!(second.event, "Iem Cologne");
    }

    #[test]
    fn test_match_fragment_without_link_or_teams_is_skipped() {
        let matches = parse_matches(MATCHES_HTML, BASE);
        assert!(matches.iter().all(|m| m.team1 != "Orphan"));
        assert!(matches.iter().all(|m| m.team1 != "Solo"));
    }

    #[test]
    fn test_match_list_never_exceeds_cap() {
        let mut html = String::new();
        for i in 0..MATCH_LIMIT + 5 {
            html.push_str(&format!(
                r#"<div class="match">
                    <a href="/matches/{i}/alpha-vs-beta-some-event">
                        <div class="match-teamname">Alpha</div>
                        <div class="match-teamname">Beta</div>
                    </a>
                </div>"#
            ));
        }

        let matches = parse_matches(&html, BASE);
        assert_eq!(matches.len(), MATCH_LIMIT);
    }

    #[test]
    fn test_parsing_is_deterministic() {
        assert_eq!(parse_matches(MATCHES_HTML, BASE), parse_matches(MATCHES_HTML, BASE));
    }

    #[test]
    fn test_event_name_from_match_href() {
        assert_eq!(
            event_from_match_href("/matches/1234/teamA-vs-teamB-blast-premier-finals"),
            Some("Blast Premier Finals".to_string())
        );
        // Nothing after the opposing team's name.
        assert_eq!(event_from_match_href("/matches/1234/teamA-vs-teamB"), None);
        assert_eq!(event_from_match_href("/matches/1234/no-marker-here"), None);
        assert_eq!(event_from_match_href(""), None);
    }

    const RANKINGS_HTML: &str = r#"
        <div class="ranking">
            <div class="ranked-team">
                <span class="position">#1</span>
                <span class="name">Vitality</span>
                <span class="points">(930 points)</span>
                <a href="/team/9565/vitality" class="moreLink">profile</a>
                <div class="rankingNicknames">apEX</div>
                <div class="rankingNicknames">ZywOo</div>
                <div class="rankingNicknames">flameZ</div>
                <div class="rankingNicknames">mezii</div>
                <div class="rankingNicknames">ropz</div>
                <div class="rankingNicknames">extra</div>
            </div>
            <div class="ranked-team">
                <span class="position">No. 2</span>
                <span class="name">Spirit</span>
                <span class="points">points pending</span>
            </div>
            <div class="ranked-team">
                <span class="points">(612 points)</span>
            </div>
        </div>
    "#;

    #[test]
    fn test_parse_rankings_with_defaults() {
        let entries = parse_rankings(RANKINGS_HTML, DEFAULT_RANKING_LIMIT, BASE);

        assert_eq!(entries.len(), 3);

        let first = &entries[0];
        assert_eq!(first.rank, 1);
        assert_eq!(first.title, "Vitality");
        assert_eq!(first.points, 930);
        assert_eq!(first.members.len(), TEAM_SIZE);
        assert_eq!(first.members[0], "apEX");
        assert_eq!(first.url, "https://www.hltv.org/team/9565/vitality");

        // Undecorated label and missing points degrade without skipping.
        let second = &entries[1];
        assert_eq!(second.rank, 2);
        assert_eq!(second.points, 0);

        let third = &entries[2];
        assert_eq!(third.title, "Unknown");
        assert_eq!(third.points, 612);
        assert_eq!(third.url, "");
    }

    #[test]
    fn test_rank_label_fallback_is_positionally_dense() {
        let html = r#"
            <div class="ranked-team"><span class="position">Top</span><span class="name">A</span></div>
            <div class="ranked-team"><span class="position">#7</span><span class="name">B</span></div>
            <div class="ranked-team"><span class="name">C</span></div>
        "#;

        let entries = parse_rankings(html, DEFAULT_RANKING_LIMIT, BASE);
        let ranks: Vec<u32> = entries.iter().map(|e| e.rank).collect();
        assert_eq!(ranks, vec![1, 7, 3]);
    }

    #[test]
    fn test_ranking_respects_caller_limit() {
        let entries = parse_rankings(RANKINGS_HTML, 2, BASE);
        assert_eq!(entries.len(), 2);
    }

    const RESULTS_HTML: &str = r#"
        <div class="results-holder">
            <div class="result-con">
                <a href="/matches/2382710/vitality-vs-spirit-blast-premier-finals">
                    <div class="result">
                        <table><tr>
                            <td><div class="line-align team1"><div class="team">Vitality</div></div></td>
                            <td class="result-score">2 - 0</td>
                            <td><div class="line-align team2"><div class="team">Spirit</div></div></td>
                            <td class="event"><span class="event-name">BLAST Premier Finals</span></td>
                        </tr></table>
                    </div>
                </a>
            </div>
            <div class="result-con">
                <a href="/matches/2382711/forze-vs-ence-champions-tour">
                    <div class="result">
                        <table><tr>
                            <td class="line-align team1"><div class="team">forZe</div></td>
                            <td class="result-score">abc</td>
                            <td class="line-align team2"><div class="team">ENCE</div></td>
                            <td>Champions Tour</td>
                        </tr></table>
                    </div>
                </a>
            </div>
            <div class="result-con">
                <div class="standard-headline">Results for May 12th</div>
            </div>
        </div>
    "#;

    #[test]
    fn test_parse_results_with_fallback_selectors() {
        let results = parse_results(RESULTS_HTML, BASE);

        assert_eq!(results.len(), 2);

        let first = &results[0];
        assert_eq!(first.team1, "Vitality");
        assert_eq!(first.team2, "Spirit");
        assert_eq!((first.score1, first.score2), (2, 0));
        assert_eq!(first.event, "BLAST Premier Finals");
        assert_eq!(
            first.url,
            "https://www.hltv.org/matches/2382710/vitality-vs-spirit-blast-premier-finals"
        );

        // Non-div team containers only match the secondary selector, the
        // event falls back to the final column, and a garbage score
        // defaults both sides.
        let second = &results[1];
        assert_eq!(second.team1, "forZe");
        assert_eq!(second.team2, "ENCE");
        assert_eq!((second.score1, second.score2), (0, 0));
        assert_eq!(second.event, "Champions Tour");
    }

    #[test]
    fn test_headline_rows_without_result_block_are_skipped() {
        let results = parse_results(RESULTS_HTML, BASE);
        assert!(results.iter().all(|r| !r.event.contains("May 12th")));
    }

    #[test]
    fn test_result_list_never_exceeds_cap() {
        let mut html = String::new();
        for i in 0..RESULT_LIMIT + 3 {
            html.push_str(&format!(
                r#"<div class="result-con">
                    <div class="result">
                        <div class="team1"><div class="team">A{i}</div></div>
                        <div class="team2"><div class="team">B{i}</div></div>
                    </div>
                </div>"#
            ));
        }

        let results = parse_results(&html, BASE);
        assert_eq!(results.len(), RESULT_LIMIT);
    }

    #[test]
    fn test_score_sides_parse_independently() {
        assert_eq!(parse_score("2 - 0"), (2, 0));
        assert_eq!(parse_score("16-14"), (16, 14));
        assert_eq!(parse_score("13-abc"), (13, 0));
        assert_eq!(parse_score("abc"), (0, 0));
        assert_eq!(parse_score(""), (0, 0));
    }

    const SEARCH_HTML: &str = r#"
        <div class="search">
            <a href="/events/1234/blast-premier">BLAST Premier</a>
            <a href="/player/11893/zywoo">ZywOo</a>
            <a href="/player/7998/s1mple">s1mple</a>
            <a href="/team/9565/vitality">Vitality</a>
        </div>
    "#;

    #[test]
    fn test_first_matching_search_link_wins() {
        assert_eq!(
            find_profile_href(SEARCH_HTML, "/player/"),
            Some("/player/11893/zywoo".to_string())
        );
        assert_eq!(
            find_profile_href(SEARCH_HTML, "/team/"),
            Some("/team/9565/vitality".to_string())
        );
        assert_eq!(find_profile_href(SEARCH_HTML, "/coach/"), None);
    }

    #[test]
    fn test_profile_path_segments_default_to_empty() {
        assert_eq!(
            split_profile_path("/player/11893/zywoo"),
            ("11893".to_string(), "zywoo".to_string())
        );
        assert_eq!(
            split_profile_path("/player/11893"),
            ("11893".to_string(), String::new())
        );
        assert_eq!(split_profile_path("/player"), (String::new(), String::new()));
    }

    const PLAYER_HTML: &str = r#"
        <div class="playerProfile">
            <div class="playerRealname">
                <img class="flag" title="France" src="/img/static/flags/fr.gif">
                Mathieu Herbaut
            </div>
            <div class="playerTeam">Team: <a href="/team/9565/vitality">Vitality</a></div>
            <div class="player-stat"><b>Rating 2.0</b><span class="statsVal">1.27</span></div>
        </div>
    "#;

    const STATS_HTML: &str = r#"
        <div class="statistics">
            <div class="stats-row"><span>Rating 2.0</span><span>1.25</span></div>
            <div class="stats-row"><span>K/D Ratio</span><span>1.35</span></div>
            <div class="stats-row"><span>Damage / Round</span><span>85.4</span></div>
            <div class="stats-row"><span>Maps played</span><span>1204</span></div>
            <div class="stats-row"><span>Headshot %</span><span>42.1%</span></div>
            <div class="stats-row"><span>incomplete</span></div>
            <div class="player-summary-stat-box-data-wrapper">
                <div class="player-summary-stat-box-data">73.9%</div>
                <div class="player-summary-stat-box-data-text">KAST</div>
            </div>
            <div class="player-summary-stat-box-data-wrapper">
                <div class="player-summary-stat-box-data">0.64</div>
                <div class="player-summary-stat-box-data-text">DPR (deaths per round)</div>
            </div>
            <div class="player-summary-stat-box-data-wrapper">
                <div class="player-summary-stat-box-data">1.31</div>
                <div class="player-summary-stat-box-data-text">Rating 2.1</div>
            </div>
        </div>
    "#;

    #[test]
    fn test_parse_player_page() {
        let page = parse_player_page(PLAYER_HTML);
        assert_eq!(page.full_name.as_deref(), Some("Mathieu Herbaut"));
        assert_eq!(page.team.as_deref(), Some("Vitality"));
        assert_eq!(page.country.as_deref(), Some("France"));
        assert_eq!(page.rating.as_deref(), Some("1.27"));
    }

    #[test]
    fn test_player_prefers_headline_rating() {
        let page = parse_player_page(PLAYER_HTML);
        let stats = parse_stats_page(STATS_HTML);
        let profile = assemble_player("ZywOo", "https://www.hltv.org/player/11893/zywoo", page, &stats);

        assert_eq!(profile.rating, "1.27");
        assert_eq!(profile.kd_ratio, "1.35");
        assert_eq!(profile.adr, "85.4");
        assert_eq!(profile.maps_played, "1204");
        assert_eq!(profile.headshot_pct, "42.1%");
        // Row sources are missing for these; the summary boxes fill in.
        assert_eq!(profile.dpr, "0.64");
        assert_eq!(profile.kast, "73.9%");
        // No source anywhere.
        assert_eq!(profile.impact, "N/A");
        assert_eq!(profile.apr, "N/A");
        assert_eq!(profile.total_kills, "N/A");
    }

    #[test]
    fn test_rating_falls_back_to_stats_row() {
        let page = PlayerPageFields::default();
        let stats = parse_stats_page(STATS_HTML);
        let profile = assemble_player("ZywOo", "url", page, &stats);

        assert_eq!(profile.rating, "1.25");
    }

    #[test]
    fn test_player_without_stats_page_keeps_defaults() {
        let page = parse_player_page(PLAYER_HTML);
        let profile = assemble_player("ZywOo", "url", page, &StatsPageFields::default());

        assert_eq!(profile.rating, "1.27");
        assert_eq!(profile.kd_ratio, "N/A");
        assert_eq!(profile.dpr, "N/A");
        assert_eq!(profile.kast, "N/A");
    }

    #[test]
    fn test_absent_player_fields_use_query_name() {
        let profile = assemble_player(
            "ghost",
            "url",
            PlayerPageFields::default(),
            &StatsPageFields::default(),
        );

        assert_eq!(profile.full_name, "ghost");
        assert_eq!(profile.team, "Unknown");
        assert_eq!(profile.country, "Unknown");
        assert_eq!(profile.rating, "N/A");
    }

    const TEAM_HTML: &str = r#"
        <div class="teamProfile">
            <h1 class="profile-team-name text-ellipsis">Vitality</h1>
            <div class="profile-team-stat"><b>World ranking</b><span class="right">#1</span></div>
            <div class="profile-team-stat"><b>Weeks in top30 for core</b><span class="right">312</span></div>
            <div class="bodyshot-team-bg">
                <a href="/player/7322/apex"><span class="text-ellipsis">apEX</span></a>
                <a href="/player/11893/zywoo"><span class="text-ellipsis">ZywOo</span></a>
                <a href="/player/20113/flamez"><span class="text-ellipsis">flameZ</span></a>
                <a href="/player/16555/mezii"><span class="text-ellipsis">mezii</span></a>
                <a href="/player/10264/ropz"><span class="text-ellipsis">ropz</span></a>
                <a href="/player/99999/benched"><span class="text-ellipsis">benched</span></a>
            </div>
            <div class="profile-team-coach"><span class="text-ellipsis">XTQZZZ</span></div>
        </div>
    "#;

    #[test]
    fn test_parse_team_page() {
        let team = parse_team_page(TEAM_HTML, "vitality", "https://www.hltv.org/team/9565/vitality");

        assert_eq!(team.name, "Vitality");
        assert_eq!(team.rank, "#1");
        assert_eq!(
            team.members,
            vec!["apEX", "ZywOo", "flameZ", "mezii", "ropz"]
        );
        assert_eq!(team.coach, "XTQZZZ");
        assert_eq!(team.url, "https://www.hltv.org/team/9565/vitality");
    }

    #[test]
    fn test_sparse_team_page_degrades_to_defaults() {
        let team = parse_team_page("<div></div>", "mouz", "url");

        assert_eq!(team.name, "mouz");
        assert_eq!(team.rank, "N/A");
        assert!(team.members.is_empty());
        assert_eq!(team.coach, "Unknown");
    }

    const EVENTS_HTML: &str = r#"
        <div class="events-holder">
            <a href="/events/7148/blast-premier-world-final-2025" class="a-reset big-event">
                <div class="big-event-name">BLAST Premier World Final 2025</div>
                <span class="big-event-location">Singapore</span>
                <span data-unix="1765324800000">Dec 10</span>
                <span data-unix="1765929600000">Dec 17</span>
            </a>
            <a href="/events/7149/iem-katowice-2026" class="a-reset small-event">
                <div class="table-cell name">IEM Katowice 2026</div>
                <span data-unix="1769904000000">Feb 1</span>
            </a>
        </div>
    "#;

    #[test]
    fn test_parse_big_and_small_events() {
        let events = parse_events(EVENTS_HTML, EventTier::Major, BASE);

        assert_eq!(events.len(), 2);

        let big = &events[0];
        assert_eq!(big.name, "BLAST Premier World Final 2025");
        assert_eq!(big.location, "Singapore");
        assert_eq!(big.tier, EventTier::Major);
        assert_eq!(big.start_date, NaiveDate::from_ymd_opt(2025, 12, 10));
        assert_eq!(big.end_date, NaiveDate::from_ymd_opt(2025, 12, 17));
        assert_eq!(
            big.url,
            "https://www.hltv.org/events/7148/blast-premier-world-final-2025"
        );

        // One timestamp is not enough to date a block.
        let small = &events[1];
        assert_eq!(small.name, "IEM Katowice 2026");
        assert_eq!(small.location, "TBD");
        assert_eq!(small.start_date, None);
        assert_eq!(small.end_date, None);
    }

    #[test]
    fn test_sort_events_undated_last() {
        let mut events = parse_events(EVENTS_HTML, EventTier::Major, BASE);
        events.push(EventInfo {
            name: "Earlier".to_string(),
            tier: EventTier::IntlLan,
            location: "Cologne".to_string(),
            start_date: NaiveDate::from_ymd_opt(2025, 11, 1),
            end_date: NaiveDate::from_ymd_opt(2025, 11, 9),
            url: String::new(),
        });

        sort_events(&mut events);

        assert_eq!(events[0].name, "Earlier");
        assert_eq!(events[1].name, "BLAST Premier World Final 2025");
        assert_eq!(events[2].start_date, None);
    }

    #[test]
    fn test_absolutize() {
        assert_eq!(
            absolutize(BASE, "/matches/1/a-vs-b-c"),
            "https://www.hltv.org/matches/1/a-vs-b-c"
        );
        assert_eq!(
            absolutize(BASE, "https://example.com/x"),
            "https://example.com/x"
        );
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("blast PREMIER finals"), "Blast Premier Finals");
        assert_eq!(title_case(""), "");
    }
}

//! Deterministic SVG card rendering
//!
//! The card is drawn as a terminal window: title bar, window buttons, and a
//! transcript of prompt lines colored with the Gogh palette. Rendering is a
//! pure function of its inputs. No clock reads, no randomness, and no
//! unordered-map iteration, so identical stats, theme and toggles always
//! produce identical bytes.

use crate::config::{FieldOverrides, SectionToggles};
use crate::stats::models::GitHubStats;
use crate::stats::wakatime::WakaTimeStats;
use crate::theme::Theme;

/// Card width in pixels
pub const CARD_WIDTH: u32 = 840;

const TITLE_BAR_HEIGHT: u32 = 36;
const PADDING: u32 = 24;
const LINE_HEIGHT: u32 = 22;
const FONT_SIZE: u32 = 14;

/// Glyph cells per usage bar
const BAR_WIDTH: usize = 20;

const FONT_STACK: &str =
    "'JetBrains Mono','Fira Code','Cascadia Code',Menlo,Consolas,monospace";

/// Everything the renderer needs for one card
pub struct CardInput<'a> {
    pub github: &'a GitHubStats,
    pub wakatime: &'a WakaTimeStats,
    pub theme: &'a Theme,
    pub fields: &'a FieldOverrides,
    pub sections: &'a SectionToggles,
}

/// Color roles resolved against the theme at emit time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tone {
    Text,
    Dim,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
}

impl Tone {
    /// Resolve to a palette color, using the bright ANSI variants
    fn color<'a>(self, theme: &'a Theme) -> &'a str {
        match self {
            Tone::Text => &theme.foreground,
            Tone::Dim => &theme.color_09,
            Tone::Red => &theme.color_10,
            Tone::Green => &theme.color_11,
            Tone::Yellow => &theme.color_12,
            Tone::Blue => &theme.color_13,
            Tone::Magenta => &theme.color_14,
            Tone::Cyan => &theme.color_15,
        }
    }
}

#[derive(Debug, Clone)]
struct Span {
    text: String,
    tone: Tone,
    bold: bool,
}

fn span(text: impl Into<String>, tone: Tone) -> Span {
    Span {
        text: text.into(),
        tone,
        bold: false,
    }
}

fn bold(text: impl Into<String>, tone: Tone) -> Span {
    Span {
        text: text.into(),
        tone,
        bold: true,
    }
}

#[derive(Debug, Clone)]
struct Line {
    spans: Vec<Span>,
}

impl Line {
    fn blank() -> Self {
        Self { spans: Vec::new() }
    }

    /// A shell prompt line: green prompt, cyan command
    fn prompt(command: &str) -> Self {
        Self {
            spans: vec![span("~ $ ", Tone::Green), span(command, Tone::Cyan)],
        }
    }

    fn of(spans: Vec<Span>) -> Self {
        Self { spans }
    }
}

/// Render the card to SVG bytes
pub fn render(input: &CardInput) -> Vec<u8> {
    let lines = build_lines(input);
    let height = TITLE_BAR_HEIGHT + PADDING + lines.len() as u32 * LINE_HEIGHT + PADDING;
    let theme = input.theme;

    let mut svg = String::with_capacity(16 * 1024);

    svg.push_str(&format!(
        concat!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" ",
            "viewBox=\"0 0 {w} {h}\" role=\"img\" aria-label=\"{label}\" xml:space=\"preserve\">\n"
        ),
        w = CARD_WIDTH,
        h = height,
        label = xml_escape(&format!(
            "GitHub and WakaTime statistics for {}",
            input.github.user.username
        )),
    ));

    // Window frame
    svg.push_str(&format!(
        "<rect x=\"0.5\" y=\"0.5\" width=\"{}\" height=\"{}\" rx=\"12\" fill=\"{}\" stroke=\"{}\" stroke-width=\"1\"/>\n",
        CARD_WIDTH - 1,
        height - 1,
        xml_escape(&theme.background),
        xml_escape(&theme.color_09),
    ));

    // Title bar with squared bottom edge
    svg.push_str(&format!(
        "<path d=\"M0 {bar} V12 Q0 0 12 0 H{right} Q{w} 0 {w} 12 V{bar} Z\" fill=\"{fill}\"/>\n",
        bar = TITLE_BAR_HEIGHT,
        right = CARD_WIDTH - 12,
        w = CARD_WIDTH,
        fill = xml_escape(&theme.color_01),
    ));

    // Window buttons
    for (i, tone) in [Tone::Red, Tone::Yellow, Tone::Green].iter().enumerate() {
        svg.push_str(&format!(
            "<circle cx=\"{}\" cy=\"18\" r=\"6\" fill=\"{}\"/>\n",
            22 + i as u32 * 22,
            xml_escape(tone.color(theme)),
        ));
    }

    svg.push_str(&format!(
        "<text x=\"{}\" y=\"23\" text-anchor=\"middle\" font-family={} font-size=\"13\" fill=\"{}\">{}</text>\n",
        CARD_WIDTH / 2,
        quote(FONT_STACK),
        xml_escape(&theme.color_08),
        xml_escape(&format!("{}@github: ~/gl1tch-card", input.github.user.username)),
    ));

    // Transcript
    svg.push_str(&format!(
        "<g font-family={} font-size=\"{}\">\n",
        quote(FONT_STACK),
        FONT_SIZE,
    ));
    let first_baseline = TITLE_BAR_HEIGHT + PADDING + FONT_SIZE;
    for (i, line) in lines.iter().enumerate() {
        if line.spans.is_empty() {
            continue;
        }
        let y = first_baseline + i as u32 * LINE_HEIGHT;
        svg.push_str(&format!("<text x=\"{PADDING}\" y=\"{y}\">"));
        for s in &line.spans {
            let weight = if s.bold { " font-weight=\"bold\"" } else { "" };
            svg.push_str(&format!(
                "<tspan fill=\"{}\"{}>{}</tspan>",
                xml_escape(s.tone.color(theme)),
                weight,
                xml_escape(&s.text),
            ));
        }
        svg.push_str("</text>\n");
    }
    svg.push_str("</g>\n</svg>\n");

    svg.into_bytes()
}

/// Assemble the transcript lines for the card
fn build_lines(input: &CardInput) -> Vec<Line> {
    let mut lines = Vec::new();

    profile_section(input, &mut lines);
    github_section(input, &mut lines);
    wakatime_section(input, &mut lines);
    if input.sections.show_language {
        language_section(input, &mut lines);
    }
    if input.sections.show_lines_of_code {
        lifetime_section(input, &mut lines);
    }

    // Drop the trailing separator so the card ends flush
    while lines.last().is_some_and(|line| line.spans.is_empty()) {
        lines.pop();
    }
    lines
}

fn profile_section(input: &CardInput, lines: &mut Vec<Line>) {
    let user = &input.github.user;
    let fields = input.fields;

    lines.push(Line::prompt("whoami"));

    let display_name = user.name.clone().unwrap_or_else(|| user.username.clone());
    lines.push(Line::of(vec![
        bold(display_name, Tone::Text),
        span(format!(" (@{})", user.username), Tone::Dim),
    ]));

    if let Some(bio) = fields.bio.as_deref().or(user.bio.as_deref()) {
        lines.push(Line::of(vec![span(format!("\"{bio}\""), Tone::Yellow)]));
    }

    let whereabouts: Vec<&str> = [user.location.as_deref(), user.company.as_deref()]
        .into_iter()
        .flatten()
        .collect();
    if !whereabouts.is_empty() {
        lines.push(Line::of(vec![span(whereabouts.join(" / "), Tone::Dim)]));
    }

    let contact: Vec<&str> = [
        fields.email.as_deref(),
        fields.website.as_deref().or(user.blog.as_deref()),
    ]
    .into_iter()
    .flatten()
    .collect();
    if !contact.is_empty() {
        lines.push(Line::of(vec![span(contact.join(" / "), Tone::Blue)]));
    }

    lines.push(Line::blank());
}

fn github_section(input: &CardInput, lines: &mut Vec<Line>) {
    let stats = &input.github.stats;
    let user = &input.github.user;

    lines.push(Line::prompt("gl1tch stats --github"));

    let total_repos = stats.public_repos + stats.private_repos;
    lines.push(stat_row(
        "Repos",
        &format!(
            "{} ({} public / {} private)",
            format_count(total_repos),
            format_count(stats.public_repos),
            format_count(stats.private_repos),
        ),
        "Gists",
        &format_count(u64::from(user.public_gists)),
    ));
    lines.push(stat_row(
        "Stars",
        &format_count(stats.total_stars),
        "Forks",
        &format_count(stats.total_forks),
    ));
    lines.push(stat_row(
        "Issues",
        &format_count(stats.total_issues),
        "PRs",
        &format_count(stats.total_pulls),
    ));
    if input.sections.show_commit {
        lines.push(stat_row(
            "Commits",
            &format_count(stats.total_commits),
            "",
            "",
        ));
    }
    lines.push(stat_row(
        "Followers",
        &format_count(u64::from(user.followers)),
        "Following",
        &format_count(u64::from(user.following)),
    ));
    lines.push(stat_row(
        "Joined",
        &format!("{} ago", years_label(input.github.account_age_years)),
        "",
        "",
    ));

    lines.push(Line::blank());
}

fn wakatime_section(input: &CardInput, lines: &mut Vec<Line>) {
    let waka = input.wakatime;

    lines.push(Line::prompt("gl1tch stats --wakatime"));

    let weekly_text = waka
        .weekly
        .text
        .clone()
        .unwrap_or_else(|| format_duration(waka.weekly.total_seconds));
    lines.push(Line::of(vec![
        span(pad_label("This week"), Tone::Magenta),
        span(weekly_text, Tone::Text),
        span(
            format!(" (avg {}/day)", format_duration(waka.weekly.daily_average_seconds)),
            Tone::Dim,
        ),
    ]));

    let all_time_text = waka
        .all_time
        .text
        .clone()
        .unwrap_or_else(|| format_duration(waka.all_time.total_seconds));
    lines.push(Line::of(vec![
        span(pad_label("All time"), Tone::Magenta),
        span(all_time_text, Tone::Text),
    ]));

    if let Some(best) = &waka.best_day {
        let mut spans = vec![span(pad_label("Best day"), Tone::Magenta)];
        if let Some(date) = &best.date {
            spans.push(span(date.clone(), Tone::Text));
        }
        let best_text = best
            .text
            .clone()
            .unwrap_or_else(|| format_duration(best.total_seconds));
        spans.push(span(format!(" ({best_text})"), Tone::Dim));
        lines.push(Line::of(spans));
    }

    if input.sections.show_editors {
        let editor = waka.editors.first().map(|e| e.name.as_str());
        let os = waka.operating_systems.first().map(|o| o.name.as_str());
        if editor.is_some() || os.is_some() {
            let mut spans = vec![span(pad_label("Editor"), Tone::Magenta)];
            spans.push(span(editor.unwrap_or("?"), Tone::Text));
            if let Some(os) = os {
                spans.push(span("   OS ", Tone::Magenta));
                spans.push(span(os, Tone::Text));
            }
            lines.push(Line::of(spans));
        }
    }

    lines.push(Line::blank());
}

fn language_section(input: &CardInput, lines: &mut Vec<Line>) {
    lines.push(Line::prompt("gl1tch langs --top 5"));

    if input.wakatime.languages.is_empty() {
        // No editor activity this week, fall back to repository languages
        if input.github.github_languages.is_empty() {
            lines.push(Line::of(vec![span("no language data", Tone::Dim)]));
        } else {
            lines.push(Line::of(vec![span(
                input.github.github_languages.join(" / "),
                Tone::Text,
            )]));
        }
    } else {
        for slice in &input.wakatime.languages {
            lines.push(Line::of(vec![
                span(pad_label(&slice.name), Tone::Text),
                span(usage_bar(slice.percent), Tone::Green),
                span(format!(" {:>5.1}%", slice.percent), Tone::Dim),
            ]));
        }
    }

    lines.push(Line::blank());
}

fn lifetime_section(input: &CardInput, lines: &mut Vec<Line>) {
    let stats = &input.github.stats;
    let total_repos = stats.public_repos + stats.private_repos;
    let all_time = input
        .wakatime
        .all_time
        .text
        .clone()
        .unwrap_or_else(|| format_duration(input.wakatime.all_time.total_seconds));

    lines.push(Line::prompt("gl1tch log --lifetime"));
    lines.push(Line::of(vec![
        span("From Hello World: ", Tone::Text),
        bold(all_time, Tone::Yellow),
        span(
            format!(" of code across {} repositories", format_count(total_repos)),
            Tone::Text,
        ),
    ]));
    lines.push(Line::blank());
}

/// A two-column statistics row with aligned labels
fn stat_row(label_a: &str, value_a: &str, label_b: &str, value_b: &str) -> Line {
    let mut spans = vec![
        span(pad_label(label_a), Tone::Magenta),
        span(format!("{value_a:<28}"), Tone::Text),
    ];
    if !label_b.is_empty() {
        spans.push(span(pad_label(label_b), Tone::Magenta));
        spans.push(span(value_b, Tone::Text));
    }
    Line::of(spans)
}

fn pad_label(label: &str) -> String {
    format!("{label:<11}")
}

/// Unicode block bar for a percentage, clamped to [0, 100]
fn usage_bar(percent: f64) -> String {
    let clamped = percent.clamp(0.0, 100.0);
    let filled = ((clamped / 100.0) * BAR_WIDTH as f64).round() as usize;
    let filled = filled.min(BAR_WIDTH);

    let mut bar = String::with_capacity(BAR_WIDTH * 3);
    for _ in 0..filled {
        bar.push('█');
    }
    for _ in filled..BAR_WIDTH {
        bar.push('░');
    }
    bar
}

/// Format a count with thousands separators
fn format_count(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Human readable duration, matching WakaTime's "2 hrs 30 mins" style
fn format_duration(seconds: f64) -> String {
    let total_minutes = (seconds.max(0.0) / 60.0).round() as i64;
    let hours = total_minutes / 60;
    let minutes = total_minutes % 60;

    match (hours, minutes) {
        (0, m) => plural(m, "min"),
        (h, 0) => plural(h, "hr"),
        (h, m) => format!("{} {}", plural(h, "hr"), plural(m, "min")),
    }
}

fn plural(n: i64, unit: &str) -> String {
    if n == 1 {
        format!("1 {unit}")
    } else {
        format!("{n} {unit}s")
    }
}

fn years_label(years: i32) -> String {
    if years == 1 {
        "1 year".to_string()
    } else {
        format!("{years} years")
    }
}

fn xml_escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(ch),
        }
    }
    out
}

fn quote(value: &str) -> String {
    format!("\"{}\"", xml_escape(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::models::{GitHubStats, GitHubUser, RepositoryStats};
    use crate::stats::wakatime::{BestDay, CodingSummary, UsageSlice, WakaTimeStats};
    use crate::theme::parse_theme;

    const THEME_YAML: &str = r##"
name: "Aco"
color_01: "#3B3B3B"
color_02: "#910000"
color_03: "#005E00"
color_04: "#A86400"
color_05: "#0A4764"
color_06: "#640264"
color_07: "#066A82"
color_08: "#B8B8B8"
color_09: "#737373"
color_10: "#FF0000"
color_11: "#00C400"
color_12: "#FFB454"
color_13: "#0E96D7"
color_14: "#C303C3"
color_15: "#0ACBE2"
color_16: "#FFFFFF"
background: "#1F1305"
foreground: "#D9D9D9"
cursor: "#D9D9D9"
"##;

    fn sample_theme() -> crate::theme::Theme {
        parse_theme("Aco", THEME_YAML).unwrap()
    }

    fn sample_github() -> GitHubStats {
        GitHubStats {
            user: GitHubUser {
                username: "octocat".to_string(),
                name: Some("The Octocat".to_string()),
                bio: Some("Building things".to_string()),
                location: Some("San Francisco".to_string()),
                company: Some("@github".to_string()),
                blog: Some("https://github.blog".to_string()),
                public_gists: 2,
                followers: 9999,
                following: 9,
                created_at: Some("2011-01-25T18:44:36Z".to_string()),
                ..Default::default()
            },
            stats: RepositoryStats {
                total_stars: 1234,
                total_forks: 99,
                total_issues: 42,
                total_pulls: 17,
                total_commits: 5678,
                public_repos: 8,
                private_repos: 3,
                ..Default::default()
            },
            github_languages: vec!["Rust".to_string(), "Python".to_string()],
            account_age_years: 13,
            repositories: Vec::new(),
        }
    }

    fn sample_waka() -> WakaTimeStats {
        WakaTimeStats {
            weekly: CodingSummary {
                total_seconds: 45000.0,
                text: Some("12 hrs 30 mins".to_string()),
                daily_average_seconds: 6428.0,
                range_text: None,
            },
            all_time: CodingSummary {
                total_seconds: 5_400_000.0,
                text: Some("1,500 hrs".to_string()),
                daily_average_seconds: 7200.0,
                range_text: None,
            },
            languages: vec![
                UsageSlice {
                    name: "Rust".to_string(),
                    total_seconds: 30000.0,
                    percent: 66.6,
                    text: Some("8 hrs 20 mins".to_string()),
                },
                UsageSlice {
                    name: "Python".to_string(),
                    total_seconds: 9000.0,
                    percent: 20.0,
                    text: None,
                },
            ],
            editors: vec![UsageSlice {
                name: "Neovim".to_string(),
                total_seconds: 45000.0,
                percent: 100.0,
                text: None,
            }],
            operating_systems: vec![UsageSlice {
                name: "Linux".to_string(),
                total_seconds: 45000.0,
                percent: 100.0,
                text: None,
            }],
            projects: Vec::new(),
            best_day: Some(BestDay {
                date: Some("2024-06-01".to_string()),
                text: Some("4 hrs".to_string()),
                total_seconds: 14400.0,
            }),
        }
    }

    fn render_with(sections: SectionToggles, fields: FieldOverrides) -> String {
        let github = sample_github();
        let waka = sample_waka();
        let theme = sample_theme();
        let input = CardInput {
            github: &github,
            wakatime: &waka,
            theme: &theme,
            fields: &fields,
            sections: &sections,
        };
        String::from_utf8(render(&input)).unwrap()
    }

    #[test]
    fn test_render_is_deterministic() {
        let first = render_with(SectionToggles::default(), FieldOverrides::default());
        let second = render_with(SectionToggles::default(), FieldOverrides::default());
        assert_eq!(first, second);
    }

    #[test]
    fn test_render_produces_well_formed_shell() {
        let svg = render_with(SectionToggles::default(), FieldOverrides::default());
        assert!(svg.starts_with("<svg "));
        assert!(svg.trim_end().ends_with("</svg>"));
        assert!(svg.contains("octocat@github"));
        assert!(svg.contains("#1F1305"));
    }

    #[test]
    fn test_sections_respect_toggles() {
        let all_on = render_with(
            SectionToggles {
                show_editors: true,
                show_commit: true,
                show_language: true,
                show_lines_of_code: true,
            },
            FieldOverrides::default(),
        );
        assert!(all_on.contains("Commits"));
        assert!(all_on.contains("Editor"));
        assert!(all_on.contains("langs --top 5"));
        assert!(all_on.contains("From Hello World"));

        let all_off = render_with(
            SectionToggles {
                show_editors: false,
                show_commit: false,
                show_language: false,
                show_lines_of_code: false,
            },
            FieldOverrides::default(),
        );
        assert!(!all_off.contains("Commits"));
        assert!(!all_off.contains("Editor"));
        assert!(!all_off.contains("langs --top 5"));
        assert!(!all_off.contains("From Hello World"));
    }

    #[test]
    fn test_field_overrides_win_over_profile() {
        let svg = render_with(
            SectionToggles::default(),
            FieldOverrides {
                bio: Some("Override bio".to_string()),
                email: Some("octo@example.com".to_string()),
                website: Some("https://example.com".to_string()),
            },
        );
        assert!(svg.contains("Override bio"));
        assert!(!svg.contains("Building things"));
        assert!(svg.contains("octo@example.com"));
        assert!(svg.contains("https://example.com"));
        assert!(!svg.contains("github.blog"));
    }

    #[test]
    fn test_untrusted_text_is_escaped() {
        let svg = render_with(
            SectionToggles::default(),
            FieldOverrides {
                bio: Some("<script>alert(1)</script>".to_string()),
                email: None,
                website: None,
            },
        );
        assert!(!svg.contains("<script>"));
        assert!(svg.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_language_bars_render_percentages() {
        let svg = render_with(SectionToggles::default(), FieldOverrides::default());
        assert!(svg.contains("66.6%"));
        assert!(svg.contains('█'));
        assert!(svg.contains('░'));
    }

    #[test]
    fn test_usage_bar_bounds() {
        assert_eq!(usage_bar(0.0).chars().filter(|&c| c == '█').count(), 0);
        assert_eq!(usage_bar(50.0).chars().filter(|&c| c == '█').count(), 10);
        assert_eq!(usage_bar(100.0).chars().filter(|&c| c == '█').count(), 20);
        // Out-of-range inputs clamp instead of panicking
        assert_eq!(usage_bar(250.0).chars().filter(|&c| c == '█').count(), 20);
        assert_eq!(usage_bar(-5.0).chars().filter(|&c| c == '█').count(), 0);
    }

    #[test]
    fn test_format_count_thousands() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(1000), "1,000");
        assert_eq!(format_count(1_234_567), "1,234,567");
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(0.0), "0 mins");
        assert_eq!(format_duration(60.0), "1 min");
        assert_eq!(format_duration(3600.0), "1 hr");
        assert_eq!(format_duration(9000.0), "2 hrs 30 mins");
        assert_eq!(format_duration(-10.0), "0 mins");
    }

    #[test]
    fn test_years_label() {
        assert_eq!(years_label(1), "1 year");
        assert_eq!(years_label(13), "13 years");
        assert_eq!(years_label(0), "0 years");
    }
}

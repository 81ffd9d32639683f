use chrono::{DateTime, Utc};
use colored::Colorize;
use diagz::api::{CmdMessage, DiagramDetail, MessageLevel, SourceInfo};
use diagz::catalog::CategoryGroup;
use diagz::source::SourceKind;
use timeago::Formatter;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const LINE_WIDTH: usize = 100;
const TIME_WIDTH: usize = 14;
const ID_WIDTH: usize = 6;
const VERSION_WIDTH: usize = 6;

pub(crate) fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
        }
    }
}

pub(crate) fn print_header(total: usize, shown: usize, source: SourceKind) {
    let count = if shown == total {
        format!("{} diagrams", total)
    } else {
        format!("{} of {} diagrams", shown, total)
    };
    println!("{} {}", count.bold(), format!("({})", source).dimmed());
}

pub(crate) fn print_groups(groups: &[CategoryGroup]) {
    for group in groups {
        println!();
        println!(
            "{} {}",
            group.category.bold().underline(),
            format!("({})", group.diagrams.len()).dimmed()
        );

        for diagram in &group.diagrams {
            let id_str = format!("{:>width$} ", diagram.id, width = ID_WIDTH);
            let version_str = format!("{:<width$}", diagram.current_version, width = VERSION_WIDTH);
            let time_ago = format_time_ago(&diagram.last_modified);

            let description = diagram
                .description
                .as_deref()
                .filter(|d| !d.is_empty())
                .unwrap_or("No description");
            let title = format!("{}  {}", diagram.name, description);

            let fixed_width = id_str.width() + version_str.width() + 1 + TIME_WIDTH;
            let available = LINE_WIDTH.saturating_sub(fixed_width);
            let title_display = truncate_to_width(&title, available);
            let padding = available.saturating_sub(title_display.width());

            let (name_part, rest) = match title_display.split_once("  ") {
                Some((name, rest)) => (name.to_string(), format!("  {}", rest)),
                None => (title_display.clone(), String::new()),
            };

            println!(
                "{}{} {}{}{}{}",
                id_str.yellow(),
                version_str.cyan(),
                name_part,
                rest.dimmed(),
                " ".repeat(padding),
                time_ago.dimmed()
            );
        }
    }
}

pub(crate) fn print_detail(detail: &DiagramDetail) {
    let diagram = &detail.diagram;
    println!("{} {}", diagram.id.yellow(), diagram.name.bold());
    println!("--------------------------------");
    println!("{}", detail.description);
    println!();
    print_field("Category", diagram.display_category());
    print_field("Version", &diagram.current_version);
    let all: Vec<&str> = detail.versions.iter().map(|v| v.tag.as_str()).collect();
    print_field("All Versions", &all.join(", "));
    print_field("Created", &format_date(&diagram.created));
    print_field("Last Modified", &format_date(&diagram.last_modified));
    if let Some(source_file) = &diagram.drawio_file {
        print_field("Source", source_file);
    }
    print_field("Image", &detail.image_url);

    if detail.versions.iter().any(|v| v.url.is_some()) {
        println!();
        println!("{}", "Versions".bold());
        for version in &detail.versions {
            let marker = if version.is_current { "*" } else { " " };
            println!(
                "  {} {:<width$} {}",
                marker.green(),
                version.tag,
                version.url.as_deref().unwrap_or("-").dimmed(),
                width = VERSION_WIDTH
            );
        }
    }
}

pub(crate) fn print_source(info: &SourceInfo) {
    print_field("Source", &info.kind.to_string());
    match info.kind {
        SourceKind::Local => {
            print_field("Registry", &info.registry_location);
        }
        SourceKind::Remote => {
            let remote = &info.config.remote;
            print_field("API URL", remote.api_url());
            print_field("Repository", or_dash(remote.repository_id()));
            print_field("Token URL", remote.token_url());
            print_field("Client ID", remote.client_id());
            print_field("Client Secret", &mask(remote.client_secret()));
        }
    }
    print_field("Config file", &info.config_file.display().to_string());
    print_field("Data dir", &info.data_dir.display().to_string());
}

fn print_field(label: &str, value: &str) {
    println!("{:<15} {}", format!("{}:", label).dimmed(), value);
}

fn or_dash(value: &str) -> &str {
    if value.is_empty() {
        "-"
    } else {
        value
    }
}

fn mask(secret: &str) -> String {
    if secret.is_empty() {
        "-".to_string()
    } else {
        "********".to_string()
    }
}

fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

fn format_date(raw: &str) -> String {
    match parse_timestamp(raw) {
        Some(dt) => dt.format("%Y-%m-%d").to_string(),
        None if raw.is_empty() => "-".to_string(),
        None => raw.to_string(),
    }
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    let mut result = String::new();
    let mut current_width = 0;

    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            result.push('…');
            return result;
        }
        result.push(c);
        current_width += char_width;
    }

    result
}

fn format_time_ago(raw: &str) -> String {
    let Some(timestamp) = parse_timestamp(raw) else {
        return " ".repeat(TIME_WIDTH);
    };
    let duration = Utc::now().signed_duration_since(timestamp);

    let formatter = Formatter::new();
    let time_str = formatter.convert(duration.to_std().unwrap_or_default());

    format!("{:>width$}", time_str, width = TIME_WIDTH)
}

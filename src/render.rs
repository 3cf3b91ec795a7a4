use crate::models::{ArchiveDay, ResolvedItem, ResolvedSnapshot};

fn push_item(output: &mut String, item: &ResolvedItem, indent: &str) {
    match item.link() {
        Some(link) => output.push_str(&format!("{indent}{} <{}>\n", item.text, link)),
        None => output.push_str(&format!("{indent}{}\n", item.text)),
    }
    if let Some(image) = &item.image {
        output.push_str(&format!(
            "{indent}  [{}] {} ({}x{})\n",
            image.alt, image.url, image.width, image.height
        ));
    }
}

fn push_section(output: &mut String, title: &str, items: &[ResolvedItem]) {
    if items.is_empty() {
        return;
    }
    output.push_str(&format!("\n{title}\n"));
    for item in items {
        push_item(output, item, "- ");
    }
}

/// Plain-text page for one snapshot. `dateline` sits under the title.
pub fn format_snapshot_plain_text(
    title: &str,
    dateline: &str,
    snapshot: &ResolvedSnapshot,
) -> String {
    let mut output = String::new();

    output.push_str(&format!("{title}\n{dateline}\n\n"));
    push_item(&mut output, &snapshot.main_headline, "");

    push_section(&mut output, "Top stories", &snapshot.top_stories);
    push_section(&mut output, "Left", &snapshot.left_column);
    push_section(&mut output, "Center", &snapshot.center_column);
    push_section(&mut output, "Right", &snapshot.right_column);

    output.trim_end().to_string()
}

pub fn format_archive_plain_text(days: &[ArchiveDay]) -> String {
    if days.is_empty() {
        return "No archives available at this time.".to_string();
    }

    let mut output = String::new();
    for day in days {
        output.push_str(&format!("{}\n", day.heading));
        for entry in &day.entries {
            output.push_str(&format!(
                "  {} ({})  {}\n",
                entry.display_date, entry.age, entry.href
            ));
        }
        output.push('\n');
    }

    output.trim_end().to_string()
}

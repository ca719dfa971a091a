//! Markdown rendering of a sector report.

use crate::state::MarketData;

/// Render a report for `sector`.
///
/// Pure and byte-for-byte deterministic, so the same input always yields the
/// same clipboard text and file contents. Sections appear in a fixed order
/// and lists keep their input order.
pub fn to_markdown(sector: &str, data: &MarketData) -> String {
    let mut md = format!("# Market Intelligence Report: {sector}\n\n");
    md.push_str(&format!("## 📊 Sector Summary\n\n{}\n\n", data.summary));

    md.push_str("## 🔎 Key Market Trends\n\n");
    push_bullets(&mut md, &data.trends);

    md.push_str("\n## 🚀 Notable Startups / Companies\n\n");
    for startup in &data.startups {
        md.push_str(&format!("### {}\n{}\n", startup.name, startup.description));
        if let Some(link) = &startup.link {
            md.push_str(&format!("[Learn more]({link})\n"));
        }
        md.push('\n');
    }

    md.push_str("## 💰 Investment Themes / Theses\n\n");
    push_bullets(&mut md, &data.theses);

    md
}

fn push_bullets(md: &mut String, items: &[String]) {
    for item in items {
        md.push_str(&format!("- {item}\n"));
    }
}

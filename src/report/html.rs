use crate::domain::model::{MarkKind, MarkRecord};
use crate::report::ReportMeta;
use htmlescape::encode_minimal;

const STYLE: &str = r#"
    <style>
    body { font-family: Arial, Helvetica, sans-serif; margin: 20px; }
    h1 { font-size: 20px; margin-bottom: 6px; }
    h2 { font-size: 16px; margin-top: 24px; }
    .tablewrap { overflow-x: auto; }
    table { border-collapse: collapse; width: 100%; font-size: 12px; }
    th, td { border: 1px solid #ccc; padding: 6px 8px; text-align: left; }
    th { position: sticky; top: 0; background: #f5f5f5; }
    tr:nth-child(even) { background: #fafafa; }
    .note { color: #666; font-size: 11px; }
    nav a { margin-right: 12px; }
    </style>
    "#;

const HEADER_ROW: &str = "<th>Seq</th><th>Mark</th><th>Layer</th>\
    <th>Center X</th><th>Center Y</th>\
    <th>Size X</th><th>Size Y</th>\
    <th>Nearest (Same Layer)</th><th>Dist</th><th>Angle°</th>";

fn push_row(html: &mut String, record: &MarkRecord) {
    let (name, dist, angle) = match &record.nearest {
        Some(n) => (
            encode_minimal(&n.name),
            format!("{:.3}", n.distance),
            format!("{:.3}", n.angle_deg),
        ),
        None => (String::new(), String::new(), String::new()),
    };

    html.push_str(&format!(
        "<tr><td>{}</td><td>{}</td><td>{}</td>\
         <td>{:.3}</td><td>{:.3}</td><td>{:.3}</td><td>{:.3}</td>\
         <td>{}</td><td>{}</td><td>{}</td></tr>",
        record.seq,
        encode_minimal(&record.mark),
        encode_minimal(&record.layer),
        record.center_x,
        record.center_y,
        record.size_x,
        record.size_y,
        name,
        dist,
        angle,
    ));
}

pub fn table_section(kind: MarkKind, records: &[MarkRecord]) -> String {
    let mut html = format!(
        "<h2 id='{}'> {} Marks</h2><div class='tablewrap'><table>\
         <thead><tr>{}</tr></thead><tbody>",
        kind.anchor(),
        kind.label(),
        HEADER_ROW
    );
    for record in records {
        push_row(&mut html, record);
    }
    html.push_str("</tbody></table></div>");
    html
}

/// Full HTML report. Sections and navigation links appear only for kinds
/// that produced records.
pub fn render_html(tvp: &[MarkRecord], aga: &[MarkRecord], meta: &ReportMeta) -> String {
    let mut nav = String::new();
    let mut sections = String::new();
    for (kind, records) in [(MarkKind::Tvp, tvp), (MarkKind::Aga, aga)] {
        if records.is_empty() {
            continue;
        }
        nav.push_str(&format!(
            "<a href=\"#{}\">{} Section</a>",
            kind.anchor(),
            kind.label()
        ));
        sections.push_str(&table_section(kind, records));
    }
    if sections.is_empty() {
        sections.push_str("<p>No marks selected or found.</p>");
    }

    format!(
        "<!DOCTYPE html><html lang='en'><head><meta charset='utf-8'>\
         <title>TVP &amp; AGA Marks Analysis</title>{style}</head><body>\
         <h1>TVP &amp; AGA Marks Analysis Report</h1>\
         <nav>{nav}</nav>\
         <p class='note'>Columns: Seq, Mark, Layer, Center X/Y, Size X/Y, \
         Nearest (Same Layer), Dist, Angle°. Sorted by Layer → Center X → Center Y.</p>\
         {sections}\
         <p class='note'>Source: {source} · Generated {generated}</p>\
         </body></html>",
        style = STYLE,
        nav = nav,
        sections = sections,
        source = encode_minimal(&meta.source),
        generated = meta.generated_at.format("%Y-%m-%d %H:%M:%S"),
    )
}

// file: src/export/csv.rs
use super::ExportRow;

const HEADER: [&str; 9] = [
    "id", "title", "start", "end", "track", "category", "format", "speakers", "announced",
];

pub(super) fn render(rows: &[ExportRow]) -> String {
    let mut out = String::new();
    out.push_str(&HEADER.join(","));
    out.push_str("\r\n");

    for row in rows {
        let announced = if row.announced { "yes" } else { "no" };
        let fields = [
            row.id.as_str(),
            row.title.as_str(),
            row.start.as_str(),
            row.end.as_str(),
            row.track.as_str(),
            row.category.as_str(),
            row.format.as_str(),
            row.speakers.as_str(),
            announced,
        ];
        let line: Vec<String> = fields.iter().map(|f| escape(f)).collect();
        out.push_str(&line.join(","));
        out.push_str("\r\n");
    }

    out
}

/// RFC 4180 quoting: wrap when the field holds a comma, quote or line break.
fn escape(field: &str) -> String {
    if field.contains(|c: char| matches!(c, ',' | '"' | '\n' | '\r')) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

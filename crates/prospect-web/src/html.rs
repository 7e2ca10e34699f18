//! Server-rendered HTML pages.
//!
//! Pages are plain strings. Every record value and the search query pass
//! through [`esc`] before they reach the markup.

use std::{borrow::Cow, fmt::Write as _};

use prospect_core::{
  Field, Table,
  query,
  summary::Summary,
};

const STYLE: &str = "\
body{font-family:system-ui,sans-serif;margin:2rem;color:#222}\
nav a{margin-right:1rem}\
table{border-collapse:collapse;margin:1rem 0}\
th,td{border:1px solid #ccc;padding:.3rem .5rem;text-align:left;vertical-align:top}\
form.add{display:grid;grid-template-columns:repeat(4,minmax(10rem,1fr));gap:.5rem;max-width:60rem}\
form.add label{display:flex;flex-direction:column;font-size:.85rem}\
.pie{width:12rem;height:12rem;border-radius:50%}\
.legend span{display:inline-block;width:.8rem;height:.8rem;margin-right:.3rem}";

const CLOSED_COLOUR: &str = "#4caf50";
const OPEN_COLOUR: &str = "#2196f3";

fn esc(s: &str) -> Cow<'_, str> { quick_xml::escape::escape(s) }

fn layout(title: &str, sheet_name: &str, body: &str) -> String {
  format!(
    "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
     <title>{title}</title>\n<style>{STYLE}</style>\n</head>\n<body>\n\
     <nav><a href=\"/\">Prospects</a><a href=\"/dashboard\">Dashboard</a>\
     <small>sheet: {sheet}</small></nav>\n<h1>{title}</h1>\n{body}</body>\n</html>\n",
    title = esc(title),
    sheet = esc(sheet_name),
  )
}

// ─── List / search / add ─────────────────────────────────────────────────────

/// The record table filtered by `q`, the search box, and the add form.
///
/// Delete links carry each record's position in the unfiltered table.
pub fn index_page(sheet_name: &str, table: &Table, q: &str) -> String {
  let mut body = String::new();

  let _ = writeln!(
    body,
    "<form method=\"get\" action=\"/\" class=\"search\">\
     <input type=\"search\" name=\"q\" value=\"{}\" placeholder=\"Search\">\
     <button type=\"submit\">Search</button></form>",
    esc(q),
  );

  body.push_str("<table>\n<thead><tr>");
  for field in Field::ALL {
    let _ = write!(body, "<th>{}</th>", esc(field.label()));
  }
  body.push_str("<th></th></tr></thead>\n<tbody>\n");

  let mut shown = 0;
  for (position, record) in query::matching(table, q) {
    body.push_str("<tr>");
    for value in record.values() {
      let _ = write!(body, "<td>{}</td>", esc(value));
    }
    let _ = writeln!(
      body,
      "<td><a href=\"/delete/{position}\" class=\"delete\">Delete</a></td></tr>"
    );
    shown += 1;
  }
  body.push_str("</tbody>\n</table>\n");

  if !q.is_empty() {
    let _ = writeln!(
      body,
      "<p class=\"count\">{shown} of {} records match.</p>",
      table.len()
    );
  }

  body.push_str("<h2>Add prospect</h2>\n<form method=\"post\" action=\"/\" class=\"add\">\n");
  for field in Field::ALL {
    let name = field.input_name();
    let label = esc(field.label());
    if field == Field::Notes {
      let _ = writeln!(
        body,
        "<label>{label}<textarea name=\"{name}\" rows=\"2\"></textarea></label>"
      );
    } else {
      let _ = writeln!(body, "<label>{label}<input type=\"text\" name=\"{name}\"></label>");
    }
  }
  body.push_str("<button type=\"submit\">Add</button>\n</form>\n");

  layout("Prospects", sheet_name, &body)
}

// ─── Dashboard ───────────────────────────────────────────────────────────────

/// Totals plus a two-slice Closed/Open pie.
pub fn dashboard_page(sheet_name: &str, summary: &Summary) -> String {
  let breakdown = summary.breakdown();
  let closed_pct = if summary.total == 0 {
    0.0
  } else {
    summary.closed as f64 * 100.0 / summary.total as f64
  };
  let chart_data = serde_json::to_string(&breakdown).unwrap_or_default();

  let mut body = String::new();
  let _ = writeln!(
    body,
    "<dl class=\"totals\">\n\
     <dt>Total</dt><dd id=\"total\">{}</dd>\n\
     <dt>Closed</dt><dd id=\"closed\">{}</dd>\n\
     <dt>Open</dt><dd id=\"open\">{}</dd>\n</dl>",
    summary.total, summary.closed, summary.open,
  );
  let _ = writeln!(
    body,
    "<div class=\"pie\" role=\"img\" aria-label=\"{closed} closed, {open} open\" \
     style=\"background:conic-gradient({CLOSED_COLOUR} 0 {closed_pct:.1}%, \
     {OPEN_COLOUR} {closed_pct:.1}% 100%)\"></div>",
    closed = summary.closed,
    open = summary.open,
  );
  body.push_str("<p class=\"legend\">");
  for (label, (value, colour)) in breakdown
    .labels
    .iter()
    .zip(breakdown.values.iter().zip([CLOSED_COLOUR, OPEN_COLOUR]))
  {
    let _ = write!(
      body,
      "<span style=\"background:{colour}\"></span>{label}: {value} "
    );
  }
  body.push_str("</p>\n");
  let _ = writeln!(
    body,
    "<script type=\"application/json\" id=\"pie-data\">{chart_data}</script>"
  );

  layout("Dashboard", sheet_name, &body)
}

#[cfg(test)]
mod tests {
  use prospect_core::{Record, summary::summarize};

  use super::*;

  #[test]
  fn index_lists_every_column_and_input() {
    let html = index_page("Prospects2", &Table::new(), "");
    for field in Field::ALL {
      assert!(html.contains(&format!("<th>{}</th>", field.label())));
      assert!(html.contains(&format!("name=\"{}\"", field.input_name())));
    }
    assert!(!html.contains("records match"));
  }

  #[test]
  fn index_escapes_values_and_query() {
    let table: Table = vec![
      Record::new().with(Field::Name, "<b>Ann</b> & \"Co\""),
    ]
    .into();
    let html = index_page("Prospects2", &table, "<b>");
    assert!(html.contains("&lt;b&gt;Ann&lt;/b&gt; &amp; &quot;Co&quot;"));
    assert!(html.contains("value=\"&lt;b&gt;\""));
    assert!(!html.contains("<b>Ann"));
  }

  #[test]
  fn filtered_rows_keep_table_positions() {
    let table: Table = ["Ann", "Bob", "Anna"]
      .into_iter()
      .map(|n| Record::new().with(Field::Name, n))
      .collect();
    let html = index_page("Prospects2", &table, "ann");
    assert!(html.contains("href=\"/delete/0\""));
    assert!(html.contains("href=\"/delete/2\""));
    assert!(!html.contains("href=\"/delete/1\""));
    assert!(html.contains("2 of 3 records match."));
  }

  #[test]
  fn dashboard_shows_counts_and_chart_data() {
    let table: Table = ["Closed", "closed", "Open", "", "New"]
      .into_iter()
      .map(|s| Record::new().with(Field::Status, s))
      .collect();
    let html = dashboard_page("Prospects2", &summarize(&table));
    assert!(html.contains("<dd id=\"total\">5</dd>"));
    assert!(html.contains("<dd id=\"closed\">2</dd>"));
    assert!(html.contains("<dd id=\"open\">3</dd>"));
    assert!(html.contains(r#"{"labels":["Closed","Open"],"values":[2,3]}"#));
    assert!(html.contains("40.0%"));
  }

  #[test]
  fn dashboard_of_empty_table() {
    let html = dashboard_page("Prospects2", &summarize(&Table::new()));
    assert!(html.contains("<dd id=\"total\">0</dd>"));
    assert!(html.contains("0.0%"));
  }
}

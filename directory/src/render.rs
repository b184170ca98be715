//! HTML rendering of the employee table view.

use std::fmt::{self, Display, Formatter};

use crate::{employee::Employee, view::EmployeeTable};

const COLUMNS: [&str; 4] = ["ID", "Name", "Email", "Role"];
const EMPTY_MESSAGE: &str = "No Data Found";

pub const NEXT_ACTION: &str = "/next";
pub const PREVIOUS_ACTION: &str = "/previous";

/// Render the whole document for the current state of `table`.
pub fn render_page(table: &EmployeeTable) -> String {
    Page(table).to_string()
}

struct Page<'a>(&'a EmployeeTable);

impl Display for Page<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let table = self.0;
        f.write_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n")?;
        f.write_str("<meta charset=\"utf-8\">\n<title>Employee Data Table</title>\n")?;
        f.write_str("</head>\n<body>\n<div class=\"App\">\n")?;
        if table.is_loading() {
            f.write_str("<h2>Loading...</h2>\n")?;
        } else {
            f.write_str("<h1>Employee Data Table</h1>\n")?;
            write!(f, "{}", Table(table.current_slice()))?;
            write!(f, "{}", Footer(table))?;
        }
        f.write_str("</div>\n</body>\n</html>\n")
    }
}

struct Table<'a>(&'a [Employee]);

impl Display for Table<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str("<table border=\"1\" cellpadding=\"8\">\n<thead>\n<tr>")?;
        for column in COLUMNS {
            write!(f, "<th>{column}</th>")?;
        }
        f.write_str("</tr>\n</thead>\n<tbody>\n")?;
        if self.0.is_empty() {
            writeln!(
                f,
                "<tr><td colspan=\"{}\">{EMPTY_MESSAGE}</td></tr>",
                COLUMNS.len()
            )?;
        }
        for employee in self.0 {
            writeln!(
                f,
                "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
                Escaped(employee.id.as_str()),
                Escaped(&employee.name),
                Escaped(&employee.email),
                Escaped(&employee.role),
            )?;
        }
        f.write_str("</tbody>\n</table>\n")
    }
}

struct Footer<'a>(&'a EmployeeTable);

impl Display for Footer<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let table = self.0;
        f.write_str("<div style=\"margin-top: 20px\">\n")?;
        nav_button(f, PREVIOUS_ACTION, "Previous", table.has_previous())?;
        writeln!(
            f,
            "<span style=\"margin: 0 15px\">{}</span>",
            table.page()
        )?;
        nav_button(f, NEXT_ACTION, "Next", table.has_next())?;
        f.write_str("</div>\n")
    }
}

fn nav_button(f: &mut Formatter<'_>, action: &str, label: &str, enabled: bool) -> fmt::Result {
    let disabled = if enabled { "" } else { " disabled" };
    writeln!(
        f,
        "<form method=\"post\" action=\"{action}\" style=\"display: inline\">\
         <button type=\"submit\"{disabled}>{label}</button></form>"
    )
}

struct Escaped<'a>(&'a str);

impl Display for Escaped<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let mut rest = self.0;
        while let Some(pos) = rest.find(['&', '<', '>', '"', '\'']) {
            f.write_str(&rest[..pos])?;
            let entity = match rest.as_bytes()[pos] {
                b'&' => "&amp;",
                b'<' => "&lt;",
                b'>' => "&gt;",
                b'"' => "&quot;",
                _ => "&#39;",
            };
            f.write_str(entity)?;
            rest = &rest[pos + 1..];
        }
        f.write_str(rest)
    }
}

//! Bordered step titles.

use std::io::{self, Write};

/// Renders `label` between two dash borders of the same character width.
#[must_use]
pub fn render(label: &str) -> String {
    let edge = "-".repeat(label.chars().count());
    format!("{edge}\n{label}\n{edge}\n")
}

/// Writes the banner for `label` to `out`.
///
/// # Errors
///
/// Returns an error if writing to `out` fails.
pub fn write_to(out: &mut dyn Write, label: &str) -> io::Result<()> {
    out.write_all(render(label).as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn borders_match_label_width() {
        assert_eq!(render("Stop"), "----\nStop\n----\n");
    }

    #[test]
    fn width_counts_characters_not_bytes() {
        let banner = render("Arrêt");
        assert!(banner.starts_with("-----\n"));
    }

    #[test]
    fn empty_label_renders_empty_borders() {
        assert_eq!(render(""), "\n\n\n");
    }

    #[test]
    fn write_to_appends_banner() {
        let mut buf = Vec::new();
        write_to(&mut buf, "DB").unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "--\nDB\n--\n");
    }
}

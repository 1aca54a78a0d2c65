//! Local file export of decrypted notes (txt / md / html).
//!
//! Files are rendered entirely locally; decrypted content never goes back
//! to the store. Mirrors the download options of the browser client.

use clap::ValueEnum;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DownloadFormat {
    Txt,
    Md,
    Html,
}

impl DownloadFormat {
    pub fn extension(self) -> &'static str {
        match self {
            Self::Txt => "txt",
            Self::Md => "md",
            Self::Html => "html",
        }
    }
}

/// Default output filename for a note.
pub fn file_name(format: DownloadFormat, note_id: &str) -> String {
    format!("secure-note-{note_id}.{}", format.extension())
}

/// Render note content into the chosen format. Txt and Md pass the content
/// through; Html wraps it in a minimal escaped document.
pub fn render(format: DownloadFormat, content: &str) -> String {
    match format {
        DownloadFormat::Txt | DownloadFormat::Md => content.to_string(),
        DownloadFormat::Html => format!(
            "<!DOCTYPE html><html><body><pre>{}</pre></body></html>",
            escape_html(content)
        ),
    }
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn txt_and_md_pass_through() {
        let content = "# heading\n<not html>";
        assert_eq!(render(DownloadFormat::Txt, content), content);
        assert_eq!(render(DownloadFormat::Md, content), content);
    }

    #[test]
    fn html_wraps_and_escapes() {
        let rendered = render(DownloadFormat::Html, "a < b & \"c\" > d");
        assert!(rendered.starts_with("<!DOCTYPE html>"));
        assert!(rendered.contains("a &lt; b &amp; &quot;c&quot; &gt; d"));
        assert!(!rendered.contains("\"c\""));
    }

    #[test]
    fn html_blocks_script_injection() {
        let rendered = render(DownloadFormat::Html, "<script>alert(1)</script>");
        assert!(!rendered.contains("<script>"));
    }

    #[test]
    fn file_names_follow_note_id() {
        assert_eq!(file_name(DownloadFormat::Md, "abc-123"), "secure-note-abc-123.md");
        assert_eq!(file_name(DownloadFormat::Html, "x"), "secure-note-x.html");
    }
}

use crate::domain::ports::DocumentStore;
use crate::utils::error::{PortfolioError, Result};
use serde::Serialize;

pub const DEFAULT_MARKER_ID: &str = "portfolio-data";
pub const CLOSING_TAG: &str = "</script>";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InjectorOptions {
    pub marker_id: String,
    /// Prefixed to every JSON line.
    pub body_indent: String,
    /// Placed before the closing tag.
    pub closing_indent: String,
}

impl Default for InjectorOptions {
    fn default() -> Self {
        Self {
            marker_id: DEFAULT_MARKER_ID.to_string(),
            body_indent: " ".repeat(6),
            closing_indent: " ".repeat(4),
        }
    }
}

/// Replaces the body of one `application/json` script tag by plain text
/// offsets. Nothing outside the body is touched.
#[derive(Debug, Clone, Default)]
pub struct HtmlInjector {
    options: InjectorOptions,
}

impl HtmlInjector {
    pub fn new(options: InjectorOptions) -> Self {
        Self { options }
    }

    pub fn with_marker_id(marker_id: &str) -> Self {
        Self::new(InjectorOptions {
            marker_id: marker_id.to_string(),
            ..InjectorOptions::default()
        })
    }

    pub fn marker(&self) -> String {
        format!(
            r#"<script id="{}" type="application/json">"#,
            self.options.marker_id
        )
    }

    /// Byte range of the current script body.
    pub fn locate(&self, html: &str) -> Result<(usize, usize)> {
        let marker = self.marker();
        let marker_start = html
            .find(&marker)
            .ok_or_else(|| PortfolioError::MarkerNotFoundError {
                marker: self.options.marker_id.clone(),
            })?;

        // the marker ends with '>', so this always lands on it
        let start = html[marker_start..]
            .find('>')
            .map(|offset| marker_start + offset + 1)
            .unwrap_or(marker_start + marker.len());

        let end = html[start..]
            .find(CLOSING_TAG)
            .map(|offset| start + offset)
            .ok_or(PortfolioError::ClosingTagNotFoundError)?;

        Ok((start, end))
    }

    pub fn render_body<T: Serialize>(&self, payload: &T) -> Result<String> {
        let json = serde_json::to_string_pretty(payload)?;
        let lines: Vec<String> = json
            .lines()
            .map(|line| format!("{}{}", self.options.body_indent, line))
            .collect();
        Ok(format!(
            "\n{}\n{}",
            lines.join("\n"),
            self.options.closing_indent
        ))
    }

    pub fn splice<T: Serialize>(&self, html: &str, payload: &T) -> Result<String> {
        let (start, end) = self.locate(html)?;
        let body = self.render_body(payload)?;

        let mut updated = String::with_capacity(html.len() - (end - start) + body.len());
        updated.push_str(&html[..start]);
        updated.push_str(&body);
        updated.push_str(&html[end..]);
        Ok(updated)
    }

    /// Reads, splices and writes back. The document is left alone on error.
    pub fn inject<S: DocumentStore, T: Serialize>(&self, store: &S, payload: &T) -> Result<()> {
        let html = store.read_document()?;
        let updated = self.splice(&html, payload)?;
        tracing::debug!(
            "Writing {} bytes to {} ({} before)",
            updated.len(),
            store.describe(),
            html.len()
        );
        store.write_document(&updated)
    }
}

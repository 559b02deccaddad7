//! Plain-text rendering for the terminal.
//!
//! Mirrors the dialog layout: title, challenge, solution, the full body
//! when no section was found, results with tags, the quote with its
//! author, then a call to action.

use std::fmt::Write;

use casebook_content::markdown::render_plain_text;
use casebook_content::{CaseStudySummary, CaseStudyViewModel, KeyMetric};

use crate::detail::DetailView;
use crate::modal::ModalState;

/// Shown while a fetch is outstanding.
pub const LOADING_TEXT: &str = "Loading case study...";

/// Renders view models as plain text.
#[derive(Debug, Clone)]
pub struct TextRenderer {
    company: String,
}

impl TextRenderer {
    /// Create a renderer; `company` appears in the call to action.
    pub fn new(company: impl Into<String>) -> Self {
        Self {
            company: company.into(),
        }
    }

    /// Render whatever the dialog currently shows.
    pub fn render_state(&self, state: &ModalState) -> String {
        match state {
            ModalState::Closed => String::new(),
            ModalState::Loading { .. } => LOADING_TEXT.to_string(),
            ModalState::Error { message, .. } => format!("{message}\n\n[Close]"),
            ModalState::Ready { view, .. } => self.render_view(view),
        }
    }

    /// Render an extracted case study.
    pub fn render_view(&self, view: &CaseStudyViewModel) -> String {
        let mut out = String::new();
        heading(&mut out, &view.title, '=');

        section(&mut out, "The Challenge", &view.challenge);
        section(&mut out, "Our Solution", &view.solution);
        if view.is_unstructured() && !view.full_body.is_empty() {
            block(&mut out, &view.full_body);
        }
        if !view.results.is_empty() {
            section(&mut out, "The Results", &view.results);
            let _ = writeln!(out, "Tags: {}\n", view.tags.join(", "));
        }

        if !view.quote.is_empty() {
            let _ = writeln!(out, "  \"{}\"", view.quote);
            if view.has_named_author() {
                let _ = write!(out, "    [{}] {}", view.author_initial, view.author_name);
                if !view.author_role.is_empty() {
                    let _ = write!(out, ", {}", view.author_role);
                }
                out.push('\n');
            }
            out.push('\n');
        }

        heading(&mut out, "Ready to achieve similar results?", '-');
        let _ = writeln!(
            out,
            "Join thousands of companies that trust {} to transform their business.",
            self.company
        );
        out.push_str("Book a Demo | Talk to Sales\n");
        out
    }

    /// Render a detail page: the case study plus metrics and related entries.
    pub fn render_detail(&self, detail: &DetailView) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{}\n", detail.read_time);

        if !detail.metrics.is_empty() {
            heading(&mut out, "Key Metrics", '-');
            for metric in &detail.metrics {
                out.push_str(&metric_line(metric));
            }
            out.push('\n');
        }

        out.push_str(&self.render_view(&detail.view));

        if !detail.related.is_empty() {
            out.push('\n');
            heading(&mut out, "Related Case Studies", '-');
            for summary in &detail.related {
                out.push_str(&self.render_summary(summary));
            }
        }
        out
    }

    /// One listing entry.
    pub fn render_summary(&self, summary: &CaseStudySummary) -> String {
        format!(
            "{} [{}]\n  {} | {} | {} | /{}\n  {}\n",
            summary.title,
            summary.category,
            summary.author,
            summary.publish_date,
            summary.read_time,
            summary.slug,
            summary.excerpt,
        )
    }
}

fn metric_line(metric: &KeyMetric) -> String {
    format!("  {:>8}  {} ({})\n", metric.value, metric.label, metric.kind)
}

fn heading(out: &mut String, text: &str, underline: char) {
    let _ = writeln!(out, "{text}");
    let _ = writeln!(
        out,
        "{}\n",
        underline.to_string().repeat(text.chars().count().max(1))
    );
}

fn section(out: &mut String, title: &str, text: &str) {
    if text.is_empty() {
        return;
    }
    heading(out, title, '-');
    block(out, text);
}

fn block(out: &mut String, markdown: &str) {
    let rendered = render_plain_text(markdown);
    if !rendered.is_empty() {
        out.push_str(&rendered);
        out.push_str("\n\n");
    }
}

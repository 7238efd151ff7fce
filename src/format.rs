//! Message formatter
//!
//! Pure mapping from a webhook event to the text relayed to Telegram.
//! Each event type has a fixed template; anything without one gets a
//! fallback line naming the event, the repository and the actor. The
//! formatter never fails: payload fields that are missing render as
//! placeholders.

use crate::config::FormatConfig;
use crate::webhook::{EventKind, WebhookEvent};
use serde::{Deserialize, Serialize};

/// Telegram message markup mode
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParseMode {
    #[default]
    Markdown,
    Html,
}

impl ParseMode {
    /// Value of the `parse_mode` field in the Bot API call
    pub fn as_api_value(self) -> &'static str {
        match self {
            Self::Markdown => "Markdown",
            Self::Html => "HTML",
        }
    }

    /// Plain interpolation of payload-derived text
    fn text(self, text: &str) -> String {
        match self {
            Self::Markdown => text.to_string(),
            Self::Html => escape_html(text),
        }
    }

    fn bold(self, text: &str) -> String {
        match self {
            Self::Markdown => format!("*{}*", text),
            Self::Html => format!("<b>{}</b>", escape_html(text)),
        }
    }

    fn code(self, text: &str) -> String {
        match self {
            Self::Markdown => format!("`{}`", text),
            Self::Html => format!("<code>{}</code>", escape_html(text)),
        }
    }

    fn link(self, label: &str, url: &str) -> String {
        match self {
            Self::Markdown => format!("[{}]({})", label, url),
            Self::Html => format!("<a href=\"{}\">{}</a>", url, escape_html(label)),
        }
    }
}

/// Escape the three characters Telegram requires entities for in HTML mode
fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Message handed to the relay
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundMessage {
    /// Rendered message body
    pub text: String,

    /// Markup mode the body was rendered for
    pub parse_mode: ParseMode,
}

/// Renders webhook events into outbound messages
pub struct MessageFormatter {
    config: FormatConfig,
}

impl MessageFormatter {
    /// Create a formatter with the given formatting configuration
    pub fn new(config: FormatConfig) -> Self {
        Self { config }
    }

    /// Render one webhook event. Infallible; unknown events and missing
    /// payload fields produce placeholder text rather than errors.
    pub fn render(&self, event: &WebhookEvent) -> OutboundMessage {
        let mode = self.config.parse_mode;
        let header = format!(
            "📢 {} {}\n",
            mode.bold("GitHub Event:"),
            mode.code(event.kind().as_str())
        );

        let body = match event.kind() {
            EventKind::Push => self.render_push(event, mode),
            EventKind::PullRequest => format!(
                "PR {}: {}\nRepo: {}\nBy: {}",
                mode.bold(&event.action()),
                mode.text(&event.pull_request_title()),
                mode.code(&event.repo_full_name()),
                self.actor(event, mode),
            ),
            EventKind::Issues => format!(
                "Issue {}: {}\nRepo: {}\nBy: {}",
                mode.bold(&event.action()),
                mode.text(&event.issue_title()),
                mode.code(&event.repo_full_name()),
                self.actor(event, mode),
            ),
            EventKind::WorkflowRun => format!(
                "Workflow: {}\nStatus: {}\nRepo: {}\nBy: {}",
                mode.code(&event.workflow_name()),
                mode.text(&event.workflow_conclusion()),
                mode.code(&event.repo_full_name()),
                self.actor(event, mode),
            ),
            EventKind::Release => format!(
                "Release {} published\nRepo: {}\nBy: {}",
                mode.bold(&event.release_tag()),
                mode.code(&event.repo_full_name()),
                self.actor(event, mode),
            ),
            EventKind::Star => format!(
                "⭐ Star {}\nRepo: {}\nBy: {}",
                mode.bold(&event.action()),
                mode.code(&event.repo_full_name()),
                self.actor(event, mode),
            ),
            EventKind::Fork => format!(
                "🍴 Forked to {}\nRepo: {}\nBy: {}",
                mode.code(&event.forkee_full_name()),
                mode.code(&event.repo_full_name()),
                self.actor(event, mode),
            ),
            EventKind::Repository => format!(
                "Repository {}\nRepo: {}\nBy: {}",
                mode.bold(&event.action()),
                mode.code(&event.repo_full_name()),
                self.actor(event, mode),
            ),
            EventKind::Ping => format!(
                "🏓 Webhook established\nRepo: {}\nZen: {}",
                mode.code(&event.repo_full_name()),
                mode.text(&event.zen()),
            ),
            EventKind::Other(_) => format!(
                "Repo: {}\nBy: {}\nℹ️ Event details: (not formatted yet)",
                mode.code(&event.repo_full_name()),
                self.actor(event, mode),
            ),
        };

        OutboundMessage {
            text: header + &body,
            parse_mode: mode,
        }
    }

    /// One line per commit, exactly as many lines as the payload carries
    fn render_push(&self, event: &WebhookEvent, mode: ParseMode) -> String {
        let commit_lines: Vec<String> = event
            .commits()
            .iter()
            .map(|c| {
                format!(
                    "- {} {} by {}",
                    mode.code(&c.id),
                    mode.text(&c.message),
                    mode.text(&c.author),
                )
            })
            .collect();

        format!(
            "Repo: {}\nActor: {}\nCommits:\n{}",
            mode.code(&event.repo_full_name()),
            self.actor(event, mode),
            commit_lines.join("\n"),
        )
    }

    /// Actor identity line: configured identity wins, payload sender
    /// otherwise.
    fn actor(&self, event: &WebhookEvent, mode: ParseMode) -> String {
        match (&self.config.actor_name, &self.config.actor_url) {
            (Some(name), Some(url)) => mode.link(name, url),
            (Some(name), None) => mode.text(name),
            _ => mode.text(&event.sender_login()),
        }
    }
}

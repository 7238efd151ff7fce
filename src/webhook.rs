//! Inbound GitHub webhook event model
//!
//! A webhook delivery is an opaque JSON payload plus the event name carried
//! in the `X-GitHub-Event` header. Payload shapes vary per event and GitHub
//! adds fields over time, so accessors here are permissive: a missing or
//! mistyped field yields a placeholder instead of failing the request.

use serde_json::Value;

/// Placeholder used when a payload field is missing or not a string
pub const UNKNOWN: &str = "unknown";

/// GitHub event type, parsed from the `X-GitHub-Event` header
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventKind {
    Push,
    PullRequest,
    Issues,
    WorkflowRun,
    Release,
    Star,
    Fork,
    Repository,
    Ping,
    /// Any event without a dedicated template
    Other(String),
}

impl EventKind {
    /// Parse a header value into an event kind
    pub fn parse(value: &str) -> Self {
        match value {
            "push" => Self::Push,
            "pull_request" => Self::PullRequest,
            "issues" => Self::Issues,
            "workflow_run" => Self::WorkflowRun,
            "release" => Self::Release,
            "star" => Self::Star,
            "fork" => Self::Fork,
            "repository" => Self::Repository,
            "ping" => Self::Ping,
            other => Self::Other(other.to_string()),
        }
    }

    /// The header value this kind corresponds to
    pub fn as_str(&self) -> &str {
        match self {
            Self::Push => "push",
            Self::PullRequest => "pull_request",
            Self::Issues => "issues",
            Self::WorkflowRun => "workflow_run",
            Self::Release => "release",
            Self::Star => "star",
            Self::Fork => "fork",
            Self::Repository => "repository",
            Self::Ping => "ping",
            Self::Other(name) => name,
        }
    }
}

/// One commit entry from a `push` payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Commit {
    /// Short commit id (7 characters)
    pub id: String,

    /// First line of the commit message
    pub message: String,

    /// Commit author name
    pub author: String,
}

/// A single webhook delivery: event kind plus raw payload.
///
/// Constructed per request and discarded after formatting.
#[derive(Debug, Clone)]
pub struct WebhookEvent {
    kind: EventKind,
    payload: Value,
}

impl WebhookEvent {
    /// Wrap a parsed payload with its event kind
    pub fn new(kind: EventKind, payload: Value) -> Self {
        Self { kind, payload }
    }

    /// Event kind this delivery was tagged with
    pub fn kind(&self) -> &EventKind {
        &self.kind
    }

    /// Walk `path` through nested objects and return the string found
    /// there, or `default` when absent.
    fn str_at(&self, path: &[&str], default: &str) -> String {
        let mut node = &self.payload;
        for key in path {
            node = &node[*key];
        }
        node.as_str().unwrap_or(default).to_string()
    }

    /// `repository.full_name`
    pub fn repo_full_name(&self) -> String {
        self.str_at(&["repository", "full_name"], UNKNOWN)
    }

    /// `sender.login` reported by GitHub
    pub fn sender_login(&self) -> String {
        self.str_at(&["sender", "login"], UNKNOWN)
    }

    /// Top-level `action` (opened, closed, created, ...)
    pub fn action(&self) -> String {
        self.str_at(&["action"], UNKNOWN)
    }

    /// `pull_request.title`
    pub fn pull_request_title(&self) -> String {
        self.str_at(&["pull_request", "title"], UNKNOWN)
    }

    /// `issue.title`
    pub fn issue_title(&self) -> String {
        self.str_at(&["issue", "title"], UNKNOWN)
    }

    /// `workflow_run.name`
    pub fn workflow_name(&self) -> String {
        self.str_at(&["workflow_run", "name"], UNKNOWN)
    }

    /// `workflow_run.conclusion`, falling back to `status` while the run
    /// is still in progress (conclusion is null until completion).
    pub fn workflow_conclusion(&self) -> String {
        let run = &self.payload["workflow_run"];
        run["conclusion"]
            .as_str()
            .or_else(|| run["status"].as_str())
            .unwrap_or(UNKNOWN)
            .to_string()
    }

    /// `release.tag_name`
    pub fn release_tag(&self) -> String {
        self.str_at(&["release", "tag_name"], UNKNOWN)
    }

    /// `forkee.full_name` of the newly created fork
    pub fn forkee_full_name(&self) -> String {
        self.str_at(&["forkee", "full_name"], UNKNOWN)
    }

    /// Zen string GitHub includes in ping deliveries
    pub fn zen(&self) -> String {
        self.str_at(&["zen"], UNKNOWN)
    }

    /// Commit list from a `push` payload. Commit messages are truncated to
    /// their first line so each commit renders as exactly one line.
    pub fn commits(&self) -> Vec<Commit> {
        self.payload["commits"]
            .as_array()
            .map(|commits| {
                commits
                    .iter()
                    .map(|c| Commit {
                        id: c["id"].as_str().unwrap_or(UNKNOWN).chars().take(7).collect(),
                        message: c["message"]
                            .as_str()
                            .unwrap_or("")
                            .lines()
                            .next()
                            .unwrap_or("")
                            .to_string(),
                        author: c["author"]["name"].as_str().unwrap_or(UNKNOWN).to_string(),
                    })
                    .collect()
            })
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_known_kinds() {
        assert_eq!(EventKind::parse("push"), EventKind::Push);
        assert_eq!(EventKind::parse("pull_request"), EventKind::PullRequest);
        assert_eq!(EventKind::parse("issues"), EventKind::Issues);
        assert_eq!(EventKind::parse("workflow_run"), EventKind::WorkflowRun);
        assert_eq!(EventKind::parse("release"), EventKind::Release);
        assert_eq!(EventKind::parse("star"), EventKind::Star);
        assert_eq!(EventKind::parse("fork"), EventKind::Fork);
        assert_eq!(EventKind::parse("repository"), EventKind::Repository);
        assert_eq!(EventKind::parse("ping"), EventKind::Ping);
    }

    #[test]
    fn test_parse_unknown_kind() {
        let kind = EventKind::parse("deployment_status");
        assert_eq!(kind, EventKind::Other("deployment_status".to_string()));
        assert_eq!(kind.as_str(), "deployment_status");
    }

    #[test]
    fn test_kind_roundtrip() {
        for name in [
            "push",
            "pull_request",
            "issues",
            "workflow_run",
            "release",
            "star",
            "fork",
            "repository",
            "ping",
        ] {
            assert_eq!(EventKind::parse(name).as_str(), name);
        }
    }

    #[test]
    fn test_accessors_with_fields_present() {
        let event = WebhookEvent::new(
            EventKind::Issues,
            json!({
                "action": "opened",
                "issue": {"title": "Broken build"},
                "repository": {"full_name": "octo/widgets"},
                "sender": {"login": "octocat"},
            }),
        );

        assert_eq!(event.action(), "opened");
        assert_eq!(event.issue_title(), "Broken build");
        assert_eq!(event.repo_full_name(), "octo/widgets");
        assert_eq!(event.sender_login(), "octocat");
    }

    #[test]
    fn test_accessors_default_on_empty_payload() {
        let event = WebhookEvent::new(EventKind::Push, json!({}));

        assert_eq!(event.repo_full_name(), UNKNOWN);
        assert_eq!(event.sender_login(), UNKNOWN);
        assert_eq!(event.action(), UNKNOWN);
        assert_eq!(event.pull_request_title(), UNKNOWN);
        assert_eq!(event.workflow_conclusion(), UNKNOWN);
        assert_eq!(event.release_tag(), UNKNOWN);
        assert!(event.commits().is_empty());
    }

    #[test]
    fn test_accessors_default_on_mistyped_fields() {
        // repository.full_name as a number must not panic
        let event = WebhookEvent::new(
            EventKind::Push,
            json!({"repository": {"full_name": 42}, "commits": "not-an-array"}),
        );

        assert_eq!(event.repo_full_name(), UNKNOWN);
        assert!(event.commits().is_empty());
    }

    #[test]
    fn test_commits_extraction() {
        let event = WebhookEvent::new(
            EventKind::Push,
            json!({
                "commits": [
                    {
                        "id": "d6fde92930d4715a2b49857d24b940956b26d2d3",
                        "message": "Fix login redirect",
                        "author": {"name": "Alice"},
                    },
                    {
                        "id": "1481a2de7b2a7d02428ad93446ab166be7793fbb",
                        "message": "Add tests\n\nLonger body that should not appear",
                        "author": {"name": "Bob"},
                    },
                ],
            }),
        );

        let commits = event.commits();
        assert_eq!(commits.len(), 2);
        assert_eq!(commits[0].id, "d6fde92");
        assert_eq!(commits[0].message, "Fix login redirect");
        assert_eq!(commits[0].author, "Alice");
        // Only the first line of a multi-line message survives
        assert_eq!(commits[1].message, "Add tests");
    }

    #[test]
    fn test_workflow_conclusion_falls_back_to_status() {
        let event = WebhookEvent::new(
            EventKind::WorkflowRun,
            json!({"workflow_run": {"name": "CI", "conclusion": null, "status": "in_progress"}}),
        );

        assert_eq!(event.workflow_conclusion(), "in_progress");
    }
}

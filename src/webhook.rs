//! Webhook payload structures and change extraction

use serde::Deserialize;

/// Full git reference for the branch we report on.
pub const MAIN_BRANCH_REF: &str = "refs/heads/main";

/// A commit message line is reportable when it contains one of these
/// as a literal, case-sensitive substring ("recreated" also matches).
pub const TRIGGER_SUBSTRINGS: [&str; 2] = ["created", "updated"];

/// GitHub push event payload, reduced to the fields we use.
#[derive(Debug, Clone, Deserialize)]
pub struct PushPayload {
    #[serde(rename = "ref", default)]
    pub reference: String,
    #[serde(default)]
    pub commits: Vec<Commit>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Commit {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub url: String,
}

/// One reportable change line, paired with the URL of the commit it
/// came from. Built per request, never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeEntry {
    pub description: String,
    pub source_url: String,
}

/// Extracts reportable change lines from a push payload.
///
/// Pushes to anything but the main branch and payloads without commits
/// yield an empty list (ignored, not an error). Order follows the
/// payload: commits first, lines within a commit message second.
pub fn extract_changes(payload: &PushPayload) -> Vec<ChangeEntry> {
    if payload.reference != MAIN_BRANCH_REF {
        return Vec::new();
    }

    let mut changes = Vec::new();
    for commit in &payload.commits {
        for line in commit.message.split('\n') {
            if TRIGGER_SUBSTRINGS.iter().any(|t| line.contains(t)) {
                changes.push(ChangeEntry {
                    description: line.to_string(),
                    source_url: commit.url.clone(),
                });
            }
        }
    }
    changes
}

//! Mapping Gitea wire shapes onto the canonical contract types.

use issuetalk_core::{Comment, Issue, Reaction, ReactionSummary, User};

use crate::types::{GiteaComment, GiteaIssue, GiteaReaction, GiteaUser};

/// Normalize a Gitea user.
///
/// Gitea's user payload has no profile URL, so the homepage is derived from
/// the instance base URL and the login.
pub fn normalize_user(user: GiteaUser, base_url: &str) -> User {
    let homepage = format!("{}/{}", base_url.trim_end_matches('/'), user.login);
    User {
        username: user.login,
        avatar_url: user.avatar_url.filter(|url| !url.is_empty()),
        homepage: Some(homepage),
    }
}

/// Normalize a Gitea issue. The canonical `id` is the per-repo number.
pub fn normalize_issue(issue: GiteaIssue) -> Issue {
    Issue {
        id: issue.number,
        title: issue.title,
        content: issue.body.unwrap_or_default(),
        link: issue.html_url,
    }
}

/// Normalize a Gitea comment, attaching the rendered HTML and reaction
/// tallies fetched alongside it.
pub fn normalize_comment(
    comment: GiteaComment,
    content: String,
    reactions: Option<ReactionSummary>,
    base_url: &str,
) -> Comment {
    Comment {
        id: comment.id,
        content,
        content_raw: comment.body,
        author: normalize_user(comment.user, base_url),
        created_at: comment.created_at,
        updated_at: comment.updated_at,
        reactions,
    }
}

/// Tally raw reactions into the canonical summary.
///
/// Gitea supports more reaction contents than the contract exposes; the
/// rest are ignored.
pub fn count_reactions(reactions: &[GiteaReaction]) -> ReactionSummary {
    let mut summary = ReactionSummary::default();
    for reaction in reactions {
        match Reaction::from_wire(&reaction.content) {
            Some(Reaction::Like) => summary.like += 1,
            Some(Reaction::Unlike) => summary.unlike += 1,
            Some(Reaction::Heart) => summary.heart += 1,
            None => {}
        }
    }
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn wire_user(login: &str) -> GiteaUser {
        serde_json::from_value(serde_json::json!({
            "id": 7,
            "login": login,
            "avatar_url": format!("https://gitea.example/avatars/{login}")
        }))
        .unwrap()
    }

    #[test]
    fn test_normalize_user() {
        let user = normalize_user(wire_user("alice"), "https://gitea.example/");
        assert_eq!(
            user,
            User {
                username: "alice".into(),
                avatar_url: Some("https://gitea.example/avatars/alice".into()),
                homepage: Some("https://gitea.example/alice".into()),
            }
        );
    }

    #[test]
    fn test_normalize_user_drops_empty_avatar() {
        let wire: GiteaUser =
            serde_json::from_value(serde_json::json!({"id": 1, "login": "bob", "avatar_url": ""}))
                .unwrap();
        let user = normalize_user(wire, "https://gitea.example");
        assert!(user.avatar_url.is_none());
    }

    #[test]
    fn test_normalize_issue_uses_number() {
        let issue: GiteaIssue = serde_json::from_value(serde_json::json!({
            "id": 12345,
            "number": 8,
            "title": "/posts/hello",
            "body": "comment thread for https://example.com/posts/hello",
            "html_url": "https://gitea.example/o/r/issues/8",
            "user": {"id": 7, "login": "alice"},
            "created_at": "2024-03-01T10:00:00Z",
            "updated_at": "2024-03-02T11:30:00Z"
        }))
        .unwrap();

        let issue = normalize_issue(issue);
        assert_eq!(issue.id, 8);
        assert_eq!(issue.title, "/posts/hello");
        assert_eq!(issue.link, "https://gitea.example/o/r/issues/8");
    }

    #[test]
    fn test_normalize_comment_keeps_raw_and_rendered() {
        let comment: GiteaComment = serde_json::from_value(serde_json::json!({
            "id": 41,
            "body": "**bold**",
            "user": {"id": 7, "login": "alice"},
            "created_at": "2024-03-01T10:00:00Z",
            "updated_at": "2024-03-01T10:05:00Z"
        }))
        .unwrap();

        let summary = ReactionSummary {
            like: 2,
            unlike: 0,
            heart: 1,
        };
        let comment = normalize_comment(
            comment,
            "<p><strong>bold</strong></p>".to_string(),
            Some(summary),
            "https://gitea.example",
        );

        assert_eq!(comment.content_raw, "**bold**");
        assert_eq!(comment.content, "<p><strong>bold</strong></p>");
        assert_eq!(comment.author.username, "alice");
        assert_eq!(comment.reactions, Some(summary));
        assert!(comment.updated_at > comment.created_at);
    }

    #[rstest]
    #[case(&["+1", "+1", "-1"], 2, 1, 0)]
    #[case(&["heart"], 0, 0, 1)]
    #[case(&["laugh", "rocket", "confused"], 0, 0, 0)]
    #[case(&[], 0, 0, 0)]
    fn test_count_reactions(
        #[case] contents: &[&str],
        #[case] like: u64,
        #[case] unlike: u64,
        #[case] heart: u64,
    ) {
        let reactions: Vec<GiteaReaction> = contents
            .iter()
            .map(|content| GiteaReaction {
                user: wire_user("alice"),
                content: content.to_string(),
            })
            .collect();

        let summary = count_reactions(&reactions);
        assert_eq!(summary.like, like);
        assert_eq!(summary.unlike, unlike);
        assert_eq!(summary.heart, heart);
    }
}

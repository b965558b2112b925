//! Sign in to a Gitea instance and post a comment on a demo thread.
//!
//! Requires `GITEA_OWNER`, `GITEA_REPO`, and `GITEA_CLIENT_ID`; point
//! `GITEA_BASE_URL` at a self-hosted instance if not using gitea.com.

use issuetalk::prelude::*;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let api = GiteaApi::from_env()?;

    let (url, handle) = interactive_login(&api).await?;
    println!("Open the following URL to sign in:\n\n  {url}\n");
    let tokens = handle.wait().await?;

    let user = api.current_user(&tokens.access_token).await?;
    println!("signed in as {}", user.username);

    let title = "/demo/comment-thread";
    let issue = match api.issue(None, &IssueSelector::title(title)).await? {
        Some(issue) => issue,
        None => {
            api.create_issue(&tokens.access_token, title, "Demo comment thread")
                .await?
        }
    };

    let comment = api
        .create_comment(&tokens.access_token, issue.id, "Hello from issuetalk!")
        .await?;
    println!("posted comment {} on issue {}", comment.id, issue.id);

    let page = api
        .comments(None, issue.id, &CommentQuery::default())
        .await?;
    println!("{} comment(s) on {}", page.count, issue.link);
    for comment in page.data {
        println!("- {}: {}", comment.author.username, comment.content_raw);
    }
    Ok(())
}

mod common;

use anyhow::Result;
use reqwest::multipart::Form;
use reqwest::StatusCode;
use serde_json::json;

async fn create_post(
    server: &common::TestServer,
    token: &str,
    title: &str,
    status: Option<&str>,
) -> Result<serde_json::Value> {
    let client = reqwest::Client::new();

    let mut form = Form::new()
        .text("title", title.to_string())
        .text("content", "This is long enough to pass content validation.");
    if let Some(status) = status {
        form = form.text("status", status.to_string());
    }

    let resp = client
        .post(format!("{}/api/posts", server.base_url))
        .bearer_auth(token)
        .multipart(form)
        .send()
        .await?;

    anyhow::ensure!(resp.status() == StatusCode::CREATED, "create failed: {}", resp.status());
    Ok(resp.json().await?)
}

#[tokio::test]
async fn test_create_requires_auth() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let form = Form::new()
        .text("title", "No token")
        .text("content", "This should never reach the database.");
    let resp = client
        .post(format!("{}/api/posts", server.base_url))
        .multipart(form)
        .send()
        .await?;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    Ok(())
}

#[tokio::test]
async fn test_post_lifecycle() -> Result<()> {
    let server = common::ensure_server().await?;
    if !common::db_available(server).await? {
        eprintln!("skipping: no database configured");
        return Ok(());
    }
    let client = reqwest::Client::new();
    let (token, email) = common::register_user(server, "author").await?;

    // New posts default to DRAFT
    let title = format!("Lifecycle {}", common::uuid_suffix());
    let post = create_post(server, &token, &title, None).await?;
    assert_eq!(post["status"], "DRAFT");
    assert_eq!(post["title"], title.as_str());
    assert_eq!(post["author"]["email"], email.as_str());
    assert!(post["tags"].as_array().unwrap().is_empty());
    let uuid = post["uuid"].as_str().unwrap().to_string();

    // Drafts are hidden from the public feed
    let resp = client
        .get(format!("{}/api/posts/published", server.base_url))
        .send()
        .await?;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = resp.json().await?;
    assert!(body["data"]
        .as_array()
        .unwrap()
        .iter()
        .all(|p| p["uuid"] != uuid.as_str()));

    // Anonymous readers cannot open a draft
    let resp = client
        .get(format!("{}/api/posts/{}", server.base_url, uuid))
        .send()
        .await?;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    let body: serde_json::Value = resp.json().await?;
    assert_eq!(body["message"], "Please log in to view this post");

    // The author can
    let resp = client
        .get(format!("{}/api/posts/{}", server.base_url, uuid))
        .bearer_auth(&token)
        .send()
        .await?;
    assert_eq!(resp.status(), StatusCode::OK);

    // Publish, then the post shows up publicly
    let resp = client
        .patch(format!("{}/api/posts/{}/status", server.base_url, uuid))
        .bearer_auth(&token)
        .json(&json!({ "status": "PUBLISHED" }))
        .send()
        .await?;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = resp.json().await?;
    assert_eq!(body["status"], "PUBLISHED");

    let resp = client
        .get(format!("{}/api/posts/published?search={}", server.base_url, title.replace(' ', "%20")))
        .send()
        .await?;
    let body: serde_json::Value = resp.json().await?;
    assert!(body["data"]
        .as_array()
        .unwrap()
        .iter()
        .any(|p| p["uuid"] == uuid.as_str()));
    assert!(body["meta"]["total"].as_i64().unwrap() >= 1);
    assert_eq!(body["meta"]["page"], 1);

    // Update the title via the same multipart surface
    let new_title = format!("{} updated", title);
    let form = Form::new().text("title", new_title.clone());
    let resp = client
        .patch(format!("{}/api/posts/{}", server.base_url, uuid))
        .bearer_auth(&token)
        .multipart(form)
        .send()
        .await?;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = resp.json().await?;
    assert_eq!(body["title"], new_title.as_str());

    // Delete, then the post is gone
    let resp = client
        .delete(format!("{}/api/posts/{}", server.base_url, uuid))
        .bearer_auth(&token)
        .send()
        .await?;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = resp.json().await?;
    assert_eq!(body["message"], "Post deleted successfully");

    let resp = client
        .get(format!("{}/api/posts/{}", server.base_url, uuid))
        .bearer_auth(&token)
        .send()
        .await?;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    Ok(())
}

#[tokio::test]
async fn test_create_validates_fields() -> Result<()> {
    let server = common::ensure_server().await?;
    if !common::db_available(server).await? {
        eprintln!("skipping: no database configured");
        return Ok(());
    }
    let client = reqwest::Client::new();
    let (token, _) = common::register_user(server, "validator").await?;

    // Title too short
    let form = Form::new()
        .text("title", "ab")
        .text("content", "Content that is certainly long enough.");
    let resp = client
        .post(format!("{}/api/posts", server.base_url))
        .bearer_auth(&token)
        .multipart(form)
        .send()
        .await?;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = resp.json().await?;
    assert!(body["field_errors"]["title"].is_string());

    // Missing content entirely
    let form = Form::new().text("title", "A valid title");
    let resp = client
        .post(format!("{}/api/posts", server.base_url))
        .bearer_auth(&token)
        .multipart(form)
        .send()
        .await?;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    // Bad status value
    let form = Form::new()
        .text("title", "A valid title")
        .text("content", "Content that is certainly long enough.")
        .text("status", "ARCHIVED");
    let resp = client
        .post(format!("{}/api/posts", server.base_url))
        .bearer_auth(&token)
        .multipart(form)
        .send()
        .await?;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    Ok(())
}

#[tokio::test]
async fn test_ownership_is_enforced() -> Result<()> {
    let server = common::ensure_server().await?;
    if !common::db_available(server).await? {
        eprintln!("skipping: no database configured");
        return Ok(());
    }
    let client = reqwest::Client::new();

    let (owner_token, _) = common::register_user(server, "owner").await?;
    let (other_token, _) = common::register_user(server, "intruder").await?;

    let post = create_post(server, &owner_token, "Owned post", Some("PUBLISHED")).await?;
    let uuid = post["uuid"].as_str().unwrap();

    // A different user cannot update, change status, or delete it
    let form = Form::new().text("title", "Hijacked title");
    let resp = client
        .patch(format!("{}/api/posts/{}", server.base_url, uuid))
        .bearer_auth(&other_token)
        .multipart(form)
        .send()
        .await?;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let resp = client
        .patch(format!("{}/api/posts/{}/status", server.base_url, uuid))
        .bearer_auth(&other_token)
        .json(&json!({ "status": "DRAFT" }))
        .send()
        .await?;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let resp = client
        .delete(format!("{}/api/posts/{}", server.base_url, uuid))
        .bearer_auth(&other_token)
        .send()
        .await?;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    // Cleanup
    let resp = client
        .delete(format!("{}/api/posts/{}", server.base_url, uuid))
        .bearer_auth(&owner_token)
        .send()
        .await?;
    assert_eq!(resp.status(), StatusCode::OK);

    Ok(())
}

#[tokio::test]
async fn test_my_posts_scope() -> Result<()> {
    let server = common::ensure_server().await?;
    if !common::db_available(server).await? {
        eprintln!("skipping: no database configured");
        return Ok(());
    }
    let client = reqwest::Client::new();

    // Requires authentication
    let resp = client
        .get(format!("{}/api/posts/my-posts", server.base_url))
        .send()
        .await?;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let (token, email) = common::register_user(server, "mine").await?;
    create_post(server, &token, "My draft post", None).await?;
    create_post(server, &token, "My published post", Some("PUBLISHED")).await?;

    let resp = client
        .get(format!("{}/api/posts/my-posts", server.base_url))
        .bearer_auth(&token)
        .send()
        .await?;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = resp.json().await?;
    let data = body["data"].as_array().unwrap();

    // Both drafts and published posts, all owned by this user
    assert_eq!(body["meta"]["total"], 2);
    assert!(data.iter().all(|p| p["author"]["email"] == email.as_str()));
    assert!(data.iter().any(|p| p["status"] == "DRAFT"));
    assert!(data.iter().any(|p| p["status"] == "PUBLISHED"));

    Ok(())
}

#[tokio::test]
async fn test_anonymous_status_filter_is_ignored() -> Result<()> {
    let server = common::ensure_server().await?;
    if !common::db_available(server).await? {
        eprintln!("skipping: no database configured");
        return Ok(());
    }
    let client = reqwest::Client::new();

    // Make sure at least one draft exists
    let (token, _) = common::register_user(server, "drafter").await?;
    let draft = create_post(server, &token, "Hidden draft post", None).await?;
    let draft_uuid = draft["uuid"].as_str().unwrap();

    // Asking for drafts without a token still yields only published posts
    let resp = client
        .get(format!("{}/api/posts?status=DRAFT", server.base_url))
        .send()
        .await?;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = resp.json().await?;
    let data = body["data"].as_array().unwrap();
    assert!(data.iter().all(|p| p["status"] == "PUBLISHED"));
    assert!(data.iter().all(|p| p["uuid"] != draft_uuid));

    Ok(())
}

#[tokio::test]
async fn test_tag_set_replacement() -> Result<()> {
    let server = common::ensure_server().await?;
    if !common::db_available(server).await? {
        eprintln!("skipping: no database configured");
        return Ok(());
    }
    let Some(admin) = common::admin_token(server).await? else {
        eprintln!("skipping: no seeded admin account");
        return Ok(());
    };
    let client = reqwest::Client::new();

    // Two tags to shuffle between
    let mut tag_uuids = Vec::new();
    for i in 0..2 {
        let resp = client
            .post(format!("{}/api/tags", server.base_url))
            .bearer_auth(&admin)
            .json(&json!({ "name": format!("s{}{}", i, std::process::id()) }))
            .send()
            .await?;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let body: serde_json::Value = resp.json().await?;
        tag_uuids.push(body["uuid"].as_str().unwrap().to_string());
    }

    // Create with the first tag attached
    let (token, _) = common::register_user(server, "tagger").await?;
    let form = Form::new()
        .text("title", "Tagged post")
        .text("content", "This is long enough to pass content validation.")
        .text("tagUuids", format!("[\"{}\"]", tag_uuids[0]));
    let resp = client
        .post(format!("{}/api/posts", server.base_url))
        .bearer_auth(&token)
        .multipart(form)
        .send()
        .await?;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: serde_json::Value = resp.json().await?;
    let uuid = body["uuid"].as_str().unwrap().to_string();
    let tags = body["tags"].as_array().unwrap();
    assert_eq!(tags.len(), 1);
    assert_eq!(tags[0]["uuid"], tag_uuids[0].as_str());

    // A present tagUuids replaces the whole set
    let form = Form::new().text("tagUuids", format!("[\"{}\"]", tag_uuids[1]));
    let resp = client
        .patch(format!("{}/api/posts/{}", server.base_url, uuid))
        .bearer_auth(&token)
        .multipart(form)
        .send()
        .await?;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = resp.json().await?;
    let tags = body["tags"].as_array().unwrap();
    assert_eq!(tags.len(), 1);
    assert_eq!(tags[0]["uuid"], tag_uuids[1].as_str());

    // An update without tagUuids leaves the set alone
    let form = Form::new().text("title", "Tagged post renamed");
    let resp = client
        .patch(format!("{}/api/posts/{}", server.base_url, uuid))
        .bearer_auth(&token)
        .multipart(form)
        .send()
        .await?;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = resp.json().await?;
    assert_eq!(body["tags"].as_array().unwrap().len(), 1);

    // An empty array clears all tags
    let form = Form::new().text("tagUuids", "[]");
    let resp = client
        .patch(format!("{}/api/posts/{}", server.base_url, uuid))
        .bearer_auth(&token)
        .multipart(form)
        .send()
        .await?;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = resp.json().await?;
    assert!(body["tags"].as_array().unwrap().is_empty());

    // A nonexistent tag is a 404, not a partial write
    let form = Form::new().text(
        "tagUuids",
        "[\"00000000-0000-0000-0000-000000000000\"]",
    );
    let resp = client
        .patch(format!("{}/api/posts/{}", server.base_url, uuid))
        .bearer_auth(&token)
        .multipart(form)
        .send()
        .await?;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    // Cleanup
    client
        .delete(format!("{}/api/posts/{}", server.base_url, uuid))
        .bearer_auth(&token)
        .send()
        .await?;
    for tag in &tag_uuids {
        client
            .delete(format!("{}/api/tags/{}", server.base_url, tag))
            .bearer_auth(&admin)
            .send()
            .await?;
    }

    Ok(())
}

#[tokio::test]
async fn test_pagination_limits() -> Result<()> {
    let server = common::ensure_server().await?;
    if !common::db_available(server).await? {
        eprintln!("skipping: no database configured");
        return Ok(());
    }
    let client = reqwest::Client::new();

    // Zero and negative page/limit values are rejected
    let resp = client
        .get(format!("{}/api/posts/published?page=0", server.base_url))
        .send()
        .await?;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let resp = client
        .get(format!("{}/api/posts/published?limit=0", server.base_url))
        .send()
        .await?;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    // Oversized limits are clamped, not rejected
    let resp = client
        .get(format!("{}/api/posts/published?limit=100000", server.base_url))
        .send()
        .await?;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = resp.json().await?;
    assert!(body["meta"]["limit"].as_i64().unwrap() <= 100);

    Ok(())
}

mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::json;

#[tokio::test]
async fn test_list_is_public() -> Result<()> {
    let server = common::ensure_server().await?;
    if !common::db_available(server).await? {
        eprintln!("skipping: no database configured");
        return Ok(());
    }
    let client = reqwest::Client::new();

    let resp = client
        .get(format!("{}/api/post-categories", server.base_url))
        .send()
        .await?;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: serde_json::Value = resp.json().await?;
    let list = body.as_array().expect("category list is a bare array");
    for category in list {
        assert!(category["uuid"].is_string());
        assert!(category["postCount"].is_number());
        assert!(category["creator"]["name"].is_string());
    }

    Ok(())
}

#[tokio::test]
async fn test_writes_are_admin_only() -> Result<()> {
    let server = common::ensure_server().await?;
    if !common::db_available(server).await? {
        eprintln!("skipping: no database configured");
        return Ok(());
    }
    let client = reqwest::Client::new();

    // No token at all
    let resp = client
        .post(format!("{}/api/post-categories", server.base_url))
        .json(&json!({ "name": "Anonymous" }))
        .send()
        .await?;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    // Regular users are refused
    let (token, _) = common::register_user(server, "cat-user").await?;
    let resp = client
        .post(format!("{}/api/post-categories", server.base_url))
        .bearer_auth(&token)
        .json(&json!({ "name": "User attempt" }))
        .send()
        .await?;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    let body: serde_json::Value = resp.json().await?;
    assert_eq!(body["message"], "Admin role required");

    Ok(())
}

#[tokio::test]
async fn test_admin_category_crud() -> Result<()> {
    let server = common::ensure_server().await?;
    if !common::db_available(server).await? {
        eprintln!("skipping: no database configured");
        return Ok(());
    }
    let Some(token) = common::admin_token(server).await? else {
        eprintln!("skipping: no seeded admin account");
        return Ok(());
    };
    let client = reqwest::Client::new();

    // Create
    let name = format!("Category {}", common::uuid_suffix());
    let resp = client
        .post(format!("{}/api/post-categories", server.base_url))
        .bearer_auth(&token)
        .json(&json!({ "name": name }))
        .send()
        .await?;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: serde_json::Value = resp.json().await?;
    assert_eq!(body["name"], name.as_str());
    assert_eq!(body["status"], "ACTIVE");
    let uuid = body["uuid"].as_str().unwrap().to_string();

    // Duplicate name conflicts
    let resp = client
        .post(format!("{}/api/post-categories", server.base_url))
        .bearer_auth(&token)
        .json(&json!({ "name": name }))
        .send()
        .await?;
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    // Name too short
    let resp = client
        .post(format!("{}/api/post-categories", server.base_url))
        .bearer_auth(&token)
        .json(&json!({ "name": "x" }))
        .send()
        .await?;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    // Show, with and without embedded posts
    let resp = client
        .get(format!("{}/api/post-categories/{}", server.base_url, uuid))
        .send()
        .await?;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = resp.json().await?;
    assert!(body["posts"].is_null());

    let resp = client
        .get(format!("{}/api/post-categories/{}?includePosts=true", server.base_url, uuid))
        .send()
        .await?;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = resp.json().await?;
    assert!(body["posts"].is_array());

    // Rename
    let renamed = format!("{} renamed", name);
    let resp = client
        .patch(format!("{}/api/post-categories/{}", server.base_url, uuid))
        .bearer_auth(&token)
        .json(&json!({ "name": renamed }))
        .send()
        .await?;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = resp.json().await?;
    assert_eq!(body["name"], renamed.as_str());

    // Deactivate
    let resp = client
        .patch(format!("{}/api/post-categories/{}/status", server.base_url, uuid))
        .bearer_auth(&token)
        .json(&json!({ "newStatus": "INACTIVE" }))
        .send()
        .await?;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = resp.json().await?;
    assert_eq!(body["status"], "INACTIVE");

    // Delete
    let resp = client
        .delete(format!("{}/api/post-categories/{}", server.base_url, uuid))
        .bearer_auth(&token)
        .send()
        .await?;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = resp.json().await?;
    assert_eq!(body["message"], "Category deleted successfully");

    let resp = client
        .get(format!("{}/api/post-categories/{}", server.base_url, uuid))
        .send()
        .await?;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    Ok(())
}

mod common;

use anyhow::Result;
use reqwest::StatusCode;

#[tokio::test]
async fn non_numeric_page_is_400() -> Result<()> {
    let server = common::start_server().await?;
    let res = reqwest::get(server.url("/api/fe/contents?page=abc")).await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let body = res.json::<serde_json::Value>().await?;
    assert!(body["field_errors"]["page"].is_string());
    Ok(())
}

#[tokio::test]
async fn unknown_order_column_is_400() -> Result<()> {
    let server = common::start_server().await?;
    let res = reqwest::get(server.url("/api/fe/contents?orderBy=password")).await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn non_numeric_content_id_is_400() -> Result<()> {
    let server = common::start_server().await?;
    let res = reqwest::get(server.url("/api/fe/contents/abc")).await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    Ok(())
}

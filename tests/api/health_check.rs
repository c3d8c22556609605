use chrono::DateTime;

use crate::helpers::spawn_app;

#[tokio::test]
async fn health_check() {
    let app = spawn_app().await;

    let resp = app
        .api_client
        .get(format!("{}/api/health", app.addr))
        .send()
        .await
        .expect("execute request");
    assert_eq!(resp.status().as_u16(), 200);

    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["status"], "OK");
    let timestamp = body["timestamp"].as_str().unwrap();
    assert!(DateTime::parse_from_rfc3339(timestamp).is_ok(), "{timestamp}");
}

#[tokio::test]
async fn security_headers_on_every_response() {
    let app = spawn_app().await;

    for path in ["/", "/api/health"] {
        let resp = app
            .api_client
            .get(format!("{}{path}", app.addr))
            .send()
            .await
            .expect("execute request");
        let headers = resp.headers();
        assert_eq!(headers["X-Content-Type-Options"], "nosniff");
        assert_eq!(headers["X-Frame-Options"], "SAMEORIGIN");
        assert_eq!(headers["Referrer-Policy"], "no-referrer");
        assert!(headers.contains_key("Content-Security-Policy"));
    }
}

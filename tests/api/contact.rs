use serde_json::json;
use serde_json::Value;
use wiremock::matchers::any;
use wiremock::matchers::body_partial_json;
use wiremock::matchers::method;
use wiremock::matchers::path;
use wiremock::Mock;
use wiremock::ResponseTemplate;

use crate::helpers::ana;
use crate::helpers::spawn_app;
use crate::helpers::spawn_app_with;

#[tokio::test]
async fn valid_application_relayed_as_two_emails() {
    let app = spawn_app().await;

    Mock::given(path("/email"))
        .and(method("POST"))
        .and(body_partial_json(json!({
            "To": "hello@secondchance.vc",
            "ReplyTo": "ana@example.com",
            "Subject": "New Application: Ana Gomez",
        })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&app.email_server)
        .await;
    Mock::given(path("/email"))
        .and(method("POST"))
        .and(body_partial_json(json!({
            "To": "ana@example.com",
            "Subject": "Application Received - Second Chance VC",
        })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&app.email_server)
        .await;

    let resp = app.post_contact(&ana()).await;
    assert_eq!(resp.status().as_u16(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(
        body,
        json!({ "success": true, "message": "Application submitted successfully!" })
    );

    let sent = app.email_server.received_requests().await.unwrap();
    assert_eq!(sent.len(), 2);
    let notification: Value = serde_json::from_slice(&sent[0].body).unwrap();
    let confirmation: Value = serde_json::from_slice(&sent[1].body).unwrap();

    // operator first, with every field
    assert_eq!(notification["To"], "hello@secondchance.vc");
    let text = notification["TextBody"].as_str().unwrap();
    for field in ["Ana Gomez", "ana@example.com", "https://linkedin.com/in/anagomez", "Acme"] {
        assert!(text.contains(field), "{field}");
    }
    assert!(text.contains("I have ten years of experience."));

    assert!(confirmation.get("ReplyTo").is_none());
    assert!(confirmation["TextBody"]
        .as_str()
        .unwrap()
        .contains("Dear Ana Gomez,"));
}

#[tokio::test]
async fn every_violated_field_reported() {
    let app = spawn_app().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app.email_server)
        .await;

    let resp = app
        .post_contact(&json!({
            "name": "A",
            "email": "not-an-email",
            "linkedin": "http://linkedin.com/company/x",
            "company": "",
            "message": "short",
        }))
        .await;
    assert_eq!(resp.status().as_u16(), 400);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Validation failed");
    let fields: Vec<&str> = body["errors"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["field"].as_str().unwrap())
        .collect();
    assert_eq!(fields, ["name", "email", "linkedin", "company", "message"]);
}

#[tokio::test]
async fn invalid_applications_rejected() {
    let app = spawn_app().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app.email_server)
        .await;

    let with = |key: &str, value: &str| {
        let mut body = ana();
        body[key] = json!(value);
        body
    };
    let cases = [
        (with("company", ""), "company", "Company name is required"),
        (with("email", "ana@"), "email", "Valid email is required"),
        (
            with("linkedin", "http://linkedin.com/company/x"),
            "linkedin",
            "Valid LinkedIn URL is required",
        ),
        (
            with("message", "too short"),
            "message",
            "Message must be between 10 and 2000 characters",
        ),
    ];

    for (body, field, message) in cases {
        let resp = app.post_contact(&body).await;
        assert_eq!(resp.status().as_u16(), 400, "{field}");
        let body: Value = resp.json().await.unwrap();
        assert_eq!(body["errors"], json!([{ "field": field, "message": message }]));
    }
}

#[tokio::test]
async fn missing_key_is_a_missing_field() {
    let app = spawn_app().await;

    let mut body = ana();
    body.as_object_mut().unwrap().remove("linkedin");
    let resp = app.post_contact(&body).await;
    assert_eq!(resp.status().as_u16(), 400);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["errors"][0]["field"], "linkedin");
}

#[tokio::test]
async fn null_field_is_a_missing_field() {
    let app = spawn_app().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app.email_server)
        .await;

    let mut body = ana();
    body["linkedin"] = Value::Null;
    body["company"] = json!(7);
    let resp = app.post_contact(&body).await;
    assert_eq!(resp.status().as_u16(), 400);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(
        body["errors"],
        json!([
            { "field": "linkedin", "message": "LinkedIn URL is required" },
            { "field": "company", "message": "Company name must be between 2 and 200 characters" },
        ])
    );
}

#[tokio::test]
async fn malformed_json_rejected() {
    let app = spawn_app().await;

    let resp = app
        .api_client
        .post(format!("{}/api/contact", app.addr))
        .header("Content-Type", "application/json")
        .body("{\"name\": ")
        .send()
        .await
        .expect("execute request");
    assert_eq!(resp.status().as_u16(), 400);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(
        body,
        json!({ "success": false, "message": "Validation failed", "errors": [] })
    );
}

#[tokio::test]
async fn provider_failure_is_a_500() {
    let app = spawn_app().await;

    // the confirmation is never attempted
    Mock::given(any())
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&app.email_server)
        .await;

    let resp = app.post_contact(&ana()).await;
    assert_eq!(resp.status().as_u16(), 500);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(
        body,
        json!({
            "success": false,
            "message": "Failed to send application. Please try again later.",
        })
    );
}

#[tokio::test]
async fn sixth_request_in_window_rate_limited() {
    let app = spawn_app().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .mount(&app.email_server)
        .await;

    // rejected requests count too
    for _ in 0..4 {
        let resp = app.post_contact(&json!({})).await;
        assert_eq!(resp.status().as_u16(), 400);
    }
    assert_eq!(app.post_contact(&ana()).await.status().as_u16(), 200);

    let resp = app.post_contact(&ana()).await;
    assert_eq!(resp.status().as_u16(), 429);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(
        body,
        json!({ "error": "Too many requests from this IP, please try again later." })
    );
    // only the one accepted application was relayed
    assert_eq!(app.email_server.received_requests().await.unwrap().len(), 2);
}

#[tokio::test]
async fn limit_is_configurable() {
    let app = spawn_app_with(|cfg| cfg.rate_limit.max_requests = 1).await;

    assert_eq!(app.post_contact(&json!({})).await.status().as_u16(), 400);
    assert_eq!(app.post_contact(&json!({})).await.status().as_u16(), 429);
}

use reqwest::{Method, StatusCode};
use serde_json::json;
use wiremock::{
    matchers::{any, body_partial_json, method, path},
    Mock, ResponseTemplate,
};

use launch_notifier::domain::Language;

use crate::helpers::{App, DOWNLOAD_URL, SENDER};

fn three_subscribers() -> serde_json::Value {
    json!([
        { "email": "a@x.com", "language": "es" },
        { "email": "b@x.com", "language": "en" },
        { "email": "c@x.com" },
    ])
}

#[tokio::test]
async fn notifications_are_sent_in_each_subscribers_language() {
    let app = App::new().await;

    Mock::given(path("/emails"))
        .and(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(3)
        .mount(&app.email_server)
        .await;

    let response = app.post_notification(&app.signed(three_subscribers())).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(
        body,
        json!({
            "success": true,
            "message": "Notifications sent successfully",
            "stats": { "total": 3, "successful": 3, "failed": 0 },
        })
    );

    let mut sent = app.sent_emails().await;
    sent.sort_by_key(|email| email["to"].as_str().unwrap().to_owned());
    let subjects: Vec<_> = sent.iter().map(|email| email["subject"].clone()).collect();
    assert_eq!(
        subjects,
        vec![
            json!(Language::Es.template().subject),
            json!(Language::En.template().subject),
            json!(Language::Es.template().subject),
        ]
    );
    for email in &sent {
        assert_eq!(email["from"], SENDER);
        assert!(email["html"].as_str().unwrap().contains(DOWNLOAD_URL));
    }
}

#[tokio::test]
async fn a_rejected_email_is_counted_as_failed() {
    let app = App::new().await;

    Mock::given(body_partial_json(json!({ "to": "b@x.com" })))
        .respond_with(ResponseTemplate::new(422))
        .expect(1)
        .mount(&app.email_server)
        .await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(2)
        .mount(&app.email_server)
        .await;

    let response = app.post_notification(&app.signed(three_subscribers())).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["success"], true);
    assert_eq!(
        body["stats"],
        json!({ "total": 3, "successful": 2, "failed": 1 })
    );
}

#[tokio::test]
async fn a_provider_outage_still_reports_success_for_the_batch() {
    let app = App::new().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(503))
        .expect(3)
        .mount(&app.email_server)
        .await;

    let response = app.post_notification(&app.signed(three_subscribers())).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(
        body["stats"],
        json!({ "total": 3, "successful": 0, "failed": 3 })
    );
}

#[tokio::test]
async fn requests_with_a_wrong_secret_are_rejected() {
    let app = App::new().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app.email_server)
        .await;

    let cases = [
        json!({ "secret": "not-the-secret", "subscribers": three_subscribers() }),
        json!({ "subscribers": three_subscribers() }),
        json!({ "secret": 42, "subscribers": three_subscribers() }),
    ];

    for case in cases {
        let response = app.post_notification(&case).await;

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body: serde_json::Value = response.json().await.unwrap();
        assert_eq!(body, json!({ "error": "Unauthorized" }));
    }
}

#[tokio::test]
async fn bodies_that_are_not_json_are_rejected_as_unauthorized() {
    let app = App::new().await;

    let response = app
        .build_request(Method::POST, "/api/send-notification")
        .header("Content-Type", "text/plain")
        .body("secret=whatever")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn requests_without_subscribers_are_rejected() {
    let app = App::new().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app.email_server)
        .await;

    let cases = [
        (json!({ "secret": app.secret }), "missing subscribers"),
        (app.signed(json!([])), "empty subscribers"),
        (app.signed(json!({ "email": "a@x.com" })), "subscribers is an object"),
        (app.signed(json!("a@x.com")), "subscribers is a string"),
    ];

    for (case, problem) in cases {
        let response = app.post_notification(&case).await;

        assert_eq!(
            response.status(),
            StatusCode::BAD_REQUEST,
            "did not get 400 Bad Request when {}",
            problem
        );
        let body: serde_json::Value = response.json().await.unwrap();
        assert_eq!(body, json!({ "error": "Subscribers array is required" }));
    }
}

#[tokio::test]
async fn other_methods_are_not_allowed() {
    let app = App::new().await;

    for method in [Method::GET, Method::PUT, Method::DELETE] {
        let response = app
            .build_request(method.clone(), "/api/send-notification")
            .send()
            .await
            .expect("Failed to execute request");

        assert_eq!(
            response.status(),
            StatusCode::METHOD_NOT_ALLOWED,
            "{} was not rejected",
            method
        );
        let body: serde_json::Value = response.json().await.unwrap();
        assert_eq!(body, json!({ "error": "Method not allowed" }));
    }
}

#[tokio::test]
async fn stats_always_add_up_to_the_number_of_subscribers() {
    let app = App::new().await;

    Mock::given(body_partial_json(json!({ "subject": Language::En.template().subject })))
        .respond_with(ResponseTemplate::new(500))
        .mount(&app.email_server)
        .await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .mount(&app.email_server)
        .await;

    let subscribers: Vec<_> = (0..12)
        .map(|i| {
            let language = ["es", "en", "pt", "fr"][i % 4];
            json!({ "email": format!("subscriber{}@x.com", i), "language": language })
        })
        .chain(std::iter::once(json!({ "email": "broken" })))
        .collect();

    let response = app.post_notification(&app.signed(json!(subscribers))).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(
        body["stats"],
        json!({ "total": 13, "successful": 9, "failed": 4 })
    );
}

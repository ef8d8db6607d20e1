//! `HttpClassifier` against a mock model server.

use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{body_bytes, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use pricelens_pipeline::{Classifier, ClassifierError, HttpClassifier, ProductImage};

const PNG_MAGIC: [u8; 4] = [0x89, 0x50, 0x4e, 0x47];

fn image() -> ProductImage {
    ProductImage::new("shoe.png", PNG_MAGIC.to_vec(), 1024).unwrap()
}

fn classifier(server: &MockServer) -> HttpClassifier {
    HttpClassifier::new(&format!("{}/predict", server.uri()), Duration::from_secs(5))
        .expect("classifier")
}

#[tokio::test]
async fn posts_raw_bytes_and_returns_top_label() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/predict"))
        .and(header("content-type", "application/octet-stream"))
        .and(body_bytes(PNG_MAGIC.to_vec()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"label": "sandal", "score": 0.12},
            {"label": "running_shoe", "score": 0.81},
            {"label": "clog", "score": 0.07}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let label = classifier(&server).classify(&image()).await.unwrap();
    assert_eq!(label, "running_shoe");
}

#[tokio::test]
async fn empty_prediction_list_is_an_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/predict"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let result = classifier(&server).classify(&image()).await;
    assert!(matches!(result, Err(ClassifierError::NoPredictions)));
}

#[tokio::test]
async fn rejected_image_surfaces_status() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/predict"))
        .respond_with(ResponseTemplate::new(422).set_body_string("cannot decode image"))
        .mount(&server)
        .await;

    let result = classifier(&server).classify(&image()).await;
    assert!(matches!(
        result,
        Err(ClassifierError::UnexpectedStatus { status: 422 })
    ));
}

#[tokio::test]
async fn malformed_response_is_an_http_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/predict"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let result = classifier(&server).classify(&image()).await;
    assert!(matches!(result, Err(ClassifierError::Http(_))));
}

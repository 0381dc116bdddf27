//! End-to-end pipeline runs against a mock catalog service.

use std::sync::Arc;
use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use sizerun_scraper::{
    run_pipeline, HttpTransport, PipelineContext, PipelineSettings, RetryPolicy,
};

const GOOD_LINK: &str = "https://www.goat.com/sneakers/air-jordan-1-retro-high-og-chicago";
const SLOW_LINK: &str = "https://www.goat.com/sneakers/slow-sneaker";

fn context_for(server: &MockServer, request_timeout: Duration) -> Arc<PipelineContext> {
    let transport =
        Arc::new(HttpTransport::new("sizerun-test/0.1").expect("failed to build transport"));
    let settings = PipelineSettings {
        product_url: format!("{}/product", server.uri()),
        prices_url: format!("{}/prices", server.uri()),
        api_key: "test-key".to_owned(),
        request_timeout,
        retry: RetryPolicy {
            max_attempts: 3,
            delay: Duration::ZERO,
        },
        max_concurrent_jobs: 2,
    };
    Arc::new(PipelineContext::new(transport, settings).expect("valid settings"))
}

fn product_body() -> serde_json::Value {
    json!({
        "id": 206_556,
        "sku": "555088-101",
        "name": "Air Jordan 1 Retro High OG 'Chicago'",
        "upperMaterial": "Leather",
        "brandName": "Air Jordan",
        "category": ["Lifestyle"],
        "singleGender": "men",
        "localizedSpecialDisplayPriceCents": { "currency": "USD", "amount": 16000 },
        "story": "Story text",
        "details": "White/Black-Varsity Red",
        "silhouette": "Air Jordan 1",
        "productType": "sneakers",
        "color": "White",
        "releaseDate": "2015-05-30T23:59:59.999Z",
        "productTemplateExternalPictures": [
            { "mainPictureUrl": "https://img.example/a.jpg" },
            { "mainPictureUrl": "https://img.example/b.jpg" },
            { "mainPictureUrl": "https://img.example/c.jpg" }
        ]
    })
}

fn prices_body() -> serde_json::Value {
    json!([
        {
            "sizeOption": { "presentation": "9", "value": 9.0 },
            "lastSoldPriceCents": { "currency": "USD", "amount": 1999 },
            "lowestPriceCents": { "currency": "USD" }
        },
        {
            "sizeOption": { "presentation": "10", "value": 10.0 },
            "lastSoldPriceCents": { "currency": "USD", "amount": 0 },
            "lowestPriceCents": { "currency": "USD", "amount": 25000 }
        },
        {
            "sizeOption": { "presentation": "9", "value": 9.0 },
            "lastSoldPriceCents": { "currency": "USD", "amount": 5000 },
            "lowestPriceCents": { "currency": "USD", "amount": 4000 }
        }
    ])
}

#[tokio::test]
async fn enriches_good_product_and_skips_timed_out_one() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/product"))
        .and(query_param("query", GOOD_LINK))
        .and(header("x-api-key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(product_body()))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/prices"))
        .and(query_param("query", "206556"))
        .and(header("x-api-key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(prices_body()))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/product"))
        .and(query_param("query", SLOW_LINK))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(product_body())
                .set_delay(Duration::from_millis(500)),
        )
        .expect(3)
        .mount(&server)
        .await;

    let ctx = context_for(&server, Duration::from_millis(150));
    let report = run_pipeline(ctx, vec![GOOD_LINK.to_owned(), SLOW_LINK.to_owned()]).await;

    assert_eq!(report.records.len(), 2, "two distinct sizes expected");
    assert_eq!(report.summary.enriched, 1);
    assert_eq!(report.summary.skipped, 1);
    assert_eq!(report.summary.failed, 0);

    let first = &report.records[0];
    assert_eq!(first.id, "206556");
    assert_eq!(first.sku, "555088-101");
    assert_eq!(first.size, "9");
    assert_eq!(first.price.to_string(), "19.99");
    assert_eq!(first.old_price.to_string(), "19.99");
    assert_eq!(first.release_date, "30.05.2015");
    assert_eq!(
        first.photos.as_deref(),
        Some("https://img.example/c.jpg; https://img.example/a.jpg")
    );

    let second = &report.records[1];
    assert_eq!(second.sku, "555088-101-1");
    assert_eq!(second.size, "10");
    assert!(second.price.is_zero());
    assert_eq!(second.old_price.to_string(), "250.00");
    assert_eq!(second.availability, "Немає в наявності");
    assert_eq!(second.display, "Нет");
}

#[tokio::test]
async fn rejected_prices_leave_product_without_records() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/product"))
        .respond_with(ResponseTemplate::new(200).set_body_json(product_body()))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/prices"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({ "message": "not found" })))
        .expect(1)
        .mount(&server)
        .await;

    let ctx = context_for(&server, Duration::from_secs(5));
    let report = run_pipeline(ctx, vec![GOOD_LINK.to_owned()]).await;

    assert!(report.records.is_empty());
    assert_eq!(report.summary.no_prices, 1);
}

use rust_decimal::Decimal;
use std::io::Write;
use std::time::Duration;
use wishlist_autofill::config::DEFAULT_USER_AGENT;
use wishlist_autofill::{AutofillConfig, MetadataExtractor, OgImage};

fn product_page(head: &str, body: &str) -> String {
    format!(
        r#"
        <!DOCTYPE html>
        <html>
        <head>
            <title>Product Page</title>
            {head}
        </head>
        <body>
            {body}
        </body>
        </html>
        "#
    )
}

fn extractor(timeout_ms: u64) -> MetadataExtractor {
    let config = AutofillConfig {
        timeout_ms,
        ..Default::default()
    };
    MetadataExtractor::new(&config).unwrap()
}

#[tokio::test]
async fn test_extracts_price_and_open_graph() {
    let mut server = mockito::Server::new_async().await;
    let html = product_page(
        r#"
        <meta property="og:title" content="Bluetooth Speaker">
        <meta property="og:image" content="https://cdn.example/speaker.jpg">
        <meta property="og:image:width" content="600">
        "#,
        "<p>Price: ₱1,234.56 today</p><p>Was ₱2,000.00</p>",
    );

    let m = server
        .mock("GET", "/products/speaker")
        .match_header("user-agent", DEFAULT_USER_AGENT)
        .with_status(200)
        .with_header("content-type", "text/html; charset=utf-8")
        .with_body(html)
        .create_async()
        .await;

    let url = format!("{}/products/speaker", server.url());
    let result = extractor(5000).extract(&url).await;
    m.assert_async().await;

    assert!(result.success);
    assert_eq!(result.url, url);
    assert_eq!(result.price_raw.as_deref(), Some("₱1,234.56"));
    assert_eq!(result.price_number, Some(Decimal::new(123_456, 2)));
    assert!(result.html.as_deref().is_some_and(|h| h.contains("Bluetooth Speaker")));

    let og = result.og.expect("open graph data");
    assert_eq!(og.title.as_deref(), Some("Bluetooth Speaker"));
    match og.image {
        Some(OgImage::Object(image)) => {
            assert_eq!(image.url, "https://cdn.example/speaker.jpg");
            assert_eq!(image.width, Some(600));
        }
        other => panic!("expected an image object, got {other:?}"),
    }
}

#[tokio::test]
async fn test_page_without_price_is_still_a_success() {
    let mut server = mockito::Server::new_async().await;
    let _m = server
        .mock("GET", "/no-price")
        .with_status(200)
        .with_header("content-type", "text/html")
        .with_body(product_page("", "<p>Only $19.99 in other currencies</p>"))
        .create_async()
        .await;

    let result = extractor(5000)
        .extract(&format!("{}/no-price", server.url()))
        .await;

    assert!(result.success);
    assert!(result.error.is_none());
    assert_eq!(result.price_raw, None);
    assert_eq!(result.price_number, None);
    // the <title> fallback still gives a name
    assert_eq!(
        result.og.and_then(|og| og.title).as_deref(),
        Some("Product Page")
    );
}

#[tokio::test]
async fn test_error_status_is_a_failure() {
    let mut server = mockito::Server::new_async().await;
    let _m = server
        .mock("GET", "/blocked")
        .with_status(403)
        .with_body(product_page("", "₱999"))
        .create_async()
        .await;

    let result = extractor(5000)
        .extract(&format!("{}/blocked", server.url()))
        .await;

    assert!(!result.success);
    assert!(result.error.as_deref().is_some_and(|e| e.contains("403")));
    assert!(result.html.is_none());
    assert!(result.og.is_none());
    assert!(result.price_raw.is_none());
    assert!(result.price_number.is_none());
}

#[tokio::test]
async fn test_timeout_is_a_failure() {
    let mut server = mockito::Server::new_async().await;
    let _m = server
        .mock("GET", "/slow")
        .with_status(200)
        .with_chunked_body(|w| {
            std::thread::sleep(Duration::from_millis(1500));
            w.write_all("<html>too late ₱100</html>".as_bytes())
        })
        .create_async()
        .await;

    let result = extractor(200)
        .extract(&format!("{}/slow", server.url()))
        .await;

    assert!(!result.success);
    assert!(result.error.as_deref().is_some_and(|e| !e.is_empty()));
    assert!(result.html.is_none());
    assert!(result.price_number.is_none());
}

#[tokio::test]
async fn test_unreachable_host_is_a_failure() {
    // grab a free port, then close it so nothing is listening
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    let result = extractor(2000)
        .extract(&format!("http://127.0.0.1:{port}/item"))
        .await;

    assert!(!result.success);
    assert!(result.error.is_some_and(|e| !e.is_empty()));
    assert!(result.og.is_none());
}

#[tokio::test]
async fn test_malformed_url_is_a_failure() {
    let result = extractor(2000).extract("not a url").await;
    assert!(!result.success);
    assert!(result
        .error
        .as_deref()
        .is_some_and(|e| e.starts_with("Invalid URL")));
}

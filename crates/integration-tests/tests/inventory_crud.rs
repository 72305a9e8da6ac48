//! Integration tests for product CRUD and the live panel.
//!
//! These tests require:
//! - A running `PostgreSQL` database with migrations applied
//! - The server running (cargo run -p inventory-hub-server)
//!
//! Run with: cargo test -p inventory-hub-integration-tests -- --ignored

use reqwest::{Client, StatusCode};

use inventory_hub_integration_tests::{base_url, cookie_client, sign_up};

/// Create a product via the form endpoint; returns the unique name used.
async fn create_product(client: &Client, price: &str, quantity: &str) -> String {
    let name = format!("Widget {}", uuid::Uuid::new_v4());
    let resp = client
        .post(format!("{}/products", base_url()))
        .form(&[
            ("name", name.as_str()),
            ("price", price),
            ("quantity", quantity),
            ("category", "Electronics"),
        ])
        .send()
        .await
        .expect("Failed to create product");

    assert_eq!(resp.status(), StatusCode::OK);
    name
}

/// Fetch the panel fragment, optionally filtered.
async fn panel(client: &Client, search: &str) -> String {
    client
        .get(format!("{}/products/panel", base_url()))
        .query(&[("search", search)])
        .send()
        .await
        .expect("Failed to fetch panel")
        .text()
        .await
        .expect("Failed to read panel")
}

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn test_create_appears_in_panel() {
    let client = cookie_client();
    sign_up(&client).await;

    let name = create_product(&client, "9.99", "5").await;
    let body = panel(&client, &name).await;

    assert!(body.contains(&name));
    assert!(body.contains("Products (1)"));
}

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn test_invalid_price_blocks_create() {
    let client = cookie_client();
    sign_up(&client).await;

    let resp = client
        .post(format!("{}/products", base_url()))
        .form(&[
            ("name", "Zero Priced"),
            ("price", "0"),
            ("quantity", "5"),
            ("category", "Electronics"),
        ])
        .send()
        .await
        .expect("Failed to submit form");

    // The modal re-renders with the field error; nothing was created
    let body = resp.text().await.expect("Failed to read body");
    assert!(body.contains("Price must be greater than 0"));

    let list = panel(&client, "Zero Priced").await;
    assert!(list.contains("No products found"));
}

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn test_search_is_case_insensitive() {
    let client = cookie_client();
    sign_up(&client).await;

    let name = create_product(&client, "9.99", "5").await;
    let needle = name.to_uppercase();

    let body = panel(&client, &needle).await;
    assert!(body.contains(&name));
}

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn test_edit_form_is_prefilled() {
    let client = cookie_client();
    sign_up(&client).await;

    let name = create_product(&client, "19.50", "3").await;

    // Find the product's edit URL in the panel markup
    let body = panel(&client, &name).await;
    let edit_path = body
        .split('"')
        .find(|s| s.starts_with("/products/") && s.ends_with("/edit"))
        .expect("Edit link not found")
        .to_string();

    let form = client
        .get(format!("{}{edit_path}", base_url()))
        .send()
        .await
        .expect("Failed to fetch edit form")
        .text()
        .await
        .expect("Failed to read edit form");

    assert!(form.contains("Edit Product"));
    assert!(form.contains(&name));
    assert!(form.contains("19.50"));
}

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn test_delete_removes_from_panel() {
    let client = cookie_client();
    sign_up(&client).await;

    let name = create_product(&client, "9.99", "5").await;

    let body = panel(&client, &name).await;
    let delete_path = body
        .split('"')
        .find(|s| {
            s.starts_with("/products/") && !s.ends_with("/edit") && !s.ends_with("/panel")
        })
        .expect("Delete link not found")
        .to_string();

    let resp = client
        .delete(format!("{}{delete_path}", base_url()))
        .send()
        .await
        .expect("Failed to delete product");
    assert_eq!(resp.status(), StatusCode::OK);

    let body = panel(&client, &name).await;
    assert!(body.contains("No products found"));
}

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn test_concurrent_updates_last_write_wins() {
    let client = cookie_client();
    sign_up(&client).await;

    let name = create_product(&client, "9.99", "5").await;
    let body = panel(&client, &name).await;
    let edit_path = body
        .split('"')
        .find(|s| s.starts_with("/products/") && s.ends_with("/edit"))
        .expect("Edit link not found")
        .to_string();
    let update_path = edit_path.trim_end_matches("/edit").to_string();

    // Two racing full-replacement updates; whichever the store applies last
    // is the canonical state
    let first = client.post(format!("{}{update_path}", base_url())).form(&[
        ("name", name.as_str()),
        ("price", "9.99"),
        ("quantity", "1"),
        ("category", "Electronics"),
    ]);
    let second = client.post(format!("{}{update_path}", base_url())).form(&[
        ("name", name.as_str()),
        ("price", "9.99"),
        ("quantity", "2"),
        ("category", "Electronics"),
    ]);

    let (a, b) = tokio::join!(first.send(), second.send());
    assert!(a.expect("first update failed").status().is_success());
    assert!(b.expect("second update failed").status().is_success());

    let body = panel(&client, &name).await;
    // One of the two quantities survived wholesale
    assert!(body.contains(">1<") || body.contains(">2<"));
}

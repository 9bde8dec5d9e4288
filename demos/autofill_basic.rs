//! Basic usage of the auto-fill API
//!
//! This example demonstrates:
//! 1. The one-call convenience function with default configuration
//! 2. A configured `ItemAutofill` filling an item draft
//! 3. Converting the stored price back for display

use std::time::Duration;
use wishlist_autofill::{autofill_item, display_price, AutofillOutcome, ItemAutofill, ItemDraft};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    println!("=== Convenience function ===");
    let outcome = autofill_item("https://shopee.ph/Wireless-Mouse-i.123456.789").await;
    match &outcome {
        AutofillOutcome::ManualEntry { storefront, candidates } => {
            println!("{} needs manual entry", storefront);
            println!("Suggested name: {:?}", candidates.name);
        }
        other => println!("{:?}", other),
    }
    if let Some(notice) = outcome.notice() {
        println!("Notice: {}", notice.message());
    }

    println!("\n=== Builder ===");
    let autofill = ItemAutofill::builder()
        .timeout(Duration::from_secs(3))
        .manual_entry_host("shopee.sg")
        .build()?;

    let mut draft = ItemDraft::default();
    let outcome = autofill
        .fill_draft(&mut draft, "https://www.lazada.com.ph/products/example.html")
        .await;

    println!("Name:  {}", draft.display_name());
    println!("Price: {}", display_price(draft.price, "N/A"));
    println!("Image: {}", draft.image_url.as_deref().unwrap_or("none"));
    if let Some(notice) = outcome.notice() {
        println!("Notice: {}", notice.message());
    }

    Ok(())
}

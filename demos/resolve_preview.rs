//! Example: resolve and display a link preview for example.com

use link_preview::PreviewResult;

#[tokio::main]
async fn main() {
    let url = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "https://example.com".to_string());

    println!("Resolving: {}\n", url);

    let preview = PreviewResult::resolve(&url).await;

    if preview.valid {
        println!("Title:       {:?}", preview.title);
        println!("Description: {:?}", preview.description);
        println!("Image:       {:?}", preview.image);
        println!("Favicon:     {:?}", preview.favicon);
    } else {
        // Failure reasons are part of the result, not an error path
        println!(
            "Preview failed: {}: {}",
            preview.title.unwrap_or_default(),
            preview.description.unwrap_or_default()
        );
    }
}

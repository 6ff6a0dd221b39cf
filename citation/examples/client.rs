use reqwest::Client;
use serde_json::json;
use std::env;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let client = Client::new();
    let base_url = env::var("CITATION_URL").unwrap_or_else(|_| "http://127.0.0.1:8000".to_string());
    let api_key = env::var("API_KEY").unwrap_or_default();

    println!("📚 Testing Citation Service Client");

    println!("\n✈️  Pre-flight:");
    let preflight = client
        .request(reqwest::Method::OPTIONS, format!("{}/generate-citation", base_url))
        .header("Origin", "chrome-extension://abcdefghijklmnop")
        .send()
        .await?;
    println!("Status: {}", preflight.status());
    for (name, value) in preflight.headers() {
        if name.as_str().starts_with("access-control-") {
            println!("  {}: {}", name, value.to_str().unwrap_or("<binary>"));
        }
    }

    println!("\n📝 Citation:");
    let citation = json!({
        "url": "https://www.ncbi.nlm.nih.gov/pmc/articles/PMC7231022/",
        "type": "journal",
        "dateVisited": "2024-05-05",
        "authors": "Dan M Livovsky, Teorora Pribic, Fernando Azpiroz, ",
        "publicationDate": "2020/04",
        "citationTitle": "Food, Eating, and the Gastrointestinal Tract",
        "citationJournalTitle": "Nutrients",
        "citationVolume": "12",
        "citationIssue": "4",
        "citationDoi": "10.3390/nu12040986"
    });

    let response = client
        .post(format!("{}/generate-citation", base_url))
        .header("x-api-key", api_key)
        .json(&json!({ "message": citation.to_string() }))
        .send()
        .await?;

    println!("Status: {}", response.status());
    let body: serde_json::Value = response.json().await?;
    println!("Response: {}", serde_json::to_string_pretty(&body)?);

    println!("\n✅ Client test completed!");
    Ok(())
}

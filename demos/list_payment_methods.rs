use std::io;

use boldco::{ApiKey, BoldClient};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let api_key = std::env::var("BOLD_API_KEY").map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "BOLD_API_KEY environment variable is required",
        )
    })?;

    let client = BoldClient::new(ApiKey::new(api_key)?)?;

    let link_methods = client.get_payment_link_methods().await?;
    for (method, limits) in &link_methods.payment_methods {
        println!("link {}: min {}, max {}", method.as_str(), limits.min, limits.max);
    }

    let terminal_methods = client.get_integration_payment_methods().await?;
    for method in terminal_methods.enabled() {
        println!("terminal {}", method.as_str());
    }

    Ok(())
}

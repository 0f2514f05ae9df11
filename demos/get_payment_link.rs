use std::io;

use boldco::{ApiKey, BoldClient, PaymentLinkId};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let api_key = std::env::var("BOLD_API_KEY").map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "BOLD_API_KEY environment variable is required",
        )
    })?;
    let link_id = std::env::var("BOLD_PAYMENT_LINK").map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "BOLD_PAYMENT_LINK environment variable is required (e.g. LNK_XXXXXXXX)",
        )
    })?;

    let client = BoldClient::new(ApiKey::new(api_key)?)?;
    let details = client.get_payment_link(&PaymentLinkId::new(link_id)?).await?;

    println!(
        "id: {}, status: {}, total: {}, transaction_id: {:?}, sandbox: {}",
        details.id,
        details.status.as_str(),
        details.total,
        details.transaction_id.as_option(),
        details.is_sandbox
    );

    Ok(())
}

use std::io;

use boldco::{Amount, ApiKey, BoldClient, CreatePaymentLink, Description, PaymentMethod, Tax};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let api_key = std::env::var("BOLD_API_KEY").map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "BOLD_API_KEY environment variable is required",
        )
    })?;

    let amount = Amount::cop(10000.0).with_tax(Tax::vat(8403.0, 1597.0));
    let request = CreatePaymentLink::close(amount)
        .description(Description::new("Demo payment link")?)
        .payment_methods(vec![PaymentMethod::Pse, PaymentMethod::CreditCard]);

    let client = BoldClient::new(ApiKey::new(api_key)?)?;
    let link = client.create_payment_link(&request).await?;

    println!("payment_link: {}, url: {}", link.payment_link, link.url);

    Ok(())
}

use std::io;

use boldco::{
    Amount, ApiKey, BoldClient, BoldError, CreateIntegrationPayment, Email, PaymentMethod, Tax,
    Terminal,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let api_key = std::env::var("BOLD_API_KEY").map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "BOLD_API_KEY environment variable is required",
        )
    })?;
    let user_email = std::env::var("BOLD_USER_EMAIL").map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "BOLD_USER_EMAIL environment variable is required",
        )
    })?;

    let client = BoldClient::new(ApiKey::new(api_key)?)?;

    let terminals = client.get_bound_terminals().await?;
    let terminal = terminals.terminals().first().ok_or_else(|| {
        io::Error::new(io::ErrorKind::NotFound, "no terminal is bound to this account")
    })?;

    let request = CreateIntegrationPayment::new(
        Amount::cop(11000.0).with_tax(Tax::vat(10000.0, 1000.0)),
        Email::new(user_email)?,
        Terminal::new(&terminal.terminal_model, &terminal.terminal_serial)?,
        format!("demo-{}", std::process::id()),
    )?
    .payment_method(PaymentMethod::Pos);

    match client.create_integration_payment(&request).await {
        Ok(payment) => println!("integration_id: {}", payment.integration_id),
        Err(BoldError::Validation { errors, .. }) => {
            for (field, message) in errors.field_messages() {
                println!("{field}: {message}");
            }
        }
        Err(err) => return Err(err.into()),
    }

    Ok(())
}

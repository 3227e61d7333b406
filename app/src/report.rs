// In app/src/report.rs

use anyhow::{Context, Result};
use app_config::types::EmailSettings;
use core_types::OrderRecord;
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use rust_decimal::Decimal;
use std::fmt::Write;

/// How many of the most recent orders the report lists.
pub const REPORT_ORDER_COUNT: usize = 20;

const SUBJECT: &str = "Daily Trading Bot Report";

/// Renders the last [`REPORT_ORDER_COUNT`] orders as an HTML table, oldest first.
pub fn render_report(orders: &[OrderRecord]) -> String {
    let recent = &orders[orders.len().saturating_sub(REPORT_ORDER_COUNT)..];

    let mut html = String::from(
        "<h2>Daily Trading Summary</h2>\n\
         <table border=\"1\" cellpadding=\"5\" cellspacing=\"0\">\n\
         <tr><th>Symbol</th><th>Type</th><th>Qty</th><th>Price</th><th>Time</th></tr>\n",
    );
    for order in recent {
        // Writing to a String cannot fail.
        let _ = writeln!(
            html,
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
            order.symbol,
            order.side,
            order.quantity,
            price_cell(order.price),
            order.time.format("%Y-%m-%d %H:%M:%S UTC"),
        );
    }
    html.push_str("</table>\n");
    html
}

fn price_cell(price: Option<Decimal>) -> String {
    match price {
        Some(price) => format!("{:.2}", price.round_dp(2)),
        None => "--".to_string(),
    }
}

/// Sends `html` over SMTP from the configured account.
pub async fn send_report(settings: &EmailSettings, html: String) -> Result<()> {
    if settings.username.is_empty() || settings.password.is_empty() {
        anyhow::bail!("Email is not configured. Set APP_EMAIL__USERNAME and APP_EMAIL__PASSWORD.");
    }
    let recipient = settings.recipient.as_deref().unwrap_or(&settings.username);

    let message = Message::builder()
        .from(settings.username.parse().context("Invalid sender address")?)
        .to(recipient.parse().context("Invalid recipient address")?)
        .subject(SUBJECT)
        .header(ContentType::TEXT_HTML)
        .body(html)?;

    let mailer = AsyncSmtpTransport::<Tokio1Executor>::relay(&settings.smtp_host)?
        .credentials(Credentials::new(
            settings.username.clone(),
            settings.password.clone(),
        ))
        .build();
    mailer.send(message).await?;

    tracing::info!(%recipient, "Daily email report sent.");
    Ok(())
}

use anyhow::{bail, Result};
use clap::Parser;
use client_core::{
    config::load_settings, submit_order, HttpOrderClient, OrderForm, PanelTone,
};
use shared::domain::{CustomerField, ItemField};
use tracing_subscriber::EnvFilter;

/// Submits one order from the command line and prints the service's answer.
#[derive(Parser, Debug)]
struct Args {
    /// Order-creation endpoint; overrides ORDER_ENDPOINT.
    #[arg(long)]
    endpoint: Option<String>,
    #[arg(long)]
    name: String,
    #[arg(long)]
    email: String,
    /// Item to order, as ID or ID=QTY. Repeat for more lines.
    #[arg(long = "item", value_name = "ID[=QTY]", required = true, value_parser = parse_item_arg)]
    items: Vec<ItemArg>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct ItemArg {
    id: String,
    quantity: Option<String>,
}

fn parse_item_arg(raw: &str) -> Result<ItemArg, String> {
    let (id, quantity) = match raw.split_once('=') {
        Some((id, quantity)) => (id, Some(quantity.to_string())),
        None => (raw, None),
    };
    if id.trim().is_empty() {
        return Err(format!("item '{raw}' has an empty id"));
    }
    Ok(ItemArg {
        id: id.to_string(),
        quantity,
    })
}

fn build_form(args: &Args) -> OrderForm {
    let mut form = OrderForm::new();
    form.set_customer_field(CustomerField::Name, args.name.as_str());
    form.set_customer_field(CustomerField::Email, args.email.as_str());
    for (index, item) in args.items.iter().enumerate() {
        if index > 0 {
            form.add_item();
        }
        form.set_item_field(index, ItemField::Id, item.id.as_str());
        if let Some(quantity) = &item.quantity {
            form.set_item_field(index, ItemField::Quantity, quantity.as_str());
        }
    }
    form
}

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
    let args = Args::parse();
    let settings = load_settings(args.endpoint.as_deref())?;
    let client = HttpOrderClient::new(settings.order_endpoint);

    let mut form = build_form(&args);
    println!("Submitting order to {}...", client.endpoint());
    submit_order(&mut form, &client).await?;

    let Some(panel) = form.outcome_panel() else {
        bail!("order submission did not settle");
    };
    for line in &panel.lines {
        println!("{line}");
    }
    if panel.tone == PanelTone::Failure {
        bail!("order was not created");
    }
    Ok(())
}

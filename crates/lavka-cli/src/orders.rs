//! Order commands.

use clap::Subcommand;

use lavka_api::StoreClient;
use lavka_cart::CartStore;
use lavka_core::pricing::format_price;
use lavka_orders::{
    build_payload, build_update, resolve_order, resolve_order_totals, OrderForm,
};

#[derive(Debug, Subcommand)]
pub enum OrderCommand {
    /// List orders made with the current key
    List,
    /// Show one order with its resolved line items
    Show { id: i64 },
    /// Create an order from the cart and the given contact details
    Create(OrderFormArgs),
    /// Replace an order's editable fields
    Update {
        id: i64,
        #[command(flatten)]
        form: OrderFormArgs,
    },
    /// Delete an order
    Delete { id: i64 },
}

#[derive(Debug, clap::Args)]
pub struct OrderFormArgs {
    #[arg(long, default_value = "")]
    full_name: String,
    #[arg(long, default_value = "")]
    email: String,
    #[arg(long, default_value = "")]
    phone: String,
    /// Delivery address
    #[arg(long, default_value = "")]
    address: String,
    /// Delivery date, YYYY-MM-DD
    #[arg(long, default_value = "")]
    date: String,
    /// Delivery interval, e.g. 18:00-22:00
    #[arg(long, default_value = "")]
    interval: String,
    #[arg(long, default_value = "")]
    comment: String,
    /// Subscribe to the newsletter
    #[arg(long)]
    subscribe: bool,
}

impl OrderFormArgs {
    fn into_form(self) -> OrderForm {
        OrderForm {
            full_name: self.full_name,
            email: self.email,
            phone: self.phone,
            delivery_address: self.address,
            delivery_date: self.date,
            delivery_interval: self.interval,
            comment: self.comment,
            subscribe: self.subscribe,
        }
    }
}

pub async fn run(
    client: &StoreClient,
    cart: &CartStore,
    command: OrderCommand,
) -> anyhow::Result<()> {
    match command {
        OrderCommand::List => list_orders(client).await,
        OrderCommand::Show { id } => show_order(client, id).await,
        OrderCommand::Create(args) => create_order(client, cart, args).await,
        OrderCommand::Update { id, form } => {
            let update = build_update(&form.into_form())?;
            client.update_order(id, &update).await?;
            println!("order #{id} updated");
            Ok(())
        }
        OrderCommand::Delete { id } => {
            client.delete_order(id).await?;
            println!("order #{id} deleted");
            Ok(())
        }
    }
}

async fn list_orders(client: &StoreClient) -> anyhow::Result<()> {
    let orders = match client.list_orders().await {
        Ok(orders) => orders,
        Err(e) => {
            // Listing fails safe with an empty result.
            tracing::warn!(error = %e, "orders listing failed");
            println!("no orders available: {e}");
            return Ok(());
        }
    };
    if orders.is_empty() {
        println!("no orders yet");
        return Ok(());
    }

    let totals = resolve_order_totals(client, &orders).await;
    for order in &orders {
        println!(
            "#{}\t{}\t{} items\t{}\t{} {}",
            order.id,
            order.created_at.as_deref().unwrap_or("-"),
            order.item_count(),
            format_price(totals.get(&order.id).copied().unwrap_or(0.0)),
            order.delivery_date,
            order.delivery_interval
        );
    }
    Ok(())
}

async fn show_order(client: &StoreClient, id: i64) -> anyhow::Result<()> {
    let order = client.get_order(id).await?;
    let summary = resolve_order(client, &order).await;

    println!("order #{}", order.id);
    if let Some(created) = order.created_at.as_deref() {
        println!("created: {created}");
    }
    println!("name: {}", order.full_name);
    println!("email: {}", order.email);
    println!("phone: {}", order.phone);
    println!("address: {}", order.delivery_address);
    println!("delivery: {} {}", order.delivery_date, order.delivery_interval);
    if let Some(comment) = order.comment.as_deref() {
        if !comment.is_empty() {
            println!("comment: {comment}");
        }
    }

    if summary.lines.is_empty() {
        println!("no line items");
    } else {
        for line in &summary.lines {
            let quantity = if line.quantity > 1 {
                format!(" x{}", line.quantity)
            } else {
                String::new()
            };
            println!(
                "  #{} {}{} — {}",
                line.good_id,
                line.title,
                quantity,
                format_price(line.unit_price)
            );
        }
    }
    if summary.dropped > 0 {
        println!("{} items could not be loaded", summary.dropped);
    }
    println!("total: {}", format_price(summary.total));
    Ok(())
}

async fn create_order(
    client: &StoreClient,
    cart: &CartStore,
    args: OrderFormArgs,
) -> anyhow::Result<()> {
    let ids = cart.ids();
    let payload = build_payload(&args.into_form(), &ids)?;
    let order = client.create_order(&payload).await?;
    cart.clear()?;
    println!("order #{} created; the cart has been emptied", order.id);
    Ok(())
}

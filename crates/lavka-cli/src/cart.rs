//! Cart commands.

use clap::Subcommand;

use lavka_api::StoreClient;
use lavka_cart::CartStore;
use lavka_core::pricing::format_price;
use lavka_orders::{parse_calendar_date, resolve_cart};

#[derive(Debug, Subcommand)]
pub enum CartCommand {
    /// Add a good to the cart
    Add { id: i64 },
    /// Remove a good from the cart
    Remove { id: i64 },
    /// List the cart contents with totals
    List {
        /// Delivery date (YYYY-MM-DD) for the delivery-cost preview
        #[arg(long)]
        date: Option<String>,
        /// Delivery interval, e.g. 18:00-22:00
        #[arg(long, default_value = "")]
        interval: String,
    },
    /// Empty the cart
    Clear,
    /// Print the number of goods in the cart
    Count,
}

pub async fn run(
    client: &StoreClient,
    cart: &CartStore,
    command: CartCommand,
) -> anyhow::Result<()> {
    // The subscription plays the role of the cart badge: it reports the
    // count carried by the store's own change notification.
    let mut events = cart.subscribe();

    match command {
        CartCommand::Add { id } => {
            if cart.contains(id) {
                println!("good #{id} is already in the cart");
                return Ok(());
            }
            cart.add(id)?;
            if let Ok(event) = events.try_recv() {
                println!("added good #{id}; the cart holds {} goods", event.count);
            }
        }
        CartCommand::Remove { id } => {
            cart.remove(id)?;
            if let Ok(event) = events.try_recv() {
                println!("removed good #{id}; the cart holds {} goods", event.count);
            }
        }
        CartCommand::Clear => {
            cart.clear()?;
            println!("the cart has been emptied");
        }
        CartCommand::Count => {
            println!("{}", cart.count());
        }
        CartCommand::List { date, interval } => {
            list_cart(client, cart, date.as_deref(), &interval).await?;
        }
    }
    Ok(())
}

async fn list_cart(
    client: &StoreClient,
    cart: &CartStore,
    date: Option<&str>,
    interval: &str,
) -> anyhow::Result<()> {
    let ids = cart.ids();
    if ids.is_empty() {
        println!("the cart is empty");
        return Ok(());
    }

    let date = match date {
        Some(raw) => Some(
            parse_calendar_date(raw)
                .ok_or_else(|| anyhow::anyhow!("invalid --date \"{raw}\", expected YYYY-MM-DD"))?,
        ),
        None => None,
    };

    let view = resolve_cart(client, &ids).await;
    if view.goods.is_empty() {
        println!("none of the cart goods could be loaded");
        return Ok(());
    }

    for good in &view.goods {
        let price = match good.actual_price() {
            Some(actual) if good.has_discount() => {
                format!("{} (was {})", format_price(good.price), format_price(actual))
            }
            _ => format_price(good.price),
        };
        println!("#{}\t{}\t{}", good.id, good.title, price);
    }
    if view.dropped > 0 {
        println!("{} goods could not be loaded", view.dropped);
    }

    let totals = view.totals(date, interval);
    println!("goods: {}", format_price(totals.goods));
    println!("delivery: {}", format_price(totals.delivery));
    println!("total: {}", format_price(totals.total));
    Ok(())
}

//! Catalog browsing commands.

use lavka_api::{Good, StoreClient};
use lavka_catalog::{CatalogPager, CatalogQuery, SortOrder};
use lavka_core::app_config::AppConfig;
use lavka_core::pricing::format_price;

#[derive(Debug, clap::Args)]
pub struct CatalogArgs {
    /// Free-text search string
    #[arg(long, default_value = "")]
    query: String,
    /// Sort key: rating_asc, rating_desc, price_asc, price_desc
    #[arg(long, default_value = "rating_desc")]
    sort: String,
    /// Number of pages to load
    #[arg(long, default_value_t = 1)]
    pages: u32,
    /// Override the configured page size
    #[arg(long)]
    per_page: Option<u32>,
}

pub async fn run(client: &StoreClient, config: &AppConfig, args: CatalogArgs) -> anyhow::Result<()> {
    let sort: SortOrder = args
        .sort
        .parse()
        .map_err(|e: String| anyhow::anyhow!(e))?;

    let mut pager = CatalogPager::new(args.per_page.unwrap_or(config.page_size));
    pager.reset(CatalogQuery {
        search: args.query,
        sort,
        ..CatalogQuery::default()
    });

    for _ in 0..args.pages.max(1) {
        match pager.load_next(client).await {
            Ok(load) => {
                for good in &load.items {
                    print_good_row(good);
                }
                if !load.has_more {
                    break;
                }
            }
            Err(e) => {
                // Catalog loading fails safe: an empty result, not a crash.
                tracing::warn!(error = %e, "catalog page failed to load");
                println!("no goods available: {e}");
                return Ok(());
            }
        }
    }

    println!(
        "{} of {} goods loaded{}",
        pager.loaded(),
        pager.total(),
        if pager.has_more() {
            " — more available, rerun with a higher --pages"
        } else {
            ""
        }
    );
    Ok(())
}

pub async fn show_good(client: &StoreClient, id: i64) -> anyhow::Result<()> {
    let good = client.get_good(id).await?;
    println!("#{} {}", good.id, good.title);
    if !good.category.is_empty() {
        println!("category: {}", good.category);
    }
    if good.rating > 0.0 {
        println!("rating: {:.1}", good.rating);
    }
    println!("price: {}", price_cell(&good));
    if !good.image.is_empty() {
        println!("image: {}", good.image);
    }
    Ok(())
}

fn print_good_row(good: &Good) {
    println!(
        "#{}\t{}\t{}\t{}",
        good.id,
        good.title,
        good.category,
        price_cell(good)
    );
}

/// Price with the struck-through original when a discount applies.
fn price_cell(good: &Good) -> String {
    match good.actual_price() {
        Some(actual) if good.has_discount() => {
            format!("{} (was {})", format_price(good.price), format_price(actual))
        }
        _ => format_price(good.price),
    }
}

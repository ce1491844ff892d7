use anyhow::Context;
use chrono::Utc;
use listing_rail::config::Config;
use listing_rail::favorites::{Favorites, JsonFileStore};
use listing_rail::sources::{FileListingSource, HttpListingSource, ListingSource, SearchParams};
use listing_rail::{pipeline, FilterCriteria, NormalizedListing, Taxonomy};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cfg = Config::from_env()?;

    let source: Box<dyn ListingSource> = match (&cfg.listings_url, &cfg.listings_file) {
        (Some(url), _) => Box::new(HttpListingSource::with_timeout(url.clone(), cfg.http_timeout)?),
        (None, Some(path)) => Box::new(FileListingSource::new(path.clone())),
        (None, None) => anyhow::bail!("Set LISTINGS_URL or LISTINGS_FILE"),
    };

    info!("Fetching listings from {} source", source.source_name());
    let payload = source
        .fetch(&SearchParams::default())
        .await
        .context("Failed to load listings")?;

    let criteria = FilterCriteria::default().with_keyword(cfg.keyword.clone().unwrap_or_default());
    let ranked = pipeline::run(&payload, &criteria, Taxonomy::builtin(), Utc::now());
    info!(
        "{} listings: {} boosted, {} vip, {} regular",
        ranked.len(),
        ranked.boosted.len(),
        ranked.vip.len(),
        ranked.regular.len()
    );

    let favorites = Favorites::load(&JsonFileStore::new(&cfg.favorites_dir), cfg.viewer_id.as_deref());

    println!("== Featured ==");
    for (i, listing) in ranked.elite_rail().enumerate() {
        print_listing(i + 1, listing, favorites.contains(&listing.id));
    }

    println!("== All ==");
    for (i, listing) in ranked.regular.iter().enumerate() {
        print_listing(i + 1, listing, favorites.contains(&listing.id));
    }

    Ok(())
}

fn print_listing(n: usize, listing: &NormalizedListing, favorite: bool) {
    let star = if favorite { " *" } else { "" };
    println!("{}. {} ({}){}", n, listing.display_name, listing.formatted_price, star);
    println!("   {}", listing.city_label);
    if !listing.services.is_empty() {
        println!("   Services: {}", listing.services.join(", "));
    }
    if !listing.availability.days.is_empty() {
        println!(
            "   {} {}-{}",
            listing.availability.days.join(" "),
            listing.availability.start_time,
            listing.availability.end_time
        );
    }
    println!("   ID: {}", listing.id);
    println!();
}

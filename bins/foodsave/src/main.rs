//! foodsave: search and browse a FoodSave product catalog.

mod output;

use anyhow::Context;
use clap::{Parser, Subcommand};
use foodsave_core::{catalog, config::Config, error::exit_codes};
use foodsave_search::{paginate, BrowseQuery, Product, ProductFilters, SortKey};
use foodsave_telemetry::{TelemetryConfig, Timer};
use output::{format_count, format_duration, print_product, print_store, print_suggestions, Status};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "foodsave")]
#[command(about = "Typo-tolerant search over discounted near-expiry products")]
#[command(version)]
struct Cli {
    /// Product catalog (JSON array)
    #[arg(long, global = true, env = "FOODSAVE_CATALOG", default_value = "products.json")]
    catalog: PathBuf,

    /// Configuration file (defaults to .foodsave.toml and friends)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Log debug events to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search products by name, description and store
    Products {
        /// Search text; empty lists every product
        #[arg(default_value = "")]
        query: String,
        /// Category id ("all" for every category)
        #[arg(long)]
        category: Option<String>,
        /// Lowest discounted price
        #[arg(long)]
        min_price: Option<f64>,
        /// Highest discounted price
        #[arg(long)]
        max_price: Option<f64>,
        /// Show match scores
        #[arg(long)]
        scores: bool,
    },
    /// Search the stores carrying catalog products
    Stores {
        /// Search text
        query: String,
    },
    /// Search, filter, sort and paginate like the browse view
    Browse {
        /// Search text; empty lists every product
        #[arg(default_value = "")]
        query: String,
        /// Category id ("all" for every category)
        #[arg(long)]
        category: Option<String>,
        /// Ordering: distance, discount, expiry or rating
        #[arg(long)]
        sort: Option<SortKey>,
        /// Filters as a JSON object, e.g. '{"isUrgent": true}'
        #[arg(long)]
        filters: Option<String>,
        /// 1-based page number
        #[arg(long, default_value_t = 1)]
        page: usize,
        /// Items per page
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Search-box suggestions for partial input
    Suggest {
        /// Partial search text
        #[arg(default_value = "")]
        query: String,
    },
}

fn main() {
    let cli = Cli::parse();

    if let Err(err) = run(cli) {
        let code = err
            .downcast_ref::<foodsave_core::Error>()
            .map_or(exit_codes::FAILURE, |e| e.code.exit_code());
        Status::error(&format!("{:#}", err));
        std::process::exit(code);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = Config::load(cli.config.as_deref())?;

    let logging = &config.schema.logging;
    let level = if cli.verbose { "debug" } else { logging.level.as_str() };
    foodsave_telemetry::init_with_config(TelemetryConfig::new(level, logging.json))?;

    match cli.command {
        Commands::Suggest { query } => {
            let suggestions = config.schema.suggestions.suggest(&query);
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&suggestions)?);
            } else {
                print_suggestions(&suggestions);
            }
        }

        Commands::Stores { query } => {
            let products = load_catalog(&cli.catalog)?;
            let searcher = config.store_searcher()?;

            let timer = Timer::start("search_stores");
            let stores = searcher.search(&products, &query);
            let elapsed = timer.stop();

            if cli.json {
                println!("{}", serde_json::to_string_pretty(&stores)?);
            } else {
                Status::header(&format!(
                    "{} for {:?} ({})",
                    format_count(stores.len(), "store", "stores"),
                    query,
                    format_duration(elapsed)
                ));
                stores.iter().for_each(print_store);
            }
        }

        Commands::Products {
            query,
            category,
            min_price,
            max_price,
            scores,
        } => {
            let products = load_catalog(&cli.catalog)?;
            let searcher = config.product_searcher()?;

            let timer = Timer::start("search_products");
            let found = searcher.search_advanced(
                &products,
                &query,
                category.as_deref(),
                min_price,
                max_price,
            )
            .map_err(foodsave_core::Error::from)?;
            let elapsed = timer.stop();

            if cli.json {
                println!("{}", serde_json::to_string_pretty(&found)?);
                return Ok(());
            }

            Status::header(&format!(
                "{} for {:?} ({})",
                format_count(found.len(), "product", "products"),
                query,
                format_duration(elapsed)
            ));
            if scores {
                let scored = searcher.search_scored(&products, &query);
                for product in &found {
                    let score = scored
                        .iter()
                        .find(|r| r.item.id == product.id)
                        .map(|r| r.score);
                    print_product(product, score);
                }
            } else {
                found.iter().for_each(|p| print_product(p, None));
            }
        }

        Commands::Browse {
            query,
            category,
            sort,
            filters,
            page,
            limit,
        } => {
            let products = load_catalog(&cli.catalog)?;
            let searcher = config.product_searcher()?;

            let mut browse_query =
                BrowseQuery::new(query).sorted_by(sort.unwrap_or(config.schema.browse.default_sort));
            if let Some(category) = category {
                browse_query = browse_query.with_category(category);
            }
            if let Some(filters) = filters {
                let filters: ProductFilters =
                    serde_json::from_str(&filters).context("Parsing --filters")?;
                browse_query = browse_query.with_filters(filters);
            }

            let timer = Timer::start("browse");
            let results = foodsave_search::browse_with(&searcher, &products, &browse_query)
                .map_err(foodsave_core::Error::from)?;
            let page = paginate(&results, page, limit.unwrap_or(config.schema.browse.page_size))
                .map_err(foodsave_core::Error::from)?;
            let elapsed = timer.stop();

            if cli.json {
                println!("{}", serde_json::to_string_pretty(&page)?);
                return Ok(());
            }

            let p = page.pagination;
            Status::header(&format!(
                "{} by {}, page {}/{} ({})",
                format_count(p.total, "product", "products"),
                browse_query.sort,
                p.page,
                p.total_pages.max(1),
                format_duration(elapsed)
            ));
            if page.data.is_empty() {
                Status::info("Nothing on this page");
            }
            page.data.iter().for_each(|product| print_product(product, None));
        }
    }

    Ok(())
}

fn load_catalog(path: &std::path::Path) -> anyhow::Result<Vec<Product>> {
    let products = catalog::load_products(path)?;
    if products.is_empty() {
        Status::warning(&format!("Catalog {} is empty", path.display()));
    }
    Ok(products)
}

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use log::{info, warn};

use recipe_nutrition::config::{load_config, ScraperConfig};
use recipe_nutrition::crawler::{discover_recipes, RecipeLinkPattern};
use recipe_nutrition::extractors::JsonLdExtractor;
use recipe_nutrition::fetchers::{HtmlCache, RequestFetcher};
use recipe_nutrition::pipelines::{batch, download, search};
use recipe_nutrition::store::SeenStore;
use recipe_nutrition::Normalizer;

#[derive(Parser)]
#[command(name = "recipe-nutrition", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Find recipe ids on listing pages and record them in the seen store
    Discover {
        /// Listing page URLs; defaults to `listing_urls` from the configuration
        urls: Vec<String>,
        /// File with one listing URL per line
        #[arg(long)]
        urls_file: Option<PathBuf>,
    },
    /// Download every recorded recipe page that is not cached yet
    Download,
    /// Parse cached pages into recipes.json and ingredients.json
    Parse {
        /// Stop after this many pages
        #[arg(long)]
        limit: Option<usize>,
        /// Only parse pages mentioning this keyword
        #[arg(long)]
        keyword: Option<String>,
        /// Output directory; defaults to `storage.output_dir`
        #[arg(long, env = "RECIPE_NUTRITION_OUTPUT")]
        output: Option<PathBuf>,
    },
    /// List recorded recipe ids whose cached page mentions a keyword
    Search { keyword: String },
    /// Normalize ingredient lines given on the command line
    Normalize {
        #[arg(required = true)]
        lines: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = load_config()?;

    match cli.command {
        Command::Discover { urls, urls_file } => discover(&config, urls, urls_file).await?,
        Command::Download => {
            let store = SeenStore::open(&config.storage.seen_store).await?;
            let fetcher = RequestFetcher::new(&config.http)?;
            let cache = HtmlCache::new(&config.storage.cache_dir);

            let report = download::run(
                &fetcher,
                &cache,
                &config.site,
                &store.ids(),
                config.http.request_delay(),
            )
            .await?;
            println!(
                "downloaded {} pages, {} already cached",
                report.fetched.len(),
                report.already_cached.len()
            );
        }
        Command::Parse {
            limit,
            keyword,
            output,
        } => {
            let store = SeenStore::open(&config.storage.seen_store).await?;
            let cache = HtmlCache::new(&config.storage.cache_dir);

            let mut ids = store.ids();
            if let Some(keyword) = keyword {
                ids = search::ids_mentioning(&cache, &ids, &keyword).await?;
                info!("{} cached pages mention {:?}", ids.len(), keyword);
            }

            let report = batch::run(&cache, &JsonLdExtractor::default(), &ids, limit).await?;
            let output = output.unwrap_or_else(|| config.storage.output_dir.clone());
            report.write(&output).await?;

            for (product, count) in report.most_common(10) {
                println!("{count:>6}  {product}");
            }
            if !report.failures.is_empty() {
                warn!("{} pages failed to parse", report.failures.len());
            }
        }
        Command::Search { keyword } => {
            let store = SeenStore::open(&config.storage.seen_store).await?;
            let cache = HtmlCache::new(&config.storage.cache_dir);
            let ids = search::ids_mentioning(&cache, &store.ids(), &keyword).await?;
            println!("{}", serde_json::to_string_pretty(&ids)?);
        }
        Command::Normalize { lines } => {
            let normalizer = Normalizer::default();
            for (line, result) in lines.iter().zip(normalizer.normalize_all(&lines)) {
                match result {
                    Ok(ingredient) => println!("{}\t{}", ingredient.value, ingredient.product),
                    Err(e) => eprintln!("{line:?}: {e}"),
                }
            }
        }
    }

    Ok(())
}

async fn discover(
    config: &ScraperConfig,
    mut urls: Vec<String>,
    urls_file: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(path) = urls_file {
        let contents = tokio::fs::read_to_string(&path).await?;
        urls.extend(
            contents
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(str::to_string),
        );
    }
    if urls.is_empty() {
        urls = config.listing_urls.clone();
    }
    if urls.is_empty() {
        return Err("no listing URLs given on the command line or in the configuration".into());
    }

    let fetcher = RequestFetcher::new(&config.http)?;
    let pattern = RecipeLinkPattern::new(&config.site.host)?;
    let mut store = SeenStore::open(&config.storage.seen_store).await?;
    let before = store.len();

    let found = discover_recipes(&fetcher, &pattern, &urls).await;
    for (id, label) in &found {
        store.insert(*id, label.as_str());
    }
    store.save().await?;

    println!(
        "found {} recipe ids, {} new, {} recorded in {}",
        found.len(),
        store.len() - before,
        store.len(),
        store.path().display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_output_falls_back_to_env() {
        std::env::set_var("RECIPE_NUTRITION_OUTPUT", "/tmp/recipe-output");

        let cli = Cli::try_parse_from(["recipe-nutrition", "parse", "--limit", "5"]).unwrap();
        match cli.command {
            Command::Parse { limit, output, .. } => {
                assert_eq!(limit, Some(5));
                assert_eq!(output, Some(PathBuf::from("/tmp/recipe-output")));
            }
            _ => panic!("expected the parse subcommand"),
        }

        let cli =
            Cli::try_parse_from(["recipe-nutrition", "parse", "--output", "out"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Parse { output: Some(ref dir), .. } if dir == &PathBuf::from("out")
        ));
    }
}

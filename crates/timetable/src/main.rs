use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use serde_json::{Map, Value};
use timetable_client::ScientiaClient;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use timetable_sync::cache::ActiveCache;
use timetable_sync::cli::{Cli, Commands};
use timetable_sync::output::format_output;
use timetable_sync::{Config, TimetableResolver};

type Resolver = TimetableResolver<ScientiaClient, ActiveCache>;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.json_logs);

    let mut config = Config::from_env();
    if let Some(base_url) = &cli.base_url {
        config.base_url = base_url.clone();
    }

    let resolver = build_resolver(&config).await?;

    let value = match &cli.command {
        Commands::Categories {
            category_type,
            query,
            limit,
        } => {
            let mut summaries = resolver
                .list_category(*category_type, query.as_deref())
                .await?;
            if let Some(limit) = limit {
                summaries.truncate(*limit);
            }
            serde_json::to_value(summaries)?
        }
        Commands::Resolve {
            category_type,
            codes,
        } => {
            let items = resolver
                .resolve_all(&[(*category_type, codes.clone())])
                .await?
                .into_iter()
                .flat_map(|(_, items)| items)
                .collect::<Vec<_>>();
            serde_json::to_value(items)?
        }
        command @ Commands::Events { start, end, .. } => {
            let groups = command.event_groups();
            if groups.is_empty() {
                anyhow::bail!("events needs at least one of --modules, --locations or --courses");
            }

            let resolved = resolver.resolve_all(&groups).await?;

            let mut items = Map::new();
            for (category_type, found) in &resolved {
                items.insert(category_type.to_string(), serde_json::to_value(found)?);
            }

            let identities = resolved
                .iter()
                .map(|(category_type, found)| {
                    (*category_type, found.iter().map(|item| item.identity).collect())
                })
                .collect::<Vec<_>>();
            let events = resolver
                .gather_all_events(&identities, *start, *end)
                .await?;

            let mut body = Map::new();
            body.insert("items".to_string(), Value::Object(items));
            body.insert("events".to_string(), serde_json::to_value(events)?);
            Value::Object(body)
        }
    };

    println!("{}", format_output(&value, cli.format)?);
    Ok(())
}

fn init_tracing(json_logs: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "timetable_sync=info,timetable_client=info".into());
    let registry = tracing_subscriber::registry().with(filter);

    // stdout carries command output, so logs go to stderr.
    if json_logs {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

async fn build_resolver(config: &Config) -> Result<Resolver> {
    let client = ScientiaClient::new(config.client_config())?;
    tracing::info!(
        base_url = client.base_url(),
        institution = %client.institution_id(),
        "Upstream client ready"
    );

    #[cfg(feature = "memory")]
    let cache = {
        tracing::info!(max_entries = config.cache_max_entries, "Using in-memory cache");
        ActiveCache::new(config.cache_max_entries)?
    };

    #[cfg(feature = "redis")]
    let cache = {
        tracing::info!(url = %config.redis_url, "Using Redis cache");
        ActiveCache::new(&config.redis_url).await?
    };

    Ok(TimetableResolver::new(
        Arc::new(client),
        Arc::new(cache),
        config.cache_ttl(),
    ))
}

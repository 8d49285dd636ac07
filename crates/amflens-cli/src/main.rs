use std::env;
use std::fs;

use amflens_cli::args::{print_help, print_version};
use amflens_cli::{CliCommand, CliOptions, Settings, parse_arguments, render};
use amflens_core::{AmfStore, expand_model, fetch_model, parse_model};
use anyhow::{Context, Result, anyhow};
use url::Url;

fn is_remote(input: &str) -> bool {
    input.starts_with("http://") || input.starts_with("https://")
}

async fn read_input(input: &str) -> Result<String> {
    if is_remote(input) {
        let url = Url::parse(input).context("invalid URL")?;
        return fetch_model(url.as_str())
            .await
            .with_context(|| format!("failed to fetch {url}"));
    }
    fs::read_to_string(input).with_context(|| format!("failed to read {input}"))
}

/// Base IRI for JSON-LD expansion: the URL itself, or the file's `file://` URL
fn base_iri(input: &str) -> Result<String> {
    if is_remote(input) {
        return Ok(input.to_string());
    }
    let path = fs::canonicalize(input).with_context(|| format!("failed to resolve {input}"))?;
    Url::from_file_path(&path)
        .map(String::from)
        .map_err(|_| anyhow!("cannot build a file URL for {}", path.display()))
}

async fn load_store(options: &CliOptions, settings: &Settings) -> Result<AmfStore> {
    let text = read_input(&options.input).await?;
    let mut model = parse_model(&text).context("input is not an AMF model")?;

    if settings.expand {
        let base = base_iri(&options.input)?;
        let raw = serde_json::to_string(&model)?;
        model = expand_model(&base, &raw)
            .await
            .context("JSON-LD expansion failed")?;
    }

    let mut store = AmfStore::new();
    let meta = store.load_graph(model)?;
    log::info!("loaded {} ({} types)", meta.id, meta.types.len());
    Ok(store)
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let raw_args = env::args().skip(1).collect::<Vec<_>>();
    let options = match parse_arguments(&raw_args)? {
        CliCommand::Run(options) => options,
        CliCommand::Help => {
            print_help();
            return Ok(());
        }
        CliCommand::Version => {
            print_version();
            return Ok(());
        }
    };

    let mut settings = Settings::load().context("failed to load configuration")?;
    settings.apply(&options);

    let _ = env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(settings.log_level.as_str()),
    )
    .try_init();

    let store = load_store(&options, &settings).await?;
    let output = render(&store, &options.view, &settings)?;
    print!("{}", output);

    Ok(())
}

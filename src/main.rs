//! Entry point: render the localized paywall screen.
//!
//! Builds the stock paywall document, runs the localization pipeline
//! against the given page address and client language, and writes the
//! localized HTML to stdout (logs go to stderr).

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use paywall_screen::config::{
    self,
    ConfigError,
};
use paywall_screen::store::{
    DirSource,
    SourceError,
};
use paywall_screen::{
    Page,
    PageError,
    stock_document,
};
use thiserror::Error;
use url::Url;

/// Command-line arguments.
#[derive(Parser, Debug)]
#[command(name = "paywall-screen", about = "Render the localized paywall screen")]
struct Args {
    /// Page address, including any `lang` query parameter.
    #[arg(long, default_value = "https://example.com/paywall")]
    url: String,

    /// Client-reported language, e.g. "de-DE".
    #[arg(long)]
    accept_language: Option<String>,

    /// Directory searched for paywall.config.json.
    #[arg(long)]
    config_root: Option<PathBuf>,

    /// Override the locales directory from settings.
    #[arg(long)]
    locales_dir: Option<PathBuf>,
}

/// Everything that can end the run unsuccessfully.
#[derive(Error, Debug)]
enum CliError {
    /// Settings could not be loaded or validated.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The translation source could not be constructed.
    #[error(transparent)]
    Source(#[from] SourceError),

    /// The pipeline could not activate any translation table.
    #[error(transparent)]
    Page(#[from] PageError),

    /// The page address did not parse.
    #[error("invalid page address: {0}")]
    Address(#[from] url::ParseError),
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    match run(args).await {
        Ok(output) => {
            #[allow(clippy::print_stdout)]
            {
                println!("{output}");
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("Failed to initialize application: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Run the pipeline and return the rendered page.
///
/// The final (possibly rewritten) page address is emitted as a leading
/// comment so the locale rewrite is visible in the output.
async fn run(args: Args) -> Result<String, CliError> {
    let mut settings = config::load_settings(args.config_root.as_deref())?;
    if let Some(dir) = args.locales_dir {
        settings.locales_dir = dir;
    }

    let source = DirSource::from_settings(&settings)?;
    let mut url = Url::parse(&args.url)?;
    let mut doc = stock_document();

    let mut page = Page::new(settings, source);
    page.initialize(&mut doc, &mut url, args.accept_language.as_deref()).await?;

    Ok(format!("<!-- {url} -->\n{}", doc.to_html()))
}

use std::path::{Path, PathBuf};

use clap::{builder::ArgAction, Args, Parser, Subcommand};
use console::{style, Emoji};
use errors::PaperchatCliError;
use paperchat::{
  clients::DownloadClient,
  config::{Config, SearchMode},
  controller::Controller,
  extract_arxiv_id, format, relay,
};
use tracing::{debug, info, trace};
use tracing_appender::rolling;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub mod errors;
pub mod interactive;

static LOOKING_GLASS: Emoji<'_, '_> = Emoji("🔍 ", "");
static BOOKS: Emoji<'_, '_> = Emoji("📚 ", "");
static ROCKET: Emoji<'_, '_> = Emoji("🚀 ", "");
static PAPER: Emoji<'_, '_> = Emoji("📄 ", "");
static SAVE: Emoji<'_, '_> = Emoji("💾 ", "");
static ROBOT: Emoji<'_, '_> = Emoji("🤖 ", "> ");
static WARNING: Emoji<'_, '_> = Emoji("⚠️  ", "");
static SUCCESS: Emoji<'_, '_> = Emoji("✨ ", "");

#[derive(Parser)]
#[command(author, version, about = "Search arXiv by topic and chat about the papers you find")]
struct Cli {
  /// Verbose mode (-v, -vv, -vvv)
  #[arg(
        short,
        long,
        action = ArgAction::Count,
        global = true,
        help = "Increase logging verbosity"
    )]
  verbose: u8,

  /// Path to the configuration file
  #[arg(long, short, global = true)]
  config: Option<PathBuf>,

  #[command(flatten)]
  endpoints: Endpoints,

  #[command(subcommand)]
  command: Commands,
}

/// Overrides for the endpoints in the configuration file.
#[derive(Args)]
struct Endpoints {
  /// Search through the relay instead of querying arXiv directly
  #[arg(long, global = true)]
  relay: bool,

  /// arXiv query endpoint
  #[arg(long, global = true)]
  arxiv_url: Option<String>,

  /// Relay search endpoint
  #[arg(long, global = true)]
  relay_url: Option<String>,

  /// Chat endpoint
  #[arg(long, global = true)]
  chat_url: Option<String>,

  /// Download endpoint
  #[arg(long, global = true)]
  download_url: Option<String>,
}

impl Endpoints {
  /// Applies the flags that were given on top of `config`.
  fn apply(self, config: &mut Config) {
    if self.relay {
      config.search.mode = SearchMode::Relay;
    }
    if let Some(url) = self.arxiv_url {
      config.search.arxiv_url = url;
    }
    if let Some(url) = self.relay_url {
      config.search.relay_url = url;
    }
    if let Some(url) = self.chat_url {
      config.chat.url = url;
    }
    if let Some(url) = self.download_url {
      config.download.url = url;
    }
  }
}

#[derive(Subcommand)]
enum Commands {
  /// Write a default configuration file
  Init {
    /// Path where the configuration should be written
    #[arg(long, short)]
    path:            Option<PathBuf>,
    /// Overwrite an existing file without asking
    #[arg(long)]
    accept_defaults: bool,
  },
  /// Search arXiv and list the matching papers
  Search {
    /// Topic to search for
    topic: String,
  },
  /// Search, pick a paper and chat about it
  Chat {
    /// Topic to search for right away
    topic: Option<String>,
  },
  /// Ask the download service to fetch a paper's PDF
  Download {
    /// arXiv abstract URL (https://arxiv.org/abs/<id>) or bare identifier
    paper: String,
    /// Title to store the PDF under
    #[arg(long, short)]
    title: Option<String>,
  },
  /// Run the same-origin search relay
  Relay {
    /// Interface to listen on
    #[arg(long)]
    host:    Option<String>,
    /// Port to listen on
    #[arg(long, short)]
    port:    Option<u16>,
    /// Also write daily-rotated log files to this directory
    #[arg(long)]
    log_dir: Option<PathBuf>,
  },
}

/// Picks the log filter for the given verbosity, unless `RUST_LOG` is set.
fn env_filter(verbosity: u8) -> EnvFilter {
  let filter = match verbosity {
    0 => "warn",
    1 => "info",
    2 => "debug",
    _ => "trace",
  };

  EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter))
}

/// Setup logging with the specified verbosity level
fn setup_logging(verbosity: u8) {
  tracing_subscriber::fmt()
    .with_env_filter(env_filter(verbosity))
    .with_file(true)
    .with_line_number(true)
    .with_thread_ids(true)
    .with_target(true)
    .init();
}

/// Setup logging to both stderr and daily-rotated files in `log_dir`
fn setup_file_logging(verbosity: u8, log_dir: &Path) -> Result<(), PaperchatCliError> {
  std::fs::create_dir_all(log_dir)?;

  let file_appender = rolling::RollingFileAppender::builder()
    .rotation(rolling::Rotation::DAILY)
    .filename_prefix("paperchat-relay")
    .filename_suffix("log")
    .build(log_dir)?;

  let file_layer = tracing_subscriber::fmt::layer()
    .with_writer(file_appender)
    .with_ansi(false)
    .with_thread_ids(true)
    .with_target(true)
    .with_file(true)
    .with_line_number(true);

  let stderr_layer =
    tracing_subscriber::fmt::layer().with_writer(std::io::stderr).with_target(true);

  tracing_subscriber::registry()
    .with(file_layer)
    .with(stderr_layer)
    .with(env_filter(verbosity.max(1)))
    .init();
  Ok(())
}

#[tokio::main]
async fn main() -> Result<(), PaperchatCliError> {
  let cli = Cli::parse();
  match &cli.command {
    Commands::Relay { log_dir: Some(log_dir), .. } => setup_file_logging(cli.verbose, log_dir)?,
    _ => setup_logging(cli.verbose),
  }

  let config_path = cli.config.unwrap_or_else(Config::default_path);
  trace!("Using config at: {}", config_path.display());

  let mut config = match &cli.command {
    Commands::Init { .. } => Config::default(),
    _ => {
      let mut config = Config::load_or_default(&config_path)?;
      cli.endpoints.apply(&mut config);
      config.validate()?;
      debug!("Effective config: {config:?}");
      config
    },
  };

  match cli.command {
    Commands::Init { path, accept_defaults } =>
      init(path.unwrap_or(config_path), accept_defaults, &config),

    Commands::Search { topic } => {
      println!("{} Searching arXiv for: {}", style(LOOKING_GLASS).cyan(), style(&topic).yellow());

      let mut controller = Controller::new(&config);
      controller.search(&topic).await;
      let papers = controller.session().results();

      if papers.is_empty() {
        println!(
          "{} No papers found matching: {}",
          style(WARNING).yellow(),
          style(&topic).yellow()
        );
        return Ok(());
      }

      println!("\n{} Found {} papers:", style(SUCCESS).green(), style(papers.len()).yellow());
      for paper in papers {
        debug!("Paper details: {:?}", paper);
        println!("\n{}. {}", style(paper.id).yellow(), style(&paper.title).white().bold());

        if let Some(url) = &paper.source_url {
          println!("   {} {}", style("URL:").green(), style(url).blue().underlined());
        }
        if !paper.summary.is_empty() {
          println!(
            "   {} {}",
            style("Abstract:").green(),
            style(format::preview(&paper.summary, 100)).white().italic()
          );
        }
      }
      Ok(())
    },

    Commands::Chat { topic } => {
      let mut controller = Controller::new(&config);
      interactive::run(&mut controller, topic).await
    },

    Commands::Download { paper, title } => {
      let bare_id = !paper.contains('/') && !paper.trim().is_empty();
      let arxiv_id =
        extract_arxiv_id(Some(paper.as_str())).or_else(|| bare_id.then(|| paper.trim().to_string()));

      let Some(arxiv_id) = arxiv_id else {
        println!(
          "{} No arXiv identifier in: {}",
          style(WARNING).yellow(),
          style(&paper).yellow()
        );
        return Ok(());
      };

      let title = title.unwrap_or_else(|| arxiv_id.clone());
      println!(
        "{} Requesting download of {} from {}",
        style(SAVE).cyan(),
        style(&arxiv_id).yellow(),
        style(&config.download.url).blue()
      );

      match DownloadClient::new(config.download.url.clone()).request(&arxiv_id, &title).await {
        Ok(payload) => {
          debug!("Download response: {payload}");
          println!("{} Download requested", style(SUCCESS).green());
        },
        Err(e) => {
          tracing::error!("Error downloading PDF: {e}");
          println!("{} Download failed: {e}", style(WARNING).yellow());
        },
      }
      Ok(())
    },

    Commands::Relay { host, port, .. } => {
      if let Some(host) = host {
        config.relay.host = host;
      }
      if let Some(port) = port {
        config.relay.port = port;
      }

      println!(
        "{} Relay listening on http://{}:{}/info",
        style(ROCKET).cyan(),
        style(&config.relay.host).yellow(),
        style(config.relay.port).yellow()
      );
      info!("Relaying searches to {}", config.search.arxiv_url);
      relay::run(&config).await?;
      Ok(())
    },
  }
}

/// Writes `config` to `path`, asking before replacing an existing file.
fn init(path: PathBuf, accept_defaults: bool, config: &Config) -> Result<(), PaperchatCliError> {
  if path.exists() {
    println!(
      "{} Config already exists at: {}",
      style(WARNING).yellow(),
      style(path.display()).yellow()
    );

    if !accept_defaults
      && !dialoguer::Confirm::new()
        .with_prompt("Do you want to replace it with the defaults?")
        .default(false)
        .interact()?
    {
      println!("{} Keeping existing config", style("ℹ").blue());
      return Ok(());
    }
  }

  println!("{} Writing config to: {}", style(ROCKET).cyan(), style(path.display()).yellow());
  config.save(&path)?;
  println!("{} Config written successfully!", style(SUCCESS).green());
  Ok(())
}

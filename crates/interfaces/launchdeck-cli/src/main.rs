use camino::Utf8PathBuf;
use clap::{Parser, Subcommand};
use launchdeck_cli::entries::{NewGroup, NewItem};
use launchdeck_cli::{commands, Session};
use tracing::Level;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Parser)]
#[command(author, version, about)]
struct Cli {
    #[arg(short, long, global = true)]
    verbose: bool,
    /// Config file to use instead of the platform default
    #[arg(short, long, global = true, env = "LAUNCHDECK_CONFIG")]
    config: Option<Utf8PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print where the configuration is stored
    Path,
    /// Load and print the configuration
    Show {
        #[arg(long)]
        json: bool,
    },
    /// Rewrite the configuration file
    Save,
    /// Copy the configuration file into the backups directory
    Backup,
    /// Manage groups
    Group {
        #[command(subcommand)]
        command: GroupCommands,
    },
    /// Manage launch items
    Item {
        #[command(subcommand)]
        command: ItemCommands,
    },
    /// Keep running and auto-save until interrupted
    Run {
        /// Auto-save interval in minutes
        #[arg(short, long)]
        interval: Option<u32>,
    },
}

#[derive(Subcommand)]
enum GroupCommands {
    Add {
        #[arg(long, help = "Unique slug ID for the group")]
        id: String,
        name: String,
        #[arg(long)]
        order: Option<i64>,
        #[arg(long)]
        color: Option<String>,
        #[arg(long)]
        icon: Option<String>,
    },
}

#[derive(Subcommand)]
enum ItemCommands {
    Add {
        #[arg(long, help = "Unique slug ID for the launch item")]
        id: String,
        name: String,
        path: String,
        #[arg(short, long)]
        group: Option<String>,
        #[arg(long)]
        order: Option<i64>,
        #[arg(long)]
        working_dir: Option<String>,
        #[arg(last = true)]
        args: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose)?;

    let session = Session::open(cli.config)?;

    match cli.command {
        Commands::Path => commands::cmd_path(&session).await?,
        Commands::Show { json } => commands::cmd_show(&session, json).await?,
        Commands::Save => commands::cmd_save(&session).await?,
        Commands::Backup => commands::cmd_backup(&session).await?,
        Commands::Group { command } => match command {
            GroupCommands::Add {
                id,
                name,
                order,
                color,
                icon,
            } => {
                let new = NewGroup {
                    id,
                    name,
                    order,
                    color,
                    icon,
                };
                commands::cmd_group_add(&session, new).await?
            }
        },
        Commands::Item { command } => match command {
            ItemCommands::Add {
                id,
                name,
                path,
                group,
                order,
                working_dir,
                args,
            } => {
                let new = NewItem {
                    id,
                    name,
                    path,
                    args,
                    working_dir,
                    group,
                    order,
                };
                commands::cmd_item_add(&session, new).await?
            }
        },
        Commands::Run { interval } => commands::cmd_run(&session, interval).await?,
    }

    Ok(())
}

/// `RUST_LOG` wins when set; otherwise `--verbose` picks debug over warn.
fn init_logging(verbose: bool) -> anyhow::Result<()> {
    let builder = FmtSubscriber::builder().with_writer(std::io::stderr);
    if std::env::var_os("RUST_LOG").is_some() {
        let subscriber = builder.with_env_filter(EnvFilter::from_default_env()).finish();
        tracing::subscriber::set_global_default(subscriber)?;
    } else {
        let level = if verbose { Level::DEBUG } else { Level::WARN };
        let subscriber = builder.with_max_level(level).finish();
        tracing::subscriber::set_global_default(subscriber)?;
    }
    Ok(())
}

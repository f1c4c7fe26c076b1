use clap::{ArgAction, Parser};
use std::ffi::OsString;
use tracing::Level;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Sync {
        local_repo: String,
        manifest_path: String,
        config_path: Option<String>,
        remote_base_url: Option<String>,
        dry_run: bool,
    },
}

pub struct Args {
    pub command: Command,
    pub log_level: Level,
}

#[derive(Debug, Parser)]
#[command(
    name = "relmirror",
    version,
    author = "Nick Guletskii",
    about = "Mirror a remote release repository onto local disk, fetching only the files that are missing",
    after_help = "FILELIST should be the output of: aws s3 ls s3://<bucket> --recursive"
)]
struct Cli {
    #[arg(
        short = 'v',
        long = "verbose",
        help = "Sets the level of verbosity",
        action = ArgAction::Count
    )]
    verbose: u8,

    #[arg(
        short = 'c',
        long = "config",
        value_name = "FILE",
        help = "Optional config file (YAML, TOML or JSON)"
    )]
    config: Option<String>,

    #[arg(
        long = "remote-base-url",
        value_name = "URL",
        help = "Overrides the base URL that object keys are appended to"
    )]
    remote_base_url: Option<String>,

    #[arg(
        long = "dry-run",
        help = "Print the sync plan as JSON lines instead of fetching anything"
    )]
    dry_run: bool,

    #[arg(value_name = "LOCAL_REPO", help = "Local repository root")]
    local_repo: String,

    #[arg(value_name = "FILELIST", help = "Remote object listing to mirror")]
    filelist: String,
}

/// Parses the process arguments and installs the tracing subscriber.
///
/// Usage errors print the clap message and exit with status 1.
pub fn parse_args() -> Args {
    let args = match try_parse_args_from(std::env::args_os()) {
        Ok(args) => args,
        Err(err) => {
            let code = if err.use_stderr() { 1 } else { 0 };
            let _ = err.print();
            std::process::exit(code);
        }
    };

    tracing_subscriber::fmt()
        .with_max_level(args.log_level)
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::builder()
                .with_default_directive(args.log_level.into())
                .from_env_lossy()
                .add_directive("hyper_util=info".parse().expect("valid directive")),
        )
        .init();

    args
}

pub fn try_parse_args_from<I, T>(args: I) -> Result<Args, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let cli = Cli::try_parse_from(args)?;

    let log_level = match cli.verbose {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let command = Command::Sync {
        local_repo: cli.local_repo,
        manifest_path: cli.filelist,
        config_path: cli.config,
        remote_base_url: cli.remote_base_url,
        dry_run: cli.dry_run,
    };

    Ok(Args { command, log_level })
}

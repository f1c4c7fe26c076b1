use relmirror_lib::cli::{ResolvedCommand, parse_args, resolve_command, run_dry_run, run_sync};
use relmirror_lib::error::RelMirrorError;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), RelMirrorError> {
    color_eyre::install()?;

    let args = parse_args();
    let command = resolve_command(args.command)?;

    match command {
        ResolvedCommand::Sync(params) => {
            run_sync(params).await?;
        }
        ResolvedCommand::DryRun(params) => run_dry_run(params).await?,
    }

    Ok(())
}

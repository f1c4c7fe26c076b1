use crate::cli::args::Command;
use crate::cli::params::SyncParams;
use crate::config::{load_config, validate_remote_base_url};
use crate::error::RelMirrorError;
use crate::manifest::Manifest;
use std::path::Path;

#[derive(Debug, Clone)]
pub enum ResolvedCommand {
    Sync(SyncParams),
    DryRun(SyncParams),
}

pub fn resolve_command(command: Command) -> Result<ResolvedCommand, RelMirrorError> {
    match command {
        Command::Sync {
            local_repo,
            manifest_path,
            config_path,
            remote_base_url,
            dry_run,
        } => {
            let app_config = load_config(config_path.as_deref())?;
            let remote_base_url = remote_base_url.unwrap_or(app_config.remote_base_url);
            validate_remote_base_url(&remote_base_url)?;

            tracing::debug!("Loading manifest from {}", manifest_path);
            let manifest = Manifest::load_from_file(Path::new(&manifest_path))?;

            let params = SyncParams {
                local_root: local_repo,
                manifest,
                remote_base_url,
            };

            if dry_run {
                Ok(ResolvedCommand::DryRun(params))
            } else {
                Ok(ResolvedCommand::Sync(params))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sync_command(manifest_path: &Path, remote_base_url: Option<&str>) -> Command {
        Command::Sync {
            local_repo: "/data/repo".to_string(),
            manifest_path: manifest_path.to_str().unwrap().to_string(),
            config_path: None,
            remote_base_url: remote_base_url.map(str::to_string),
            dry_run: false,
        }
    }

    #[test]
    fn test_missing_manifest_is_fatal() {
        let temp_dir = tempfile::tempdir().unwrap();
        let command = sync_command(&temp_dir.path().join("missing.txt"), None);

        let result = resolve_command(command);

        assert!(
            matches!(result, Err(RelMirrorError::ManifestLoad { .. })),
            "Expected manifest load error, got {:?}",
            result
        );
    }

    #[test]
    fn test_flag_overrides_remote_base_url() {
        let temp_dir = tempfile::tempdir().unwrap();
        let manifest_path = temp_dir.path().join("filelist.txt");
        std::fs::write(&manifest_path, "1 repo/a.jar\n").unwrap();

        let resolved =
            resolve_command(sync_command(&manifest_path, Some("https://mirror.test/"))).unwrap();

        let params = match resolved {
            ResolvedCommand::Sync(params) => params,
            other => panic!("Expected sync command, got {:?}", other),
        };
        assert_eq!(params.remote_base_url, "https://mirror.test/");
        assert_eq!(params.local_root, "/data/repo");
        assert_eq!(params.manifest.lines().collect::<Vec<_>>(), vec!["1 repo/a.jar"]);
    }

    #[test]
    fn test_invalid_remote_base_url() {
        let temp_dir = tempfile::tempdir().unwrap();
        let manifest_path = temp_dir.path().join("filelist.txt");
        std::fs::write(&manifest_path, "").unwrap();

        let result = resolve_command(sync_command(&manifest_path, Some("not a url")));

        assert!(matches!(
            result,
            Err(RelMirrorError::CliArgumentValidation { .. })
        ));
    }

    #[test]
    fn test_dry_run_resolves_to_dry_run() {
        let temp_dir = tempfile::tempdir().unwrap();
        let manifest_path = temp_dir.path().join("filelist.txt");
        std::fs::write(&manifest_path, "").unwrap();
        let command = Command::Sync {
            local_repo: "mirror".to_string(),
            manifest_path: manifest_path.to_str().unwrap().to_string(),
            config_path: None,
            remote_base_url: Some("https://mirror.test/".to_string()),
            dry_run: true,
        };

        let resolved = resolve_command(command).unwrap();

        assert!(matches!(resolved, ResolvedCommand::DryRun(_)));
    }
}

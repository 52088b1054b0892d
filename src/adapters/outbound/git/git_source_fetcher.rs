use crate::ports::outbound::SourceFetcher;
use crate::shared::error::PipelineError;
use crate::shared::Result;
use git2::build::RepoBuilder;
use git2::{Cred, CredentialType, FetchOptions, RemoteCallbacks};
use std::fs;
use std::path::Path;

/// libgit2 gives up on its own only after many attempts; stop earlier
const MAX_CREDENTIAL_ATTEMPTS: usize = 3;

/// GitSourceFetcher adapter cloning repositories with libgit2
///
/// Performs a full clone of the remote's default branch. Credentials come
/// from the SSH agent for SSH remotes and from the configured git
/// credential helper for HTTPS remotes.
pub struct GitSourceFetcher;

impl GitSourceFetcher {
    pub fn new() -> Self {
        Self
    }

    /// Refuses to clone over existing files
    fn ensure_empty_target(repository_url: &str, target_dir: &Path) -> Result<()> {
        if !target_dir.exists() {
            return Ok(());
        }

        let mut entries = fs::read_dir(target_dir).map_err(|e| PipelineError::Fetch {
            url: repository_url.to_string(),
            details: format!("Cannot inspect {}: {}", target_dir.display(), e),
        })?;

        if entries.next().is_some() {
            return Err(PipelineError::Fetch {
                url: repository_url.to_string(),
                details: format!(
                    "Target directory {} is not empty",
                    target_dir.display()
                ),
            }
            .into());
        }
        Ok(())
    }

    fn remote_callbacks<'a>() -> RemoteCallbacks<'a> {
        let mut attempts = 0;
        let mut callbacks = RemoteCallbacks::new();
        callbacks.credentials(move |url, username_from_url, allowed| {
            attempts += 1;
            if attempts > MAX_CREDENTIAL_ATTEMPTS {
                return Err(git2::Error::from_str("authentication failed"));
            }

            if allowed.contains(CredentialType::SSH_KEY) {
                Cred::ssh_key_from_agent(username_from_url.unwrap_or("git"))
            } else if allowed.contains(CredentialType::USER_PASS_PLAINTEXT) {
                let config = git2::Config::open_default()?;
                Cred::credential_helper(&config, url, username_from_url)
            } else if allowed.contains(CredentialType::DEFAULT) {
                Cred::default()
            } else {
                Err(git2::Error::from_str("no supported credential type"))
            }
        });
        callbacks
    }
}

impl Default for GitSourceFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl SourceFetcher for GitSourceFetcher {
    fn fetch(&self, repository_url: &str, target_dir: &Path) -> Result<()> {
        Self::ensure_empty_target(repository_url, target_dir)?;

        let mut fetch_options = FetchOptions::new();
        fetch_options.remote_callbacks(Self::remote_callbacks());

        RepoBuilder::new()
            .fetch_options(fetch_options)
            .clone(repository_url, target_dir)
            .map_err(|e| PipelineError::Fetch {
                url: repository_url.to_string(),
                details: e.message().to_string(),
            })?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use git2::{Repository, Signature};
    use tempfile::TempDir;

    /// Creates a repository with one commit containing `package.json`
    fn create_origin(dir: &Path) {
        let repo = Repository::init(dir).unwrap();
        fs::write(dir.join("package.json"), "{\"name\":\"demo-app\"}").unwrap();

        let mut index = repo.index().unwrap();
        index.add_path(Path::new("package.json")).unwrap();
        index.write().unwrap();
        let tree_id = index.write_tree().unwrap();
        let tree = repo.find_tree(tree_id).unwrap();
        let signature = Signature::now("Test", "test@example.com").unwrap();
        repo.commit(Some("HEAD"), &signature, &signature, "initial", &tree, &[])
            .unwrap();
    }

    #[test]
    fn test_clone_local_repository_into_empty_directory() {
        let origin = TempDir::new().unwrap();
        create_origin(origin.path());
        let target = TempDir::new().unwrap();

        let fetcher = GitSourceFetcher::new();
        fetcher
            .fetch(origin.path().to_str().unwrap(), target.path())
            .unwrap();

        assert!(target.path().join("package.json").is_file());
        assert!(target.path().join(".git").exists());
    }

    #[test]
    fn test_clone_into_missing_directory() {
        let origin = TempDir::new().unwrap();
        create_origin(origin.path());
        let parent = TempDir::new().unwrap();
        let target = parent.path().join("checkout");

        GitSourceFetcher::default()
            .fetch(origin.path().to_str().unwrap(), &target)
            .unwrap();

        assert!(target.join("package.json").is_file());
    }

    #[test]
    fn test_non_empty_target_is_rejected() {
        let target = TempDir::new().unwrap();
        fs::write(target.path().join("existing.txt"), "keep me").unwrap();

        let err = GitSourceFetcher::new()
            .fetch("https://example.invalid/repo.git", target.path())
            .unwrap_err();

        assert!(matches!(
            err.downcast_ref::<PipelineError>(),
            Some(PipelineError::Fetch { .. })
        ));
        assert!(err.to_string().contains("is not empty"));
        assert_eq!(
            fs::read_to_string(target.path().join("existing.txt")).unwrap(),
            "keep me"
        );
    }

    #[test]
    fn test_missing_repository_is_fetch_error() {
        let missing = TempDir::new().unwrap();
        let target = TempDir::new().unwrap();
        let url = missing.path().join("does-not-exist");

        let err = GitSourceFetcher::new()
            .fetch(url.to_str().unwrap(), target.path())
            .unwrap_err();

        assert!(matches!(
            err.downcast_ref::<PipelineError>(),
            Some(PipelineError::Fetch { .. })
        ));
    }
}

use chrono::Utc;
use pyrewall_application::credentials;
use pyrewall_application::ports::UserRepository;
use pyrewall_domain::{DomainError, Role, User};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, warn};

const MARKER_FILE: &str = ".install_complete";
const CREDENTIAL_MARKER_FILE: &str = ".default_credentials";
const CANONICAL_DB_NAMES: &[&str] = &["firewall.db", "users.db", "general_history.db", "firewall_logs.db"];

/// True when the persistence root has already completed first-run bootstrap.
pub fn is_bootstrapped(root: &Path) -> bool {
    root.join(MARKER_FILE).exists()
}

/// Moves any of the four canonical database files sitting directly under
/// `root` (left over from a previous install layout) into a timestamped
/// backup folder, so a fresh bootstrap never silently clobbers old data.
pub fn relocate_stray_databases(root: &Path) -> Result<(), DomainError> {
    let stray: Vec<PathBuf> = CANONICAL_DB_NAMES
        .iter()
        .map(|name| root.join(name))
        .filter(|path| path.is_file())
        .collect();

    if stray.is_empty() {
        return Ok(());
    }

    let backup_dir = root.join(format!("backup-{}", Utc::now().format("%Y%m%d%H%M%S")));
    std::fs::create_dir_all(&backup_dir).map_err(|e| DomainError::IoError(e.to_string()))?;

    for path in stray {
        let file_name = path.file_name().expect("checked is_file above");
        let dest = backup_dir.join(file_name);
        std::fs::rename(&path, &dest).map_err(|e| DomainError::IoError(e.to_string()))?;
        warn!(from = %path.display(), to = %dest.display(), "relocated stray database file");
    }

    Ok(())
}

/// Creates the default admin account if no users exist yet, and writes a
/// marker file holding the one-time plaintext credentials for the login UI
/// to display exactly once. Call `clear_default_credential_marker` after the
/// first successful login.
pub async fn bootstrap_default_admin(
    root: &Path,
    user_repo: Arc<dyn UserRepository>,
) -> Result<(), DomainError> {
    if user_repo.count().await? > 0 {
        return Ok(());
    }

    let hashed = credentials::hash_password(User::DEFAULT_ADMIN_PASSWORD);
    user_repo
        .create(User {
            username: Arc::from(User::DEFAULT_ADMIN_USERNAME),
            password: Arc::from(hashed.as_str()),
            role: Role::Admin,
        })
        .await?;

    let marker = format!(
        "username={}\npassword={}\n",
        User::DEFAULT_ADMIN_USERNAME,
        User::DEFAULT_ADMIN_PASSWORD
    );
    std::fs::write(root.join(CREDENTIAL_MARKER_FILE), marker)
        .map_err(|e| DomainError::IoError(e.to_string()))?;

    info!("default admin account created");
    Ok(())
}

/// Deletes the one-time plaintext credential marker. Idempotent: a missing
/// file is not an error.
pub fn clear_default_credential_marker(root: &Path) -> Result<(), DomainError> {
    let path = root.join(CREDENTIAL_MARKER_FILE);
    match std::fs::remove_file(&path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(DomainError::IoError(e.to_string())),
    }
}

/// Marks the persistence root as fully bootstrapped.
pub fn mark_bootstrapped(root: &Path) -> Result<(), DomainError> {
    std::fs::write(root.join(MARKER_FILE), Utc::now().to_rfc3339())
        .map_err(|e| DomainError::IoError(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relocates_stray_db_files_into_timestamped_backup() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("firewall.db"), b"stray").unwrap();

        relocate_stray_databases(dir.path()).unwrap();

        assert!(!dir.path().join("firewall.db").exists());
        let backups: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name().to_string_lossy().starts_with("backup-"))
            .collect();
        assert_eq!(backups.len(), 1);
    }

    #[test]
    fn bootstrap_marker_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        assert!(!is_bootstrapped(dir.path()));
        mark_bootstrapped(dir.path()).unwrap();
        assert!(is_bootstrapped(dir.path()));
    }

    #[test]
    fn clearing_missing_marker_is_not_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(clear_default_credential_marker(dir.path()).is_ok());
    }
}

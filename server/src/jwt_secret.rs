//! JWT Secret management
//!
//! Provides automatic generation and file-based persistence of the JWT
//! signing secret. The secret is stored in `<data dir>/jwt_secret` with
//! permissions 600. There is no hard-coded fallback value.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use uuid::Uuid;

#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;

/// Secret file name under the data directory
const JWT_SECRET_FILE: &str = "jwt_secret";

/// Get or create the JWT secret
///
/// Priority:
/// 1. Environment variable `NOTES_JWT_SECRET`
/// 2. Read from file `<data dir>/jwt_secret`
/// 3. Generate new UUIDv4 and save to file
///
/// # Returns
/// * `Ok(secret)` - The JWT secret string
/// * `Err(io::Error)` - Failed to read/write secret file
pub fn get_or_create_jwt_secret() -> io::Result<String> {
    if let Ok(secret) = std::env::var("NOTES_JWT_SECRET") {
        if !secret.is_empty() {
            tracing::info!("Using JWT secret from environment variable");
            return Ok(secret);
        }
    }

    let secret_path = jwt_secret_path()?;
    if secret_path.exists() {
        let secret = read_secret_file(&secret_path)?;
        if !secret.is_empty() {
            tracing::info!("Using JWT secret from file: {}", secret_path.display());
            return Ok(secret);
        }
    }

    let secret = generate_secret();
    write_secret_file(&secret_path, &secret)?;
    tracing::info!(
        "Generated new JWT secret and saved to: {}",
        secret_path.display()
    );

    Ok(secret)
}

/// Get the path to the JWT secret file
fn jwt_secret_path() -> io::Result<PathBuf> {
    Ok(crate::config::data_dir()?.join(JWT_SECRET_FILE))
}

/// Generate a new random secret using UUIDv4
fn generate_secret() -> String {
    Uuid::new_v4().to_string()
}

/// Read the secret from file
fn read_secret_file(path: &Path) -> io::Result<String> {
    let mut file = File::open(path)?;
    let mut secret = String::new();
    file.read_to_string(&mut secret)?;
    Ok(secret.trim().to_string())
}

/// Write the secret to file with secure permissions (600)
fn write_secret_file(path: &Path, secret: &str) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let mut file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)?;
    file.write_all(secret.as_bytes())?;

    #[cfg(unix)]
    {
        let metadata = file.metadata()?;
        let mut permissions = metadata.permissions();
        permissions.set_mode(0o600);
        fs::set_permissions(path, permissions)?;
    }

    Ok(())
}

use anyhow::Result;
use std::env;
use std::fs;
use std::io::Write;
use std::path::PathBuf;

#[cfg(unix)]
use std::os::unix::fs::OpenOptionsExt;

/// Checked in order, before config, keyring and file
const ENV_API_KEYS: [&str; 2] = ["PHISHGUARD_API_KEY", "GEMINI_API_KEY"];
const KEYRING_SERVICE: &str = "phishguard";
const KEYRING_USER: &str = "gemini-api-key";

/// Where an API key was found
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeySource {
    Env(&'static str),
    Config,
    Keyring,
    File,
}

impl std::fmt::Display for KeySource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KeySource::Env(var) => write!(f, "environment ({})", var),
            KeySource::Config => f.write_str("config file"),
            KeySource::Keyring => f.write_str("keyring"),
            KeySource::File => f.write_str("key file"),
        }
    }
}

/// Debug information about credential storage backends
#[derive(Debug, Clone)]
pub struct CredentialDebugInfo {
    pub keyring_available: bool,
    pub env_var_set: Option<&'static str>,
    pub file_path: PathBuf,
    pub file_exists: bool,
}

impl std::fmt::Display for CredentialDebugInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Credential Storage Status:")?;
        writeln!(
            f,
            "  Keyring: {}",
            if self.keyring_available {
                "available"
            } else {
                "unavailable"
            }
        )?;
        writeln!(
            f,
            "  Environment ({}): {}",
            ENV_API_KEYS.join(" / "),
            self.env_var_set.unwrap_or("not set")
        )?;
        writeln!(f, "  File fallback: {}", self.file_path.display())?;
        writeln!(f, "  File exists: {}", self.file_exists)?;
        Ok(())
    }
}

pub struct CredentialStore {
    key_file: PathBuf,
    use_keyring: bool,
}

impl CredentialStore {
    pub fn new() -> Self {
        let key_file = crate::config::Config::config_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
            .join(".api_key");
        Self {
            key_file,
            use_keyring: true,
        }
    }

    /// Store backed only by `key_file`; the OS keyring is never touched
    #[cfg(test)]
    fn with_key_file(key_file: PathBuf) -> Self {
        Self {
            key_file,
            use_keyring: false,
        }
    }

    /// Get diagnostic info about credential storage backend
    pub fn debug_info(&self) -> CredentialDebugInfo {
        let keyring_available = if !self.use_keyring {
            false
        } else if let Ok(entry) = keyring::Entry::new(KEYRING_SERVICE, "test") {
            entry.set_password("__test__").is_ok()
                && entry.get_password().is_ok()
                && entry.delete_credential().is_ok()
        } else {
            false
        };

        CredentialDebugInfo {
            keyring_available,
            env_var_set: Self::env_api_key().map(|(var, _)| var),
            file_path: self.key_file.clone(),
            file_exists: self.key_file.exists(),
        }
    }

    /// First non-empty API key env var
    fn env_api_key() -> Option<(&'static str, String)> {
        ENV_API_KEYS.iter().find_map(|var| {
            env::var(var)
                .ok()
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .map(|v| (*var, v))
        })
    }

    fn keyring_get(&self) -> Option<String> {
        if !self.use_keyring {
            return None;
        }
        let entry = keyring::Entry::new(KEYRING_SERVICE, KEYRING_USER).ok()?;
        entry.get_password().ok()
    }

    fn keyring_set(&self, key: &str) -> bool {
        if !self.use_keyring {
            return false;
        }
        if let Ok(entry) = keyring::Entry::new(KEYRING_SERVICE, KEYRING_USER) {
            entry.set_password(key).is_ok()
        } else {
            false
        }
    }

    fn file_get(&self) -> Option<String> {
        fs::read_to_string(&self.key_file)
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
    }

    /// Write the key to the file fallback (with restricted permissions)
    fn file_set(&self, key: &str) -> Result<()> {
        if let Some(parent) = self.key_file.parent() {
            fs::create_dir_all(parent)?;
        }

        // Create file with restricted permissions atomically to avoid TOCTOU
        #[cfg(unix)]
        {
            let mut file = fs::OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .mode(0o600)
                .open(&self.key_file)?;
            file.write_all(key.as_bytes())?;
        }

        #[cfg(not(unix))]
        {
            fs::write(&self.key_file, key)?;
        }

        Ok(())
    }

    /// Resolve the API key: env vars, then `configured` (from config), keyring, file.
    pub fn api_key(&self, configured: Option<&str>) -> Option<(String, KeySource)> {
        if let Some((var, key)) = Self::env_api_key() {
            return Some((key, KeySource::Env(var)));
        }

        if let Some(key) = configured.map(str::trim).filter(|k| !k.is_empty()) {
            return Some((key.to_string(), KeySource::Config));
        }

        if let Some(key) = self.keyring_get() {
            return Some((key, KeySource::Keyring));
        }

        self.file_get().map(|key| (key, KeySource::File))
    }

    pub fn get_api_key(&self, configured: Option<&str>) -> Result<String> {
        match self.api_key(configured) {
            Some((key, source)) => {
                tracing::debug!("Using API key from {}", source);
                Ok(key)
            }
            None => anyhow::bail!(
                "Gemini API key not found. Set PHISHGUARD_API_KEY or GEMINI_API_KEY, \
                 or run 'phishguard setup'."
            ),
        }
    }

    pub fn set_api_key(&self, key: &str) -> Result<()> {
        if self.keyring_set(key) && self.keyring_get().as_deref() == Some(key) {
            return Ok(());
        }

        // Keyring failed, use file fallback
        eprintln!("Note: Keyring unavailable, using file-based storage.");
        self.file_set(key)?;

        Ok(())
    }

    pub fn has_api_key(&self, configured: Option<&str>) -> bool {
        self.api_key(configured).is_some()
    }
}

impl Default for CredentialStore {
    fn default() -> Self {
        Self::new()
    }
}

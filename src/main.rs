mod analysis;
mod app;
mod config;
mod constants;
mod conversation;
mod credentials;
mod input;
mod ui;

use anyhow::Result;
use std::env;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::analysis::{Analyzer, GeminiClient, spawn_analysis_actor};
use crate::app::App;
use crate::config::Config;
use crate::credentials::CredentialStore;

fn setup_logging() {
    use std::fs::OpenOptions;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,phishguard=debug"));

    // The TUI owns the terminal, so logs go to a file in the config directory
    let log_file = Config::config_dir()
        .ok()
        .map(|dir| dir.join("phishguard.log"))
        .and_then(|path| {
            OpenOptions::new()
                .create(true)
                .write(true)
                .truncate(true)
                .open(&path)
                .ok()
        });

    if let Some(file) = log_file {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(std::sync::Mutex::new(file))
                    .with_ansi(false),
            )
            .init();
    } else {
        // Fallback to stderr if file logging fails
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn print_usage() {
    eprintln!(
        r#"phishguard - Email phishing analysis in the terminal

Usage: phishguard [command]

Commands:
    (none)      Start the analyzer
    setup       Store the Gemini API key and write a default config
    help        Show this help message

Environment:
    PHISHGUARD_API_KEY / GEMINI_API_KEY   API key (overrides stored key)
    RUST_LOG                              Log filter (log file: phishguard.log)

Configuration file: ~/.config/phishguard/config.toml
"#
    );
}

fn run_setup() -> Result<()> {
    use std::io::{self, Write};

    println!("PhishGuard Setup");
    println!("================\n");

    let creds = CredentialStore::new();
    if creds.has_api_key(None) {
        print!("An API key is already available. Replace it? [y/N]: ");
        io::stdout().flush()?;
        let mut input = String::new();
        io::stdin().read_line(&mut input)?;
        if !input.trim().eq_ignore_ascii_case("y") {
            println!("Setup cancelled.");
            return Ok(());
        }
    }

    let api_key = loop {
        print!("Gemini API key: ");
        io::stdout().flush()?;
        let key = read_secret()?;
        println!();
        if !key.is_empty() {
            break key;
        }
        println!("The API key cannot be empty.");
    };

    creds.set_api_key(&api_key)?;
    if creds.has_api_key(None) {
        println!("API key stored successfully.");
    } else {
        eprintln!("Warning: Failed to store the API key.");
        return Err(anyhow::anyhow!("Credential storage failed"));
    }

    Config::ensure_dirs()?;
    let config_path = Config::config_path()?;
    if !config_path.exists() {
        Config::default().save()?;
        println!("Configuration saved to {}", config_path.display());
    }

    println!("\nSetup complete! Run 'phishguard' to start.");
    Ok(())
}

fn read_secret() -> Result<String> {
    use std::io;

    // Disable echo
    let _guard = DisableEcho::new()?;

    let mut secret = String::new();
    io::stdin().read_line(&mut secret)?;
    Ok(secret.trim().to_string())
}

struct DisableEcho {
    #[cfg(unix)]
    original: libc::termios,
}

impl DisableEcho {
    #[cfg(unix)]
    fn new() -> Result<Self> {
        use std::mem::MaybeUninit;
        use std::os::unix::io::AsRawFd;

        let fd = std::io::stdin().as_raw_fd();
        let mut termios = MaybeUninit::<libc::termios>::uninit();

        unsafe {
            if libc::tcgetattr(fd, termios.as_mut_ptr()) != 0 {
                anyhow::bail!("Failed to get terminal attributes");
            }
            let original = termios.assume_init();
            let mut new = original;
            new.c_lflag &= !libc::ECHO;
            if libc::tcsetattr(fd, libc::TCSANOW, &new) != 0 {
                anyhow::bail!("Failed to set terminal attributes");
            }
            Ok(Self { original })
        }
    }

    #[cfg(not(unix))]
    fn new() -> Result<Self> {
        Ok(Self {})
    }
}

#[cfg(unix)]
impl Drop for DisableEcho {
    fn drop(&mut self) {
        use std::os::unix::io::AsRawFd;
        let fd = std::io::stdin().as_raw_fd();
        unsafe {
            libc::tcsetattr(fd, libc::TCSANOW, &self.original);
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();

    match args.get(1).map(|s| s.as_str()) {
        Some("help") | Some("--help") | Some("-h") => {
            print_usage();
            Ok(())
        }
        Some("setup") => run_setup(),
        Some(cmd) => {
            eprintln!("Unknown command: {}", cmd);
            print_usage();
            std::process::exit(1);
        }
        None => {
            setup_logging();

            let config = Config::load()?;
            Config::ensure_dirs()?;

            // Initialize theme from config
            crate::ui::theme::init_theme(config.ui.theme);

            // Fail before the terminal is taken over
            let creds = CredentialStore::new();
            let api_key = match creds.get_api_key(config.ai.api_key.as_deref()) {
                Ok(key) => key,
                Err(e) => {
                    tracing::error!("No API key available: {}", e);
                    eprintln!("{}", e);
                    eprintln!("\n{}", creds.debug_info());
                    std::process::exit(1);
                }
            };

            tracing::info!("Starting phishguard with model {}", config.ai.model);
            let client = GeminiClient::new(
                api_key,
                config.ai.model.clone(),
                config.ai.base_url.clone(),
            );
            let analyzer = Analyzer::new(client, config.ai.temperature);
            let handle = spawn_analysis_actor(analyzer);

            let mut app = App::new(&config, handle);
            app.run().await
        }
    }
}

use clap::{Parser, Subcommand};
use anyhow::Result;

mod commands;

use commands::KeyArgs;

#[derive(Parser)]
#[command(name = "draftseal")]
#[command(about = "Lock and unlock drafting projects with a portable AES-256-GCM key", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Logging level
    #[arg(long, env = "DRAFTSEAL_LOG_LEVEL", default_value = "info", global = true)]
    log_level: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a new key and print its base64 encoding
    Keygen {
        /// Output file for the key (use '-' for stdout)
        #[arg(short, long, default_value = "-")]
        output: String,

        /// Replace an existing key file (envelopes sealed with the old key become unreadable)
        #[arg(long)]
        force: bool,
    },

    /// Encrypt UTF-8 text into a JSON envelope
    Encrypt {
        /// Input file (use '-' for stdin)
        #[arg(short, long, default_value = "-")]
        input: String,

        /// Output file (use '-' for stdout)
        #[arg(short, long, default_value = "-")]
        output: String,

        #[command(flatten)]
        key: KeyArgs,
    },

    /// Decrypt a JSON envelope back to text
    Decrypt {
        /// Input envelope JSON file (use '-' for stdin)
        #[arg(short, long, default_value = "-")]
        input: String,

        /// Output file for plaintext (use '-' for stdout)
        #[arg(short, long, default_value = "-")]
        output: String,

        #[command(flatten)]
        key: KeyArgs,
    },

    /// Run as Unix socket daemon
    Daemon {
        /// Socket path
        #[arg(short, long, env = "DRAFTSEAL_SOCKET_PATH", default_value = "/tmp/draftseal.sock")]
        socket: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging; stdout may carry key or plaintext output
    tracing_subscriber::fmt()
        .with_env_filter(&cli.log_level)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!("draftseal starting");

    match cli.command {
        Commands::Keygen { output, force } => {
            commands::keygen::execute(&output, force)?;
        }
        Commands::Encrypt { input, output, key } => {
            commands::encrypt::execute(&input, &output, &key)?;
        }
        Commands::Decrypt { input, output, key } => {
            commands::decrypt::execute(&input, &output, &key)?;
        }
        Commands::Daemon { socket } => {
            commands::daemon::execute(&socket).await?;
        }
    }

    Ok(())
}

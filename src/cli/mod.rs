use anyhow::Result;
use clap::{Parser, Subcommand};

pub mod auth;
pub mod serve;
pub mod slots;

#[derive(Subcommand)]
enum Command {
    /// Run the API server
    Serve {
        /// Set the server host address
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Set the server port
        #[arg(long, default_value = "3000")]
        port: String,
    },
    /// Perform OAuth authentication and print a refresh token
    Auth {
        /// Redirect URI registered for the OAuth client
        #[arg(long, default_value = "http://localhost:3001/auth/callback")]
        redirect_uri: String,
    },
    /// Print the next open slots of the configured calendar
    Slots {
        #[arg(long, default_value = "7")]
        days: u32,
        /// Meeting length in minutes
        #[arg(long, default_value = "45")]
        duration: u32,
        /// Minutes of buffer before each meeting
        #[arg(long, default_value = "10")]
        buffer: u32,
        #[arg(long, default_value = "9")]
        start_hour: u32,
        #[arg(long, default_value = "18")]
        end_hour: u32,
        /// IANA time zone, defaults to TIMEZONE
        #[arg(long)]
        tz: Option<String>,
        #[arg(long)]
        calendar_id: Option<String>,
        #[arg(long, default_value = "3")]
        limit: usize,
    },
}

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

pub async fn run() -> Result<()> {
    let args = Cli::parse();

    // Handle each sub command
    match args.command {
        Some(Command::Serve { host, port }) => {
            serve::run(host, port).await?;
        }
        Some(Command::Auth { redirect_uri }) => {
            auth::run(&redirect_uri).await?;
        }
        Some(Command::Slots {
            days,
            duration,
            buffer,
            start_hour,
            end_hour,
            tz,
            calendar_id,
            limit,
        }) => {
            let opts = slots::SlotsOptions {
                days,
                duration,
                buffer,
                work_hours: (start_hour, end_hour),
                tz,
                calendar_id,
                limit,
            };
            slots::run(opts).await?;
        }
        None => {}
    }

    Ok(())
}

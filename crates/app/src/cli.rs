//! Command line definition.

use clap::{Parser, Subcommand};
use intransit_domain::HttpMethod;

#[derive(Debug, Parser)]
#[command(name = "intransit")]
#[command(about = "InTransit order-tracking client", version, long_about = None)]
pub struct Cli {
    /// Override the API base URL (e.g. http://localhost:8000/api)
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Log in and store the session
    Login {
        /// Account name
        #[arg(short, long)]
        username: String,
        /// Account password; read from stdin when omitted
        #[arg(short, long)]
        password: Option<String>,
    },
    /// Revoke the refresh token and clear the session
    Logout,
    /// Show the stored session
    Status,
    /// Show the logged-in user
    Profile,
    /// Send an authenticated GET request
    Get {
        /// Path relative to the base URL, or an absolute URL
        path: String,
    },
    /// Send an authenticated POST request
    Post {
        /// Path relative to the base URL, or an absolute URL
        path: String,
        /// JSON body
        #[arg(long)]
        json: Option<String>,
    },
    /// Send an authenticated request with any method
    Request {
        /// GET, POST, PUT, PATCH or DELETE (case-insensitive)
        method: HttpMethod,
        /// Path relative to the base URL, or an absolute URL
        path: String,
        /// JSON body; not allowed with GET or DELETE
        #[arg(long)]
        json: Option<String>,
    },
}

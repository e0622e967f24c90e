//! Command handlers.

use std::io::BufRead;
use std::sync::Arc;

use intransit_application::{
    ApplicationError, ApplicationResult, AuthenticatedTransport, FetchProfile, Login, LoginInput,
    Logout, SessionExpiredHandler,
};
use intransit_domain::{ApiRequest, ApiResponse, HttpMethod, UserSummary, token_preview};

use crate::cli::Command;

/// Tells the operator to log in again once the session could not be renewed.
pub struct PromptLogin;

impl SessionExpiredHandler for PromptLogin {
    fn on_session_expired(&self) {
        tracing::warn!("session expired");
        eprintln!("Your session has expired. Run `intransit login` to sign in again.");
    }
}

/// Runs one command to completion.
pub async fn run(command: Command, transport: Arc<AuthenticatedTransport>) -> ApplicationResult<()> {
    match command {
        Command::Login { username, password } => {
            let password = match password {
                Some(password) => password,
                None => read_password()?,
            };
            let output = Login::new(transport)
                .execute(LoginInput { username, password })
                .await?;
            match output.user {
                Some(user) => println!("Logged in as {}", describe(&user)),
                None => println!("Logged in"),
            }
        }
        Command::Logout => {
            let output = Logout::new(transport).execute().await?;
            if output.remote_revoked {
                println!("Logged out");
            } else {
                println!("Logged out locally");
            }
        }
        Command::Status => status(&transport).await?,
        Command::Profile => {
            let user = FetchProfile::new(transport).execute().await?;
            println!("{}", describe(&user));
        }
        Command::Get { path } => {
            send(&transport, build_request(HttpMethod::Get, path, None)?).await?;
        }
        Command::Post { path, json } => {
            send(&transport, build_request(HttpMethod::Post, path, json)?).await?;
        }
        Command::Request { method, path, json } => {
            send(&transport, build_request(method, path, json)?).await?;
        }
    }
    Ok(())
}

fn build_request(
    method: HttpMethod,
    path: String,
    json: Option<String>,
) -> ApplicationResult<ApiRequest> {
    let request = ApiRequest::new(method, path);
    let Some(json) = json else {
        return Ok(request);
    };
    if !method.accepts_body() {
        return Err(ApplicationError::InvalidInput(format!(
            "{method} requests cannot carry --json"
        )));
    }
    let body = serde_json::from_str(&json)
        .map_err(|e| ApplicationError::InvalidInput(format!("--json is not valid JSON: {e}")))?;
    Ok(request.with_json(body))
}

async fn send(transport: &AuthenticatedTransport, request: ApiRequest) -> ApplicationResult<()> {
    let response = transport.send_authenticated(&request).await?;
    print_body(&response);
    Ok(())
}

async fn status(transport: &AuthenticatedTransport) -> ApplicationResult<()> {
    let session = transport.session().load().await?;
    println!("API: {}", transport.base_url());
    match session.access_token.as_deref().filter(|t| !t.is_empty()) {
        Some(token) => println!("Access token: {}", token_preview(token)),
        None => println!("Not logged in"),
    }
    if let Some(token) = session.refresh_token.as_deref().filter(|t| !t.is_empty()) {
        println!("Refresh token: {}", token_preview(token));
    }
    Ok(())
}

fn read_password() -> ApplicationResult<String> {
    eprint!("Password: ");
    let mut line = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut line)
        .map_err(|e| ApplicationError::InvalidInput(format!("could not read password: {e}")))?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

fn describe(user: &UserSummary) -> String {
    match user.full_name.as_deref().filter(|n| !n.is_empty()) {
        Some(name) => format!("{name} ({})", user.username),
        None => user.username.clone(),
    }
}

fn print_body(response: &ApiResponse) {
    match response.body_json() {
        Some(json) => println!(
            "{}",
            serde_json::to_string_pretty(&json).unwrap_or_else(|_| response.text())
        ),
        None => println!("{}", response.text()),
    }
}

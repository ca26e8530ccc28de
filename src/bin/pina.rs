//! Terminal client for the Pina authentication backend.
//!
//! Uses the same HTTP client as the web front-end, over a session persisted
//! to a JSON file instead of browser cookies.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use pina_web::api::types::{HealthStatus, User};
use pina_web::api::{ApiClient, ApiError, auth, build_http_client};
use pina_web::config::{DEFAULT_CONNECT_TIMEOUT_SECS, DEFAULT_REQUEST_TIMEOUT_SECS};
use pina_web::forms::{FieldErrors, LoginForm, RegisterForm};
use pina_web::session::file_store::SessionFileError;
use pina_web::session::{FileStore, SessionStore};

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("{0}")]
    Api(#[from] ApiError),
    #[error(transparent)]
    Session(#[from] SessionFileError),
    #[error("invalid input: {0}")]
    Invalid(String),
    #[error("not logged in; run `pina login` first")]
    NotLoggedIn,
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "pina", about = "Pina authentication CLI")]
struct Cli {
    #[arg(long, env = "PINA_API_URL", default_value = "http://localhost:3000/api/pina")]
    api_url: String,

    /// Defaults to `$HOME/.config/pina/session.json`.
    #[arg(long, env = "PINA_SESSION_FILE")]
    session_file: Option<PathBuf>,

    #[arg(long, default_value_t = DEFAULT_REQUEST_TIMEOUT_SECS)]
    timeout_secs: u64,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Log in with email and password.
    Login(LoginArgs),
    /// Register a creator account.
    Register(RegisterArgs),
    /// Show the profile of the stored session.
    Me,
    /// Renew tokens with the stored refresh token.
    Refresh,
    /// Forget the stored session.
    Logout,
    /// Show local session state and backend health.
    Status,
}

#[derive(Args, Debug)]
struct LoginArgs {
    #[arg(long)]
    email: String,
    #[arg(long, env = "PINA_PASSWORD", hide_env_values = true)]
    password: String,
}

#[derive(Args, Debug)]
struct RegisterArgs {
    #[arg(long)]
    email: String,
    #[arg(long)]
    full_name: String,
    #[arg(long, env = "PINA_PASSWORD", hide_env_values = true)]
    password: String,
    /// `YYYY-MM-DD`.
    #[arg(long)]
    birth_date: String,
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let store = FileStore::open(cli.session_file.unwrap_or_else(default_session_file))?;
    let http = build_http_client(
        Duration::from_secs(cli.timeout_secs),
        Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
    )?;
    let api = ApiClient::new(http, &cli.api_url, store);

    match cli.command {
        Command::Login(args) => run_login(&api, args).await,
        Command::Register(args) => run_register(&api, args).await,
        Command::Me => run_me(&api).await,
        Command::Refresh => run_refresh(&api).await,
        Command::Logout => {
            api.store().clear_session();
            println!("logged out");
            Ok(())
        }
        Command::Status => run_status(&api).await,
    }
}

fn default_session_file() -> PathBuf {
    std::env::var_os("HOME")
        .map(PathBuf::from)
        .unwrap_or_default()
        .join(".config")
        .join("pina")
        .join("session.json")
}

fn invalid(errors: &FieldErrors) -> CliError {
    let message = errors
        .iter()
        .map(|(field, message)| format!("{field}: {message}"))
        .collect::<Vec<_>>()
        .join("; ");
    CliError::Invalid(message)
}

async fn run_login(api: &ApiClient<FileStore>, args: LoginArgs) -> Result<(), CliError> {
    let form = LoginForm { email: args.email, password: args.password, next: None };
    let credentials = form.validate().map_err(|e| invalid(&e))?;
    let session = auth::login(api, &credentials).await?;
    println!("logged in as {} <{}>", session.user.full_name, session.user.email);
    Ok(())
}

async fn run_register(api: &ApiClient<FileStore>, args: RegisterArgs) -> Result<(), CliError> {
    let form = RegisterForm {
        email: args.email,
        full_name: args.full_name,
        password: args.password,
        birth_date: args.birth_date,
    };
    let request = form.validate().map_err(|e| invalid(&e))?;
    let response = auth::register(api, &request).await?;
    print_json(&response)
}

async fn run_me(api: &ApiClient<FileStore>) -> Result<(), CliError> {
    if !api.store().snapshot().is_authenticated() {
        return Err(CliError::NotLoggedIn);
    }
    let user: User = auth::verify_session(api).await?;
    print_json(&user)
}

async fn run_refresh(api: &ApiClient<FileStore>) -> Result<(), CliError> {
    if api.store().refresh_token().is_none() {
        return Err(CliError::NotLoggedIn);
    }
    let session = api.refresh().await?;
    println!("session refreshed for {}", session.user.email);
    Ok(())
}

async fn run_status(api: &ApiClient<FileStore>) -> Result<(), CliError> {
    let session = api.store().snapshot();
    println!("session file: {}", api.store().path().display());
    println!("api: {}", api.base_url());
    match &session.user {
        Some(user) => println!("user: {} <{}>", user.full_name, user.email),
        None if session.is_authenticated() => println!("user: (not loaded)"),
        None => println!("user: (logged out)"),
    }

    let health: Result<HealthStatus, ApiError> = auth::health(api).await;
    match health {
        Ok(h) => println!("backend: {} ({} {})", h.status, h.env, h.version),
        Err(e) => println!("backend: unreachable ({e})"),
    }
    Ok(())
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<(), CliError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

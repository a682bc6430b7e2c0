mod render;


use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use client::auth::{AuthClient, CorruptTokenPolicy, FileTokenStore, SignInWithPasswordParams, SignUpParams, TokenStore};
use client::net::api::ApiClient;
use client::net::transport::{ReqwestTransport, TransportError};
use client::paths::{self, dashboard};
use client::state::overview::load_overview;
use client::state::session::UserSession;
use client::util::guard::{AuthGuard, GuardDecision, GuardPhase, GuardView, GuestGuard, RouteGuard};
use client::util::nav::{ADMIN_USERS_KEY, USER_MANAGEMENT_KEY, default_nav_items, filter_nav_items, is_visible};
use client::util::navigator::{MemoryNavigator, Navigator};
use client::AuthError;
use serde_json::Value;
use time::OffsetDateTime;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error("invalid API URL: {0}")]
    Transport(#[from] TransportError),
    #[error("{0}")]
    Session(String),
    #[error("redirected to {0}")]
    Redirected(String),
    #[error("your role cannot open {0}")]
    Forbidden(&'static str),
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "sampling-cli", about = "Taxi sampling dashboard CLI")]
struct Cli {
    #[arg(long, env = "SAMPLING_API_URL", default_value = "http://127.0.0.1:3000/api")]
    api_url: String,

    #[arg(long, env = "SAMPLING_TOKEN_FILE", default_value = ".sampling-session.json")]
    token_file: PathBuf,

    /// How to treat a stored token whose payload cannot be decoded
    /// (`fail-closed` or `placeholder`).
    #[arg(long, env = "SAMPLING_CORRUPT_TOKEN", default_value = "fail-closed")]
    corrupt_token: CorruptTokenPolicy,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    SignIn {
        #[arg(long)]
        email: String,
        #[arg(long, env = "SAMPLING_PASSWORD", hide_env_values = true)]
        password: String,
    },
    SignUp {
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        last_name: String,
        #[arg(long)]
        email: String,
        #[arg(long, env = "SAMPLING_PASSWORD", hide_env_values = true)]
        password: String,
    },
    SignOut,
    Whoami,
    Nav,
    Overview {
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    Taxis,
    Taxi {
        taxi_number: String,
    },
    Feedback,
    Users,
}

impl Command {
    /// Page the command stands in for; the navigator starts there.
    fn page(&self) -> &'static str {
        match self {
            Self::SignIn { .. } => paths::auth::SIGN_IN,
            Self::SignUp { .. } => paths::auth::SIGN_UP,
            Self::SignOut => paths::HOME,
            Self::Whoami => dashboard::ACCOUNT,
            Self::Nav | Self::Overview { .. } => dashboard::OVERVIEW,
            Self::Taxis => dashboard::TAXIS,
            Self::Taxi { .. } => dashboard::VEHICLE_SEARCH,
            Self::Feedback => dashboard::FEEDBACK,
            Self::Users => dashboard::ADMIN_USERS,
        }
    }
}

struct CliContext {
    auth: AuthClient,
    session: UserSession,
    navigator: Arc<MemoryNavigator>,
}

impl CliContext {
    async fn connect(cli: &Cli) -> Result<Self, CliError> {
        let transport = Arc::new(ReqwestTransport::new(&cli.api_url)?);
        let tokens: Arc<dyn TokenStore> = Arc::new(FileTokenStore::new(&cli.token_file));
        let navigator = Arc::new(MemoryNavigator::new(cli.command.page()));
        let api = ApiClient::new(transport, tokens, navigator.clone());
        let auth = AuthClient::new(api).with_corrupt_token_policy(cli.corrupt_token);
        let session = UserSession::mount(Arc::new(auth.clone())).await;
        Ok(Self { auth, session, navigator })
    }

    fn api(&self) -> &ApiClient {
        self.auth.api()
    }

    /// Gate a page behind [`AuthGuard`]; only `Children` proceeds.
    fn enter_page(&self) -> Result<(), CliError> {
        let mut guard = AuthGuard::new();
        match guard.evaluate(&self.session.snapshot(), self.navigator.as_ref()) {
            GuardView::Children => Ok(()),
            GuardView::Error(message) => Err(CliError::Session(format!(
                "{message}; run `sign-out` to discard the stored session"
            ))),
            GuardView::Nothing => Err(CliError::Redirected(self.navigator.current_path())),
        }
    }

    /// Gate a sign-in/sign-up form behind [`GuestGuard`]. A session error is
    /// an inline alert on the form, not a reason to refuse it.
    fn enter_form(&self) -> Result<(), CliError> {
        let mut guard = GuestGuard::new();
        let view = guard.evaluate(&self.session.snapshot(), self.navigator.as_ref());
        if guard.phase() != GuardPhase::Checked(GuardDecision::Allow) {
            return Err(CliError::Redirected(self.navigator.current_path()));
        }
        if let GuardView::Error(message) = view {
            eprintln!("warning: {message} (the stored session will be replaced)");
        }
        Ok(())
    }
}

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(tracing::Level::WARN)
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(cli).await {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let ctx = CliContext::connect(&cli).await?;

    match cli.command {
        Command::SignIn { email, password } => {
            ctx.enter_form()?;
            ctx.auth.sign_in_with_password(&SignInWithPasswordParams { email, password }).await?;
            let state = ctx.session.check_session().await;
            match state.user() {
                Some(user) => println!("{}", render::signed_in(user)),
                None => return Err(CliError::Session(state.error().unwrap_or("sign in failed").to_owned())),
            }
        }
        Command::SignUp { first_name, last_name, email, password } => {
            ctx.enter_form()?;
            ctx.auth.sign_up(&SignUpParams { first_name, last_name, email, password })?;
            ctx.session.check_session().await;
            println!("account created; local session started");
        }
        Command::SignOut => {
            ctx.auth.sign_out()?;
            ctx.session.check_session().await;
            println!("signed out");
        }
        Command::Whoami => {
            ctx.enter_page()?;
            if let Some(user) = ctx.session.snapshot().user() {
                print!("{}", render::user(user));
            }
        }
        Command::Nav => {
            ctx.enter_page()?;
            let role = ctx.session.snapshot().user().and_then(client::net::types::User::role);
            print!("{}", render::nav(&filter_nav_items(&default_nav_items(), role.as_ref())));
        }
        Command::Overview { json } => {
            ctx.enter_page()?;
            let overview = load_overview(ctx.api(), OffsetDateTime::now_utc().date()).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&overview)?);
            } else {
                print!("{}", render::overview(&overview));
            }
        }
        Command::Taxis => {
            ctx.enter_page()?;
            print_json(&ctx.api().list_taxis().await?)?;
        }
        Command::Taxi { taxi_number } => {
            ctx.enter_page()?;
            print_json(&ctx.api().find_taxi(&taxi_number).await?)?;
        }
        Command::Feedback => {
            ctx.enter_page()?;
            print_json(&ctx.api().list_feedback().await?)?;
        }
        Command::Users => {
            ctx.enter_page()?;
            let role = ctx.session.snapshot().user().and_then(client::net::types::User::role);
            let items = filter_nav_items(&default_nav_items(), role.as_ref());
            if !is_visible(&items, USER_MANAGEMENT_KEY) {
                return Err(CliError::Forbidden(dashboard::ADMIN_USERS));
            }
            let users = ctx.api().list_users().await?;
            if is_visible(&items, ADMIN_USERS_KEY) {
                print_json(&users)?;
            } else {
                print_json(&render::only_role(&users, "promoter"))?;
            }
        }
    }

    ctx.session.unmount();
    Ok(())
}

fn print_json(value: &Value) -> Result<(), CliError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

//! `recipehub` command-line entry-point.
//!
//! A thin inbound adapter: each invocation restores the persisted session,
//! seeds the recipe store and runs one command against them.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

use std::ffi::OsString;
use std::io;
use std::sync::Arc;

use clap::{Parser, Subcommand, ValueEnum};
use mockable::DefaultClock;
use ortho_config::OrthoConfig;
use tokio::runtime::Builder;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

use recipehub::domain::ports::FixtureLoginService;
use recipehub::domain::{
    Capability, CookSession, DomainError, ErrorCode, LoginCredentials, Recipe, RecipeId,
    RecipeStore, ServingsMultiplier, SessionStore, SignupForm, User, find_recipe,
    format_countdown, scale, scaled_servings,
};
use recipehub::example_data::seed_recipe_store;
use recipehub::outbound::FileSessionRecordStore;
use recipehub::settings::AppSettings;

type Session = SessionStore<FixtureLoginService, FileSessionRecordStore>;

/// `recipehub` command arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "recipehub",
    about = "Browse, share and cook recipes from the terminal",
    version
)]
struct CliArgs {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, Subcommand)]
enum Command {
    /// Sign in and remember the session.
    Login {
        /// Account email.
        #[arg(long)]
        email: String,
        /// Account password.
        #[arg(long)]
        password: String,
    },
    /// Create an account and sign in.
    Signup {
        /// Full name.
        #[arg(long)]
        name: String,
        /// Account email.
        #[arg(long)]
        email: String,
        /// Account password.
        #[arg(long)]
        password: String,
        /// Password confirmation.
        #[arg(long = "confirm-password")]
        confirm_password: String,
    },
    /// Sign out and forget the session.
    Logout,
    /// Show the signed-in user.
    Whoami,
    /// List recipes.
    Recipes {
        /// Which recipes to list.
        #[arg(long, value_enum, default_value_t = RecipeView::All)]
        view: RecipeView,
    },
    /// Check whether the signed-in user may do something with a recipe.
    Can {
        /// Recipe identifier.
        recipe_id: RecipeId,
        /// Capability name, such as `edit_own`.
        capability: Capability,
    },
    /// Show a recipe's ingredients scaled by a multiplier.
    Scale {
        /// Recipe identifier.
        recipe_id: RecipeId,
        /// Positive multiple of 0.25.
        #[arg(long, default_value = "1")]
        multiplier: ServingsMultiplier,
    },
    /// Print the cook-mode step plan with timers.
    Cook {
        /// Recipe identifier.
        recipe_id: RecipeId,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum RecipeView {
    /// Every recipe, public or not.
    All,
    /// Recipes owned by the signed-in user.
    Owned,
    /// Recipes the signed-in user was invited to.
    Shared,
    /// Public recipes.
    Public,
}

fn main() -> io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .with_writer(io::stderr)
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|error| io::Error::other(format!("create Tokio runtime: {error}")))?;
    runtime.block_on(async_main())
}

async fn async_main() -> io::Result<()> {
    let args = parse_args(std::env::args_os()).unwrap_or_else(|error| error.exit());
    let settings = load_settings()?;

    let records = FileSessionRecordStore::open(&settings.session_dir())
        .map_err(|error| io::Error::other(format!("open session store: {error}")))?;
    let mut session: Session = SessionStore::new(Arc::new(FixtureLoginService), Arc::new(records));
    session.restore_session();
    let store = seed_recipe_store(&settings, Arc::new(DefaultClock));

    match args.command {
        Command::Login { email, password } => {
            let credentials = LoginCredentials::try_from_parts(&email, &password)
                .map_err(|error| to_io_error(error.into()))?;
            login(&mut session, &credentials).await
        }
        Command::Signup {
            name,
            email,
            password,
            confirm_password,
        } => {
            let form = SignupForm::try_from_parts(&name, &email, &password, &confirm_password)
                .map_err(|error| to_io_error(error.into()))?;
            login(&mut session, &form.into_credentials()).await
        }
        Command::Logout => {
            session.logout();
            println!("logged out");
            Ok(())
        }
        Command::Whoami => {
            match session.current_user() {
                Some(user) => print_user(user),
                None => println!("not logged in"),
            }
            Ok(())
        }
        Command::Recipes { view } => {
            list_recipes(&store, session.current_user(), view);
            Ok(())
        }
        Command::Can {
            recipe_id,
            capability,
        } => {
            let recipe = find_recipe(&store, &recipe_id).map_err(to_io_error)?;
            let allowed = session.can_perform(Some(recipe), capability);
            println!("{capability}={allowed}");
            Ok(())
        }
        Command::Scale {
            recipe_id,
            multiplier,
        } => {
            let recipe = find_recipe(&store, &recipe_id).map_err(to_io_error)?;
            print_scaled(recipe, multiplier);
            Ok(())
        }
        Command::Cook { recipe_id } => {
            let recipe = find_recipe(&store, &recipe_id).map_err(to_io_error)?;
            print_cook_plan(recipe)
        }
    }
}

/// Load settings from `RECIPEHUB_*` variables and configuration files.
fn load_settings() -> io::Result<AppSettings> {
    AppSettings::load_from_iter([OsString::from("recipehub")])
        .map_err(|error| io::Error::other(format!("load settings: {error}")))
}

/// Parse command-line arguments.
///
/// Help, version and usage errors come back as [`clap::Error`] so the caller
/// can let clap print them with its own exit code.
fn parse_args<I, T>(args: I) -> Result<CliArgs, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    CliArgs::try_parse_from(args)
}

async fn login(session: &mut Session, credentials: &LoginCredentials) -> io::Result<()> {
    let user = session.login(credentials).await.map_err(to_io_error)?;
    print_user(user);
    Ok(())
}

/// Map a domain failure onto the closest I/O error kind.
fn to_io_error(error: DomainError) -> io::Error {
    let kind = match error.code() {
        ErrorCode::InvalidRequest => io::ErrorKind::InvalidInput,
        ErrorCode::Unauthorized | ErrorCode::Forbidden => io::ErrorKind::PermissionDenied,
        ErrorCode::NotFound => io::ErrorKind::NotFound,
        _ => io::ErrorKind::Other,
    };
    io::Error::new(kind, error)
}

fn print_user(user: &User) {
    println!("id={}", user.id());
    println!("name={}", user.name());
    println!("email={}", user.email());
}

fn list_recipes(store: &RecipeStore, current_user: Option<&User>, view: RecipeView) {
    let recipes: Vec<&Recipe> = match view {
        RecipeView::All => store.recipes().iter().collect(),
        RecipeView::Owned => store.owned_recipes(current_user),
        RecipeView::Shared => store.shared_recipes(current_user),
        RecipeView::Public => store.public_recipes(),
    };
    for recipe in recipes {
        let visibility = if recipe.is_public { "public" } else { "private" };
        println!(
            "{}\t{}\t{}\t{visibility}",
            recipe.id, recipe.title, recipe.owner.name
        );
    }
}

fn print_scaled(recipe: &Recipe, multiplier: ServingsMultiplier) {
    println!("title={}", recipe.title);
    println!("multiplier={multiplier}");
    println!("servings={}", scaled_servings(recipe.servings, multiplier));
    for ingredient in scale(&recipe.ingredients, multiplier) {
        let unit = if ingredient.unit.is_empty() {
            String::new()
        } else {
            format!(" {}", ingredient.unit)
        };
        println!("- {}{unit} {}", ingredient.quantity, ingredient.name);
    }
}

fn print_cook_plan(recipe: &Recipe) -> io::Result<()> {
    let mut session = CookSession::new(recipe).ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::InvalidData,
            format!("recipe {} has no steps", recipe.id),
        )
    })?;
    println!("title={}", recipe.title);
    loop {
        let step = session.current_step();
        let timer = step
            .timer_seconds()
            .map(|seconds| format!(" [timer {}]", format_countdown(seconds)))
            .unwrap_or_default();
        println!(
            "step {}/{} ({:.0}%): {}{timer}",
            session.step_number(),
            session.total_steps(),
            session.progress_percent(),
            step.description
        );
        if !session.next_step() {
            break;
        }
    }
    session.close();
    Ok(())
}

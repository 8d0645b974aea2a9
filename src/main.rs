//! FitTrack - Personal Fitness Tracker
//!
//! Command-line entry point.

use std::io::Write;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use fittrack::recommendations::TipCategory;
use fittrack::session::{clear_session, load_session, save_session};
use fittrack::storage::config::{get_data_dir, load_config_from};
use fittrack::storage::Database;

mod app;

use app::{App, GoalArgs, LoginArgs, ProfileArgs, ProgressArgs, RegisterArgs, WorkoutArgs};

/// Track workouts, goals and progress, and get lifestyle recommendations.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Directory holding the database, configuration and session
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Print listings as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an account.
    Register(RegisterArgs),
    /// Sign in and remember the session.
    Login(LoginArgs),
    /// Forget the current session.
    Logout,
    /// Show the signed-in user.
    Whoami,
    /// Show or update the profile.
    #[command(subcommand)]
    Profile(ProfileCommand),
    /// Manage workouts.
    #[command(subcommand)]
    Workout(WorkoutCommand),
    /// Manage goals.
    #[command(subcommand)]
    Goal(GoalCommand),
    /// Manage progress entries of a goal.
    #[command(subcommand)]
    Progress(ProgressCommand),
    /// Show lifestyle tips (hydration, meditation, exercise).
    Tips { category: TipCategory },
    /// Database maintenance.
    #[command(subcommand)]
    Db(DbCommand),
}

#[derive(Subcommand)]
enum ProfileCommand {
    Show,
    /// Update profile fields and show the weight recommendation.
    Update(ProfileArgs),
}

#[derive(Subcommand)]
enum WorkoutCommand {
    /// List the available workout types.
    Types,
    List,
    Show { id: i64 },
    Add(WorkoutArgs),
    Edit {
        id: i64,
        #[command(flatten)]
        fields: WorkoutArgs,
    },
    Delete { id: i64 },
    /// Export all workouts as CSV.
    Export {
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
enum GoalCommand {
    List,
    /// Show a goal and its progress.
    Show { id: i64 },
    Add(GoalArgs),
    Edit {
        id: i64,
        #[command(flatten)]
        fields: GoalArgs,
    },
    /// Delete a goal and its progress entries.
    Delete { id: i64 },
}

#[derive(Subcommand)]
enum ProgressCommand {
    List {
        goal_id: i64,
    },
    Add {
        goal_id: i64,
        #[command(flatten)]
        fields: ProgressArgs,
    },
    Edit {
        id: i64,
        /// Move the entry to another goal
        #[arg(long = "goal")]
        goal_id: Option<i64>,
        #[command(flatten)]
        fields: ProgressArgs,
    },
    Delete {
        id: i64,
    },
}

#[derive(Subcommand)]
enum DbCommand {
    /// Drop all data and recreate an empty database.
    Reset {
        #[arg(long)]
        yes: bool,
    },
}

fn main() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let data_dir = cli.data_dir.unwrap_or_else(get_data_dir);
    let config = load_config_from(&data_dir).context("Failed to load configuration")?;

    tracing::debug!(
        "Starting FitTrack v{} with data in {}",
        env!("CARGO_PKG_VERSION"),
        data_dir.display()
    );

    let db = Database::open_with_policy(&config.database_path(), config.storage.upgrade_policy)
        .context("Failed to open database")?;

    if let Commands::Db(DbCommand::Reset { yes }) = cli.command {
        if !yes {
            bail!("Refusing to erase all data without --yes");
        }
        db.recreate()?;
        clear_session(&data_dir)?;
        println!("Database reset.");
        return Ok(());
    }

    let session = load_session(&data_dir)?;
    let stdout = std::io::stdout();
    let mut app = App::new(&db, &config, session.clone(), cli.json, stdout.lock());

    match cli.command {
        Commands::Register(args) => app.register(args)?,
        Commands::Login(args) => app.login(args)?,
        Commands::Logout => app.logout()?,
        Commands::Whoami => app.whoami()?,
        Commands::Profile(ProfileCommand::Show) => app.profile_show()?,
        Commands::Profile(ProfileCommand::Update(args)) => app.profile_update(args)?,
        Commands::Workout(command) => match command {
            WorkoutCommand::Types => app.workout_types()?,
            WorkoutCommand::List => app.workout_list()?,
            WorkoutCommand::Show { id } => app.workout_show(id)?,
            WorkoutCommand::Add(args) => app.workout_add(args)?,
            WorkoutCommand::Edit { id, fields } => app.workout_edit(id, fields)?,
            WorkoutCommand::Delete { id } => app.workout_delete(id)?,
            WorkoutCommand::Export { output } => app.workout_export(output)?,
        },
        Commands::Goal(command) => match command {
            GoalCommand::List => app.goal_list()?,
            GoalCommand::Show { id } => app.goal_show(id)?,
            GoalCommand::Add(args) => app.goal_add(args)?,
            GoalCommand::Edit { id, fields } => app.goal_edit(id, fields)?,
            GoalCommand::Delete { id } => app.goal_delete(id)?,
        },
        Commands::Progress(command) => match command {
            ProgressCommand::List { goal_id } => app.progress_list(goal_id)?,
            ProgressCommand::Add { goal_id, fields } => app.progress_add(goal_id, fields)?,
            ProgressCommand::Edit {
                id,
                goal_id,
                fields,
            } => app.progress_edit(id, goal_id, fields)?,
            ProgressCommand::Delete { id } => app.progress_delete(id)?,
        },
        Commands::Tips { category } => app.tips(category)?,
        Commands::Db(_) => {}
    }

    let new_session = app.session().cloned();
    app.into_output().flush()?;

    if new_session != session {
        match &new_session {
            Some(session) => save_session(&data_dir, session)?,
            None => clear_session(&data_dir)?,
        }
    }

    Ok(())
}

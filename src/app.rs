//! Command handlers.
//!
//! Each handler validates raw arguments, calls the repository and prints the
//! outcome. Handlers work against any [`Repository`], so the SQLite store and
//! the in-memory one are interchangeable.

use std::io::Write;
use std::path::PathBuf;

use anyhow::{anyhow, bail, Context, Result};
use clap::Args;
use serde_json::json;

use fittrack::goals::{Goal, GoalId, ProgressId};
use fittrack::recommendations::{weight_recommendation, TipCategory};
use fittrack::session::Session;
use fittrack::storage::{AppConfig, Repository};
use fittrack::users::User;
use fittrack::validation::{
    GoalForm, LoginForm, ProfileForm, ProgressForm, RegistrationForm, WorkoutForm,
};
use fittrack::workouts::export::{export_csv_to_file, generate_csv_filename};
use fittrack::workouts::{Workout, WorkoutId};

/// Registration arguments.
#[derive(Debug, Clone, Default, Args)]
pub struct RegisterArgs {
    #[arg(long)]
    pub username: String,
    #[arg(long)]
    pub email: String,
    #[arg(long)]
    pub password: String,
    #[arg(long)]
    pub confirm_password: String,
    #[arg(long)]
    pub age: String,
    #[arg(long)]
    pub gender: String,
    /// Weight in kilograms
    #[arg(long)]
    pub weight: String,
    /// Height in centimeters
    #[arg(long)]
    pub height: String,
}

#[derive(Debug, Clone, Default, Args)]
pub struct LoginArgs {
    #[arg(long)]
    pub email: String,
    #[arg(long)]
    pub password: String,
}

/// Profile fields; omitted ones keep their stored value.
#[derive(Debug, Clone, Default, Args)]
pub struct ProfileArgs {
    #[arg(long)]
    pub age: Option<String>,
    #[arg(long)]
    pub gender: Option<String>,
    #[arg(long)]
    pub weight: Option<String>,
    #[arg(long)]
    pub height: Option<String>,
}

/// Workout fields. All are needed to add; editing keeps omitted ones.
#[derive(Debug, Clone, Default, Args)]
pub struct WorkoutArgs {
    /// Workout type id or name
    #[arg(long = "type")]
    pub workout_type: Option<String>,
    /// Duration in minutes
    #[arg(long)]
    pub duration: Option<String>,
    /// Distance in kilometers
    #[arg(long)]
    pub distance: Option<String>,
    #[arg(long)]
    pub calories: Option<String>,
    #[arg(long)]
    pub start: Option<String>,
    #[arg(long)]
    pub end: Option<String>,
}

/// Goal fields. The status defaults to the first configured one.
#[derive(Debug, Clone, Default, Args)]
pub struct GoalArgs {
    #[arg(long = "type")]
    pub goal_type: Option<String>,
    #[arg(long)]
    pub target: Option<String>,
    /// Start date (YYYY-MM-DD)
    #[arg(long)]
    pub start: Option<String>,
    /// End date (YYYY-MM-DD)
    #[arg(long)]
    pub end: Option<String>,
    #[arg(long)]
    pub status: Option<String>,
}

/// Progress fields. The date defaults to today.
#[derive(Debug, Clone, Default, Args)]
pub struct ProgressArgs {
    #[arg(long)]
    pub value: Option<String>,
    /// Date (YYYY-MM-DD)
    #[arg(long)]
    pub date: Option<String>,
}

fn overwrite(field: &mut String, value: Option<String>) {
    if let Some(value) = value {
        *field = value;
    }
}

/// Command context: storage, configuration, the signed-in user and output.
pub struct App<'a, R: Repository + ?Sized, W: Write> {
    repo: &'a R,
    config: &'a AppConfig,
    session: Option<Session>,
    json: bool,
    out: W,
}

impl<'a, R: Repository + ?Sized, W: Write> App<'a, R, W> {
    pub fn new(
        repo: &'a R,
        config: &'a AppConfig,
        session: Option<Session>,
        json: bool,
        out: W,
    ) -> Self {
        Self {
            repo,
            config,
            session,
            json,
            out,
        }
    }

    /// The session after the command ran.
    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn into_output(self) -> W {
        self.out
    }

    fn require_session(&self) -> Result<&Session> {
        self.session
            .as_ref()
            .ok_or_else(|| anyhow!("Not signed in; run `fittrack login` first"))
    }

    fn current_user(&self) -> Result<User> {
        let session = self.require_session()?;
        self.repo
            .get_user(session.user_id)?
            .ok_or_else(|| anyhow!("Signed-in user {} no longer exists", session.username))
    }

    fn print_json(&mut self, value: &serde_json::Value) -> Result<()> {
        writeln!(self.out, "{}", serde_json::to_string_pretty(value)?)?;
        Ok(())
    }

    // ---- Accounts ----

    pub fn register(&mut self, args: RegisterArgs) -> Result<()> {
        let form = RegistrationForm {
            username: args.username,
            email: args.email,
            password: args.password,
            confirm_password: args.confirm_password,
            age: args.age,
            gender: args.gender,
            weight: args.weight,
            height: args.height,
        };
        let new_user = form.validate(&self.config.vocabulary.genders)?;

        let id = self
            .repo
            .insert_user(&new_user)
            .context("Registration failed")?;
        tracing::info!("Registered user {}", id);

        writeln!(
            self.out,
            "Registered {} (id {}). Sign in with `fittrack login`.",
            new_user.username, id
        )?;
        Ok(())
    }

    pub fn login(&mut self, args: LoginArgs) -> Result<()> {
        let (email, password) = LoginForm {
            email: args.email,
            password: args.password,
        }
        .validate()?;

        let user = self
            .repo
            .authenticate(&email, &password)?
            .ok_or_else(|| anyhow!("Invalid email or password"))?;

        tracing::info!("User {} signed in", user.id);
        writeln!(self.out, "Welcome, {}!", user.username)?;
        self.session = Some(Session::new(&user));
        Ok(())
    }

    pub fn logout(&mut self) -> Result<()> {
        match self.session.take() {
            Some(session) => writeln!(self.out, "Goodbye, {}.", session.username)?,
            None => writeln!(self.out, "Not signed in.")?,
        }
        Ok(())
    }

    pub fn whoami(&mut self) -> Result<()> {
        match &self.session {
            Some(session) => {
                writeln!(self.out, "{} (id {})", session.username, session.user_id)?
            }
            None => writeln!(self.out, "Not signed in.")?,
        }
        Ok(())
    }

    // ---- Profile ----

    pub fn profile_show(&mut self) -> Result<()> {
        let user = self.current_user()?;
        let advice = weight_recommendation(user.weight_kg, user.height_cm);

        if self.json {
            return self.print_json(&json!({
                "user": user,
                "bmi": user.bmi(),
                "recommendation": advice.map(|a| a.message()),
            }));
        }

        writeln!(self.out, "Username: {}", user.username)?;
        writeln!(self.out, "Email:    {}", user.email)?;
        writeln!(self.out, "Age:      {}", user.age)?;
        writeln!(self.out, "Gender:   {}", user.gender)?;
        writeln!(self.out, "Weight:   {} kg", user.weight_kg)?;
        writeln!(self.out, "Height:   {} cm", user.height_cm)?;
        writeln!(
            self.out,
            "Member since {}",
            user.created_at.format("%Y-%m-%d")
        )?;
        if let (Some(bmi), Some(advice)) = (user.bmi(), advice) {
            writeln!(self.out, "BMI:      {:.1}", bmi)?;
            writeln!(self.out, "{}", advice)?;
        }
        Ok(())
    }

    /// Update the profile and show the resulting weight recommendation.
    pub fn profile_update(&mut self, args: ProfileArgs) -> Result<()> {
        let mut user = self.current_user()?;

        let mut form = ProfileForm::from_user(&user);
        overwrite(&mut form.age, args.age);
        overwrite(&mut form.gender, args.gender);
        overwrite(&mut form.weight, args.weight);
        overwrite(&mut form.height, args.height);
        let update = form.validate(&self.config.vocabulary.genders)?;

        if !self.repo.update_user(user.id, &update)? {
            bail!("Profile update failed");
        }
        update.apply_to(&mut user);

        writeln!(self.out, "Profile updated.")?;
        if let Some(advice) = weight_recommendation(user.weight_kg, user.height_cm) {
            writeln!(self.out, "{}", advice)?;
        }
        Ok(())
    }

    // ---- Workouts ----

    pub fn workout_types(&mut self) -> Result<()> {
        let types = self.repo.list_workout_types()?;

        if self.json {
            return self.print_json(&json!(types));
        }

        for workout_type in &types {
            writeln!(self.out, "{:>3}  {}", workout_type.id, workout_type.name)?;
        }
        Ok(())
    }

    pub fn workout_list(&mut self) -> Result<()> {
        let user_id = self.require_session()?.user_id;
        let workouts = self.repo.list_workouts(user_id)?;

        if self.json {
            return self.print_json(&json!(workouts));
        }

        if workouts.is_empty() {
            writeln!(self.out, "No workouts yet.")?;
        }
        for workout in &workouts {
            self.print_workout_line(workout)?;
        }
        Ok(())
    }

    fn print_workout_line(&mut self, workout: &Workout) -> Result<()> {
        writeln!(
            self.out,
            "#{}  {}  {} min  {} km  {} kcal  {} -> {}",
            workout.id,
            workout.workout_type_name.as_deref().unwrap_or("?"),
            workout.duration_minutes,
            workout.distance_km,
            workout.calories,
            workout.start_time,
            workout.end_time,
        )?;
        Ok(())
    }

    /// Fetch one of the signed-in user's workouts.
    fn owned_workout(&self, id: WorkoutId) -> Result<Workout> {
        let user_id = self.require_session()?.user_id;
        self.repo
            .get_workout(id)?
            .filter(|w| w.user_id == user_id)
            .ok_or_else(|| anyhow!("No workout with id {}", id))
    }

    pub fn workout_show(&mut self, id: WorkoutId) -> Result<()> {
        let workout = self.owned_workout(id)?;

        if self.json {
            return self.print_json(&json!(workout));
        }
        self.print_workout_line(&workout)
    }

    pub fn workout_add(&mut self, args: WorkoutArgs) -> Result<()> {
        let user_id = self.require_session()?.user_id;

        let mut form = WorkoutForm::default();
        overwrite(&mut form.workout_type, args.workout_type);
        overwrite(&mut form.duration, args.duration);
        overwrite(&mut form.distance, args.distance);
        overwrite(&mut form.calories, args.calories);
        overwrite(&mut form.start_time, args.start);
        overwrite(&mut form.end_time, args.end);

        let types = self.repo.list_workout_types()?;
        let input = form.validate(user_id, &types)?;
        let id = self
            .repo
            .insert_workout(&input)
            .context("Failed to save workout")?;

        writeln!(self.out, "Workout {} saved.", id)?;
        Ok(())
    }

    pub fn workout_edit(&mut self, id: WorkoutId, args: WorkoutArgs) -> Result<()> {
        let workout = self.owned_workout(id)?;

        let mut form = WorkoutForm::from_workout(&workout);
        overwrite(&mut form.workout_type, args.workout_type);
        overwrite(&mut form.duration, args.duration);
        overwrite(&mut form.distance, args.distance);
        overwrite(&mut form.calories, args.calories);
        overwrite(&mut form.start_time, args.start);
        overwrite(&mut form.end_time, args.end);

        let types = self.repo.list_workout_types()?;
        let input = form.validate(workout.user_id, &types)?;
        if !self.repo.update_workout(id, &input)? {
            bail!("Failed to update workout {}", id);
        }

        writeln!(self.out, "Workout {} updated.", id)?;
        Ok(())
    }

    pub fn workout_delete(&mut self, id: WorkoutId) -> Result<()> {
        self.owned_workout(id)?;
        if self.repo.delete_workout(id)? == 0 {
            bail!("Failed to delete workout {}", id);
        }

        writeln!(self.out, "Workout {} deleted.", id)?;
        Ok(())
    }

    /// Write the signed-in user's workouts to a CSV file.
    pub fn workout_export(&mut self, output: Option<PathBuf>) -> Result<()> {
        let session = self.require_session()?.clone();

        let path = match output {
            Some(path) => path,
            None => {
                let dir = self.config.export_dir();
                std::fs::create_dir_all(&dir)
                    .with_context(|| format!("Cannot create {}", dir.display()))?;
                dir.join(generate_csv_filename(&session.username))
            }
        };

        let count = export_csv_to_file(self.repo, session.user_id, &path)
            .context("Export failed")?;

        writeln!(
            self.out,
            "Exported {} workouts to {}",
            count,
            path.display()
        )?;
        Ok(())
    }

    // ---- Goals ----

    /// Fetch one of the signed-in user's goals.
    fn owned_goal(&self, id: GoalId) -> Result<Goal> {
        let user_id = self.require_session()?.user_id;
        self.repo
            .get_goal(id)?
            .filter(|g| g.user_id == user_id)
            .ok_or_else(|| anyhow!("No goal with id {}", id))
    }

    fn print_goal_line(&mut self, goal: &Goal) -> Result<()> {
        writeln!(
            self.out,
            "#{}  {}  target {}  {} -> {}  [{}]",
            goal.id, goal.goal_type, goal.target_value, goal.start_date, goal.end_date, goal.status
        )?;
        Ok(())
    }

    pub fn goal_list(&mut self) -> Result<()> {
        let user_id = self.require_session()?.user_id;
        let goals = self.repo.list_goals(user_id)?;

        if self.json {
            return self.print_json(&json!(goals));
        }

        if goals.is_empty() {
            writeln!(self.out, "No goals yet.")?;
        }
        for goal in &goals {
            self.print_goal_line(goal)?;
        }
        Ok(())
    }

    /// Show a goal with its progress entries.
    pub fn goal_show(&mut self, id: GoalId) -> Result<()> {
        let goal = self.owned_goal(id)?;
        let progress = self.repo.list_progress(id)?;
        let status_index = goal.status_index(&self.config.vocabulary.goal_statuses);

        if self.json {
            return self.print_json(&json!({
                "goal": goal,
                "status_index": status_index,
                "progress": progress,
            }));
        }

        self.print_goal_line(&goal)?;
        if status_index.is_none() {
            writeln!(self.out, "  (status not in the configured list)")?;
        }
        for entry in &progress {
            writeln!(self.out, "  #{}  {}  {}", entry.id, entry.date, entry.value)?;
        }
        Ok(())
    }

    pub fn goal_add(&mut self, args: GoalArgs) -> Result<()> {
        let user_id = self.require_session()?.user_id;
        let statuses = &self.config.vocabulary.goal_statuses;

        let mut form = GoalForm {
            status: statuses.first().cloned().unwrap_or_default(),
            ..Default::default()
        };
        overwrite(&mut form.goal_type, args.goal_type);
        overwrite(&mut form.target_value, args.target);
        overwrite(&mut form.start_date, args.start);
        overwrite(&mut form.end_date, args.end);
        overwrite(&mut form.status, args.status);

        let input = form.validate(user_id, statuses)?;
        let id = self
            .repo
            .insert_goal(&input)
            .context("Failed to save goal")?;

        writeln!(self.out, "Goal {} saved.", id)?;
        Ok(())
    }

    pub fn goal_edit(&mut self, id: GoalId, args: GoalArgs) -> Result<()> {
        let mut goal = self.owned_goal(id)?;

        let mut form = GoalForm::from_goal(&goal);
        overwrite(&mut form.goal_type, args.goal_type);
        overwrite(&mut form.target_value, args.target);
        overwrite(&mut form.start_date, args.start);
        overwrite(&mut form.end_date, args.end);
        overwrite(&mut form.status, args.status);

        let input = form.validate_edit(&goal, &self.config.vocabulary.goal_statuses)?;
        goal.apply(&input);
        if self.repo.update_goal(&goal)? == 0 {
            bail!("Failed to update goal {}", id);
        }

        writeln!(self.out, "Goal {} updated.", id)?;
        Ok(())
    }

    /// Delete a goal; its progress entries go with it.
    pub fn goal_delete(&mut self, id: GoalId) -> Result<()> {
        self.owned_goal(id)?;
        if self.repo.delete_goal(id)? == 0 {
            bail!("Failed to delete goal {}", id);
        }

        writeln!(self.out, "Goal {} deleted.", id)?;
        Ok(())
    }

    // ---- Progress ----

    pub fn progress_list(&mut self, goal_id: GoalId) -> Result<()> {
        self.owned_goal(goal_id)?;
        let entries = self.repo.list_progress(goal_id)?;

        if self.json {
            return self.print_json(&json!(entries));
        }

        if entries.is_empty() {
            writeln!(self.out, "No progress recorded for goal {}.", goal_id)?;
        }
        for entry in &entries {
            writeln!(self.out, "#{}  {}  {}", entry.id, entry.date, entry.value)?;
        }
        Ok(())
    }

    pub fn progress_add(&mut self, goal_id: GoalId, args: ProgressArgs) -> Result<()> {
        self.owned_goal(goal_id)?;

        let form = ProgressForm {
            value: args.value.unwrap_or_default(),
            date: args
                .date
                .unwrap_or_else(|| chrono::Local::now().format("%Y-%m-%d").to_string()),
        };
        let (value, date) = form.validate()?;

        let id = self
            .repo
            .insert_progress(goal_id, value, &date)
            .context("Failed to save progress")?;

        writeln!(self.out, "Progress {} recorded.", id)?;
        Ok(())
    }

    /// Edit an entry; `goal_id` moves it to another of the user's goals.
    pub fn progress_edit(
        &mut self,
        id: ProgressId,
        goal_id: Option<GoalId>,
        args: ProgressArgs,
    ) -> Result<()> {
        let entry = self
            .repo
            .get_progress(id)?
            .ok_or_else(|| anyhow!("No progress entry with id {}", id))?;
        self.owned_goal(entry.goal_id)
            .map_err(|_| anyhow!("No progress entry with id {}", id))?;

        let goal_id = goal_id.unwrap_or(entry.goal_id);
        if goal_id != entry.goal_id {
            self.owned_goal(goal_id)?;
        }

        let form = ProgressForm {
            value: args.value.unwrap_or_else(|| entry.value.to_string()),
            date: args.date.unwrap_or(entry.date),
        };
        let (value, date) = form.validate()?;

        if !self.repo.update_progress(id, goal_id, value, &date)? {
            bail!("Failed to update progress entry {}", id);
        }

        writeln!(self.out, "Progress {} updated.", id)?;
        Ok(())
    }

    pub fn progress_delete(&mut self, id: ProgressId) -> Result<()> {
        let entry = self
            .repo
            .get_progress(id)?
            .ok_or_else(|| anyhow!("No progress entry with id {}", id))?;
        self.owned_goal(entry.goal_id)
            .map_err(|_| anyhow!("No progress entry with id {}", id))?;

        if self.repo.delete_progress(id)? == 0 {
            bail!("Failed to delete progress entry {}", id);
        }

        writeln!(self.out, "Progress {} deleted.", id)?;
        Ok(())
    }

    // ---- Recommendations ----

    pub fn tips(&mut self, category: TipCategory) -> Result<()> {
        if self.json {
            return self.print_json(&json!({
                "category": category,
                "tips": category.tips(),
            }));
        }

        writeln!(self.out, "{} tips:", category)?;
        for tip in category.tips() {
            writeln!(self.out, "- {}", tip)?;
        }
        Ok(())
    }
}

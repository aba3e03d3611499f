//! Interactive terminal client for the taskdeck backend.
//!
//! Subcommands cover registration, login/logout and an interactive task
//! session that walks the dashboard, task form and task detail screens.

use anyhow::Result;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use console::style;
use dialoguer::{Confirm, Input, Password, Select, theme::ColorfulTheme};
use std::sync::Arc;
use taskdeck_api::{AuthRequest, Priority, RegistrationRequest, Task, TaskStatus};
use taskdeck_app::{Dashboard, Route, TaskDetail, TaskForm};
use taskdeck_client::{AuthClient, ClientConfig, FileTokenStore, Session, TaskClient};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Backend URL (falls back to TASKDECK_SERVER_URL, then localhost:8080)
    #[arg(short, long)]
    server: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Register a new user
    Register {
        #[arg(short, long)]
        username: Option<String>,
    },
    /// Login with existing credentials
    Login {
        #[arg(short, long)]
        username: Option<String>,
    },
    /// Forget the stored session token
    Logout,
    /// Start an interactive task session
    Tasks,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("taskdeck=info".parse()?),
        )
        .init();

    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let server_url = cli
        .server
        .clone()
        .or_else(|| std::env::var("TASKDECK_SERVER_URL").ok())
        .unwrap_or_else(|| "http://localhost:8080".to_string());

    let config = ClientConfig::new(server_url);
    let session = Session::new(Arc::new(FileTokenStore::new()?));
    let auth = AuthClient::new(&config, session.clone())?;
    let tasks = TaskClient::new(&config, session.clone())?;

    match cli.command {
        Commands::Register { username } => register(&auth, username).await?,
        Commands::Login { username } => {
            login(&auth, username).await?;
        }
        Commands::Logout => {
            session.clear().await?;
            println!("{} Logged out.", style("✓").green());
        }
        Commands::Tasks => run_session(&auth, &tasks, &session).await?,
    }

    Ok(())
}

fn prompt_username(username: Option<String>) -> Result<String> {
    Ok(match username {
        Some(username) => username,
        None => Input::with_theme(&ColorfulTheme::default())
            .with_prompt("Username")
            .interact_text()?,
    })
}

async fn register(auth: &AuthClient, username: Option<String>) -> Result<()> {
    let username = prompt_username(username)?;
    let password = Password::with_theme(&ColorfulTheme::default())
        .with_prompt("Password")
        .interact()?;
    let email: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt("Email")
        .interact_text()?;

    match auth
        .register(&RegistrationRequest {
            username,
            password,
            email,
        })
        .await
    {
        Ok(envelope) if envelope.success => {
            println!("{} {}", style("✓").green(), envelope.message);
        }
        _ => println!("{} Registration failed.", style("✗").red()),
    }

    Ok(())
}

async fn login(auth: &AuthClient, username: Option<String>) -> Result<bool> {
    let username = prompt_username(username)?;
    let password = Password::with_theme(&ColorfulTheme::default())
        .with_prompt("Password")
        .interact()?;

    match auth.login(&AuthRequest { username, password }).await {
        Ok(envelope) if envelope.success => {
            println!("{} Login successful!", style("✓").green());
            Ok(true)
        }
        _ => {
            println!("{} Login failed.", style("✗").red());
            Ok(false)
        }
    }
}

/// Route loop for the interactive session. Protected screens bounce to the
/// login prompt when no token is stored.
async fn run_session(auth: &AuthClient, tasks: &TaskClient, session: &Session) -> Result<()> {
    let mut route = Route::Dashboard;

    loop {
        let next = match route.resolve(session).await {
            Route::Login => {
                println!("You need to log in first.");
                if login(auth, None).await? {
                    Some(Route::Dashboard)
                } else {
                    None
                }
            }
            Route::Register => {
                register(auth, None).await?;
                Some(Route::Login)
            }
            Route::Dashboard => dashboard_screen(tasks).await?,
            Route::TaskNew => task_form_screen(TaskForm::create(), tasks).await?,
            Route::TaskEdit(id) => task_form_screen(TaskForm::edit(id), tasks).await?,
            Route::TaskDetail(id) => task_detail_screen(id, tasks).await?,
        };

        match next {
            Some(next) => route = next,
            None => return Ok(()),
        }
    }
}

fn styled_priority(priority: Priority) -> console::StyledObject<&'static str> {
    match priority {
        Priority::High => style(priority.as_str()).red(),
        Priority::Medium => style(priority.as_str()).yellow(),
        Priority::Low => style(priority.as_str()).green(),
    }
}

fn styled_status(status: TaskStatus) -> console::StyledObject<&'static str> {
    match status {
        TaskStatus::Completed => style(status.as_str()).green(),
        TaskStatus::InProgress => style(status.as_str()).cyan(),
        TaskStatus::Pending => style(status.as_str()).yellow(),
        TaskStatus::Cancelled => style(status.as_str()).dim(),
    }
}

fn render_dashboard(dashboard: &Dashboard) {
    println!();
    let total_pages = dashboard.total_pages.max(1);
    println!(
        "{} (page {} of {})",
        style("Tasks").bold(),
        dashboard.page + 1,
        total_pages
    );

    if let Some(error) = &dashboard.error {
        println!("{} {}", style("✗").red(), error);
    }

    if dashboard.tasks.is_empty() {
        println!("  {}", style("No tasks on this page.").dim());
        return;
    }

    for task in &dashboard.tasks {
        let deadline = task
            .deadline
            .map(|d| d.to_string())
            .unwrap_or_else(|| "-".to_string());
        println!(
            "  #{:<4} {:<40} {:<8} {:<12} due {}",
            task.id.unwrap_or_default(),
            task.title,
            styled_priority(task.priority),
            styled_status(task.status),
            deadline
        );
    }
}

fn pick_task(dashboard: &Dashboard, prompt: &str) -> Result<Option<i64>> {
    let choices: Vec<(i64, String)> = dashboard
        .tasks
        .iter()
        .filter_map(|t| t.id.map(|id| (id, format!("#{id} {}", t.title))))
        .collect();

    if choices.is_empty() {
        println!("{}", style("Nothing to pick from.").dim());
        return Ok(None);
    }

    let labels: Vec<&String> = choices.iter().map(|(_, label)| label).collect();
    let index = Select::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .items(&labels)
        .default(0)
        .interact()?;

    Ok(Some(choices[index].0))
}

async fn dashboard_screen(tasks: &TaskClient) -> Result<Option<Route>> {
    let mut dashboard = Dashboard::new();
    dashboard.refresh(tasks).await;

    loop {
        render_dashboard(&dashboard);

        let actions = [
            "New task",
            "Open task",
            "Edit task",
            "Delete task",
            "Change filter",
            "Next page",
            "Previous page",
            "Refresh",
            "Quit",
        ];
        let action = Select::with_theme(&ColorfulTheme::default())
            .with_prompt("Dashboard")
            .items(&actions)
            .default(0)
            .interact()?;

        match action {
            0 => return Ok(Some(Route::TaskNew)),
            1 => {
                if let Some(id) = pick_task(&dashboard, "Open which task?")? {
                    return Ok(Some(Route::TaskDetail(id)));
                }
            }
            2 => {
                if let Some(id) = pick_task(&dashboard, "Edit which task?")? {
                    return Ok(Some(Route::TaskEdit(id)));
                }
            }
            3 => {
                if let Some(id) = pick_task(&dashboard, "Delete which task?")? {
                    let confirmed = Confirm::with_theme(&ColorfulTheme::default())
                        .with_prompt("Are you sure you want to delete this task?")
                        .default(false)
                        .interact()?;
                    if confirmed {
                        dashboard.delete_task(tasks, id).await;
                    }
                }
            }
            4 => {
                let (priority, status, sort_by) = prompt_filter()?;
                dashboard.apply_filter(tasks, priority, status, sort_by).await;
            }
            5 => {
                if !dashboard.change_page(tasks, dashboard.page + 1).await {
                    println!("{}", style("Already on the last page.").dim());
                }
            }
            6 => {
                if dashboard.page == 0
                    || !dashboard.change_page(tasks, dashboard.page - 1).await
                {
                    println!("{}", style("Already on the first page.").dim());
                }
            }
            7 => dashboard.refresh(tasks).await,
            _ => return Ok(None),
        }
    }
}

fn prompt_filter() -> Result<(Option<Priority>, Option<TaskStatus>, Option<String>)> {
    let mut priority_items = vec!["Any"];
    priority_items.extend(Priority::ALL.iter().map(|p| p.as_str()));
    let priority = Select::with_theme(&ColorfulTheme::default())
        .with_prompt("Priority")
        .items(&priority_items)
        .default(0)
        .interact()?;
    let priority = priority.checked_sub(1).map(|i| Priority::ALL[i]);

    let mut status_items = vec!["Any"];
    status_items.extend(TaskStatus::ALL.iter().map(|s| s.as_str()));
    let status = Select::with_theme(&ColorfulTheme::default())
        .with_prompt("Status")
        .items(&status_items)
        .default(0)
        .interact()?;
    let status = status.checked_sub(1).map(|i| TaskStatus::ALL[i]);

    let sort_by: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt("Sort by")
        .with_initial_text("deadline")
        .allow_empty(true)
        .interact_text()?;
    let sort_by = (!sort_by.trim().is_empty()).then(|| sort_by.trim().to_string());

    Ok((priority, status, sort_by))
}

fn prompt_priority(current: Priority) -> Result<Priority> {
    let default = Priority::ALL.iter().position(|p| *p == current).unwrap_or(0);
    let index = Select::with_theme(&ColorfulTheme::default())
        .with_prompt("Priority")
        .items(&Priority::ALL.map(|p| p.as_str()))
        .default(default)
        .interact()?;
    Ok(Priority::ALL[index])
}

fn prompt_status(current: TaskStatus) -> Result<TaskStatus> {
    let default = TaskStatus::ALL
        .iter()
        .position(|s| *s == current)
        .unwrap_or(0);
    let index = Select::with_theme(&ColorfulTheme::default())
        .with_prompt("Status")
        .items(&TaskStatus::ALL.map(|s| s.as_str()))
        .default(default)
        .interact()?;
    Ok(TaskStatus::ALL[index])
}

/// Prompt for a date; empty input means no deadline.
fn prompt_deadline(current: Option<NaiveDate>) -> Result<Option<NaiveDate>> {
    loop {
        let input: String = Input::with_theme(&ColorfulTheme::default())
            .with_prompt("Deadline (YYYY-MM-DD)")
            .with_initial_text(current.map(|d| d.to_string()).unwrap_or_default())
            .allow_empty(true)
            .interact_text()?;

        let input = input.trim();
        if input.is_empty() {
            return Ok(None);
        }
        match input.parse::<NaiveDate>() {
            Ok(date) => return Ok(Some(date)),
            Err(_) => println!("{} Not a valid date.", style("✗").red()),
        }
    }
}

async fn task_form_screen(mut form: TaskForm, tasks: &TaskClient) -> Result<Option<Route>> {
    if form.is_edit() {
        form.load(tasks).await;
        if let Some(error) = &form.error {
            println!("{} {}", style("✗").red(), error);
            return Ok(Some(Route::Dashboard));
        }
    }

    loop {
        form.state.title = Input::with_theme(&ColorfulTheme::default())
            .with_prompt("Title")
            .with_initial_text(&form.state.title)
            .allow_empty(true)
            .interact_text()?;
        form.state.priority = prompt_priority(form.state.priority)?;
        form.state.status = prompt_status(form.state.status)?;
        form.state.deadline = prompt_deadline(form.state.deadline)?;

        if let Some(route) = form.submit(tasks).await {
            println!("{} Task saved.", style("✓").green());
            return Ok(Some(route));
        }

        for error in form.errors.iter() {
            println!("{} {}", style("✗").red(), error.message());
        }
        if let Some(error) = &form.error {
            println!("{} {}", style("✗").red(), error);
        }

        let retry = Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt("Try again?")
            .default(true)
            .interact()?;
        if !retry {
            return Ok(Some(Route::Dashboard));
        }
    }
}

fn render_detail(task: &Task, detail: &TaskDetail) {
    println!();
    println!(
        "{} #{} {} {} due {}",
        style(&task.title).bold(),
        task.id.unwrap_or_default(),
        styled_priority(task.priority),
        styled_status(task.status),
        task.deadline
            .map(|d| d.to_string())
            .unwrap_or_else(|| "-".to_string())
    );

    if let Some(error) = &detail.error {
        println!("{} {}", style("✗").red(), error);
    }

    if detail.sub_tasks.is_empty() {
        println!("  {}", style("No subtasks.").dim());
    }
    for sub_task in &detail.sub_tasks {
        println!(
            "  #{:<4} {:<40} {:<8} {}",
            sub_task.id.unwrap_or_default(),
            sub_task.title,
            styled_priority(sub_task.priority),
            styled_status(sub_task.status)
        );
    }
}

fn pick_sub_task(detail: &TaskDetail, prompt: &str) -> Result<Option<i64>> {
    let choices: Vec<(i64, String)> = detail
        .sub_tasks
        .iter()
        .filter_map(|st| st.id.map(|id| (id, format!("#{id} {}", st.title))))
        .collect();

    if choices.is_empty() {
        println!("{}", style("No subtasks.").dim());
        return Ok(None);
    }

    let labels: Vec<&String> = choices.iter().map(|(_, label)| label).collect();
    let index = Select::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .items(&labels)
        .default(0)
        .interact()?;

    Ok(Some(choices[index].0))
}

async fn task_detail_screen(id: i64, tasks: &TaskClient) -> Result<Option<Route>> {
    let mut detail = TaskDetail::new(id);
    detail.load(tasks).await;

    let Some(task) = detail.task.clone() else {
        println!("{} Failed to load task.", style("✗").red());
        return Ok(Some(Route::Dashboard));
    };

    loop {
        render_detail(&task, &detail);

        let actions = [
            "Add subtask",
            "Set subtask status",
            "Delete subtask",
            "Edit task",
            "Back to dashboard",
        ];
        let action = Select::with_theme(&ColorfulTheme::default())
            .with_prompt("Task")
            .items(&actions)
            .default(0)
            .interact()?;

        match action {
            0 => {
                detail.form.title = Input::with_theme(&ColorfulTheme::default())
                    .with_prompt("Subtask title")
                    .allow_empty(true)
                    .interact_text()?;
                detail.form.priority = prompt_priority(detail.form.priority)?;
                detail.form.deadline = prompt_deadline(detail.form.deadline)?;

                if !detail.add_sub_task(tasks).await {
                    for error in detail.errors.iter() {
                        println!("{} {}", style("✗").red(), error.message());
                    }
                }
            }
            1 => {
                if let Some(sub_id) = pick_sub_task(&detail, "Which subtask?")? {
                    let status = prompt_status(TaskStatus::Pending)?;
                    detail.set_sub_task_status(tasks, sub_id, status).await;
                }
            }
            2 => {
                if let Some(sub_id) = pick_sub_task(&detail, "Delete which subtask?")? {
                    let confirmed = Confirm::with_theme(&ColorfulTheme::default())
                        .with_prompt("Delete this subtask?")
                        .default(false)
                        .interact()?;
                    if confirmed {
                        detail.delete_sub_task(tasks, sub_id).await;
                    }
                }
            }
            3 => return Ok(Some(Route::TaskEdit(id))),
            _ => return Ok(Some(Route::Dashboard)),
        }
    }
}

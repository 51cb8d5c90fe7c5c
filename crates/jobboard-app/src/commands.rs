//! `jobboard` command line.
//!
//! Every screen-backed command first opens its screen path through the route
//! guard, so the terminal enforces the same access rules as navigation.

use std::future::Future;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use jobboard_client::PageRequest;
use jobboard_models::{
    ApiResponse, ApplicationId, ApplicationStatus, JobId, JobStatus, LoginRequest, Page,
    ProfileUpdate, RegisterForm, ResetPasswordRequest, Role, UserId,
};
use jobboard_session::{resolve, GuardDecision, LoginOutcome, TwoFactorChallenge};
use tracing::debug;

use crate::app::App;
use crate::navigation::{self, after_login, after_oauth};
use crate::render;
use crate::views::{
    applications, AdminOverview, AdminUsersView, ApplyForm, JobForm, PageView, UserAction,
    UserFilter,
};

#[derive(Parser)]
#[command(name = "jobboard", version, about = "JobBoard terminal client")]
pub struct Cli {
    /// API root URL (overrides JOBBOARD_API_URL)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Sign in with email and password
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "JOBBOARD_PASSWORD", hide_env_values = true)]
        password: String,
        /// One-time code for accounts with two-factor enabled
        #[arg(long)]
        otp: Option<String>,
    },
    /// Complete a two-factor sign-in
    VerifyOtp {
        #[arg(long)]
        email: String,
        #[arg(long)]
        code: String,
    },
    /// Create an account and sign in
    Register {
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        last_name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        confirm_password: String,
        #[arg(long, default_value = "SEEKER")]
        role: Role,
    },
    /// Sign out and forget the stored session
    Logout,
    /// Show the signed-in user
    Whoami,
    /// Request a password reset email
    ForgotPassword {
        #[arg(long)]
        email: String,
    },
    /// Set a new password with the emailed reset token
    ResetPassword {
        #[arg(long)]
        token: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        confirm_password: String,
    },
    /// Finish an OAuth sign-in from the redirect URL
    OauthCallback {
        /// Full redirect URL or `/oauth/callback?...` path
        url: String,
    },
    /// Open a screen by path
    Open {
        /// Screen path, e.g. /recruiter/dashboard
        path: String,
    },
    /// Browse and manage job postings
    #[command(subcommand)]
    Jobs(JobsCommand),
    /// Apply to jobs and review applicants
    #[command(subcommand)]
    Applications(ApplicationsCommand),
    /// View and edit your profile
    #[command(subcommand)]
    Profile(ProfileCommand),
    /// Administer user accounts
    #[command(subcommand)]
    Admin(AdminCommand),
}

#[derive(Subcommand)]
pub enum JobsCommand {
    /// List jobs accepting applications
    List {
        #[arg(long, default_value_t = 0)]
        page: u32,
        /// Include closed and filled jobs
        #[arg(long)]
        all: bool,
    },
    /// Search jobs by keyword
    Search {
        keyword: String,
        #[arg(long, default_value_t = 0)]
        page: u32,
    },
    /// Show one job
    Show { id: JobId },
    /// Jobs you posted
    Mine {
        #[arg(long, default_value_t = 0)]
        page: u32,
    },
    /// Post a new job
    Post(JobArgs),
    /// Edit one of your jobs
    Update {
        id: JobId,
        #[command(flatten)]
        fields: JobUpdateArgs,
    },
    /// Change the status of one of your jobs
    Status { id: JobId, status: JobStatus },
    /// Delete one of your jobs
    Delete { id: JobId },
}

#[derive(clap::Args)]
pub struct JobArgs {
    #[arg(long)]
    title: String,
    #[arg(long)]
    description: String,
    #[arg(long)]
    company: String,
    #[arg(long)]
    location: String,
    #[arg(long, default_value = "FULL_TIME")]
    job_type: String,
    #[arg(long)]
    salary: Option<String>,
    #[arg(long)]
    requirements: Option<String>,
    #[arg(long)]
    benefits: Option<String>,
}

#[derive(clap::Args)]
pub struct JobUpdateArgs {
    #[arg(long)]
    title: Option<String>,
    #[arg(long)]
    description: Option<String>,
    #[arg(long)]
    company: Option<String>,
    #[arg(long)]
    location: Option<String>,
    #[arg(long)]
    job_type: Option<String>,
    #[arg(long)]
    salary: Option<String>,
    #[arg(long)]
    requirements: Option<String>,
    #[arg(long)]
    benefits: Option<String>,
}

#[derive(Subcommand)]
pub enum ApplicationsCommand {
    /// Apply to an open job
    Apply {
        job_id: JobId,
        #[arg(long)]
        cover_letter: Option<String>,
        /// Résumé file (pdf, doc, docx, txt)
        #[arg(long)]
        resume: Option<PathBuf>,
    },
    /// Your applications
    Mine {
        #[arg(long, default_value_t = 0)]
        page: u32,
    },
    /// Applicants for one of your jobs
    ForJob {
        job_id: JobId,
        #[arg(long, default_value_t = 0)]
        page: u32,
    },
    /// Move an applicant to a new status
    Review {
        job_id: JobId,
        id: ApplicationId,
        status: ApplicationStatus,
        #[arg(long)]
        notes: Option<String>,
    },
    /// Withdraw one of your pending applications
    Withdraw { id: ApplicationId },
}

#[derive(Subcommand)]
pub enum ProfileCommand {
    /// Show your profile
    Show,
    /// Update profile fields
    Update {
        #[arg(long)]
        first_name: Option<String>,
        #[arg(long)]
        last_name: Option<String>,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        bio: Option<String>,
        #[arg(long)]
        company: Option<String>,
        #[arg(long)]
        location: Option<String>,
        #[arg(long)]
        linkedin_url: Option<String>,
    },
    /// Turn on two-factor sign-in
    Enable2fa,
    /// Turn off two-factor sign-in
    Disable2fa,
}

#[derive(Subcommand)]
pub enum AdminCommand {
    /// Dashboard totals and recent activity
    Overview,
    /// List users, optionally filtered
    Users {
        #[arg(long)]
        role: Option<Role>,
        #[arg(long)]
        search: Option<String>,
        #[arg(long, default_value_t = 0)]
        page: u32,
    },
    Activate { id: UserId },
    Deactivate { id: UserId },
    Delete { id: UserId },
    /// Recruiters waiting for approval
    Pending,
    Approve { id: UserId },
    Reject { id: UserId },
}

pub async fn run(command: Command, app: &App) -> Result<()> {
    match command {
        Command::Login {
            email,
            password,
            otp,
        } => login(app, email, password, otp).await,
        Command::VerifyOtp { email, code } => {
            let session = app
                .auth
                .verify_otp(&TwoFactorChallenge { email }, &code)
                .await?;
            println!("Signed in as {}", render::whoami(Some(&session)));
            println!("→ {}", after_login(&session));
            Ok(())
        }
        Command::Register {
            first_name,
            last_name,
            email,
            password,
            confirm_password,
            role,
        } => {
            let form = RegisterForm {
                first_name,
                last_name,
                email,
                password,
                confirm_password,
                role,
            };
            let session = app.auth.register(form).await?;
            println!("Welcome, {}", session.user.display_name());
            println!("→ {}", after_login(&session));
            Ok(())
        }
        Command::Logout => {
            app.auth.logout();
            println!("Signed out");
            Ok(())
        }
        Command::Whoami => {
            println!("{}", render::whoami(app.store.session().as_ref()));
            Ok(())
        }
        Command::ForgotPassword { email } => {
            let message = app.auth.forgot_password(&email).await?;
            println!(
                "{}",
                message.unwrap_or_else(|| "Password reset link sent to your email".to_string())
            );
            Ok(())
        }
        Command::ResetPassword {
            token,
            password,
            confirm_password,
        } => {
            let request = ResetPasswordRequest {
                token,
                new_password: password,
                confirm_password,
            };
            let message = app.auth.reset_password(request).await?;
            println!(
                "{}",
                message.unwrap_or_else(|| "Password reset successfully".to_string())
            );
            Ok(())
        }
        Command::OauthCallback { url } => {
            let result = app.auth.complete_oauth_callback(&url);
            let target = after_oauth(&result);
            match result {
                Ok(session) => println!("Signed in as {}", render::whoami(Some(&session))),
                Err(e) => eprintln!("OAuth sign-in failed: {}", e),
            }
            println!("→ {}", target);
            Ok(())
        }
        Command::Open { path } => open(app, &path).await,
        Command::Jobs(command) => jobs(app, command).await,
        Command::Applications(command) => applications_command(app, command).await,
        Command::Profile(command) => profile(app, command).await,
        Command::Admin(command) => admin(app, command).await,
    }
}

async fn login(app: &App, email: String, password: String, otp: Option<String>) -> Result<()> {
    let session = match app.auth.login(LoginRequest::new(email, password)).await? {
        LoginOutcome::Authenticated(session) => session,
        LoginOutcome::TwoFactorRequired(challenge) => match otp {
            Some(code) => app.auth.verify_otp(&challenge, &code).await?,
            None => {
                println!("A verification code was sent to {}.", challenge.email);
                println!(
                    "Finish with: jobboard verify-otp --email {} --code <CODE>",
                    challenge.email
                );
                return Ok(());
            }
        },
    };
    println!("Signed in as {}", render::whoami(Some(&session)));
    println!("→ {}", after_login(&session));
    Ok(())
}

/// Open `path` through the guard and fail with the redirect when denied.
async fn enter(app: &App, path: &str) -> Result<()> {
    match app.guard.check_when_ready(path).await {
        GuardDecision::Allowed => Ok(()),
        GuardDecision::Denied { redirect } if redirect == jobboard_session::LOGIN_PATH => {
            bail!("Please sign in first (→ {})", redirect)
        }
        GuardDecision::Denied { redirect } => {
            bail!("Access denied for {} (→ {})", path, redirect)
        }
        GuardDecision::Pending => bail!("Session is still loading"),
    }
}

/// Fail with the envelope's message, else return its data.
fn data<T>(response: ApiResponse<T>) -> Result<Option<T>> {
    response.into_result().map_err(anyhow::Error::msg)
}

fn required<T>(response: ApiResponse<T>) -> Result<T> {
    data(response)?.context("Server response had no data")
}

fn acknowledge(response: ApiResponse<()>, fallback: &str) -> Result<()> {
    let message = response.message.clone();
    data(response)?;
    println!("{}", message.unwrap_or_else(|| fallback.to_string()));
    Ok(())
}

async fn show_list<T, F, Fut>(
    app: &App,
    page: u32,
    empty_message: &'static str,
    fetch: F,
    line: impl Fn(&T) -> String,
) where
    F: FnOnce(PageRequest) -> Fut,
    Fut: Future<Output = ApiResponse<Page<T>>>,
{
    let mut view = PageView::new(app.page_size(), empty_message);
    view.go_to(page);
    view.load(fetch).await;
    println!("{}", render::list(&view, line));
}

/// Walk every page until `matches` finds an item.
async fn find_in_pages<T, F, Fut>(
    app: &App,
    mut fetch: F,
    predicate: impl Fn(&T) -> bool,
) -> Result<Option<T>>
where
    F: FnMut(PageRequest) -> Fut,
    Fut: Future<Output = ApiResponse<Page<T>>>,
{
    let mut request = app.page(0);
    loop {
        let page = required(fetch(request).await)?;
        let has_next = page.has_next();
        if let Some(found) = page.content.into_iter().find(|item| predicate(item)) {
            return Ok(Some(found));
        }
        if !has_next {
            return Ok(None);
        }
        request = request.next();
    }
}

async fn open(app: &App, path: &str) -> Result<()> {
    let nav = navigation::open(&app.guard, path).await;
    if nav.redirected() {
        println!("{} → {}", nav.requested, nav.path);
    }
    let Some(found) = resolve(&nav.path) else {
        bail!("Unknown screen {}", nav.path);
    };
    debug!(pattern = %found.route.pattern, "Rendering screen");

    let job_param = || -> Result<JobId> {
        found
            .param("jobId")
            .context("missing job id")?
            .parse()
            .context("job id must be a number")
    };

    match found.route.pattern {
        "/" | "/jobs" => {
            show_list(app, 0, "No jobs found", |p| app.jobs.list_open(p), render::job_line).await
        }
        "/jobs/:jobId" => {
            let job = required(app.jobs.get(job_param()?).await)?;
            println!("{}", render::job_detail(&job))
        }
        "/seeker/dashboard" => {
            show_list(
                app,
                0,
                "You haven't applied to any jobs yet",
                |p| app.applications.my_applications(p),
                render::my_application_line,
            )
            .await
        }
        "/recruiter/dashboard" => {
            show_list(
                app,
                0,
                "You haven't posted any jobs yet",
                |p| app.jobs.my_jobs(p),
                render::job_line,
            )
            .await
        }
        "/recruiter/jobs/:jobId/applications" => {
            let job_id = job_param()?;
            show_list(
                app,
                0,
                "No applications yet",
                |p| app.applications.for_job(job_id, p),
                render::applicant_line,
            )
            .await
        }
        "/admin/dashboard" => return admin(app, AdminCommand::Overview).await,
        "/profile" => return profile(app, ProfileCommand::Show).await,
        "/login" => println!("Sign in with: jobboard login --email <EMAIL>"),
        "/register" => println!("Create an account with: jobboard register --help"),
        "/recruiter/post-job" => println!("Post a job with: jobboard jobs post --help"),
        "/forgot-password" => {
            println!("Request a reset link with: jobboard forgot-password --email <EMAIL>")
        }
        "/reset-password" => println!("Set a new password with: jobboard reset-password --help"),
        other => println!("Screen {} has no terminal view", other),
    }
    Ok(())
}

async fn jobs(app: &App, command: JobsCommand) -> Result<()> {
    match command {
        JobsCommand::List { page, all } => {
            enter(app, "/jobs").await?;
            if all {
                let fetch = |p| app.jobs.list_all(p);
                show_list(app, page, "No jobs found", fetch, render::job_line).await;
            } else {
                let fetch = |p| app.jobs.list_open(p);
                show_list(app, page, "No jobs found", fetch, render::job_line).await;
            }
        }
        JobsCommand::Search { keyword, page } => {
            enter(app, "/jobs").await?;
            show_list(
                app,
                page,
                "No jobs match your search",
                |p| app.jobs.search(&keyword, p),
                render::job_line,
            )
            .await;
        }
        JobsCommand::Show { id } => {
            enter(app, &format!("/jobs/{}", id)).await?;
            println!("{}", render::job_detail(&required(app.jobs.get(id).await)?));
        }
        JobsCommand::Mine { page } => {
            enter(app, "/recruiter/dashboard").await?;
            show_list(
                app,
                page,
                "You haven't posted any jobs yet",
                |p| app.jobs.my_jobs(p),
                render::job_line,
            )
            .await;
        }
        JobsCommand::Post(args) => {
            enter(app, "/recruiter/post-job").await?;
            let request = JobForm {
                title: args.title,
                description: args.description,
                company: args.company,
                location: args.location,
                salary: args.salary.unwrap_or_default(),
                job_type: args.job_type,
                status: None,
                requirements: args.requirements.unwrap_or_default(),
                benefits: args.benefits.unwrap_or_default(),
            }
            .into_request()?;
            let job = required(app.jobs.create(&request).await)?;
            println!("Job posted\n{}", render::job_line(&job));
        }
        JobsCommand::Update { id, fields } => {
            enter(app, "/recruiter/dashboard").await?;
            let job = required(app.jobs.get(id).await)?;
            let request = JobForm {
                title: fields.title.unwrap_or(job.title),
                description: fields.description.unwrap_or(job.description),
                company: fields.company.unwrap_or(job.company),
                location: fields.location.unwrap_or(job.location),
                salary: fields
                    .salary
                    .or_else(|| job.salary.map(|s| s.to_string()))
                    .unwrap_or_default(),
                job_type: fields.job_type.unwrap_or_else(|| job.job_type.to_string()),
                status: Some(job.status.to_string()),
                requirements: fields.requirements.or(job.requirements).unwrap_or_default(),
                benefits: fields.benefits.or(job.benefits).unwrap_or_default(),
            }
            .into_request()?;
            let job = required(app.jobs.update(id, &request).await)?;
            println!("Job updated\n{}", render::job_line(&job));
        }
        JobsCommand::Status { id, status } => {
            enter(app, "/recruiter/dashboard").await?;
            let job = required(app.jobs.update_status(id, status).await)?;
            println!("{}", render::job_line(&job));
        }
        JobsCommand::Delete { id } => {
            enter(app, "/recruiter/dashboard").await?;
            acknowledge(app.jobs.delete(id).await, "Job deleted")?;
        }
    }
    Ok(())
}

async fn applications_command(app: &App, command: ApplicationsCommand) -> Result<()> {
    match command {
        ApplicationsCommand::Apply {
            job_id,
            cover_letter,
            resume,
        } => {
            enter(app, "/seeker/dashboard").await?;
            let job = required(app.jobs.get(job_id).await)?;
            let mut form = ApplyForm::open(&job)?;
            if let Some(text) = cover_letter {
                form = form.cover_letter(text);
            }
            if let Some(path) = resume {
                form = form.resume_file(&path)?;
            }
            let response = form.submit(&app.applications).await;
            let message = response.message.clone();
            let application = required(response)?;
            println!(
                "{}\n{}",
                message.unwrap_or_else(|| "Application submitted".to_string()),
                render::my_application_line(&application)
            );
        }
        ApplicationsCommand::Mine { page } => {
            enter(app, "/seeker/dashboard").await?;
            show_list(
                app,
                page,
                "You haven't applied to any jobs yet",
                |p| app.applications.my_applications(p),
                render::my_application_line,
            )
            .await;
        }
        ApplicationsCommand::ForJob { job_id, page } => {
            enter(app, &format!("/recruiter/jobs/{}/applications", job_id)).await?;
            show_list(
                app,
                page,
                "No applications yet",
                |p| app.applications.for_job(job_id, p),
                render::applicant_line,
            )
            .await;
        }
        ApplicationsCommand::Review {
            job_id,
            id,
            status,
            notes,
        } => {
            enter(app, &format!("/recruiter/jobs/{}/applications", job_id)).await?;
            let application = find_in_pages(
                app,
                |p| app.applications.for_job(job_id, p),
                |a: &jobboard_models::Application| a.id == id,
            )
            .await?
            .with_context(|| format!("Application {} not found for job {}", id, job_id))?;
            let response = applications::review(
                &app.applications,
                &application,
                status,
                notes.as_deref(),
            )
            .await?;
            let updated = required(response)?;
            println!("{}", render::applicant_line(&updated));
        }
        ApplicationsCommand::Withdraw { id } => {
            enter(app, "/seeker/dashboard").await?;
            let application = find_in_pages(
                app,
                |p| app.applications.my_applications(p),
                |a: &jobboard_models::Application| a.id == id,
            )
            .await?
            .with_context(|| format!("Application {} not found", id))?;
            acknowledge(
                applications::withdraw(&app.applications, &application).await?,
                "Application withdrawn",
            )?;
        }
    }
    Ok(())
}

async fn profile(app: &App, command: ProfileCommand) -> Result<()> {
    enter(app, "/profile").await?;
    match command {
        ProfileCommand::Show => {
            println!("{}", render::profile(&required(app.profile.get().await)?));
        }
        ProfileCommand::Update {
            first_name,
            last_name,
            phone,
            bio,
            company,
            location,
            linkedin_url,
        } => {
            let update = ProfileUpdate {
                first_name,
                last_name,
                phone,
                bio,
                company,
                location,
                linkedin_url,
            };
            if update.is_empty() {
                bail!("Nothing to update");
            }
            update.validate()?;
            let profile = required(app.profile.update(&update).await)?;
            println!("Profile updated\n{}", render::profile(&profile));
        }
        ProfileCommand::Enable2fa => {
            acknowledge(app.profile.enable_two_factor().await, "Two-factor sign-in enabled")?
        }
        ProfileCommand::Disable2fa => {
            acknowledge(app.profile.disable_two_factor().await, "Two-factor sign-in disabled")?
        }
    }
    Ok(())
}

async fn admin(app: &App, command: AdminCommand) -> Result<()> {
    enter(app, "/admin/dashboard").await?;
    match command {
        AdminCommand::Overview => {
            let overview = AdminOverview::load(&app.admin).await;
            match data(overview.stats) {
                Ok(stats) => println!("{}", render::stats(&stats.unwrap_or_default())),
                Err(e) => println!("Stats unavailable: {}", e),
            }
            println!("\nRecent jobs:");
            match data(overview.recent_jobs) {
                Ok(jobs) => jobs
                    .unwrap_or_default()
                    .iter()
                    .for_each(|job| println!("  {}", render::job_line(job))),
                Err(e) => println!("  {}", e),
            }
            println!("\nRecent applications:");
            match data(overview.recent_applications) {
                Ok(list) => list
                    .unwrap_or_default()
                    .iter()
                    .for_each(|a| println!("  {}", render::my_application_line(a))),
                Err(e) => println!("  {}", e),
            }
            println!("\nPending recruiters:");
            match data(overview.pending_recruiters) {
                Ok(users) => users
                    .unwrap_or_default()
                    .iter()
                    .for_each(|u| println!("  {}", render::user_line(u))),
                Err(e) => println!("  {}", e),
            }
        }
        AdminCommand::Users { role, search, page } => {
            let mut view = AdminUsersView::new(app.admin.clone(), app.page_size());
            let filter = UserFilter::from_inputs(search.as_deref(), role);
            view.set_filter_at(filter, page).await;
            println!("{}", render::list(view.list(), render::user_line));
        }
        AdminCommand::Activate { id } => user_action(app, id, UserAction::Activate).await?,
        AdminCommand::Deactivate { id } => user_action(app, id, UserAction::Deactivate).await?,
        AdminCommand::Delete { id } => user_action(app, id, UserAction::Delete).await?,
        AdminCommand::Pending => {
            let users = data(app.admin.pending_recruiters().await)?.unwrap_or_default();
            if users.is_empty() {
                println!("No recruiters awaiting approval");
            }
            users.iter().for_each(|u| println!("{}", render::user_line(u)));
        }
        AdminCommand::Approve { id } => {
            acknowledge(app.admin.approve_recruiter(id).await, "Recruiter approved")?
        }
        AdminCommand::Reject { id } => {
            acknowledge(app.admin.reject_recruiter(id).await, "Recruiter rejected")?
        }
    }
    Ok(())
}

async fn user_action(app: &App, id: UserId, action: UserAction) -> Result<()> {
    let mut view = AdminUsersView::new(app.admin.clone(), app.page_size());
    let succeeded = view.act(id, action).await;
    let notice = view.notice().unwrap_or("Done").to_string();
    if !succeeded {
        bail!(notice);
    }
    println!("{}", notice);
    if let Some(user) = view.user(id) {
        println!("{}", render::user_line(user));
    }
    Ok(())
}

//! Plain-text rendering of the view-models for the terminal.

use std::fmt::Write;

use jobboard_models::{AdminStats, Application, Job, Page, Profile, Session, UserAccount};

use crate::views::applications::status_label;
use crate::views::{can_withdraw, JobCard, ListState, PageView, ReviewControls};

pub fn job_line(job: &Job) -> String {
    let card = JobCard::from(job);
    let salary = card.salary.map(|s| format!(" · {}", s)).unwrap_or_default();
    format!(
        "#{:<5} {} at {} ({}, {}){}  [{}]",
        job.id,
        card.title,
        card.company,
        card.location,
        card.job_type,
        salary,
        card.action.label()
    )
}

pub fn job_detail(job: &Job) -> String {
    let card = JobCard::from(job);
    let mut out = String::new();
    let _ = writeln!(out, "{} (#{})", card.title, job.id);
    let _ = writeln!(out, "{} · {} · {}", card.company, card.location, card.job_type);
    if let Some(salary) = &card.salary {
        let _ = writeln!(out, "Salary: {}", salary);
    }
    let _ = writeln!(
        out,
        "Posted {} · {} applicants · {}",
        card.posted, card.applicants, job.status
    );
    let _ = writeln!(out, "\n{}", job.description);
    if let Some(requirements) = &job.requirements {
        let _ = writeln!(out, "\nRequirements:\n{}", requirements);
    }
    if let Some(benefits) = &job.benefits {
        let _ = writeln!(out, "\nBenefits:\n{}", benefits);
    }
    let _ = write!(out, "\n[{}]", card.action.label());
    out
}

/// A seeker's own application.
pub fn my_application_line(application: &Application) -> String {
    let title = application.job_title.as_deref().unwrap_or("Untitled job");
    let company = application
        .company
        .as_deref()
        .map(|c| format!(" at {}", c))
        .unwrap_or_default();
    let withdraw = if can_withdraw(application.status) {
        "  [withdraw]"
    } else {
        ""
    };
    format!(
        "#{:<5} {}{}  {}  applied {}{}",
        application.id,
        title,
        company,
        status_label(application.status),
        application.applied_at.format("%Y-%m-%d"),
        withdraw
    )
}

/// An applicant as seen by the recruiter.
pub fn applicant_line(application: &Application) -> String {
    let name = application.seeker_name.as_deref().unwrap_or("Applicant");
    let email = application
        .seeker_email
        .as_deref()
        .map(|e| format!(" <{}>", e))
        .unwrap_or_default();
    let controls = ReviewControls::for_status(application.status);
    let mut actions = Vec::new();
    if controls.mark_reviewed {
        actions.push("review");
    }
    if controls.accept {
        actions.push("accept");
    }
    if controls.reject {
        actions.push("reject");
    }
    let actions = if actions.is_empty() {
        String::new()
    } else {
        format!("  [{}]", actions.join("|"))
    };
    format!(
        "#{:<5} {}{}  {}{}",
        application.id,
        name,
        email,
        status_label(application.status),
        actions
    )
}

pub fn user_line(user: &UserAccount) -> String {
    format!(
        "#{:<5} {:<24} {:<30} {:<9} {}",
        user.id,
        user.full_name(),
        user.email,
        user.role,
        if user.is_active { "active" } else { "inactive" }
    )
}

pub fn page_footer<T>(page: &Page<T>) -> String {
    format!(
        "Page {} of {}",
        page.current_page + 1,
        page.total_pages.max(1)
    )
}

/// Render a list view, including its empty and failed states.
pub fn list<T>(view: &PageView<T>, line: impl Fn(&T) -> String) -> String {
    match view.state() {
        ListState::Idle | ListState::Loading => "Loading...".to_string(),
        ListState::Empty => view.empty_message().to_string(),
        ListState::Failed(message) => format!("Error: {}", message),
        ListState::Loaded(page) => {
            let mut out: Vec<String> = page.content.iter().map(line).collect();
            out.push(page_footer(page));
            out.join("\n")
        }
    }
}

pub fn profile(profile: &Profile) -> String {
    let fields = [
        ("First name", profile.first_name.as_deref()),
        ("Last name", profile.last_name.as_deref()),
        ("Email", profile.email.as_deref()),
        ("Phone", profile.phone_number.as_deref()),
        ("Location", profile.location.as_deref()),
        ("Company", profile.company_name.as_deref()),
        ("LinkedIn", profile.linkedin_url.as_deref()),
        ("Bio", profile.bio.as_deref()),
    ];
    let mut out = String::new();
    for (label, value) in fields {
        if let Some(value) = value.filter(|v| !v.trim().is_empty()) {
            let _ = writeln!(out, "{:<12} {}", format!("{}:", label), value);
        }
    }
    let _ = write!(
        out,
        "{:<12} {}",
        "2FA:",
        if profile.two_factor_enabled { "enabled" } else { "disabled" }
    );
    out
}

pub fn stats(stats: &AdminStats) -> String {
    format!(
        "Jobs: {}  Applications: {}  Recruiters: {}  Seekers: {}",
        stats.total_jobs, stats.total_applications, stats.total_recruiters, stats.total_seekers
    )
}

pub fn whoami(session: Option<&Session>) -> String {
    match session {
        Some(session) => format!(
            "{} <{}> ({})",
            session.user.display_name(),
            session.user.email,
            session.role()
        ),
        None => "Not signed in".to_string(),
    }
}

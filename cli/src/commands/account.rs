//! Account commands
use std::process::ExitCode;

use serde::Serialize;
use todo_core::{App, KeyValueStore, Session};

use super::Output;

#[derive(Debug, Serialize)]
pub struct AccountInfo {
    pub id: String,
    pub name: String,
    pub email: String,
    pub initials: String,
    pub avatar_color: String,
}

impl From<Session> for AccountInfo {
    fn from(session: Session) -> Self {
        let initials = session.initials();
        let avatar_color = session.avatar_color().to_string();
        Self {
            id: session.id,
            name: session.name,
            email: session.email,
            initials,
            avatar_color,
        }
    }
}

pub fn register<S: KeyValueStore + Clone>(
    app: &App<S>,
    out: &Output,
    name: &str,
    email: &str,
    password: &str,
) -> anyhow::Result<ExitCode> {
    match app.try_register(name, email, password) {
        Ok(session) => out.ok(AccountInfo::from(session), |info| {
            println!("Welcome, {}! You are now logged in.", info.name)
        }),
        Err(e) => out.fail(e.to_string()),
    }
}

pub fn login<S: KeyValueStore + Clone>(
    app: &App<S>,
    out: &Output,
    email: &str,
    password: &str,
) -> anyhow::Result<ExitCode> {
    match app.try_login(email, password) {
        Ok(session) => out.ok(AccountInfo::from(session), |info| {
            println!("Logged in as {} <{}>", info.name, info.email)
        }),
        Err(e) => out.fail(e.to_string()),
    }
}

pub fn logout<S: KeyValueStore + Clone>(app: &App<S>, out: &Output) -> anyhow::Result<ExitCode> {
    let was = app.current_user();
    app.logout()?;
    out.ok(was.map(AccountInfo::from), |info| match info {
        Some(info) => println!("Goodbye, {}.", info.name),
        None => println!("Not logged in."),
    })
}

pub fn whoami<S: KeyValueStore + Clone>(app: &App<S>, out: &Output) -> anyhow::Result<ExitCode> {
    match app.current_user() {
        Some(session) => out.ok(AccountInfo::from(session), |info| {
            println!("{} ({}) <{}>", info.name, info.initials, info.email)
        }),
        None => out.fail("Not logged in".to_string()),
    }
}

use crate::output;
use crate::state::AppState;
use anyhow::{Context, Result};
use assetscan_api::SignupRequest;
use std::io::{BufRead, Write};

/// Read a password from stdin when it was not given on the command line.
pub fn read_password(password: Option<String>) -> Result<String> {
    if let Some(password) = password {
        return Ok(password);
    }

    eprint!("Password: ");
    std::io::stderr().flush().ok();
    let mut line = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut line)
        .context("Failed to read password")?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

pub async fn login(
    state: &AppState,
    username: &str,
    password: &str,
    out: &mut impl Write,
) -> Result<()> {
    let session = state
        .auth()
        .login(username, password)
        .await
        .context("Login failed")?;
    writeln!(out, "Logged in as {}", session.username())?;
    Ok(())
}

pub async fn register(
    state: &AppState,
    request: &SignupRequest,
    out: &mut impl Write,
) -> Result<()> {
    let message = state
        .auth()
        .register(request)
        .await
        .context("Registration failed")?;
    writeln!(out, "{message}")?;
    Ok(())
}

pub fn logout(state: &AppState, out: &mut impl Write) -> Result<()> {
    if state.auth().logout().context("Failed to clear session")? {
        writeln!(out, "Logged out")?;
    } else {
        writeln!(out, "Not logged in")?;
    }
    Ok(())
}

pub fn whoami(state: &AppState, out: &mut impl Write) -> Result<()> {
    match state.session().session().context("Failed to read session")? {
        Some(session) => writeln!(out, "{}", output::session_summary(&session))?,
        None => writeln!(out, "Not logged in")?,
    }
    Ok(())
}

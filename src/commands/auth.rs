//! Session commands: login, register, logout, whoami

use colored::Colorize;

use crate::commands::print_json;
use crate::error::Result;
use crate::gateway::Gateway;
use crate::session::{Session, UserProfile};

/// Sign in and persist the session.
pub async fn login(gateway: &Gateway, email: &str, password: &str, json: bool) -> Result<()> {
    tracing::debug!(email, "auth::login");
    let session = gateway.login(email, password).await?;
    report_session(&session, "Signed in", json)
}

/// Create an account, then sign in with it.
pub async fn register(
    gateway: &Gateway,
    name: &str,
    email: &str,
    password: &str,
    json: bool,
) -> Result<()> {
    tracing::debug!(email, "auth::register");
    let session = gateway.register(name, email, password).await?;
    report_session(&session, "Account created; signed in", json)
}

/// Forget the session locally. No call is made to the service.
pub async fn logout(gateway: &Gateway) -> Result<()> {
    let was_signed_in = gateway.is_authenticated().await;
    gateway.logout().await?;

    if was_signed_in {
        println!("{}", "Signed out".green());
    } else {
        println!("{}", "Not signed in; nothing to do".yellow());
    }
    Ok(())
}

/// Print the stored profile without contacting the service.
pub async fn whoami(gateway: &Gateway, json: bool) -> Result<()> {
    match gateway.current_session().await {
        Some(session) if json => print_json(&session.user),
        Some(session) => {
            print_profile(&session.user);
            Ok(())
        }
        None if json => {
            println!("null");
            Ok(())
        }
        None => {
            println!("{}", "Not signed in. Run `watchlist login`.".yellow());
            Ok(())
        }
    }
}

fn report_session(session: &Session, headline: &str, json: bool) -> Result<()> {
    if json {
        return print_json(&session.user);
    }
    println!("{} as {}", headline.green(), session.user.email.bold());
    Ok(())
}

fn print_profile(user: &UserProfile) {
    println!("\n{}\n", "Signed-in user".bold());
    println!("Name:     {}", user.name);
    println!("Email:    {}", user.email);
    println!("Id:       {}", user.id);
    println!("Joined:   {}", user.created_at.format("%Y-%m-%d"));
    println!();
}

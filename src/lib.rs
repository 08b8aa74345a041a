pub mod api;
pub mod cli;
pub mod config;
pub mod coordinator;
pub mod domain;
pub mod errors;
pub mod http;
pub mod matches;
pub mod rate_limiter;
pub mod ranking;
pub mod render;
pub mod services;
pub mod submission;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use clap_complete::Shell;
use cli::Cli;
use std::future::Future;
use std::io;

use crate::cli::Command;
use crate::config::AppConfig;
use crate::services::console::{AssumeYes, ConsoleService, PromptConfirm};
use crate::services::server::ServerService;

pub fn interpret() -> Command {
    let cli = Cli::parse();
    cli.command
}

fn run_console<F, Fut>(action: F) -> Result<()>
where
    F: FnOnce(ConsoleService<api::RankingsClient>) -> Fut,
    Fut: Future<Output = Result<String>>,
{
    let runtime = tokio::runtime::Runtime::new()?;
    let output = runtime.block_on(async {
        let config = AppConfig::new();
        let service = ConsoleService::new(&config)?;
        action(service).await
    })?;
    print!("{}", output);
    Ok(())
}

pub fn handle_rankings() -> Result<()> {
    run_console(|mut service| async move { service.show_rankings().await })
}

pub fn handle_matches(delete: bool) -> Result<()> {
    run_console(|mut service| async move { service.show_matches(delete).await })
}

pub fn handle_profile(id: &str) -> Result<()> {
    run_console(|mut service| async move { service.show_profile(id).await })
}

pub fn handle_head_to_head() -> Result<()> {
    run_console(|mut service| async move { service.show_head_to_head().await })
}

pub fn handle_edit_player(id: &str, name: Option<&str>, active: Option<bool>) -> Result<()> {
    run_console(|mut service| async move { service.edit_player(id, name, active).await })
}

pub fn handle_remove_player(id: &str, yes: bool) -> Result<()> {
    run_console(|mut service| async move {
        if yes {
            service.remove_player(id, &AssumeYes).await
        } else {
            service.remove_player(id, &PromptConfirm).await
        }
    })
}

pub fn handle_add_player(name: &str) -> Result<()> {
    run_console(|mut service| async move { service.add_player(name).await })
}

pub fn handle_submit(winner: &str, loser: &str, draw: bool) -> Result<()> {
    run_console(|mut service| async move { service.submit(winner, loser, draw).await })
}

pub fn handle_delete_match(id: &str, yes: bool) -> Result<()> {
    run_console(|mut service| async move {
        if yes {
            service.delete(id, &AssumeYes).await
        } else {
            service.delete(id, &PromptConfirm).await
        }
    })
}

pub fn handle_serve(port: u16) -> Result<()> {
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        let config = AppConfig::new();
        let service = ServerService::new(port, config);
        service.run().await
    })
}

pub fn handle_completions(shell: Shell) -> Result<()> {
    clap_complete::generate(shell, &mut Cli::command(), "ladder_board", &mut io::stdout());
    Ok(())
}

use anyhow::Result;

use ladder_board::cli::Command;
use ladder_board::{
    handle_add_player, handle_completions, handle_delete_match, handle_edit_player,
    handle_head_to_head, handle_matches, handle_profile, handle_rankings, handle_remove_player,
    handle_serve, handle_submit, interpret,
};

fn main() {
    setup_logging();
    parse_and_execute().unwrap_or_else(|e| {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    });
}

fn setup_logging() {
    sensible_env_logger::init!();
}

fn parse_and_execute() -> Result<()> {
    let command = interpret();
    execute_command(&command)
}

fn execute_command(command: &Command) -> Result<()> {
    match command {
        Command::Rankings => handle_rankings(),
        Command::Matches { delete } => handle_matches(*delete),
        Command::Profile { id } => handle_profile(id),
        Command::HeadToHead => handle_head_to_head(),
        Command::AddPlayer { name } => handle_add_player(name),
        Command::EditPlayer { id, name, active } => {
            handle_edit_player(id, name.as_deref(), *active)
        }
        Command::RemovePlayer { id, yes } => handle_remove_player(id, *yes),
        Command::Submit { winner, loser, draw } => handle_submit(winner, loser, *draw),
        Command::DeleteMatch { id, yes } => handle_delete_match(id, *yes),
        Command::Serve { port } => handle_serve(*port),
        Command::Completions { shell } => handle_completions(*shell),
    }
}

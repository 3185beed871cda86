//! Command-line parsing.

use anyhow::{Context, bail};

pub const USAGE: &str = "\
usage: steam-explorer <command>

commands:
  profile <steamid>    show a profile and its game library
  game <appid>         show store details for a game
  gallery [query...]   show trending games, optionally filtered";

/// A single explorer action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Profile(String),
    Game(u32),
    Gallery(String),
}

/// Parses arguments, excluding the program name.
pub fn parse_args<I>(args: I) -> anyhow::Result<Command>
where
    I: IntoIterator<Item = String>,
{
    let mut args = args.into_iter();
    let Some(command) = args.next() else {
        bail!("missing command");
    };

    match command.as_str() {
        "profile" => {
            let steam_id = args.next().unwrap_or_default();
            Ok(Command::Profile(steam_id.trim().to_string()))
        }
        "game" => {
            let raw = args.next().context("missing app id")?;
            let app_id = raw
                .trim()
                .parse()
                .with_context(|| format!("invalid app id: {raw}"))?;
            Ok(Command::Game(app_id))
        }
        "gallery" => Ok(Command::Gallery(args.collect::<Vec<_>>().join(" "))),
        other => bail!("unknown command: {other}"),
    }
}

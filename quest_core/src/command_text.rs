use std::num::ParseIntError;

use thiserror::Error;

use crate::{commands::SessionCommand, plot_effect::CombineMode, shop::CustomisationChoice};

#[derive(Debug, Error)]
pub enum CommandParseError {
    #[error("empty command")]
    Empty,
    #[error("unknown command: {0}")]
    UnknownCommand(String),
    #[error("missing argument: {0}")]
    MissingArgument(&'static str),
    #[error("invalid integer '{value}' for {context}: {source}")]
    InvalidInteger {
        value: String,
        context: &'static str,
        source: ParseIntError,
    },
    #[error("invalid combine mode '{0}'")]
    InvalidMode(String),
    #[error("invalid customisation '{0}'")]
    InvalidCustomisation(String),
}

/// Parses one line of the session command language.
///
/// Effect names are single tokens; underscores stand in for spaces
/// (`impose solar_flare 0 0`).
pub fn parse_command_line(input: &str) -> Result<SessionCommand, CommandParseError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(CommandParseError::Empty);
    }

    let mut parts = trimmed.split_whitespace();
    let verb = parts
        .next()
        .map(|v| v.to_ascii_lowercase())
        .ok_or(CommandParseError::Empty)?;

    match verb.as_str() {
        "more" | "+" => Ok(SessionCommand::IncreaseQuantity),
        "less" | "-" => Ok(SessionCommand::DecreaseQuantity),
        "buy" => Ok(SessionCommand::PurchaseRoboticons),
        "next" | ">" => Ok(SessionCommand::SelectNext),
        "prev" | "<" => Ok(SessionCommand::SelectPrevious),
        "choose" => {
            let token = parts
                .next()
                .ok_or(CommandParseError::MissingArgument("customisation"))?;
            Ok(SessionCommand::ChooseCustomisation(parse_customisation(
                token,
            )?))
        }
        "customise" | "customize" => Ok(SessionCommand::PurchaseCustomisation),
        "exit" => Ok(SessionCommand::ExitShop),
        "impose" => {
            let effect = parse_effect_name(parts.next())?;
            let (x, y) = parse_position(&mut parts, "impose")?;
            let mode = parts.next().map(parse_mode).transpose()?;
            Ok(SessionCommand::Impose { effect, x, y, mode })
        }
        "bind" => {
            let effect = parse_effect_name(parts.next())?;
            let (x, y) = parse_position(&mut parts, "bind")?;
            Ok(SessionCommand::Bind { effect, x, y })
        }
        "trigger" => Ok(SessionCommand::Trigger {
            effect: parse_effect_name(parts.next())?,
        }),
        "revert" => Ok(SessionCommand::Revert {
            effect: parse_effect_name(parts.next())?,
        }),
        "revert_all" => Ok(SessionCommand::RevertAll),
        "install" => {
            let (x, y) = parse_position(&mut parts, "install")?;
            Ok(SessionCommand::Install { x, y })
        }
        "state" => Ok(SessionCommand::State),
        other => Err(CommandParseError::UnknownCommand(other.to_string())),
    }
}

fn parse_effect_name(token: Option<&str>) -> Result<String, CommandParseError> {
    token
        .map(|name| name.replace('_', " "))
        .ok_or(CommandParseError::MissingArgument("effect"))
}

fn parse_position<'a>(
    parts: &mut impl Iterator<Item = &'a str>,
    context: &'static str,
) -> Result<(u32, u32), CommandParseError> {
    let x_str = parts.next().ok_or(CommandParseError::MissingArgument("x"))?;
    let y_str = parts.next().ok_or(CommandParseError::MissingArgument("y"))?;
    Ok((parse_u32(x_str, context)?, parse_u32(y_str, context)?))
}

fn parse_u32(value: &str, context: &'static str) -> Result<u32, CommandParseError> {
    value
        .parse::<u32>()
        .map_err(|source| CommandParseError::InvalidInteger {
            value: value.to_string(),
            context,
            source,
        })
}

fn parse_mode(token: &str) -> Result<CombineMode, CommandParseError> {
    token
        .parse::<CombineMode>()
        .map_err(|_| CommandParseError::InvalidMode(token.to_string()))
}

fn parse_customisation(token: &str) -> Result<CustomisationChoice, CommandParseError> {
    match token.to_ascii_lowercase().as_str() {
        "0" | "energy" => Ok(CustomisationChoice::EnergyGeneration),
        "1" | "ore" => Ok(CustomisationChoice::OreMining),
        "2" | "food" => Ok(CustomisationChoice::FoodFarming),
        other => Err(CommandParseError::InvalidCustomisation(other.to_string())),
    }
}

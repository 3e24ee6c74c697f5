use crate::error::{AppError, AppResult};

use super::spec::{find_command_spec, usage};
use super::types::{Command, CommandSpec};

pub fn parse_command_text(input: &str) -> AppResult<Command> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(AppError::invalid_argument("command must not be empty"));
    }

    let (id, args_text) = match trimmed.find(char::is_whitespace) {
        Some(index) => (&trimmed[..index], trimmed[index..].trim_start()),
        None => (trimmed, ""),
    };

    let Some(spec) = find_command_spec(id) else {
        return Err(AppError::invalid_argument(format!("unknown command: {id}")));
    };

    match id {
        "search" => parse_text(spec, args_text).map(|query| Command::SubmitSearch { query }),
        "next-page" => parse_no_args(spec, args_text, Command::NextPage),
        "prev-page" => parse_no_args(spec, args_text, Command::PrevPage),
        "first-page" => parse_no_args(spec, args_text, Command::FirstPage),
        "last-page" => parse_no_args(spec, args_text, Command::LastPage),
        "goto-page" => parse_page(spec, args_text).map(|page| Command::GotoPage { page }),
        "clear" => parse_no_args(spec, args_text, Command::ClearSearch),
        "history-back" => parse_no_args(spec, args_text, Command::HistoryBack),
        "history-forward" => parse_no_args(spec, args_text, Command::HistoryForward),
        "open" => parse_text(spec, args_text).map(|location| Command::OpenLocation { location }),
        "quit" => parse_no_args(spec, args_text, Command::Quit),
        _ => Err(AppError::unsupported(
            "command parser is out of sync with registry",
        )),
    }
}

fn parse_no_args(spec: &CommandSpec, args_text: &str, cmd: Command) -> AppResult<Command> {
    if args_text.is_empty() {
        return Ok(cmd);
    }
    Err(AppError::invalid_argument(format!(
        "{} does not accept arguments",
        spec.id
    )))
}

fn parse_text(spec: &CommandSpec, args_text: &str) -> AppResult<String> {
    let text = args_text.trim();
    if text.is_empty() {
        return Err(AppError::invalid_argument(format!("usage: {}", usage(spec))));
    }
    Ok(text.to_string())
}

fn parse_page(spec: &CommandSpec, args_text: &str) -> AppResult<usize> {
    let mut parts = args_text.split_whitespace();
    let Some(page_text) = parts.next() else {
        return Err(AppError::invalid_argument(format!("usage: {}", usage(spec))));
    };
    if parts.next().is_some() {
        return Err(AppError::invalid_argument(format!(
            "{} accepts exactly 1 argument",
            spec.id
        )));
    }

    let page = page_text.parse::<usize>().map_err(|_| {
        AppError::invalid_argument(format!("{} page must be a positive integer", spec.id))
    })?;
    if page < 1 {
        return Err(AppError::invalid_argument("page number must be >= 1"));
    }
    Ok(page)
}

#[cfg(test)]
mod tests {
    use super::parse_command_text;
    use crate::command::Command;

    #[test]
    fn parses_basic_commands() {
        assert_eq!(
            parse_command_text("next-page").expect("parse should succeed"),
            Command::NextPage
        );
        assert_eq!(
            parse_command_text("  goto-page 3 ").expect("parse should succeed"),
            Command::GotoPage { page: 3 }
        );
        assert_eq!(
            parse_command_text("clear").expect("parse should succeed"),
            Command::ClearSearch
        );
    }

    #[test]
    fn search_and_open_take_the_rest_of_the_line() {
        assert_eq!(
            parse_command_text("search  black   cat ").expect("parse should succeed"),
            Command::SubmitSearch {
                query: "black   cat".to_string(),
            }
        );
        assert_eq!(
            parse_command_text("open ?query=dog&page=2").expect("parse should succeed"),
            Command::OpenLocation {
                location: "?query=dog&page=2".to_string(),
            }
        );
    }

    #[test]
    fn rejects_bad_input() {
        assert!(parse_command_text("").is_err());
        assert!(parse_command_text("zoom-in").is_err());
        assert!(parse_command_text("quit now").is_err());
        assert!(parse_command_text("goto-page").is_err());
        assert!(parse_command_text("goto-page 0").is_err());
        assert!(parse_command_text("goto-page -2").is_err());
        assert!(parse_command_text("goto-page 2 3").is_err());
        assert!(parse_command_text("search   ").is_err());
    }

    #[test]
    fn error_message_names_usage() {
        let err = parse_command_text("open").expect_err("open needs a location");
        assert!(err.to_string().contains("open <location>"));
    }
}

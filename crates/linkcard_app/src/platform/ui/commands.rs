use linkcard_core::{CardStyle, Msg, UnknownStyle};
use thiserror::Error;

/// One line typed at the prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Msg(Msg),
    /// Block until the form is no longer loading and the engine is settled.
    Wait,
    Show,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("unknown command '{0}', type `help` for a list")]
    Unknown(String),
    #[error("{0}")]
    Style(#[from] UnknownStyle),
    #[error("`{0}` takes no arguments")]
    UnexpectedArgument(&'static str),
}

/// Parse a prompt line; blank lines yield `Ok(None)`.
pub fn parse_command(line: &str) -> Result<Option<Command>, CommandError> {
    let line = line.trim_end_matches(['\r', '\n']);
    let trimmed = line.trim_start();
    if trimmed.trim().is_empty() {
        return Ok(None);
    }

    let (word, rest) = match trimmed.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest),
        None => (trimmed, ""),
    };
    // Free text keeps inner spacing; the core trims what it sends.
    let argument = rest.trim_start().to_string();

    let command = match word.to_ascii_lowercase().as_str() {
        "url" => Command::Msg(Msg::UrlChanged(argument)),
        "style" => Command::Msg(Msg::StyleSelected(argument.parse::<CardStyle>()?)),
        "title" => Command::Msg(Msg::TitleChanged(argument)),
        "description" | "desc" => Command::Msg(Msg::DescriptionChanged(argument)),
        "submit" => bare(Command::Msg(Msg::SubmitClicked), "submit", &argument)?,
        "copy" => bare(Command::Msg(Msg::CopyClicked), "copy", &argument)?,
        "download" => bare(Command::Msg(Msg::DownloadClicked), "download", &argument)?,
        "wait" => bare(Command::Wait, "wait", &argument)?,
        "show" => bare(Command::Show, "show", &argument)?,
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => return Err(CommandError::Unknown(other.to_string())),
    };
    Ok(Some(command))
}

fn bare(command: Command, name: &'static str, argument: &str) -> Result<Command, CommandError> {
    if argument.trim().is_empty() {
        Ok(command)
    } else {
        Err(CommandError::UnexpectedArgument(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_lines_are_ignored() {
        assert_eq!(parse_command(""), Ok(None));
        assert_eq!(parse_command("   \n"), Ok(None));
    }

    #[test]
    fn form_fields_become_messages() {
        assert_eq!(
            parse_command("url example.com/path\n"),
            Ok(Some(Command::Msg(Msg::UrlChanged(
                "example.com/path".to_string()
            ))))
        );
        assert_eq!(
            parse_command("title  My  page"),
            Ok(Some(Command::Msg(Msg::TitleChanged("My  page".to_string()))))
        );
        assert_eq!(
            parse_command("desc"),
            Ok(Some(Command::Msg(Msg::DescriptionChanged(String::new()))))
        );
        assert_eq!(
            parse_command("STYLE WeChat"),
            Ok(Some(Command::Msg(Msg::StyleSelected(CardStyle::Wechat))))
        );
    }

    #[test]
    fn actions_and_control_words() {
        assert_eq!(
            parse_command("submit"),
            Ok(Some(Command::Msg(Msg::SubmitClicked)))
        );
        assert_eq!(parse_command("copy"), Ok(Some(Command::Msg(Msg::CopyClicked))));
        assert_eq!(
            parse_command("download"),
            Ok(Some(Command::Msg(Msg::DownloadClicked)))
        );
        assert_eq!(parse_command("wait"), Ok(Some(Command::Wait)));
        assert_eq!(parse_command("exit"), Ok(Some(Command::Quit)));
    }

    #[test]
    fn rejects_unknown_words_and_styles() {
        assert_eq!(
            parse_command("generate"),
            Err(CommandError::Unknown("generate".to_string()))
        );
        assert!(matches!(
            parse_command("style green"),
            Err(CommandError::Style(_))
        ));
        assert_eq!(
            parse_command("submit now"),
            Err(CommandError::UnexpectedArgument("submit"))
        );
    }
}

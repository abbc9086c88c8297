//! Terminal commands standing in for page clicks and form input.

use crate::error::CommandError;

pub const HELP: &str = "\
  menu              toggle the mobile menu
  link              click a menu link (closes the menu)
  scroll <px>       wheel scroll by <px> (negative scrolls up)
  name <text>       fill the name field
  phone <text>      type into the phone field (digits only are kept)
  email <text>      fill the email field
  message <text>    fill the message field
  captcha <answer>  answer the captcha
  submit            submit the contact form
  accept            accept cookies
  status            print page state
  help              show this list";

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    ToggleMenu,
    MenuLink,
    Scroll(f32),
    Name(String),
    Phone(String),
    Email(String),
    Message(String),
    Captcha(String),
    Submit,
    AcceptCookies,
    Status,
    Help,
}

impl Command {
    pub fn parse(line: &str) -> Result<Self, CommandError> {
        let line = line.trim();
        let (head, rest) = match line.split_once(char::is_whitespace) {
            Some((head, rest)) => (head, rest.trim()),
            None => (line, ""),
        };

        let text = |command: &'static str, expected: &'static str| {
            if rest.is_empty() {
                Err(CommandError::MissingArgument { command, expected })
            } else {
                Ok(rest.to_string())
            }
        };

        match head.to_lowercase().as_str() {
            "menu" => Ok(Self::ToggleMenu),
            "link" => Ok(Self::MenuLink),
            "scroll" => {
                let raw = text("scroll", "a pixel delta")?;
                raw.parse::<f32>()
                    .map(Self::Scroll)
                    .map_err(|_| CommandError::NotANumber(raw))
            }
            "name" => text("name", "a value").map(Self::Name),
            // Empty phone/captcha are legitimate field states.
            "phone" => Ok(Self::Phone(rest.to_string())),
            "email" => text("email", "a value").map(Self::Email),
            "message" => text("message", "a value").map(Self::Message),
            "captcha" => Ok(Self::Captcha(rest.to_string())),
            "submit" => Ok(Self::Submit),
            "accept" => Ok(Self::AcceptCookies),
            "status" => Ok(Self::Status),
            "help" | "?" => Ok(Self::Help),
            other => Err(CommandError::Unknown(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_bare_commands() {
        assert_eq!(Command::parse("menu"), Ok(Command::ToggleMenu));
        assert_eq!(Command::parse("  SUBMIT "), Ok(Command::Submit));
        assert_eq!(Command::parse("?"), Ok(Command::Help));
    }

    #[test]
    fn keeps_argument_text() {
        assert_eq!(
            Command::parse("message Хочу   заказать сайт"),
            Ok(Command::Message("Хочу   заказать сайт".to_string()))
        );
        assert_eq!(Command::parse("captcha"), Ok(Command::Captcha(String::new())));
    }

    #[test]
    fn scroll_needs_a_number() {
        assert_eq!(Command::parse("scroll -120"), Ok(Command::Scroll(-120.0)));
        assert_eq!(
            Command::parse("scroll far"),
            Err(CommandError::NotANumber("far".to_string()))
        );
        assert!(matches!(
            Command::parse("scroll"),
            Err(CommandError::MissingArgument { command: "scroll", .. })
        ));
    }

    #[test]
    fn unknown_command() {
        assert_eq!(
            Command::parse("dance"),
            Err(CommandError::Unknown("dance".to_string()))
        );
    }
}

/// Reply to /start and /help.
pub const USAGE: &str = "Command format:\n\
    • /forecast Tallinn\n\
    • /forecast Tallinn, Estonia\n\n\
    I look for public signals in news and announcements and translate \
    them into weather-style metrics for a place.";

/// Reply to a bare /forecast.
pub const FORECAST_USAGE: &str = "Format: /forecast <place>\nExample: /forecast Tallinn";

/// Reply when the resolver doesn't know the place.
pub const UNKNOWN_PLACE: &str = "I couldn't find that place on the map. \
    Try adding a country: /forecast Tallinn, Estonia";

#[derive(Debug, PartialEq, Eq)]
pub enum Command {
    Start,
    Forecast(String),
}

/// Parse a message into a command. Non-commands and unknown commands
/// return None and are ignored by the dispatch loop.
pub fn parse(text: &str) -> Option<Command> {
    let text = text.trim();
    let (head, rest) = match text.split_once(char::is_whitespace) {
        Some((head, rest)) => (head, rest),
        None => (text, ""),
    };
    // Group chats address commands as /forecast@BotName.
    let head = head.split('@').next().unwrap_or(head);

    match head {
        "/start" | "/help" => Some(Command::Start),
        "/forecast" => Some(Command::Forecast(rest.trim().to_string())),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_start_and_help() {
        assert_eq!(parse("/start"), Some(Command::Start));
        assert_eq!(parse("/help extra"), Some(Command::Start));
    }

    #[test]
    fn parses_forecast_with_argument() {
        assert_eq!(
            parse("/forecast Tallinn, Estonia"),
            Some(Command::Forecast("Tallinn, Estonia".to_string()))
        );
    }

    #[test]
    fn parses_bare_forecast_as_empty_argument() {
        assert_eq!(parse("/forecast"), Some(Command::Forecast(String::new())));
        assert_eq!(parse("/forecast   "), Some(Command::Forecast(String::new())));
    }

    #[test]
    fn strips_bot_mention() {
        assert_eq!(
            parse("/forecast@CivicWeatherBot Narva"),
            Some(Command::Forecast("Narva".to_string()))
        );
    }

    #[test]
    fn ignores_chatter_and_unknown_commands() {
        assert_eq!(parse("hello there"), None);
        assert_eq!(parse("/weather Tallinn"), None);
    }
}

use clap::Parser;

/// Command line surface. The launcher takes free-form words instead of
/// flags: a mode selector first, then an optional timer title.
#[derive(Debug, Parser)]
#[command(
    name = "sandwichtimer",
    version,
    about = "Menu bar pomodoro and countdown timers"
)]
pub struct Cli {
    /// `pomodoro`, a duration in minutes, or `quit`, optionally followed by
    /// a timer title
    #[arg(allow_negative_numbers = true)]
    pub words: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Pomodoro { title: Option<String> },
    Fixed { minutes: f64, title: Option<String> },
    Quit,
}

/// Interprets the free-form words. They are joined and re-split so a single
/// quoted argument behaves the same as separate ones; the first token always
/// acts as the mode selector and anything after it becomes the title.
/// Whatever is neither a finite number nor `quit` means pomodoro.
pub fn interpret(words: &[String]) -> Command {
    let joined = words.join(" ");
    let mut tokens = joined.split_whitespace();

    let Some(selector) = tokens.next() else {
        return Command::Pomodoro { title: None };
    };

    let rest: Vec<&str> = tokens.collect();
    let title = if rest.is_empty() {
        None
    } else {
        Some(rest.join(" "))
    };

    if selector == "quit" {
        return Command::Quit;
    }

    match selector.parse::<f64>() {
        Ok(minutes) if minutes.is_finite() => Command::Fixed { minutes, title },
        _ => Command::Pomodoro { title },
    }
}

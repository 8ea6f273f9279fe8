use std::io::{self, BufRead, Write};

use linkqa_core::{Mode, Msg};
use linkqa_logging::linkqa_debug;

use super::render::{describe_failure, describe_notice, render_form};
use super::session::Session;

const HELP: &str = "\
Commands:
  list                 show the form
  add [url]            add a source row, optionally filled in
  set <n> <url>        change source n
  rm <n>               remove source n
  mode query|summary   choose what to ask for
  query <text>         set the question (empty for the default)
  submit               send the form and wait for the answer
  help                 this text
  quit                 leave
";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    List,
    Add(Option<String>),
    Set { position: usize, link: String },
    Remove { position: usize },
    Mode(Mode),
    Query(String),
    Submit,
    Quit,
}

pub fn parse_command(line: &str) -> Result<Command, String> {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    match word {
        "help" | "?" => Ok(Command::Help),
        "list" | "show" | "" => Ok(Command::List),
        "add" => Ok(Command::Add((!rest.is_empty()).then(|| rest.to_string()))),
        "set" => {
            let (position, link) = rest
                .split_once(char::is_whitespace)
                .ok_or_else(|| "usage: set <n> <url>".to_string())?;
            Ok(Command::Set {
                position: parse_position(position)?,
                link: link.trim().to_string(),
            })
        }
        "rm" | "remove" => Ok(Command::Remove {
            position: parse_position(rest)?,
        }),
        "mode" => match rest {
            "query" => Ok(Command::Mode(Mode::Query)),
            "summary" => Ok(Command::Mode(Mode::Summary)),
            _ => Err("usage: mode query|summary".to_string()),
        },
        "query" => Ok(Command::Query(rest.to_string())),
        "submit" | "send" => Ok(Command::Submit),
        "quit" | "exit" | "q" => Ok(Command::Quit),
        other => Err(format!("unknown command '{other}', try 'help'")),
    }
}

fn parse_position(text: &str) -> Result<usize, String> {
    match text.trim().parse::<usize>() {
        Ok(n) if n >= 1 => Ok(n),
        _ => Err(format!("'{text}' is not a source number")),
    }
}

/// Runs the prompt until `quit` or end of input.
pub fn run<R: BufRead, W: Write>(session: &mut Session, input: R, mut out: W) -> io::Result<()> {
    write!(out, "{}", render_form(&session.state().view()))?;
    writeln!(out, "Type 'help' for commands.")?;

    let mut lines = input.lines();
    loop {
        write!(out, "> ")?;
        out.flush()?;
        let Some(line) = lines.next().transpose()? else {
            break;
        };

        let command = match parse_command(&line) {
            Ok(command) => command,
            Err(message) => {
                writeln!(out, "{message}")?;
                continue;
            }
        };
        linkqa_debug!("repl command {:?}", command);

        match command {
            Command::Help => write!(out, "{HELP}")?,
            Command::Quit => break,
            Command::List => {}
            Command::Submit => {
                report(session, Msg::SubmitClicked, &mut out)?;
                if session.state().view().pending {
                    writeln!(out, "Processing... please wait")?;
                    session.wait_for_completion();
                }
                let view = session.state().view();
                if let Some(answer) = &view.answer {
                    writeln!(out, "\n{}\n", answer.trim_end())?;
                    for source in &view.answer_sources {
                        writeln!(out, "  source: {source}")?;
                    }
                } else if let Some(failure) = describe_failure(&view) {
                    writeln!(out, "{failure}")?;
                }
            }
            other => {
                let Some(msg) = to_msg(session, other) else {
                    writeln!(out, "no such source")?;
                    continue;
                };
                report(session, msg, &mut out)?;
            }
        }

        if session.consume_dirty() {
            write!(out, "{}", render_form(&session.state().view()))?;
        }
    }
    Ok(())
}

fn report<W: Write>(session: &mut Session, msg: Msg, out: &mut W) -> io::Result<()> {
    for notice in session.dispatch(msg) {
        writeln!(out, "{}", describe_notice(notice))?;
    }
    Ok(())
}

fn to_msg(session: &mut Session, command: Command) -> Option<Msg> {
    match command {
        Command::Add(None) => Some(Msg::SourceAdded),
        Command::Add(Some(link)) => {
            // Fill the row that the add creates.
            session.dispatch(Msg::SourceAdded);
            let id = session.state().sources().ids().last()?;
            Some(Msg::SourceEdited { id, link })
        }
        Command::Set { position, link } => Some(Msg::SourceEdited {
            id: session.state().sources().id_at(position - 1)?,
            link,
        }),
        Command::Remove { position } => Some(Msg::SourceRemoved {
            id: session.state().sources().id_at(position - 1)?,
        }),
        Command::Mode(mode) => Some(Msg::ModeSelected(mode)),
        Command::Query(text) => Some(Msg::QueryChanged(text)),
        Command::Help | Command::List | Command::Submit | Command::Quit => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_editing_commands() {
        assert_eq!(
            parse_command("set 2 https://a.example.com").unwrap(),
            Command::Set {
                position: 2,
                link: "https://a.example.com".to_string()
            }
        );
        assert_eq!(parse_command("rm 1").unwrap(), Command::Remove { position: 1 });
        assert_eq!(parse_command("add").unwrap(), Command::Add(None));
        assert_eq!(
            parse_command("add https://b.example.com").unwrap(),
            Command::Add(Some("https://b.example.com".to_string()))
        );
    }

    #[test]
    fn query_keeps_inner_spacing() {
        assert_eq!(
            parse_command("query  what   is new ").unwrap(),
            Command::Query("what   is new".to_string())
        );
        assert_eq!(parse_command("query").unwrap(), Command::Query(String::new()));
    }

    #[test]
    fn mode_requires_known_value() {
        assert_eq!(
            parse_command("mode summary").unwrap(),
            Command::Mode(Mode::Summary)
        );
        assert!(parse_command("mode essay").is_err());
    }

    #[test]
    fn positions_are_one_based() {
        assert!(parse_command("rm 0").is_err());
        assert!(parse_command("rm x").is_err());
        assert!(parse_command("set 1").is_err());
    }

    #[test]
    fn unknown_command_is_reported() {
        let err = parse_command("frobnicate").unwrap_err();
        assert!(err.contains("frobnicate"));
    }
}

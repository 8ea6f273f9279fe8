use std::io::{self, Write};

use anyhow::{bail, Context};
use clap::Parser;
use linkqa_core::{AppState, Msg};
use linkqa_logging::{level_for_verbosity, linkqa_info, linkqa_warn};

use super::cli::Cli;
use super::config::{load_config, AppConfig};
use super::effects::EffectRunner;
use super::logging;
use super::output::write_atomically;
use super::render::{describe_failure, describe_notice, render, AnswerDocument};
use super::repl;
use super::session::Session;

pub fn run_app() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let (config, config_error) = match load_config(cli.config.as_deref()) {
        Ok(config) => (config, None),
        Err(err) => (AppConfig::default(), Some(err)),
    };
    logging::initialize(config.log, level_for_verbosity(cli.verbose));
    if let Some(err) = config_error {
        linkqa_warn!("{}; using defaults", err);
    }

    let runner = EffectRunner::new(config.client_settings());
    let mut session = Session::new(AppState::with_settings(config.form_settings()), runner);

    if cli.interactive {
        let stdin = io::stdin();
        repl::run(&mut session, stdin.lock(), io::stdout())?;
        return Ok(());
    }

    if cli.urls.is_empty() {
        bail!("no sources given; pass --url at least once or use --interactive");
    }
    fill_form(&mut session, &cli);

    let notices = session.dispatch(Msg::SubmitClicked);
    for notice in notices {
        eprintln!("{}", describe_notice(notice));
    }
    let errors = session.state().validation_errors().to_vec();
    if !errors.is_empty() {
        for error in &errors {
            eprintln!("{error}");
        }
        bail!("the form is incomplete");
    }

    session.wait_for_completion();
    let view = session.state().view();
    let Some(answer) = view.answer.as_deref() else {
        let failure = describe_failure(&view).unwrap_or_else(|| "no answer received".to_string());
        bail!(failure);
    };
    let Some(request) = session.last_request() else {
        bail!("no request was sent");
    };

    let answered_utc = chrono::Utc::now().to_rfc3339();
    let document = AnswerDocument {
        mode: request.mode,
        query: request.payload.query.as_deref(),
        answer,
        sources: &view.answer_sources,
        answered_utc: &answered_utc,
    };
    let rendered = render(cli.format.into(), &document);

    match &cli.output {
        Some(path) => {
            let written = write_atomically(path, &rendered)
                .with_context(|| format!("writing answer to {}", path.display()))?;
            linkqa_info!("Answer written to {}", written.display());
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(rendered.as_bytes())?;
            stdout.flush()?;
        }
    }
    Ok(())
}

/// Puts the command line URLs, mode and query into the form.
fn fill_form(session: &mut Session, cli: &Cli) {
    for (position, url) in cli.urls.iter().enumerate() {
        let id = match session.state().sources().id_at(position) {
            Some(id) => id,
            None => {
                session.dispatch(Msg::SourceAdded);
                match session.state().sources().ids().last() {
                    Some(id) => id,
                    None => continue,
                }
            }
        };
        session.dispatch(Msg::SourceEdited {
            id,
            link: url.clone(),
        });
    }
    session.dispatch(Msg::ModeSelected(cli.mode.into()));
    session.dispatch(Msg::QueryChanged(cli.query.clone().unwrap_or_default()));
}

use std::io::{self, BufRead, Write};

use log::{info, warn};

use super::{
    command::{Command, USAGE},
    controller::UserListController,
    helpers::render_controller,
    session::Session,
    user_store::UserStore,
};

/* wait for everything in flight, print failures, then the current page */
async fn settle_and_render<S: UserStore, W: Write>(
    session: &mut Session<'_, S>,
    output: &mut W,
) -> io::Result<()> {
    for outcome in session.settle().await {
        if let Err(err) = outcome {
            writeln!(output, "error: {}", err)?;
        }
    }
    writeln!(output, "{}", render_controller(session.controller()))
}

/// Loads the list, then serves commands from `input` until it ends or `quit` is read.
/// Failed remote calls are reported on `output` and do not stop the loop.
pub async fn run<S: UserStore, R: BufRead, W: Write>(
    store: &S,
    input: R,
    mut output: W,
) -> io::Result<UserListController> {
    let mut session = Session::new(store, UserListController::new());
    session.load();
    settle_and_render(&mut session, &mut output).await?;

    for bytes in input.split(b'\n') {
        let line = match String::from_utf8(bytes?) {
            Ok(line) => line,
            Err(err) => {
                warn!("Skipping input line: {}", err);
                writeln!(output, "skipping a line that is not valid UTF-8")?;
                continue;
            }
        };
        if line.trim().is_empty() {
            continue;
        }
        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(err) => {
                writeln!(output, "{}\n{}", err, USAGE)?;
                continue;
            }
        };
        match command {
            Command::Quit => break,
            Command::Help => {
                writeln!(output, "{}", USAGE)?;
                continue;
            }
            Command::List => {}
            Command::New => session.begin_create(),
            Command::Edit(id) => match session.controller().find_user(&id).cloned() {
                Some(user) => session.begin_edit(&user),
                None => writeln!(output, "no user with id {}", id)?,
            },
            Command::Name(name) => session.set_name(name),
            Command::Email(email) => session.set_email(email),
            Command::Submit => session.submit(),
            Command::Delete(id) => session.delete(id),
            Command::Reload => session.load(),
        }
        settle_and_render(&mut session, &mut output).await?;
    }

    info!("Input finished, leaving");
    Ok(session.into_controller())
}

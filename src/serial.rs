//! Serial console attachment via the term.js terminal bridge.

use std::process::Stdio;

use tokio::process::Command;

use crate::error::{ConnectError, Result};

const TERMJS_BIN: &str = "termjs-cli";
const CONSOLE_BASE_URL: &str = "https://tty.skiff.cloud";

fn console_url(server_id: &str, api_token: &str) -> String {
    format!(
        "{}/?server_id={}&auth_token={}",
        CONSOLE_BASE_URL, server_id, api_token
    )
}

/// Attaches the terminal to a server's serial console.
///
/// Hands the session to the third-party `termjs-cli` bridge pointed at the
/// console endpoint, with all standard streams inherited. There is no
/// pre-flight check for the binary: a missing install surfaces as the spawn
/// error, after install guidance has been logged.
pub async fn attach_serial_console(
    server_id: &str,
    api_token: &str,
    attach_stdin: bool,
) -> Result<()> {
    let url = console_url(server_id, api_token);

    let mut args: Vec<String> = Vec::new();
    if !attach_stdin {
        args.push("--no-stdin".to_string());
    }
    args.push(url.clone());

    tracing::debug!("Executing: {} {:?}", TERMJS_BIN, args);

    let status = Command::new(TERMJS_BIN)
        .args(&args)
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()
        .await;

    match status {
        Ok(status) if status.success() => Ok(()),
        Ok(status) => {
            warn_install_help(&url);
            Err(ConnectError::Console(format!(
                "{} exited with code: {:?}",
                TERMJS_BIN,
                status.code()
            )))
        }
        Err(err) => {
            warn_install_help(&url);
            Err(err.into())
        }
    }
}

fn warn_install_help(url: &str) {
    tracing::warn!(
        "You need to install '{}' from https://github.com/moul/term.js-cli\n\n    npm install -g term.js-cli\n\nHowever, you can access your serial console using a web browser:\n\n    {}\n",
        TERMJS_BIN,
        url
    );
}

//! SSH invocation helpers.
//!
//! The CLI drives the system `ssh` binary rather than an in-process SSH
//! stack: interactive sessions inherit the terminal verbatim, and a jump
//! host is expressed as a nested invocation supplied through the
//! `ProxyCommand` option.

use std::process::Stdio;

use tokio::process::Command;

use crate::error::{ConnectError, Result};
use crate::net::is_port_open;

/// Setting this to "1" keeps ssh verbose (no `-q`) and adds `-x` tracing to
/// the remote shell.
pub const DEBUG_ENV: &str = "SKIFF_DEBUG";

/// Setting this to "1" re-enables strict host key checking.
pub const SECURE_EXEC_ENV: &str = "SKIFF_SECURE_EXEC";

const SSH_PORT: u16 = 22;

fn debug_enabled() -> bool {
    std::env::var(DEBUG_ENV).map(|v| v == "1").unwrap_or(false)
}

fn secure_exec_enabled() -> bool {
    std::env::var(SECURE_EXEC_ENV)
        .map(|v| v == "1")
        .unwrap_or(false)
}

/// Renders an argument list as a copy/paste-able string of quoted tokens.
pub fn quote_args(args: &[String]) -> String {
    let mut output = String::new();
    for arg in args {
        output.push(' ');
        output.push_str(&format!("{:?}", arg));
    }
    output
}

/// Computes execve-compatible arguments for running a command via ssh.
///
/// An empty string stands for an absent address. When `gateway_addr` is set,
/// the target is `private_addr`, reached through a nested `ssh -W %h:%p`
/// invocation against the gateway carried in a `ProxyCommand` option; the
/// nested argument list is built by the same rules, minus proxy and command.
///
/// Pure construction: no I/O beyond reading the debug/secure env flags.
pub fn build_ssh_args(
    public_addr: &str,
    private_addr: &str,
    allocate_tty: bool,
    extra_options: &[String],
    remote_command: &[String],
    gateway_addr: &str,
) -> Vec<String> {
    let use_gateway = !gateway_addr.is_empty();
    let mut args: Vec<String> = Vec::new();

    if !debug_enabled() {
        args.push("-q".to_string());
    }

    // Legacy default: trust unknown hosts unless the secure override is set.
    if !secure_exec_enabled() {
        args.extend([
            "-o".to_string(),
            "UserKnownHostsFile=/dev/null".to_string(),
            "-o".to_string(),
            "StrictHostKeyChecking=no".to_string(),
        ]);
    }

    if !extra_options.is_empty() {
        args.push(extra_options.join(" "));
    }

    args.push("-l".to_string());
    args.push("root".to_string());

    if use_gateway {
        let proxy_command = build_ssh_args(
            gateway_addr,
            "",
            allocate_tty,
            &["-W".to_string(), "%h:%p".to_string()],
            &[],
            "",
        );
        args.push(private_addr.to_string());
        args.push("-o".to_string());
        args.push(format!("ProxyCommand=ssh {}", proxy_command.join(" ")));
    } else {
        args.push(public_addr.to_string());
    }

    if allocate_tty {
        args.push("-t".to_string());
        args.push("-t".to_string());
    }

    if !remote_command.is_empty() {
        args.push("--".to_string());
        args.push("/bin/sh".to_string());
        args.push("-e".to_string());

        if debug_enabled() {
            args.push("-x".to_string());
        }

        args.push("-c".to_string());
        // Same shape as shell double-quoting: one token, quotes included
        args.push(format!("{:?}", remote_command.join(" ")));
    }

    args
}

/// Runs a command on a server over ssh with the terminal attached.
///
/// Checks routing preconditions first, optionally probes TCP reachability of
/// port 22 (on the gateway when one is set), then hands the session to the
/// system `ssh` binary with stdin, stdout and stderr inherited for the
/// lifetime of the child.
pub async fn exec_ssh(
    public_addr: &str,
    private_addr: &str,
    command: &[String],
    check_connection: bool,
    gateway_addr: &str,
) -> Result<()> {
    if public_addr.is_empty() && gateway_addr.is_empty() {
        return Err(ConnectError::MissingAddress(
            "server does not have a public address".to_string(),
        ));
    }
    if private_addr.is_empty() && !gateway_addr.is_empty() {
        return Err(ConnectError::MissingAddress(
            "server does not have a private address".to_string(),
        ));
    }

    if check_connection {
        let use_gateway = !gateway_addr.is_empty();
        if use_gateway && !is_port_open(&format!("{}:{}", gateway_addr, SSH_PORT)).await {
            return Err(ConnectError::NotReachable(
                "gateway is not available, try again later".to_string(),
            ));
        }
        if !use_gateway && !is_port_open(&format!("{}:{}", public_addr, SSH_PORT)).await {
            return Err(ConnectError::NotReachable(
                "server is not ready, try again later".to_string(),
            ));
        }
    }

    let args = build_ssh_args(public_addr, private_addr, true, &[], command, gateway_addr);

    tracing::debug!("Executing: ssh{}", quote_args(&args));

    let status = Command::new("ssh")
        .args(&args)
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()
        .await?;

    if !status.success() {
        return Err(ConnectError::Ssh(format!(
            "ssh exited with code: {:?}",
            status.code()
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_plain_target_without_command() {
        let args = build_ssh_args("1.2.3.4", "", false, &[], &[], "");

        assert_eq!(args.last().map(String::as_str), Some("1.2.3.4"));
        assert!(!args.iter().any(|a| a == "--"));
        assert!(!args.iter().any(|a| a == "/bin/sh"));
        assert!(!args.iter().any(|a| a == "-t"));
    }

    #[test]
    fn test_forces_root_login() {
        let args = build_ssh_args("1.2.3.4", "", false, &[], &[], "");

        let pos = args.iter().position(|a| a == "-l").unwrap();
        assert_eq!(args[pos + 1], "root");
    }

    #[test]
    fn test_gateway_produces_nested_proxy_command() {
        let args = build_ssh_args("", "10.0.0.1", false, &[], &[], "62.1.2.3");

        let proxy = args
            .iter()
            .find(|a| a.starts_with("ProxyCommand=ssh "))
            .expect("no ProxyCommand option");
        assert!(proxy.contains("-W %h:%p"));
        assert!(proxy.contains("62.1.2.3"));

        // The gateway route targets the private address
        let target = args.iter().position(|a| a == "10.0.0.1").unwrap();
        assert_eq!(args[target + 1], "-o");
    }

    #[test]
    fn test_remote_command_becomes_quoted_shell_invocation() {
        let args = build_ssh_args(
            "1.2.3.4",
            "10.0.0.1",
            true,
            &[],
            &strings(&["echo", "hi"]),
            "",
        );

        assert!(args.windows(2).any(|w| w[0] == "-t" && w[1] == "-t"));
        assert!(args
            .windows(3)
            .any(|w| w[0] == "--" && w[1] == "/bin/sh" && w[2] == "-e"));
        assert_eq!(args[args.len() - 2], "-c");
        assert_eq!(args.last().map(String::as_str), Some("\"echo hi\""));
    }

    #[test]
    fn test_extra_options_joined_as_one_token() {
        let args = build_ssh_args(
            "1.2.3.4",
            "",
            false,
            &strings(&["-W", "%h:%p"]),
            &[],
            "",
        );

        assert!(args.iter().any(|a| a == "-W %h:%p"));
    }

    #[test]
    fn test_quote_args() {
        assert_eq!(quote_args(&strings(&["a b", "c"])), " \"a b\" \"c\"");
        assert_eq!(quote_args(&[]), "");
    }

    #[tokio::test]
    async fn test_exec_ssh_requires_public_address_or_gateway() {
        let result = exec_ssh("", "", &[], false, "").await;

        assert!(matches!(
            result.unwrap_err(),
            ConnectError::MissingAddress(_)
        ));
    }

    #[tokio::test]
    async fn test_exec_ssh_gateway_requires_private_address() {
        let result = exec_ssh("1.2.3.4", "", &[], false, "62.1.2.3").await;

        assert!(matches!(
            result.unwrap_err(),
            ConnectError::MissingAddress(_)
        ));
    }
}

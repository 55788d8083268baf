//! apy - request one URL, verify it answered 200 and print its JSON
//!
//! Flow:
//! - Profile (`~/.apy/config.yaml`) then CLI flags decide endpoint and auth
//! - One blocking request through the normalizer
//! - Verdict, body or warning, tally summary

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;

use apy::constants::{APP_NAME, APP_VERSION, LOG_FILE};
use apy::storage::default_profile_path;
use apy::{Args, Console, Endpoint, Fatal, Net, Profile};

fn main() -> ExitCode {
    // Initialize logging to file
    let file_appender = tracing_appender::rolling::never(".", LOG_FILE);
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_ansi(false)
        .init();

    let args = Args::parse();
    let mut console = Console::stdio();

    match run(args, &mut console) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            // Fatal was already printed by Console::critical
            if e.downcast_ref::<Fatal>().is_none() {
                let _ = console.critical(format!("{:#}", e));
            }
            ExitCode::FAILURE
        }
    }
}

fn run(mut args: Args, console: &mut Console) -> Result<()> {
    tracing::info!(version = APP_VERSION, user = %args.user, "Starting {}", APP_NAME);

    let profile_path = args.config.clone().unwrap_or_else(default_profile_path);
    let profile = match Profile::load(&profile_path) {
        Ok(profile) => profile,
        Err(e) => return Err(console.critical(format!("{:#}", e)).into()),
    };

    if args.wants_password_prompt() {
        let password = console.secret(&format!("Password for {}", args.user))?;
        args.password = Some(password);
    }

    let base_url = profile.base_url.as_deref().unwrap_or_default();
    let endpoint = Endpoint::new(base_url, args.auth(profile.token.as_deref()));
    let timeout = args
        .timeout
        .map(std::time::Duration::from_secs)
        .unwrap_or_else(|| profile.timeout());
    let net = Net::new(endpoint).with_timeout(timeout);

    let url = if args.url.contains("://") {
        args.url.clone()
    } else if base_url.is_empty() {
        return Err(console
            .critical(format!("'{}' is relative and the profile has no base_url", args.url))
            .into());
    } else {
        net.endpoint().url(&args.url)
    };

    console.info("Press 'Ctrl + C' anytime to cancel.");
    console.item(format!("GET {}", url));

    let reply = net.get(&url);
    if console.verify("Getting response...", reply.status, 200) {
        match reply.log_message() {
            Some(log) => console.warning(log),
            None => console.content(&reply.body),
        }
    } else {
        console.warning(
            reply
                .log_message()
                .unwrap_or_else(|| format!("Unexpected status {}", reply.status)),
        );
    }

    console.summary();
    Ok(())
}

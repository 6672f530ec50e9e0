//! MailBreeze command line client
//!
//! Thin wrapper over the SDK for checking credentials and sending test mail.
//! Configuration comes from the environment (see `Settings::from_env`).

use anyhow::{Context, Result};
use clap::{Arg, ArgMatches, Command};
use mailbreeze::utils::logging::init_logging;
use mailbreeze::{ListListsParams, MailBreeze, SendEmailParams, Settings};
use serde::Serialize;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    let matches = cli().get_matches();

    let settings = Settings::from_env().context("Failed to load settings")?;
    init_logging(&settings.logging).context("Failed to initialize logging")?;
    info!("{}", mailbreeze::version_info());

    let client = MailBreeze::from_settings(&settings).context("Failed to create client")?;

    match matches.subcommand() {
        Some(("send", args)) => send(&client, args).await,
        Some(("verify", args)) => {
            let email = args
                .get_one::<String>("email")
                .context("email argument is required")?;
            let result = client
                .verification()
                .verify(email)
                .await
                .context("Verification failed")?;
            print_json(&result)
        }
        Some(("stats", _)) => {
            let stats = client
                .emails()
                .stats()
                .await
                .context("Failed to fetch email stats")?;
            print_json(&stats)
        }
        Some(("lists", _)) => {
            let lists = client
                .lists()
                .list(&ListListsParams::default())
                .await
                .context("Failed to list contact lists")?;
            print_json(&lists)
        }
        _ => anyhow::bail!("Unknown command"),
    }
}

fn cli() -> Command {
    Command::new("mailbreeze")
        .version(mailbreeze::VERSION)
        .about("Command line client for the MailBreeze email API")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("send")
                .about("Send an email")
                .arg(
                    Arg::new("from")
                        .long("from")
                        .value_name("ADDRESS")
                        .help("Sender address")
                        .required(true),
                )
                .arg(
                    Arg::new("to")
                        .long("to")
                        .value_name("ADDRESS")
                        .help("Recipient address - can be specified multiple times")
                        .action(clap::ArgAction::Append)
                        .required(true),
                )
                .arg(
                    Arg::new("subject")
                        .long("subject")
                        .value_name("TEXT")
                        .help("Subject line")
                        .required(true),
                )
                .arg(
                    Arg::new("html")
                        .long("html")
                        .value_name("HTML")
                        .help("HTML body")
                        .conflicts_with("text"),
                )
                .arg(
                    Arg::new("text")
                        .long("text")
                        .value_name("TEXT")
                        .help("Plain text body"),
                )
                .arg(
                    Arg::new("idempotency-key")
                        .long("idempotency-key")
                        .value_name("KEY")
                        .help("Send at most once for this key"),
                ),
        )
        .subcommand(
            Command::new("verify")
                .about("Verify a single email address")
                .arg(Arg::new("email").value_name("EMAIL").required(true)),
        )
        .subcommand(Command::new("stats").about("Show sending statistics"))
        .subcommand(Command::new("lists").about("Show the first page of contact lists"))
}

async fn send(client: &MailBreeze, args: &ArgMatches) -> Result<()> {
    let from = args
        .get_one::<String>("from")
        .context("--from is required")?;
    let to: Vec<String> = args
        .get_many::<String>("to")
        .context("--to is required")?
        .cloned()
        .collect();
    let subject = args
        .get_one::<String>("subject")
        .context("--subject is required")?;

    let mut params = SendEmailParams::new(from.as_str(), to).subject(subject.as_str());
    if let Some(html) = args.get_one::<String>("html") {
        params = params.html(html.as_str());
    }
    if let Some(text) = args.get_one::<String>("text") {
        params = params.text(text.as_str());
    }

    let emails = client.emails();
    let result = match args.get_one::<String>("idempotency-key") {
        Some(key) => emails.send_with_idempotency_key(&params, key).await,
        None => emails.send(&params).await,
    }
    .context("Failed to send email")?;

    print_json(&result)
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let output = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{}", output);
    Ok(())
}

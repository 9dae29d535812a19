//! `discord-codec` entry point.
//!
//! Decodes one payload as the named entity and prints its canonical
//! re-encoding:
//!
//! ```text
//! discord-codec <emoji|message|sticker|attachment|reaction|user> [file]
//! ```
//!
//! The payload is read from `file`, or from stdin when no file is given.

use std::{
    error::Error,
    io::{Read, Write},
};

use discord_codec::{
    codec::{CodecConfig, Entity},
    Attachment, Emoji, Message, Reaction, Sticker, User,
};
use tracing::{debug, error, warn};

const USAGE: &str = "usage: discord-codec <emoji|message|sticker|attachment|reaction|user> [file]";

/// Decode `input` as `E` and encode it again.
fn reencode<E: Entity>(input: &[u8], config: CodecConfig) -> Result<Vec<u8>, Box<dyn Error>> {
    let entity = E::from_json_with(input, config)?;

    Ok(entity.to_json()?)
}

fn read_input(path: Option<&str>) -> std::io::Result<Vec<u8>> {
    if let Some(path) = path {
        return std::fs::read(path);
    }

    let mut input = Vec::new();
    std::io::stdin().read_to_end(&mut input)?;

    Ok(input)
}

fn main() {
    // Initialise tracing (respects RUST_LOG env, defaults to warn).
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    dotenv::dotenv().ok();

    let config = match CodecConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "invalid codec configuration");
            std::process::exit(1);
        }
    };

    let mut args = std::env::args().skip(1);

    let Some(entity) = args.next() else {
        eprintln!("{USAGE}");
        std::process::exit(2);
    };
    let path = args.next();

    let input = match read_input(path.as_deref()) {
        Ok(input) => input,
        Err(e) => {
            error!(
                error = %e,
                path = path.as_deref().unwrap_or("<stdin>"),
                "failed to read payload"
            );
            std::process::exit(1);
        }
    };

    debug!(entity = %entity, bytes = input.len(), ?config, "decoding payload");

    let result = match entity.as_str() {
        "emoji" => reencode::<Emoji>(&input, config),
        "message" => reencode::<Message>(&input, config),
        "sticker" => reencode::<Sticker>(&input, config),
        "attachment" => reencode::<Attachment>(&input, config),
        "reaction" => reencode::<Reaction>(&input, config),
        "user" => reencode::<User>(&input, config),
        _ => {
            eprintln!("unknown entity `{entity}`\n{USAGE}");
            std::process::exit(2);
        }
    };

    match result {
        Ok(encoded) => {
            let mut stdout = std::io::stdout().lock();

            if let Err(e) = stdout
                .write_all(&encoded)
                .and_then(|()| stdout.write_all(b"\n"))
            {
                error!(error = %e, "failed to write output");
                std::process::exit(1);
            }
        }
        Err(e) => {
            warn!(entity = %entity, error = %e, "rejected payload");
            std::process::exit(1);
        }
    }
}

use clap::{
    builder::{
        styling::{AnsiColor, Effects, Styles},
        ValueParser,
    },
    Arg, ArgAction, ColorChoice, Command,
};

pub fn validator_log_level() -> ValueParser {
    ValueParser::from(move |level: &str| -> std::result::Result<u8, String> {
        if let Ok(parsed) = level.parse::<u8>() {
            // Successfully parsed as a number
            if parsed <= 5 {
                return Ok(parsed);
            }
        }

        match level.to_lowercase().as_str() {
            "error" => Ok(0),
            "warn" => Ok(1),
            "info" => Ok(2),
            "debug" => Ok(3),
            "trace" => Ok(4),
            _ => Err("invalid log level".to_string()),
        }
    })
}

fn token_arg() -> Arg {
    Arg::new("token")
        .short('t')
        .long("token")
        .help("Bearer token (header.claims.signature)")
        .env("PORDISTO_TOKEN")
        .hide_env_values(true)
        .required(true)
}

fn session_id_arg() -> Arg {
    Arg::new("session-id")
        .short('s')
        .long("session-id")
        .help("Opaque session id correlating this client to the backend session")
        .env("PORDISTO_SESSION_ID")
        .required(true)
}

pub fn new() -> Command {
    let styles = Styles::styled()
        .header(AnsiColor::Yellow.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Blue.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::Green.on_default());

    Command::new("pordisto")
        .about("Client-held session token authentication")
        .version(env!("CARGO_PKG_VERSION"))
        .color(ColorChoice::Auto)
        .styles(styles)
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("base-url")
                .short('b')
                .long("base-url")
                .help("Backend base URL, example: https://files.example.com")
                .env("PORDISTO_BASE_URL")
                .global(true),
        )
        .arg(
            Arg::new("state-dir")
                .long("state-dir")
                .help("Directory holding the persistent auth state")
                .env("PORDISTO_STATE_DIR")
                .default_value(".pordisto")
                .global(true),
        )
        .arg(
            Arg::new("verbosity")
                .short('v')
                .long("verbose")
                .help("Verbosity level: ERROR, WARN, INFO, DEBUG, TRACE (default: ERROR)")
                .env("PORDISTO_LOG_LEVEL")
                .global(true)
                .action(ArgAction::Count)
                .value_parser(validator_log_level()),
        )
        .subcommand(
            Command::new("check")
                .about("Validate a token against the backend and commit it locally")
                .arg(token_arg())
                .arg(session_id_arg()),
        )
        .subcommand(
            Command::new("mount")
                .about("Ask the backend to attach the per-user resource")
                .arg(token_arg())
                .arg(session_id_arg()),
        )
        .subcommand(
            Command::new("status")
                .about("Re-validate the persisted token, if any")
                .arg(session_id_arg()),
        )
        .subcommand(
            Command::new("logout")
                .about("Invalidate the session best effort and clear local state")
                .arg(session_id_arg().required(false).default_value(""))
                .arg(
                    Arg::new("no-redirect")
                        .long("no-redirect")
                        .help("Skip the post-logout navigation to the login view")
                        .action(ArgAction::SetTrue),
                ),
        )
}

use std::{env, env::VarError};

/// The server takes no command line arguments. Any argument at all prints the help text and exits.
pub fn handle_command_line_args() -> bool {
    let has_cli_args = env::args().count() > 1;
    if has_cli_args {
        display_readme();
        display_envs();
    }
    has_cli_args
}

fn display_readme() {
    const README: &str = include_str!("./cli-help.txt");
    println!("\n{README}\n");
}

fn display_envs() {
    // Only non-secret variables belong in this list
    const DISPLAY_ENVS: [&str; 11] = [
        "RUST_LOG",
        "FUSE_HOST",
        "FUSE_PORT",
        "FUSE_SIGNED_FIELD_NAMES",
        "FUSE_LEDGER_URL",
        "FUSE_CYBERSOURCE_HOST",
        "FUSE_CYBERSOURCE_MERCHANT_ID",
        "FUSE_CYBERSOURCE_KEY_ID",
        "FUSE_HTTP_TIMEOUT_SECS",
        "FUSE_SEARCH_DAYS",
        "FUSE_SEARCH_MAX_PAGES",
    ];

    println!("Current environment values (EXCLUDING variables that contain secrets):");
    DISPLAY_ENVS.iter().for_each(|&name| {
        let val = match env::var(name) {
            Ok(s) => s,
            Err(VarError::NotPresent) => "Not set".into(),
            Err(VarError::NotUnicode(s)) => format!("Invalid value: {}", s.to_string_lossy()),
        };
        println!("  {name:<35} {val:<15}");
    })
}

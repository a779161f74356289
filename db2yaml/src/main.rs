//! Generate a YAML document from MySQL database tables.
//!
//! Connects to one MySQL server, reads the catalog of one schema (tables,
//! columns, indexes and DDL) and prints it as YAML on standard output.
//!
//! # Security Guarantees
//! - Read-only database operations only
//! - Passwords are never logged

use anyhow::Context;
use clap::Parser;
use db2yaml_core::{
    ConnectionConfig, Credentials, MySqlAdapter, adapters::config::DEFAULT_MYSQL_PORT,
    init_logging, load_schema, render_yaml, security::DEFAULT_USER, write_document,
};
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "db2yaml")]
#[command(about = "Generate YAML file from database tables")]
#[command(version)]
#[command(disable_help_flag = true)]
#[command(long_about = "
db2yaml - dump a MySQL schema as YAML

Reads tables, columns, indexes and CREATE TABLE statements of one database
from INFORMATION_SCHEMA and prints them as a YAML document on stdout. Output
is sorted and free of AUTO_INCREMENT counters, so it can be committed and
diffed.

EXAMPLES:
  db2yaml -u root -D app > schema.yml
  db2yaml -h db.internal -P 3307 -u reader --ask-password -D app
")]
struct Cli {
    /// MySQL user name
    #[arg(short, long, env = "MYSQL_USER", default_value = DEFAULT_USER)]
    user: String,

    /// MySQL server host name
    #[arg(short = 'h', long, env = "MYSQL_HOST", default_value = "localhost")]
    host: String,

    /// MySQL server port number
    #[arg(short = 'P', long, env = "MYSQL_TCP_PORT", default_value_t = DEFAULT_MYSQL_PORT)]
    port: u16,

    /// Database to use
    #[arg(short = 'D', long, env = "MYSQL_DATABASE")]
    database: String,

    /// Password to connect to the MySQL server
    #[arg(short, long, env = "MYSQL_PWD", hide_env_values = true)]
    password: Option<String>,

    /// Prompt for the password instead of passing it on the command line
    #[arg(long, conflicts_with = "password")]
    ask_password: bool,

    /// Increase log verbosity on stderr (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long)]
    quiet: bool,

    /// Show usage
    #[arg(long, action = clap::ArgAction::Help)]
    help: Option<bool>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose, cli.quiet)?;

    let credentials = credentials_from(&cli)?;
    let config = ConnectionConfig::new(cli.host.clone())
        .with_port(cli.port)
        .with_database(cli.database.clone());

    let document = generate_yaml(config, &credentials).await?;

    write_document(&mut std::io::stdout().lock(), &document)?;

    Ok(())
}

/// Builds credentials, prompting for the password when asked to.
fn credentials_from(cli: &Cli) -> anyhow::Result<Credentials> {
    let password = if cli.ask_password {
        Some(rpassword::prompt_password("Enter password: ").context("failed to read password")?)
    } else {
        cli.password.clone()
    };

    Ok(Credentials::new(cli.user.clone(), password))
}

/// Connects, extracts the schema and renders it.
async fn generate_yaml(config: ConnectionConfig, credentials: &Credentials) -> anyhow::Result<String> {
    let schema_name = config.database_name().to_string();
    info!("Target: {}", config);

    let mut adapter = MySqlAdapter::connect(config, credentials)
        .await
        .context("failed to connect to the database")?;

    let schema = load_schema(&mut adapter, &schema_name)
        .await
        .context("failed to load data structure")?;

    if let Err(e) = adapter.close().await {
        warn!("{}", e);
    }

    info!("✓ Loaded {} tables", schema.len());

    Ok(render_yaml(&schema)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    const CLI_ENV: [&str; 5] = [
        "MYSQL_USER",
        "MYSQL_HOST",
        "MYSQL_TCP_PORT",
        "MYSQL_DATABASE",
        "MYSQL_PWD",
    ];

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        temp_env::with_vars_unset(CLI_ENV, || Cli::try_parse_from(args))
    }

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_cli_defaults() {
        let cli = parse(&["db2yaml", "-D", "app"]).unwrap();
        assert_eq!(cli.user, "root");
        assert_eq!(cli.host, "localhost");
        assert_eq!(cli.port, 3306);
        assert_eq!(cli.database, "app");
        assert!(!cli.ask_password);
    }

    #[test]
    fn test_cli_short_flags() {
        let cli = parse(&[
            "db2yaml", "-u", "reader", "-h", "db.internal", "-P", "3307", "-D", "app", "-p",
            "secret",
        ])
        .unwrap();
        assert_eq!(cli.user, "reader");
        assert_eq!(cli.host, "db.internal");
        assert_eq!(cli.port, 3307);
        assert_eq!(cli.password.as_deref(), Some("secret"));

        let credentials = credentials_from(&cli).unwrap();
        assert_eq!(credentials.username(), "reader");
        assert_eq!(credentials.password(), Some("secret"));
    }

    #[test]
    fn test_cli_requires_database() {
        assert!(parse(&["db2yaml", "-u", "root"]).is_err());
    }

    #[test]
    fn test_cli_password_conflicts_with_prompt() {
        let result = parse(&["db2yaml", "-D", "app", "-p", "x", "--ask-password"]);
        assert!(result.is_err());
    }
}

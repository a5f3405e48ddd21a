use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use gqlerr_core::{
    ErrorOptions, GraphQLError, Source, SourceLocation, parse_extensions, parse_path,
};
use tracing_subscriber::EnvFilter;

/// Build a GraphQL error from the command line and print it.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    #[arg(short, long, help = "Error message")]
    message: String,

    #[arg(
        short,
        long,
        value_name = "PATH",
        help = "Source document the positions refer to ('-' reads stdin)"
    )]
    input: Option<String>,

    #[arg(long, value_name = "NAME", help = "Name shown in excerpts")]
    name: Option<String>,

    #[arg(
        long,
        value_name = "LINE",
        default_value_t = 1,
        help = "Line in the enclosing file where the source starts (1-based)"
    )]
    line_offset: usize,

    #[arg(
        long,
        value_name = "COLUMN",
        default_value_t = 1,
        help = "Column in the enclosing file where the source starts (1-based)"
    )]
    column_offset: usize,

    #[arg(
        short,
        long = "position",
        value_name = "OFFSET",
        help = "Byte offset into the source; repeatable"
    )]
    positions: Vec<usize>,

    #[arg(long, value_name = "DOTTED", help = "Response path, e.g. user.0.name")]
    path: Option<String>,

    #[arg(long, value_name = "JSON", help = "Extensions as a JSON object")]
    extensions: Option<String>,

    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,

    #[arg(short, long, value_name = "PATH", help = "Write to a file instead of stdout")]
    output: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    execute(cli)
}

fn execute(cli: Cli) -> Result<()> {
    let mut options = ErrorOptions::new();

    if let Some(input) = &cli.input {
        let source = read_source(&cli, input)?;
        options = options.source(Arc::new(source));
    }
    if !cli.positions.is_empty() {
        options = options.positions(cli.positions.clone());
    }
    if let Some(path) = &cli.path {
        let path = parse_path(path).with_context(|| format!("invalid --path {path}"))?;
        options = options.path(path);
    }
    if let Some(extensions) = &cli.extensions {
        let extensions = parse_extensions(extensions).context("invalid --extensions")?;
        options = options.extensions(extensions);
    }

    let error = GraphQLError::new(cli.message.as_str(), options);
    tracing::debug!(
        locations = error.locations().map_or(0, |locations| locations.len()),
        "built error from command line"
    );

    let rendered = match cli.format {
        Format::Text => error.to_display_string(),
        Format::Json => serde_json::to_string_pretty(&error.to_response_object())
            .context("failed to serialize error")?,
    };

    match &cli.output {
        Some(path) => write_output(path, rendered.as_bytes())?,
        None => println!("{rendered}"),
    }
    Ok(())
}

fn read_source(cli: &Cli, input: &str) -> Result<Source> {
    let body = if input == "-" {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .context("failed to read source from stdin")?;
        buffer
    } else {
        fs::read_to_string(input).with_context(|| format!("failed to read input file {input}"))?
    };

    let mut source = Source::new(body);
    if let Some(name) = &cli.name {
        source = source.with_name(name.as_str());
    }
    source
        .with_location_offset(SourceLocation::new(cli.line_offset, cli.column_offset))
        .context("invalid location offset")
}

fn write_output(path: &str, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = PathBuf::from(path).parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create directory {parent:?}"))?;
        }
    }
    fs::write(path, bytes).with_context(|| format!("failed to write output file {path}"))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_cmd::Command;
    use predicates::prelude::*;
    use tempfile::tempdir;

    const QUERY: &str = "query {\n  user {\n    field\n  }\n}";

    fn gqlerr() -> Command {
        Command::cargo_bin("gqlerr").expect("binary exists")
    }

    #[test]
    fn prints_message_with_excerpt() {
        let dir = tempdir().expect("tempdir");
        let input_path = dir.path().join("query.graphql");
        fs::write(&input_path, QUERY).expect("write input");

        gqlerr()
            .arg("--message")
            .arg("Cannot query field \"field\"")
            .arg("--input")
            .arg(&input_path)
            .arg("--position")
            .arg("21")
            .assert()
            .success()
            .stdout(predicate::str::starts_with(
                "Cannot query field \"field\"\n\nGraphQL request:3:5\n",
            ))
            .stdout(predicate::str::contains("3 |     field\n  |     ^"));
    }

    #[test]
    fn emits_response_object_as_json() {
        let dir = tempdir().expect("tempdir");
        let input_path = dir.path().join("query.graphql");
        fs::write(&input_path, QUERY).expect("write input");

        let output = gqlerr()
            .arg("--message")
            .arg("Syntax Error")
            .arg("--input")
            .arg(&input_path)
            .arg("--position")
            .arg("21")
            .arg("--extensions")
            .arg(r#"{"code": "GRAPHQL_PARSE_FAILED"}"#)
            .arg("--format")
            .arg("json")
            .output()
            .expect("run gqlerr");
        assert!(output.status.success());

        let json: serde_json::Value = serde_json::from_slice(&output.stdout).expect("valid json");
        assert_eq!(
            json,
            serde_json::json!({
                "message": "Syntax Error",
                "locations": [{"line": 3, "column": 5}],
                "extensions": {"code": "GRAPHQL_PARSE_FAILED"}
            })
        );
    }

    #[test]
    fn omits_empty_extensions_and_missing_locations() {
        gqlerr()
            .arg("--message")
            .arg("Field error")
            .arg("--path")
            .arg("user.0.name")
            .arg("--extensions")
            .arg("{}")
            .arg("--format")
            .arg("json")
            .assert()
            .success()
            .stdout(predicate::str::contains("\"path\": [\n    \"user\",\n    0,\n    \"name\"\n  ]"))
            .stdout(predicate::str::contains("locations").not())
            .stdout(predicate::str::contains("extensions").not());
    }

    #[test]
    fn reads_source_from_stdin_with_offset() {
        gqlerr()
            .arg("--message")
            .arg("Unknown argument")
            .arg("--input")
            .arg("-")
            .arg("--name")
            .arg("schema.graphql")
            .arg("--line-offset")
            .arg("10")
            .arg("--position")
            .arg("2")
            .write_stdin("{ a }")
            .assert()
            .success()
            .stdout(predicate::str::contains("schema.graphql:10:3"))
            .stdout(predicate::str::contains("10 | { a }"));
    }

    #[test]
    fn writes_output_file() {
        let dir = tempdir().expect("tempdir");
        let output_path = dir.path().join("nested").join("error.json");

        gqlerr()
            .arg("--message")
            .arg("boom")
            .arg("--format")
            .arg("json")
            .arg("--output")
            .arg(&output_path)
            .assert()
            .success()
            .stdout(predicate::str::is_empty());

        let written = fs::read_to_string(&output_path).expect("read output");
        assert_eq!(written, "{\n  \"message\": \"boom\"\n}");
    }

    #[test]
    fn reports_invalid_path() {
        gqlerr()
            .arg("--message")
            .arg("boom")
            .arg("--path")
            .arg("user..name")
            .assert()
            .failure()
            .stderr(predicate::str::contains("invalid --path user..name"));
    }

    #[test]
    fn reports_non_object_extensions() {
        gqlerr()
            .arg("--message")
            .arg("boom")
            .arg("--extensions")
            .arg("[1]")
            .assert()
            .failure()
            .stderr(predicate::str::contains("extensions must be a JSON object"));
    }

    #[test]
    fn reports_missing_input_file() {
        let dir = tempdir().expect("tempdir");

        gqlerr()
            .arg("--message")
            .arg("boom")
            .arg("--input")
            .arg(dir.path().join("missing.graphql"))
            .assert()
            .failure()
            .stderr(predicate::str::contains("failed to read input file"));
    }

    #[test]
    fn reports_zero_location_offset() {
        gqlerr()
            .arg("--message")
            .arg("boom")
            .arg("--input")
            .arg("-")
            .arg("--column-offset")
            .arg("0")
            .write_stdin("{ a }")
            .assert()
            .failure()
            .stderr(predicate::str::contains("invalid location offset"));
    }

    #[test]
    fn reports_oversized_location_offset() {
        gqlerr()
            .arg("--message")
            .arg("m")
            .arg("--input")
            .arg("-")
            .arg("--line-offset")
            .arg("18446744073709551615")
            .arg("--position")
            .arg("0")
            .write_stdin("{ a }")
            .assert()
            .failure()
            .stderr(predicate::str::contains("location offset too large"));

        gqlerr()
            .arg("--message")
            .arg("m")
            .arg("--input")
            .arg("-")
            .arg("--column-offset")
            .arg("4294967295")
            .write_stdin("{ a }")
            .assert()
            .failure()
            .stderr(predicate::str::contains("location offset too large"));
    }

    #[test]
    fn prints_largest_accepted_line_offset() {
        gqlerr()
            .arg("--message")
            .arg("m")
            .arg("--input")
            .arg("-")
            .arg("--line-offset")
            .arg("4294967295")
            .arg("--position")
            .arg("2")
            .write_stdin("{ a }")
            .assert()
            .success()
            .stdout(predicate::str::contains("GraphQL request:4294967295:3"))
            .stdout(predicate::str::contains("4294967295 | { a }"));
    }

    #[test]
    fn documents_location_offsets_in_help() {
        gqlerr()
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("Line in the enclosing file"))
            .stdout(predicate::str::contains("Column in the enclosing file"));
    }
}

use anyhow::{Result, anyhow};

pub const APP_NAME: &str = "amflens";
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// What part of the model to print
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
    Full,
    Navigation,
    Operation(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliOptions {
    /// Path of a model file, or an http(s) URL
    pub input: String,
    pub view: View,
    pub json: bool,
    pub expand: bool,
}

#[derive(Debug, PartialEq, Eq)]
pub enum CliCommand {
    Run(CliOptions),
    Help,
    Version,
}

fn set_view(current: &mut View, view: View) -> Result<()> {
    if *current != View::Full {
        return Err(anyhow!("conflicting view options supplied"));
    }
    *current = view;
    Ok(())
}

pub fn parse_arguments(args: &[String]) -> Result<CliCommand> {
    if args.is_empty() {
        return Ok(CliCommand::Help);
    }

    let mut input: Option<String> = None;
    let mut view = View::Full;
    let mut json = false;
    let mut expand = false;
    let mut i = 0;

    while i < args.len() {
        let arg = &args[i];

        if matches!(arg.as_str(), "-h" | "--help") {
            return Ok(CliCommand::Help);
        }

        if matches!(arg.as_str(), "-v" | "--version") {
            return Ok(CliCommand::Version);
        }

        if matches!(arg.as_str(), "-n" | "--navigation") {
            set_view(&mut view, View::Navigation)?;
            i += 1;
            continue;
        }

        if matches!(arg.as_str(), "-j" | "--json") {
            json = true;
            i += 1;
            continue;
        }

        if matches!(arg.as_str(), "-x" | "--expand") {
            expand = true;
            i += 1;
            continue;
        }

        if let Some(id) = arg.strip_prefix("--operation=") {
            if id.is_empty() {
                return Err(anyhow!("--operation requires an operation id"));
            }
            set_view(&mut view, View::Operation(id.to_string()))?;
            i += 1;
            continue;
        }

        if matches!(arg.as_str(), "-o" | "--operation") {
            let id = args
                .get(i + 1)
                .filter(|next| !next.starts_with('-'))
                .ok_or_else(|| anyhow!("--operation requires an operation id"))?;
            set_view(&mut view, View::Operation(id.clone()))?;
            i += 2;
            continue;
        }

        if arg.starts_with('-') {
            return Err(anyhow!("unknown flag: {arg}"));
        }

        if input.is_none() {
            input = Some(arg.clone());
        } else {
            return Err(anyhow!("unexpected additional argument: {}", arg));
        }

        i += 1;
    }

    let input = input.ok_or_else(|| anyhow!("missing <FILE|URL> argument"))?;

    Ok(CliCommand::Run(CliOptions {
        input,
        view,
        json,
        expand,
    }))
}

pub fn print_help() {
    println!("{APP_NAME}: read API documentation out of AMF models");
    println!("Usage: {APP_NAME} [OPTIONS] <FILE|URL>\n");
    println!("Options:");
    println!("  -n, --navigation        Print the endpoint tree only");
    println!("  -o, --operation <ID>    Print a single operation");
    println!("  -j, --json              Output serialized views as JSON");
    println!("  -x, --expand            Run full JSON-LD expansion before reading");
    println!("  -v, --version           Show version information");
    println!("  -h, --help              Show this help message");
}

pub fn print_version() {
    println!("{APP_NAME} {VERSION}");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn run(list: &[&str]) -> CliOptions {
        match parse_arguments(&args(list)).unwrap() {
            CliCommand::Run(options) => options,
            other => panic!("expected run command, got {other:?}"),
        }
    }

    #[test]
    fn no_arguments_prints_help() {
        assert_eq!(parse_arguments(&[]).unwrap(), CliCommand::Help);
        assert_eq!(
            parse_arguments(&args(&["api.json", "--version"])).unwrap(),
            CliCommand::Version
        );
    }

    #[test]
    fn reads_flags_and_input() {
        let options = run(&["-j", "-x", "api.json"]);
        assert_eq!(options.input, "api.json");
        assert_eq!(options.view, View::Full);
        assert!(options.json);
        assert!(options.expand);
    }

    #[test]
    fn operation_takes_an_id() {
        assert_eq!(
            run(&["api.json", "-o", "#/web-api/pets/get"]).view,
            View::Operation("#/web-api/pets/get".to_string())
        );
        assert_eq!(
            run(&["--operation=#/op", "api.json"]).view,
            View::Operation("#/op".to_string())
        );
        assert!(parse_arguments(&args(&["api.json", "-o"])).is_err());
    }

    #[test]
    fn rejects_conflicts_and_unknown_flags() {
        assert!(parse_arguments(&args(&["-n", "-o", "#/op", "api.json"])).is_err());
        assert!(parse_arguments(&args(&["--bogus", "api.json"])).is_err());
        assert!(parse_arguments(&args(&["a.json", "b.json"])).is_err());
        assert!(parse_arguments(&args(&["-j"])).is_err());
    }
}

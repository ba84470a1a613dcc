use gridcalc_core::BUILTINS;
use std::path::PathBuf;

pub(crate) fn print_usage() {
    eprintln!("Usage: gridcalc [OPTIONS] [ASSIGNMENT...]");
    eprintln!();
    eprintln!("Arguments:");
    eprintln!("  [ASSIGNMENT...]           Cell contents as ADDR=CONTENT (e.g. A1=2 B1==A1+3)");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  -c, --cell <ADDR>         Print this cell (can be repeated; default: all assigned)");
    eprintln!("  --rows <N>                Number of rows in the grid (default: 5)");
    eprintln!("  --cols <N>                Number of columns in the grid (default: 5)");
    eprintln!("  --config <FILE>           Load rows, cols and functions from a TOML file");
    eprintln!("  -f, --functions <FILE>    Load custom Rhai functions (can be repeated)");
    eprintln!("  --no-default-functions    Do not load default.rhai from the config dir");
    eprintln!("  -h, --help                Print help");
    eprintln!();
    eprintln!("Built-in functions:");
    for builtin in BUILTINS {
        eprintln!("  {:<24}  {}", builtin.name, builtin.description);
    }
}

/// A parsed command line.
#[derive(Debug, Default, PartialEq)]
pub(crate) struct CliArgs {
    pub assignments: Vec<(String, String)>,
    pub cells: Vec<String>,
    pub rows: Option<usize>,
    pub cols: Option<usize>,
    pub config: Option<PathBuf>,
    pub functions: Vec<PathBuf>,
    pub no_default_functions: bool,
}

#[derive(Debug, PartialEq)]
pub(crate) enum Command {
    Help,
    Run(CliArgs),
}

fn next_value<'a>(args: &'a [String], i: &mut usize, flag: &str, what: &str) -> Result<&'a str, String> {
    *i += 1;
    args.get(*i)
        .map(String::as_str)
        .ok_or_else(|| format!("{} requires {}", flag, what))
}

fn parse_count(value: &str, flag: &str) -> Result<usize, String> {
    value
        .parse::<usize>()
        .map_err(|_| format!("{} expects a number, got {:?}", flag, value))
}

/// Parse arguments (without the program name).
pub(crate) fn parse_args(args: &[String]) -> Result<Command, String> {
    let mut cli = CliArgs::default();

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "-h" | "--help" => return Ok(Command::Help),
            "-c" | "--cell" => {
                let addr = next_value(args, &mut i, "--cell", "a cell address")?;
                cli.cells.push(addr.to_string());
            }
            "--rows" => {
                let value = next_value(args, &mut i, "--rows", "a value")?;
                cli.rows = Some(parse_count(value, "--rows")?);
            }
            "--cols" => {
                let value = next_value(args, &mut i, "--cols", "a value")?;
                cli.cols = Some(parse_count(value, "--cols")?);
            }
            "--config" => {
                let path = next_value(args, &mut i, "--config", "a file path")?;
                cli.config = Some(PathBuf::from(path));
            }
            "-f" | "--functions" => {
                let path = next_value(args, &mut i, "--functions", "a file path")?;
                cli.functions.push(PathBuf::from(path));
            }
            "--no-default-functions" => cli.no_default_functions = true,
            arg if arg.starts_with('-') => return Err(format!("Unknown option: {}", arg)),
            arg => {
                // Only the first '=' separates the address: B1==A1+3 stores "=A1+3".
                let Some((addr, content)) = arg.split_once('=') else {
                    return Err(format!("Expected ADDR=CONTENT, got {:?}", arg));
                };
                cli.assignments.push((addr.to_string(), content.to_string()));
            }
        }
        i += 1;
    }

    Ok(Command::Run(cli))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn parses_assignments_and_options() {
        let cmd = parse_args(&args(&[
            "A1=2",
            "B1==A1+3",
            "-c",
            "B1",
            "--rows",
            "10",
            "-f",
            "x.rhai",
            "--no-default-functions",
        ]))
        .unwrap();

        let Command::Run(cli) = cmd else {
            panic!("expected run");
        };
        assert_eq!(
            cli.assignments,
            vec![
                ("A1".to_string(), "2".to_string()),
                ("B1".to_string(), "=A1+3".to_string())
            ]
        );
        assert_eq!(cli.cells, vec!["B1".to_string()]);
        assert_eq!(cli.rows, Some(10));
        assert_eq!(cli.cols, None);
        assert_eq!(cli.functions, vec![PathBuf::from("x.rhai")]);
        assert!(cli.no_default_functions);
    }

    #[test]
    fn help_wins() {
        assert_eq!(parse_args(&args(&["A1=1", "--help"])), Ok(Command::Help));
    }

    #[test]
    fn rejects_bad_input() {
        assert!(parse_args(&args(&["A1"])).is_err());
        assert!(parse_args(&args(&["--rows"])).is_err());
        assert!(parse_args(&args(&["--rows", "many"])).is_err());
        assert!(parse_args(&args(&["--bogus"])).is_err());
    }

    #[test]
    fn empty_content_is_allowed() {
        let Ok(Command::Run(cli)) = parse_args(&args(&["A1="])) else {
            panic!("expected run");
        };
        assert_eq!(cli.assignments, vec![("A1".to_string(), String::new())]);
    }
}

use crate::error::*;
use crate::matrix::*;
use crate::util::*;
use clap::{ArgAction, Parser, Subcommand};
use std::io::{BufRead, Write};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Clone)]
#[clap(version = env!("CARGO_PKG_VERSION"))]
#[clap(about = "Exact Rational Gauss-Jordan Elimination with Undoable Elementary Row Operations")]
#[clap(color = clap::ColorChoice::Auto)]
#[clap(propagate_version = true)]
#[clap(subcommand_required = true)]
#[clap(arg_required_else_help = true)]
pub struct Cli {
    /// increase logging verbosity (-v info, -vv debug); `RUST_LOG` takes precedence
    #[clap(short = 'v', long, action = ArgAction::Count, global = true)]
    verbose: u8,
    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Clone)]
enum Commands {
    /// reduce a matrix into reduced row-echelon form and print the operations used
    Reduce(ReduceParameters),
    /// invert a square matrix by reducing it next to an identity block
    Inverse(InverseParameters),
    /// enter a matrix row by row, then apply row operations by hand or automatically
    Interactive(InteractiveParameters),
}

#[derive(Parser, Clone)]
pub struct ReduceParameters {
    /// matrix rows, each a quoted list of whitespace separated rationals, e.g. "1 2/3 -4"
    #[clap(required = true)]
    rows: Vec<String>,
    /// append an identity block before reducing
    #[clap(short = 'a', long, action)]
    augment: bool,
    /// print a JSON snapshot instead of the text table
    #[clap(long, action)]
    json: bool,
}

#[derive(Parser, Clone)]
pub struct InverseParameters {
    /// matrix rows, each a quoted list of whitespace separated rationals, e.g. "1 2/3 -4"
    #[clap(required = true)]
    rows: Vec<String>,
    /// print the inverse as JSON
    #[clap(long, action)]
    json: bool,
}

#[derive(Parser, Clone)]
pub struct InteractiveParameters {
    /// do not append an identity block to the entered matrix
    #[clap(long, action)]
    no_augment: bool,
}

impl Cli {
    pub fn init_tracing(&self) {
        let level = match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        };
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }

    pub fn run(self) -> Result<(), CliError> {
        let mut stdout = std::io::stdout().lock();
        match self.command {
            Commands::Reduce(parameters) => parameters.run(&mut stdout),
            Commands::Inverse(parameters) => parameters.run(&mut stdout),
            Commands::Interactive(parameters) => {
                let stdin = std::io::stdin().lock();
                InteractiveSession::new(stdin, stdout).run(!parameters.no_augment)?;
                Ok(())
            }
        }
    }
}

fn write_history<W: Write>(output: &mut W, matrix: &RationalMatrix) -> std::io::Result<()> {
    for (index, operation) in matrix.history().iter().enumerate() {
        writeln!(output, "{} {}", index + 1, operation)?;
    }
    Ok(())
}

impl ReduceParameters {
    pub fn run<W: Write>(&self, output: &mut W) -> Result<(), CliError> {
        let mut matrix = RationalMatrix::new(parse_rows(&self.rows)?, self.augment)?;
        let info = matrix.eliminate();
        info!(rank = info.rank(), operations = info.operations, "matrix reduced");
        if self.json {
            let mut snapshot = matrix.snapshot(false);
            snapshot["rank"] = json!(info.rank());
            snapshot["pivot_columns"] = json!(info.pivot_columns());
            writeln!(output, "{snapshot}")?;
        } else {
            writeln!(output, "{matrix}")?;
            writeln!(output)?;
            write_history(output, &matrix)?;
        }
        Ok(())
    }
}

impl InverseParameters {
    pub fn run<W: Write>(&self, output: &mut W) -> Result<(), CliError> {
        let mut matrix = RationalMatrix::new_augmented(parse_rows(&self.rows)?)?;
        let inverse = matrix.eliminate_inverse()?;
        info!(operations = matrix.history().len(), "inverse computed");
        if self.json {
            writeln!(output, "{}", json!({ "inverse": rationals_to_strings(&inverse) }))?;
        } else {
            writeln!(output, "{}", RationalMatrix::new_plain(inverse)?)?;
        }
        Ok(())
    }
}

/// the line based dialogue: rows until a blank line, then operations until `auto` or a blank line
pub struct InteractiveSession<R: BufRead, W: Write> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> InteractiveSession<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    pub fn run(&mut self, augment: bool) -> Result<RationalMatrix, CliError> {
        let mut matrix = self.input_matrix(augment)?;
        writeln!(self.output, "Your matrix:")?;
        self.display_matrix(&matrix)?;
        self.perform_operations(&mut matrix)?;
        write_history(&mut self.output, &matrix)?;
        Ok(matrix)
    }

    /// `None` at the end of input
    fn prompt(&mut self, prompt: &str) -> Result<Option<String>, CliError> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn display_matrix(&mut self, matrix: &RationalMatrix) -> std::io::Result<()> {
        writeln!(self.output)?;
        writeln!(self.output, "{matrix}")?;
        writeln!(self.output)
    }

    pub fn input_matrix(&mut self, augment: bool) -> Result<RationalMatrix, CliError> {
        writeln!(self.output, "Input matrix (blank line for done):")?;
        let mut rows: Vec<Vec<Rational>> = vec![];
        loop {
            let Some(line) = self.prompt(&format!("Row {} > ", rows.len() + 1))? else {
                break;
            };
            if line.is_empty() {
                break;
            }
            let row = match parse_row(&line) {
                Ok(row) => row,
                Err(err) => {
                    warn!(%err, "row rejected");
                    writeln!(self.output, "{err}. Try again.")?;
                    continue;
                }
            };
            if let Some(first) = rows.first() {
                if first.len() != row.len() {
                    warn!(expected = first.len(), found = row.len(), "row rejected");
                    writeln!(self.output, "Column number doesn't match. Try again.")?;
                    continue;
                }
            }
            rows.push(row);
        }
        Ok(RationalMatrix::new(rows, augment)?)
    }

    pub fn perform_operations(&mut self, matrix: &mut RationalMatrix) -> Result<(), CliError> {
        writeln!(self.output, "Input row operations: P, D, T, undo or auto")?;
        loop {
            let Some(line) = self.prompt(&format!("Op {} > ", matrix.history().len() + 1))? else {
                break;
            };
            match line.as_str() {
                "" => break,
                "undo" => {
                    if let Some(operation) = matrix.undo() {
                        debug!(%operation, "operation undone");
                        self.display_matrix(matrix)?;
                    }
                }
                "auto" => {
                    let info = matrix.eliminate();
                    info!(rank = info.rank(), operations = info.operations, "matrix reduced");
                    self.display_matrix(matrix)?;
                    break;
                }
                text => match text.parse::<ElementaryRowOperation>() {
                    Ok(operation) => {
                        let label = operation.to_string();
                        match matrix.apply(operation) {
                            Ok(()) => {
                                debug!(operation = %label, "operation applied");
                                self.display_matrix(matrix)?;
                            }
                            Err(err) => {
                                warn!(%err, operation = %label, "operation rejected");
                                writeln!(self.output, "{err}")?;
                            }
                        }
                    }
                    Err(ParseError::UnknownOperation(_)) => {
                        writeln!(self.output, "Unknown operation.")?;
                        writeln!(self.output, "Input row operations: P, D, T, undo or auto")?;
                    }
                    Err(err) => {
                        warn!(%err, "operation rejected");
                        writeln!(self.output, "{err}")?;
                    }
                },
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn run_session(input: &str, augment: bool) -> (Result<RationalMatrix, CliError>, String) {
        let mut session = InteractiveSession::new(Cursor::new(input.as_bytes().to_vec()), Vec::<u8>::new());
        let result = session.run(augment);
        let output = String::from_utf8(session.into_output()).unwrap();
        (result, output)
    }

    #[test]
    fn cli_parse_arguments() {
        // cargo test cli_parse_arguments -- --nocapture
        assert!(Cli::try_parse_from(["rowreduce", "reduce", "1 2", "3 4", "--augment"]).is_ok());
        assert!(Cli::try_parse_from(["rowreduce", "-vv", "inverse", "2 0", "0 2", "--json"]).is_ok());
        assert!(Cli::try_parse_from(["rowreduce", "interactive", "--no-augment"]).is_ok());
        assert!(Cli::try_parse_from(["rowreduce", "reduce"]).is_err());
        assert!(Cli::try_parse_from(["rowreduce"]).is_err());
    }

    #[test]
    fn cli_reduce() {
        // cargo test cli_reduce -- --nocapture
        let parameters = ReduceParameters {
            rows: vec!["0 2".to_string(), "1 1".to_string()],
            augment: false,
            json: false,
        };
        let mut output = Vec::<u8>::new();
        parameters.run(&mut output).unwrap();
        assert_eq!(
            String::from_utf8(output).unwrap(),
            "1 0\n0 1\n\n1 P_{1,2}\n2 D_{2}(1/2)\n3 T_{1,2}(-1)\n"
        );
        let parameters = ReduceParameters {
            rows: vec!["1 2".to_string(), "2 4".to_string()],
            augment: false,
            json: true,
        };
        let mut output = Vec::<u8>::new();
        parameters.run(&mut output).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&output).unwrap();
        assert_eq!(value["rank"], json!(1));
        assert_eq!(value["pivot_columns"], json!([1]));
        assert_eq!(value["grid"], json!([["1", "2"], ["0", "0"]]));
    }

    #[test]
    fn cli_reduce_malformed() {
        // cargo test cli_reduce_malformed -- --nocapture
        let parameters = ReduceParameters {
            rows: vec!["1 2".to_string(), "3".to_string()],
            augment: false,
            json: false,
        };
        assert!(matches!(
            parameters.run(&mut Vec::<u8>::new()),
            Err(CliError::Matrix(MatrixError::RaggedInput { .. }))
        ));
        let parameters = ReduceParameters {
            rows: vec!["1 two".to_string()],
            augment: false,
            json: false,
        };
        assert!(matches!(
            parameters.run(&mut Vec::<u8>::new()),
            Err(CliError::Parse(ParseError::Rational(_)))
        ));
    }

    #[test]
    fn cli_inverse() {
        // cargo test cli_inverse -- --nocapture
        let parameters = InverseParameters {
            rows: vec!["1 2".to_string(), "3 4".to_string()],
            json: false,
        };
        let mut output = Vec::<u8>::new();
        parameters.run(&mut output).unwrap();
        assert_eq!(String::from_utf8(output).unwrap(), " -2    1\n3/2 -1/2\n");
        let parameters = InverseParameters {
            rows: vec!["2 0".to_string(), "0 2".to_string()],
            json: true,
        };
        let mut output = Vec::<u8>::new();
        parameters.run(&mut output).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&output).unwrap();
        assert_eq!(value, json!({ "inverse": [["1/2", "0"], ["0", "1/2"]] }));
        let parameters = InverseParameters {
            rows: vec!["1 2".to_string(), "2 4".to_string()],
            json: false,
        };
        assert!(matches!(
            parameters.run(&mut Vec::<u8>::new()),
            Err(CliError::Matrix(MatrixError::Singular))
        ));
    }

    #[test]
    fn cli_interactive_auto() {
        // cargo test cli_interactive_auto -- --nocapture
        let (result, output) = run_session("2 0\n0 2\n\nauto\n", true);
        println!("{output}");
        let matrix = result.unwrap();
        assert_eq!(matrix.inverse().unwrap(), vec![
            vec![rational(1, 2), rational_integer(0)],
            vec![rational_integer(0), rational(1, 2)]
        ]);
        assert_eq!(
            output,
            concat!(
                "Input matrix (blank line for done):\n",
                "Row 1 > Row 2 > Row 3 > Your matrix:\n",
                "\n2 0  |  1 0\n0 2  |  0 1\n\n",
                "Input row operations: P, D, T, undo or auto\n",
                "Op 1 > \n1 0  |  1/2   0\n0 1  |    0 1/2\n\n",
                "1 D_{1}(1/2)\n2 D_{2}(1/2)\n",
            )
        );
    }

    #[test]
    fn cli_interactive_manual() {
        // cargo test cli_interactive_manual -- --nocapture
        let input = "1 2\n3\nx 1\n3 4\n\nP 1 2\nP 1 5\nD 1 0\nfoo\nT 2 1 -1/3\nundo\nundo\nundo\nD 2 2\n\n";
        let (result, output) = run_session(input, false);
        println!("{output}");
        let matrix = result.unwrap();
        assert_eq!(
            matrix.to_rows(),
            vec![
                vec![rational_integer(1), rational_integer(2)],
                vec![rational_integer(6), rational_integer(8)]
            ]
        );
        assert!(output.contains("Column number doesn't match. Try again."));
        assert!(output.contains("cannot parse `x` as a rational number. Try again."));
        assert!(output.contains("index 5 out of range [1, 2]"));
        assert!(output.contains("invalid operation: ScalarMultiplication: r = 0"));
        assert!(output.contains("Unknown operation."));
        assert!(output.ends_with("1 D_{2}(2)\n"));
    }

    #[test]
    fn cli_interactive_empty() {
        // cargo test cli_interactive_empty -- --nocapture
        let (result, _) = run_session("\n", true);
        assert!(matches!(result, Err(CliError::Matrix(MatrixError::EmptyInput))));
        let (result, output) = run_session("1 1\n", false);
        assert_eq!(result.unwrap().history().len(), 0);
        assert!(output.ends_with("Op 1 > "));
    }
}

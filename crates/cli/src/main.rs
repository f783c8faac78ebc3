use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;

/// Run a koan source file.
#[derive(Debug, Parser)]
#[clap(name = "koan", version)]
struct Args {
  /// Path to the koan source file to run.
  path: PathBuf,
}

fn main() -> anyhow::Result<ExitCode> {
  let args = Args::parse();

  let source = std::fs::read_to_string(&args.path)
    .with_context(|| format!("failed to read {}", args.path.display()))?;
  let name = args.path.display().to_string();

  let program = match syntax::parse(&source) {
    Ok(program) => program,
    Err(errors) => {
      report_syntax_errors(&name, &source, &errors);
      return Ok(ExitCode::FAILURE);
    }
  };

  let mut evaluator = runtime::Evaluator::new(std::io::stdout());
  if let Err(error) = evaluator.run(&program) {
    report_runtime_error(&name, &source, &error);
    return Ok(ExitCode::FAILURE);
  }

  Ok(ExitCode::SUCCESS)
}

fn report_syntax_errors(name: &str, source: &str, errors: &[syntax::Error]) {
  for error in errors {
    let report = diag::Report::error()
      .source(diag::Source::file(name, source))
      .message(error.message.to_string())
      .span(error.span)
      .build();
    match report.emit_to_string() {
      Ok(rendered) => eprint!("{rendered}"),
      Err(_) => eprintln!("error: {error}"),
    }
  }
}

fn report_runtime_error(name: &str, source: &str, error: &runtime::RuntimeError) {
  let report = error.report(diag::Source::file(name, source));
  match report.emit_to_string() {
    Ok(rendered) => eprint!("{rendered}"),
    Err(_) => eprintln!("error: {error}"),
  }
}

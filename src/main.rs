mod commands;
mod core;
mod ui;

use std::path::PathBuf;

use clap::Parser;

use crate::core::error::{PackError, print_error};

/// Package per-target release binaries into distributable zip archives
#[derive(Parser)]
#[command(name = "relpack")]
#[command(version, about, long_about = None)]
#[command(styles = get_styles())]
struct Cli {
  /// Compress the compiled binary with UPX before archiving
  #[arg(long)]
  upx: bool,

  /// Path to the relpack.toml config file (default: search the current directory)
  #[arg(short, long)]
  config: Option<PathBuf>,

  /// Show the per-target plan without compiling or writing anything
  #[arg(long)]
  dry_run: bool,

  /// Output the per-target build summary in JSON format
  #[arg(long)]
  json: bool,
}

fn get_styles() -> clap::builder::Styles {
  clap::builder::Styles::styled()
    .usage(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))),
    )
    .header(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))),
    )
    .literal(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Green))))
    .invalid(
      anstyle::Style::new()
        .bold()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
    )
    .error(
      anstyle::Style::new()
        .bold()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
    )
    .valid(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Green))),
    )
    .placeholder(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::White))))
}

fn main() {
  let cli = Cli::parse();

  if let Err(err) = commands::run_build(cli.config, cli.upx, cli.dry_run, cli.json) {
    handle_error(err);
  }
}

fn handle_error(err: PackError) -> ! {
  print_error(&err);
  std::process::exit(err.exit_code().as_i32());
}

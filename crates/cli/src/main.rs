use clap::Parser;
use console::{Style, Term};
use pdf_to_image_core::ConversionError;
use std::process::ExitCode;

mod args;
use args::CliArgs;

mod command;
use command::command_convert;

mod reporter;

fn main() -> ExitCode {
    let cli = CliArgs::parse();
    pdf_to_image_core::init_logging(if cli.verbose { "debug" } else { "warn" });

    let term = Term::stdout();
    let bold_style = Style::new().bold();

    match command_convert(&cli, &term) {
        Ok(summary) => {
            let _ = term.write_line(&format!(
                "\nConversion complete! Generated {} image files",
                bold_style.clone().green().apply_to(summary.output_paths.len())
            ));
            if summary.batch {
                let _ = term.write_line("Each PDF was saved to its own folder");
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            let label = match &err {
                ConversionError::InputNotFound(_)
                | ConversionError::ConversionFailed { .. }
                | ConversionError::InvalidPageRange(_)
                | ConversionError::InvalidConfig(_) => "Error",
                _ => "Unexpected error",
            };
            let _ = term.write_line(&format!(
                "{}: {}",
                bold_style.red().apply_to(label),
                err
            ));
            ExitCode::FAILURE
        }
    }
}

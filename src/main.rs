use std::process::ExitCode;

fn main() -> ExitCode {
    match gitrev::cli::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            gitrev::ui::output::error(format!("{err:#}"));
            ExitCode::FAILURE
        }
    }
}

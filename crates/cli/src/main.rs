use std::process::ExitCode;

fn main() -> ExitCode {
    carty_cli::run()
}

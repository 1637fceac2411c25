use std::process::ExitCode;

fn main() -> ExitCode {
    match nikki_privacy::cli::run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

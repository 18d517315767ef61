use std::process::ExitCode;

fn main() -> ExitCode {
    tickload::entry::run()
}

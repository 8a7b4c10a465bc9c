use std::process::ExitCode;

fn main() -> ExitCode {
    semconv_check::exit_code(semconv_check::execute_from_env())
}

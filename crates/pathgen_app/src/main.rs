mod platform;

fn main() -> std::process::ExitCode {
    match platform::run_app() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("pathgen: {err:#}");
            std::process::ExitCode::FAILURE
        }
    }
}

use std::io;

fn main() {
    homegame_cli::logging::init_logging();
    let code = homegame_cli::run(std::env::args(), &mut io::stdout(), &mut io::stderr());
    std::process::exit(code);
}

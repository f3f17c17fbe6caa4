use std::io;

fn main() {
    ridesim_cli::logging::init_logging();
    let code = ridesim_cli::run(std::env::args(), &mut io::stdout(), &mut io::stderr());
    std::process::exit(code);
}

//! Gitglance binary entry point.
//!
//! All logic lives in the library; this just runs the CLI and maps
//! failures to a nonzero exit code.

fn main() {
    if let Err(err) = gitglance::cli::run() {
        eprintln!("error: {:#}", err);
        std::process::exit(1);
    }
}

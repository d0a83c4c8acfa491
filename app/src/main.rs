//! FILENAME: app/src/main.rs
// PURPOSE: Command line entry point with unified logging.
// FORMAT: seq|level|category|message

fn main() {
    app_lib::run();
}

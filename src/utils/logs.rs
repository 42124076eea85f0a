use tracing::Level;

// Logs go to stderr so they never interleave with the console transcript on stdout.
pub fn setup_tracing(verbose: bool, json: bool) {
    let level = if verbose { Level::INFO } else { Level::WARN };
    let builder = tracing_subscriber::fmt()
        .with_max_level(level)
        // disable printing the name of the module in every log line.
        .with_target(false)
        .with_writer(std::io::stderr);
    if json {
        builder.with_ansi(false).json().init();
    } else {
        builder.init();
    }
}

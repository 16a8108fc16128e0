use mapbox2harp::cli::run_convert_cli;

fn main() {
    env_logger::init();
    if let Err(e) = run_convert_cli() {
        eprintln!("[mapbox2harp] error: {e:#}");
        std::process::exit(1);
    }
}

fn main() {
    if let Err(e) = file_stats::cli::run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn main() {
    if let Err(e) = pricequery_lib::run() {
        eprintln!("Failed to run pricequery: {:#}", e);
        std::process::exit(1);
    }
}

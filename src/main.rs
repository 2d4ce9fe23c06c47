fn main() {
    if let Err(e) = blockyard::app::run() {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}

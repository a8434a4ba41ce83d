fn main() {
    if let Err(err) = pinch_zoom_view::run() {
        log::error!("{err}");
        eprintln!("{err}");
        std::process::exit(1);
    }
}

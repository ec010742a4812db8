use rdas::{launch, BackendCatalog, LaunchMode};

fn main() {
    let mode = LaunchMode::Multi(BackendCatalog::standard());
    std::process::exit(launch(std::env::args_os(), mode));
}

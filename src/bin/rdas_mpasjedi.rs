use rdas::{launch, LaunchMode, MpasJedi};

fn main() {
    std::process::exit(launch(std::env::args_os(), LaunchMode::single(MpasJedi)));
}

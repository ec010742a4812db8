use rdas::{launch, Fv3Jedi, LaunchMode};

fn main() {
    std::process::exit(launch(std::env::args_os(), LaunchMode::single(Fv3Jedi)));
}

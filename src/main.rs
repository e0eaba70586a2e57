use forgewrap::cli;

fn main() {
    std::process::exit(cli::run());
}

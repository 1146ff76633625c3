use monke::cli;

fn main() {
    cli::run();
}

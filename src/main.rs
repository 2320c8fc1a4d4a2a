use hotseat_chess::GameConfig;

fn main() {
    let config = match std::env::args().nth(1) {
        Some(arg) => arg.parse().unwrap_or_else(|e| {
            eprintln!("{e}; using the default time control");
            GameConfig::default()
        }),
        None => GameConfig::default(),
    };
    hotseat_chess::mock::run_interactive_terminal(config);
}

use dsh::core::config::ConfigPaths;
use dsh::flags::Flags;
use dsh::highlight::SyntaxHighlighter;
use dsh::shell::Shell;
use std::env;

fn main() -> Result<(), dsh::error::ShellError> {
    let mut flags = Flags::new();
    let args: Vec<String> = env::args().skip(1).collect();
    flags.parse(&args)?;

    if flags.is_set("help") {
        flags.print_help();
        return Ok(());
    }

    if flags.is_set("version") {
        println!("dsh {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    let paths = ConfigPaths::new()?.with_config_override(flags.get_value("config"));

    if let Err(e) = dsh::logging::init(&paths.log_path, flags.is_set("debug")) {
        let warning = format!("dsh: logging disabled: {}", e);
        eprintln!("{}", SyntaxHighlighter::new().highlight_error(&warning));
    }

    if !flags.is_set("quiet") {
        println!("Welcome to dsh");
    }

    let mut shell = Shell::new(&flags, paths)?;
    shell.run()
}

// SPDX-License-Identifier: MPL-2.0
use iced_pixelate::app::{self, paths, Flags};

const HELP: &str = "\
Iced Pixelate - submit a photo for face pixelation

USAGE:
  iced_pixelate [OPTIONS] [IMAGE]

OPTIONS:
  --lang <id>          UI language (en-US, es)
  --endpoint <url>     Upload endpoint for this run
  --config-dir <dir>   Directory holding settings.toml
  -h, --help           Print this help
";

fn parse_flags(mut args: pico_args::Arguments) -> Result<Flags, pico_args::Error> {
    let flags = Flags {
        lang: args.opt_value_from_str("--lang")?,
        endpoint: args.opt_value_from_str("--endpoint")?,
        config_dir: args.opt_value_from_str("--config-dir")?,
        file_path: args.opt_free_from_str()?,
    };

    let rest = args.finish();
    if !rest.is_empty() {
        log::warn!("ignoring extra arguments: {rest:?}");
    }
    Ok(flags)
}

fn main() -> iced::Result {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("iced_pixelate=info"),
    )
    .init();

    let mut args = pico_args::Arguments::from_env();
    if args.contains(["-h", "--help"]) {
        print!("{HELP}");
        return Ok(());
    }

    let flags = match parse_flags(args) {
        Ok(flags) => flags,
        Err(err) => {
            eprintln!("{err}\n\n{HELP}");
            std::process::exit(2);
        }
    };

    paths::init_cli_overrides(flags.config_dir.clone());
    app::run(flags)
}

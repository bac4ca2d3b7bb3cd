mod args;
mod commands;

use std::io;
use std::process::ExitCode;

use args::Args;

fn main() -> ExitCode {
    let args = Args::default();

    // `RUST_LOG` picks the level unless `--verbose` is given.
    let mut logger = env_logger::Builder::new();
    logger.filter_level(log::LevelFilter::Warn).parse_default_env();
    if let Some(level) = verbose_level(args.verbose) {
        logger.filter_level(level);
    }
    logger.init();

    match commands::run(args.command, &mut io::stdout().lock()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::debug!("Command failed: {e:?}");
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}

/// The log level asked for with `--verbose`, if it was given at all.
fn verbose_level(verbose: u8) -> Option<log::LevelFilter> {
    match verbose {
        0 => None,
        1 => Some(log::LevelFilter::Info),
        2 => Some(log::LevelFilter::Debug),
        _ => Some(log::LevelFilter::Trace),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn environment_level_is_kept_without_verbose() {
        assert_eq!(verbose_level(0), None);
        assert_eq!(verbose_level(1), Some(log::LevelFilter::Info));
        assert_eq!(verbose_level(2), Some(log::LevelFilter::Debug));
        assert_eq!(verbose_level(5), Some(log::LevelFilter::Trace));
    }
}

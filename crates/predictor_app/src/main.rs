mod platform;

use std::path::PathBuf;

use anyhow::Context;
use platform::{LogDestination, RunOptions};

const USAGE: &str = "usage: predictor_app <events.ron> [store-dir] [--log file|terminal|both]";

fn main() -> anyhow::Result<()> {
    let options = parse_args(std::env::args().skip(1))?;
    platform::run_app(options)
}

fn parse_args(args: impl IntoIterator<Item = String>) -> anyhow::Result<RunOptions> {
    let mut positional = Vec::new();
    let mut log = LogDestination::File;

    let mut args = args.into_iter();
    while let Some(arg) = args.next() {
        if arg == "--log" {
            let value = args.next().context(USAGE)?;
            log = value.parse()?;
        } else if arg.starts_with("--") {
            anyhow::bail!("unknown option `{arg}`\n{USAGE}");
        } else {
            positional.push(PathBuf::from(arg));
        }
    }

    let mut positional = positional.into_iter();
    let script = positional.next().context(USAGE)?;
    let store_dir = positional.next();
    if positional.next().is_some() {
        anyhow::bail!("too many arguments\n{USAGE}");
    }

    Ok(RunOptions {
        script,
        store_dir,
        log,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|arg| arg.to_string()).collect()
    }

    #[test]
    fn script_and_store_dir_are_positional() {
        let options = parse_args(args(&["events.ron", "store", "--log", "both"])).unwrap();
        assert_eq!(options.script, PathBuf::from("events.ron"));
        assert_eq!(options.store_dir, Some(PathBuf::from("store")));
        assert_eq!(options.log, LogDestination::Both);
    }

    #[test]
    fn store_dir_is_optional() {
        let options = parse_args(args(&["events.ron"])).unwrap();
        assert_eq!(options.store_dir, None);
        assert_eq!(options.log, LogDestination::File);
    }

    #[test]
    fn missing_script_is_an_error() {
        assert!(parse_args(args(&[])).is_err());
        assert!(parse_args(args(&["a", "b", "c"])).is_err());
        assert!(parse_args(args(&["a", "--verbose"])).is_err());
    }
}

use std::path::PathBuf;
use std::str::FromStr;

use structopt::StructOpt;

use crate::error::{Error, Result};

#[derive(Debug, StructOpt)]
#[structopt(
    name = "flbdump",
    about = "Decode Fluent Bit MessagePack chunks into JSON or Prometheus text"
)]
pub struct CliOpt {
    /// Chunk file to read; stdin when omitted.
    #[structopt(parse(from_os_str))]
    pub input: Option<PathBuf>,

    #[structopt(long = "encode", short = "e", default_value = "json")]
    pub encode: Format,

    #[structopt(long = "verbose", short = "v", parse(from_occurrences))]
    pub verbose: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    JSON,
    Prometheus,
}

impl FromStr for Format {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "json" | "j" => Ok(Format::JSON),
            "prom" | "prometheus" | "p" => Ok(Format::Prometheus),
            _ => Err(format!("unknown output format '{}'", s).into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let opt = CliOpt::from_iter(&["flbdump"]);
        assert_eq!(None, opt.input);
        assert_eq!(Format::JSON, opt.encode);
        assert_eq!(0, opt.verbose);
    }

    #[test]
    fn test_args() {
        let opt = CliOpt::from_iter(&["flbdump", "-e", "prom", "-vv", "chunk.flb"]);
        assert_eq!(Some(PathBuf::from("chunk.flb")), opt.input);
        assert_eq!(Format::Prometheus, opt.encode);
        assert_eq!(2, opt.verbose);
    }

    #[test]
    fn test_unknown_format() {
        assert!(CliOpt::from_iter_safe(&["flbdump", "-e", "xml"]).is_err());
        assert!("xml".parse::<Format>().is_err());
    }
}

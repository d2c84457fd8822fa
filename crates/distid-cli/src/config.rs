use core::time::Duration;

use anyhow::bail;
use clap::Parser;
use distid::{
    DEFAULT_COUNTER_BITS, DEFAULT_EPOCH, Format, GeneratorConfig, Layout, MAX_COUNTER_BITS,
    MAX_NODE_ID, MIN_COUNTER_BITS, SystemClock, TimeSource,
};

/// Command-line options for the `distid` binary.
///
/// Each option falls back to an environment variable (also read from `.env`)
/// and then to the library default.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "distid",
    version,
    about = "Generate Snowflake-style distributed IDs"
)]
pub struct CliArgs {
    /// Node ID owned by this process, 0 to 1023.
    ///
    /// Processes generating IDs concurrently must use distinct node IDs.
    ///
    /// Environment variable: `DISTID_NODE_ID`
    #[arg(long, env = "DISTID_NODE_ID", default_value_t = 0)]
    pub node_id: u16,

    /// Epoch in milliseconds since 1970-01-01 UTC.
    ///
    /// Environment variable: `DISTID_EPOCH_MS`
    #[arg(long, env = "DISTID_EPOCH_MS", default_value_t = DEFAULT_EPOCH.as_millis() as u64)]
    pub epoch_ms: u64,

    /// Width of the per-millisecond counter, 8 to 20 bits.
    ///
    /// Wider counters leave fewer bits for the timestamp. With the default
    /// 2020 epoch, widths above 16 need a more recent `--epoch-ms`.
    ///
    /// Environment variable: `DISTID_COUNTER_BITS`
    #[arg(long, env = "DISTID_COUNTER_BITS", default_value_t = DEFAULT_COUNTER_BITS)]
    pub counter_bits: u8,

    /// Output format: number, hex, base36 or base62.
    ///
    /// Environment variable: `DISTID_FORMAT`
    #[arg(long, env = "DISTID_FORMAT", default_value_t = Format::Number)]
    pub format: Format,

    /// Number of IDs to print.
    ///
    /// Environment variable: `DISTID_COUNT`
    #[arg(short = 'n', long, env = "DISTID_COUNT", default_value_t = 1)]
    pub count: usize,
}

#[derive(Debug, Clone)]
pub struct CliConfig {
    pub node_id: u16,
    pub epoch: Duration,
    pub counter_bits: u8,
    pub format: Format,
    pub count: usize,
}

impl CliConfig {
    pub fn generator_config(&self) -> GeneratorConfig {
        GeneratorConfig::new(self.node_id)
            .with_epoch(self.epoch)
            .with_counter_bits(self.counter_bits)
    }
}

impl TryFrom<CliArgs> for CliConfig {
    type Error = anyhow::Error;

    fn try_from(args: CliArgs) -> Result<Self, Self::Error> {
        if args.count == 0 {
            bail!("DISTID_COUNT must be greater than 0");
        }

        if args.node_id > MAX_NODE_ID {
            bail!(
                "DISTID_NODE_ID ({}) exceeds the node ID space (max = {})",
                args.node_id,
                MAX_NODE_ID
            );
        }

        if !(MIN_COUNTER_BITS..=MAX_COUNTER_BITS).contains(&args.counter_bits) {
            bail!(
                "DISTID_COUNTER_BITS ({}) must be between {} and {}",
                args.counter_bits,
                MIN_COUNTER_BITS,
                MAX_COUNTER_BITS
            );
        }

        let layout = Layout::new(args.counter_bits)?;
        let elapsed = SystemClock
            .current_millis()
            .saturating_sub(args.epoch_ms);
        if elapsed > layout.max_timestamp() {
            bail!(
                "DISTID_COUNTER_BITS ({}) leaves {} timestamp bits, too few for the {}ms since DISTID_EPOCH_MS; use a more recent epoch",
                args.counter_bits,
                layout.timestamp_bits(),
                elapsed
            );
        }

        Ok(Self {
            node_id: args.node_id,
            epoch: Duration::from_millis(args.epoch_ms),
            counter_bits: args.counter_bits,
            format: args.format,
            count: args.count,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> anyhow::Result<CliConfig> {
        let args = CliArgs::try_parse_from(core::iter::once("distid").chain(args.iter().copied()))?;
        CliConfig::try_from(args)
    }

    #[test]
    fn explicit_flags_are_carried_over() {
        let config = parse(&[
            "--node-id",
            "7",
            "--epoch-ms",
            "1700000000000",
            "--counter-bits",
            "16",
            "--format",
            "BASE62",
            "-n",
            "3",
        ])
        .unwrap();

        assert_eq!(config.node_id, 7);
        assert_eq!(config.epoch, Duration::from_millis(1_700_000_000_000));
        assert_eq!(config.counter_bits, 16);
        assert_eq!(config.format, Format::Base62);
        assert_eq!(config.count, 3);

        let generator_config = config.generator_config();
        assert_eq!(generator_config.node_id(), 7);
        assert_eq!(generator_config.counter_bits(), 16);
    }

    #[test]
    fn out_of_range_values_are_rejected() {
        assert!(parse(&["--count", "0"]).is_err());
        assert!(parse(&["--node-id", "1024"]).is_err());
        assert!(parse(&["--node-id", "-1"]).is_err());
        assert!(parse(&["--counter-bits", "7"]).is_err());
        assert!(parse(&["--counter-bits", "21"]).is_err());
        assert!(parse(&["--format", "base64"]).is_err());
    }

    #[test]
    fn boundaries_are_accepted() {
        let recent = (SystemClock.current_millis() - 86_400_000).to_string();
        assert!(parse(&["--node-id", "1023"]).is_ok());
        assert!(parse(&["--counter-bits", "8"]).is_ok());
        assert!(parse(&["--counter-bits", "20", "--epoch-ms", recent.as_str()]).is_ok());
    }

    #[test]
    fn wide_counter_with_old_epoch_is_rejected() {
        let err = parse(&["--counter-bits", "20"]).unwrap_err();
        assert!(err.to_string().starts_with(
            "DISTID_COUNTER_BITS (20) leaves 34 timestamp bits"
        ));
        assert!(parse(&["--counter-bits", "12"]).is_ok());
    }

    #[test]
    fn node_error_names_the_limit() {
        let err = parse(&["--node-id", "1024"]).unwrap_err();
        assert_eq!(
            err.to_string(),
            "DISTID_NODE_ID (1024) exceeds the node ID space (max = 1023)"
        );
    }
}

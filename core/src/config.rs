use anyhow::{Context, Result, bail};
use log::debug;
use std::fmt::Write as _;
use std::fs::{self, DirBuilder};
use std::path::{Path, PathBuf};

pub const CONFIG_DIR: &str = ".cassandra-loader";
pub const CONFIG_FILE: &str = "config";
pub const DEFAULT_PORT: u16 = 9042;

/// connection settings persisted by `init` and read back by `run`
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Config {
    pub host: String,
    pub port: String,
    pub keyspace: String,
}

/// splits a `key: value` line on its first colon.
/// returns `None` for lines without one
pub fn parse_line(line: &str) -> Option<(&str, &str)> {
    let (k, v) = line.split_once(':')?;
    Some((k.trim(), v.trim()))
}

/// `$HOME/.cassandra-loader/config`
pub fn default_path() -> Result<PathBuf> {
    let home = dirs::home_dir().context("could not determine the home directory")?;
    Ok(home.join(CONFIG_DIR).join(CONFIG_FILE))
}

impl Config {
    pub fn new<T: Into<String>>(host: T, port: T, keyspace: T) -> Self {
        Self {
            host: host.into(),
            port: port.into(),
            keyspace: keyspace.into(),
        }
    }

    /// builds a config out of `key: value` lines. unknown keys and
    /// lines without a colon are skipped
    pub fn parse(content: &str) -> Self {
        let mut cfg = Config::default();
        for line in content.lines() {
            match parse_line(line) {
                Some(("host", v)) => cfg.host = v.into(),
                Some(("port", v)) => cfg.port = v.into(),
                Some(("keyspace", v)) => cfg.keyspace = v.into(),
                Some((k, _)) => debug!("ignoring unknown config key {k}"),
                None => {}
            }
        }
        cfg
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        Ok(Self::parse(&content))
    }

    pub fn render(&self) -> String {
        let mut o = String::new();
        // writing into a String never fails
        let _ = write!(
            o,
            "host: {}\nport: {}\nkeyspace: {}\n",
            self.host, self.port, self.keyspace
        );
        o
    }

    /// writes the config to `path`, creating its parent dir if needed
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        if let Some(dir) = path.parent()
            && !dir.as_os_str().is_empty()
        {
            DirBuilder::new()
                .recursive(true)
                .create(dir)
                .with_context(|| format!("failed to create config dir {}", dir.display()))?;
        }
        fs::write(path, self.render())
            .with_context(|| format!("failed to write config file {}", path.display()))?;
        debug!("config written to {}", path.display());
        Ok(())
    }

    /// `host:port` of the node to bootstrap from
    pub fn contact_point(&self) -> Result<String> {
        if self.host.is_empty() {
            bail!("config has no host, run `cassandra-loader init` first");
        }
        let port = if self.port.is_empty() {
            DEFAULT_PORT
        } else {
            self.port
                .parse::<u16>()
                .with_context(|| format!("invalid port {:?} in config", self.port))?
        };
        Ok(format!("{}:{port}", self.host))
    }

    pub fn keyspace(&self) -> Result<&str> {
        if self.keyspace.is_empty() {
            bail!("config has no keyspace, run `cassandra-loader init` first");
        }
        Ok(&self.keyspace)
    }
}

use anyhow::{Context, Result, bail};
use loader_core::Config;
use std::io::{BufRead, Write};

/// prints `label` and reads back the first word the user types
fn ask<R: BufRead, W: Write>(reader: &mut R, writer: &mut W, label: &str) -> Result<String> {
    write!(writer, "Enter cassandra {label}: ")?;
    writer.flush()?;

    let mut line = String::new();
    if reader.read_line(&mut line)? == 0 {
        bail!("unexpected end of input while reading {label}");
    }
    match line.split_whitespace().next() {
        Some(word) => Ok(word.to_string()),
        None => bail!("no {label} entered"),
    }
}

/// asks for host, port and keyspace, in that order
pub fn read_config<R: BufRead, W: Write>(reader: &mut R, writer: &mut W) -> Result<Config> {
    writeln!(writer, "Make sure to have your test Keyspace ready :)\n")?;

    let host = ask(reader, writer, "host").context("reading host")?;
    let port = ask(reader, writer, "port").context("reading port")?;
    let keyspace = ask(reader, writer, "keyspace").context("reading keyspace")?;

    Ok(Config::new(host, port, keyspace))
}

/*
    This file is part of jcpool.

    jcpool is free software: you can redistribute it and/or modify
    it under the terms of the GNU Lesser General Public License as published by
    the Free Software Foundation, either version 3 of the License, or
    (at your option) any later version.

    jcpool is distributed in the hope that it will be useful,
    but WITHOUT ANY WARRANTY; without even the implied warranty of
    MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
    GNU General Public License for more details.

    You should have received a copy of the GNU Lesser General Public License
    along with jcpool. (LICENSE.md)  If not, see <https://www.gnu.org/licenses/>.
*/
use anyhow::{Context, Result};
use clap::Parser;
use jcpool::{ClassFile, ReaderOptions};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "cpdump")]
#[command(about = "Print the constant pool of a Java class file")]
#[command(version)]
struct Cli {
    /// Input .class file
    #[arg(value_name = "FILE")]
    input: PathBuf,

    /// Also accept class files of this major version
    #[arg(long = "allow-version", value_name = "MAJOR")]
    allow_version: Vec<u16>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let options = cli
        .allow_version
        .iter()
        .fold(ReaderOptions::new().debug(cli.verbose), |o, &major| o.allow_major(major));

    let class = ClassFile::open(&cli.input, &options)
        .with_context(|| format!("Failed to read {}", cli.input.display()))?;

    println!("version: {}", class.version);
    println!("constant pool count: {}", class.constant_pool.count());
    for (index, entry) in &class.constant_pool {
        println!("{:>6} = {}", format!("#{}", index), entry);
    }
    Ok(())
}

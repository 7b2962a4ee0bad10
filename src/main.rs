use std::env;
use std::io::{self, Write};

use anyhow::{Context, Result};
use log::info;

use singly_linked_list::LinkedList;

fn parse_values(args: impl Iterator<Item = String>) -> Result<Vec<i64>> {
    let values = args
        .map(|arg| {
            arg.parse::<i64>()
                .with_context(|| format!("`{}` is not an integer", arg))
        })
        .collect::<Result<Vec<_>>>()?;

    if values.is_empty() {
        return Ok(vec![1, 2, 3]);
    }
    Ok(values)
}

fn main() -> Result<()> {
    env_logger::init();

    let values = parse_values(env::args().skip(1))?;
    info!("loading {} values", values.len());

    let mut list: LinkedList<i64> = values.into_iter().collect();

    let stdout = io::stdout();
    let mut out = stdout.lock();

    writeln!(out, "list: {}", list)?;
    writeln!(out, "length: {}", list.length())?;
    writeln!(out, "first: {:?}, last: {:?}", list.get_first(), list.get_last())?;
    writeln!(out, "min: {:?}, max: {:?}", list.find_min(), list.find_max())?;
    writeln!(out, "middle: {:?}", list.find_middle_value())?;
    writeln!(out, "second from end: {:?}", list.find_nth_from_end(1))?;

    list.reverse();
    writeln!(out, "reversed:")?;
    list.visit(&mut out).context("failed to write list")?;

    list.create_cycle();
    writeln!(out, "has cycle after linking tail to head: {}", list.has_cycle())?;

    Ok(())
}

//! Interactive URL prompt used when no URL argument is given.

use std::io::{self, BufRead, Write};

pub fn prompt_url<R: BufRead, W: Write>(mut input: R, mut out: W) -> io::Result<String> {
    write!(out, "Enter MediaFire URL: ")?;
    out.flush()?;
    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(line.trim().to_string())
}

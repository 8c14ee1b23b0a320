use anyhow::Result;
use std::io::Write;
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

fn print_colored(mut stream: StandardStream, color: Color, text: &str) -> Result<()> {
    stream.set_color(ColorSpec::new().set_fg(Some(color)))?;
    writeln!(&mut stream, "{text}")?;
    stream.set_color(ColorSpec::new().set_fg(None))?;
    Ok(())
}

pub fn print_info(text: &str) -> Result<()> {
    print_colored(StandardStream::stdout(ColorChoice::Auto), Color::Green, text)
}

pub fn print_warning(text: &str) -> Result<()> {
    print_colored(StandardStream::stdout(ColorChoice::Auto), Color::Yellow, text)
}

pub fn print_error(text: &str) -> Result<()> {
    print_colored(StandardStream::stderr(ColorChoice::Auto), Color::Red, text)
}

pub fn print_title(title: &str) {
    let bar = "=".repeat(title.chars().count());
    println!("{bar}");
    println!("{title}");
    println!("{bar}");
}

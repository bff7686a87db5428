use crossterm::{
    execute,
    style::{Color, Print, ResetColor, SetForegroundColor},
};
use std::io::stdout;

const CURRENT_VERSION: &str = env!("CARGO_PKG_VERSION");
const CRATE_NAME: &str = env!("CARGO_PKG_NAME");

/// Builds the box lines shown by `--version`.
pub fn version_lines() -> Vec<(String, Option<Color>)> {
    vec![
        ("Lineup Builder".to_string(), None),
        ("".to_string(), None),
        (
            format!("Version: {CURRENT_VERSION}"),
            Some(Color::AnsiValue(231)),
        ),
        (format!("Crate: {CRATE_NAME}"), Some(Color::AnsiValue(51))),
    ]
}

/// Helper to print a dynamic-width status box with optional color highlights
pub fn print_version_status_box(lines: Vec<(String, Option<Color>)>) {
    let max_content_width = lines
        .iter()
        .map(|(l, _)| l.chars().count())
        .max()
        .unwrap_or(0);
    let box_width = max_content_width + 4;
    let border = format!("╔{:═<width$}╗", "", width = box_width - 2);
    let sep = format!("╠{:═<width$}╣", "", width = box_width - 2);
    let bottom = format!("╚{:═<width$}╝", "", width = box_width - 2);

    execute!(
        stdout(),
        SetForegroundColor(Color::AnsiValue(231)),
        Print(format!("{border}\n"))
    )
    .ok();
    for (i, (line, color)) in lines.iter().enumerate() {
        let padded = format!("║ {line:<max_content_width$} ║");
        match color {
            // Only the value after the colon is highlighted
            Some(c) => match line.split_once(':') {
                Some((pre, col)) => {
                    let pre = format!("║ {pre}:");
                    let col = col.trim_start();
                    let pad = max_content_width
                        .saturating_sub(pre.chars().count() - 2 + col.chars().count());
                    execute!(
                        stdout(),
                        SetForegroundColor(Color::AnsiValue(231)),
                        Print(pre),
                        SetForegroundColor(*c),
                        Print(col),
                        SetForegroundColor(Color::AnsiValue(231)),
                        Print(format!("{:pad$} ║\n", "", pad = pad)),
                    )
                    .ok();
                }
                None => {
                    execute!(
                        stdout(),
                        SetForegroundColor(*c),
                        Print(padded),
                        SetForegroundColor(Color::AnsiValue(231)),
                        Print("\n")
                    )
                    .ok();
                }
            },
            None => {
                execute!(
                    stdout(),
                    SetForegroundColor(Color::AnsiValue(231)),
                    Print(padded),
                    Print("\n")
                )
                .ok();
            }
        }
        if i == 0 && lines.len() > 2 {
            execute!(stdout(), Print(format!("{sep}\n"))).ok();
        }
    }
    execute!(stdout(), Print(format!("{bottom}\n")), ResetColor).ok();
}

pub fn print_version_info() {
    println!();
    print_version_status_box(version_lines());
}

pub fn print_logo() {
    execute!(
        stdout(),
        SetForegroundColor(Color::AnsiValue(46)),
        Print(format!(
            "\n{}",
            r#"
 _     ___ _   _ _____ _   _ ____
| |   |_ _| \ | | ____| | | |  _ \
| |    | ||  \| |  _| | | | | |_) |
| |___ | || |\  | |___| |_| |  __/
|_____|___|_| \_|_____|\___/|_|
"#
        )),
        ResetColor
    )
    .ok();
}

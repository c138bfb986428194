//! Rendering for whois-cli.
//!
//! Every renderer returns the output as lines so the caller can send them
//! to stdout or join them into a file. Styling goes through the `console`
//! crate and is only applied when the caller asks for color.

use console::{measure_text_width, pad_str, Alignment, Style};
use whois_cli_lib::{Field, OutputMode};

/// Default total table width, borders included.
pub const TABLE_WIDTH: usize = 120;

const MIN_TABLE_WIDTH: usize = 40;
const MIN_VALUE_WIDTH: usize = 16;
const MIN_KEY_WIDTH: usize = 8;
const TABLE_TITLE: &str = "Whois Result";

// "┃ " + key + " : " + value + " ┃"
const ROW_OVERHEAD: usize = 7;

/// Styles used across all renderers.
struct Palette {
    label: Style,
    value: Style,
    frame: Style,
}

impl Palette {
    fn new(color: bool) -> Self {
        let base = Style::new().force_styling(color);
        Self {
            label: base.clone().blue().bold(),
            value: base.clone().white().bold(),
            frame: base.green().bold(),
        }
    }
}

/// Render a response in the requested mode.
///
/// Table falls back to labeled, and labeled falls back to the raw lines,
/// whenever nothing was extracted.
pub fn present(raw: &str, fields: &[Field], mode: OutputMode, color: bool) -> Vec<String> {
    match mode {
        OutputMode::Raw => render_raw(raw),
        OutputMode::Labeled => render_labeled(raw, fields, color),
        OutputMode::Table if fields.is_empty() => render_labeled(raw, fields, color),
        OutputMode::Table => render_table(fields, TABLE_WIDTH, color),
    }
}

/// The response exactly as received, split into lines.
pub fn render_raw(raw: &str) -> Vec<String> {
    raw.lines().map(str::to_string).collect()
}

/// One `Label: Value` line per field.
pub fn render_labeled(raw: &str, fields: &[Field], color: bool) -> Vec<String> {
    if fields.is_empty() {
        return render_raw(raw);
    }

    let palette = Palette::new(color);
    fields
        .iter()
        .map(|field| {
            format!(
                "{}: {}",
                palette.label.apply_to(&field.label),
                palette.value.apply_to(&field.value)
            )
        })
        .collect()
}

/// Box-drawn two-column table with a title row.
pub fn render_table(fields: &[Field], width: usize, color: bool) -> Vec<String> {
    let palette = Palette::new(color);
    let (key_width, value_width) = column_widths(fields, width);
    let inner = key_width + value_width + ROW_OVERHEAD - 2;

    let frame = |s: &str| palette.frame.apply_to(s).to_string();
    let mut lines = Vec::new();

    lines.push(frame(&format!("┏{}┓", "━".repeat(inner))));
    lines.push(format!(
        "{}{}{}",
        frame("┃"),
        palette
            .frame
            .apply_to(pad_str(TABLE_TITLE, inner, Alignment::Center, None)),
        frame("┃")
    ));
    lines.push(frame(&format!("┣{}┫", "━".repeat(inner))));

    for field in fields {
        let keys = wrap_by_width(&field.label, key_width);
        let values = wrap_by_width(&field.value, value_width);
        let rows = keys.len().max(values.len());

        for i in 0..rows {
            let key = keys.get(i).map(String::as_str).unwrap_or("");
            let value = values.get(i).map(String::as_str).unwrap_or("");
            lines.push(format!(
                "{} {} : {} {}",
                frame("┃"),
                palette
                    .label
                    .apply_to(pad_str(key, key_width, Alignment::Left, None)),
                palette
                    .value
                    .apply_to(pad_str(value, value_width, Alignment::Left, None)),
                frame("┃")
            ));
        }
    }

    lines.push(frame(&format!("┗{}┛", "━".repeat(inner))));
    lines
}

/// Split the available width between the key and value columns.
fn column_widths(fields: &[Field], width: usize) -> (usize, usize) {
    let width = width.max(MIN_TABLE_WIDTH);
    let widest_label = fields
        .iter()
        .map(|f| measure_text_width(&f.label))
        .max()
        .unwrap_or(0)
        .max(1);

    let mut key_width = widest_label;
    let mut value_width = width.saturating_sub(ROW_OVERHEAD + key_width);

    if value_width < MIN_VALUE_WIDTH {
        value_width = MIN_VALUE_WIDTH;
        key_width = width
            .saturating_sub(ROW_OVERHEAD + MIN_VALUE_WIDTH)
            .max(MIN_KEY_WIDTH);
    }

    (key_width, value_width)
}

/// Word-wrap text to a display width. Words wider than the column are
/// broken at character boundaries.
pub fn wrap_by_width(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_width = 0;

    for word in text.split_whitespace() {
        let word_width = measure_text_width(word);

        if word_width > width {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
                current_width = 0;
            }
            let mut pieces = hard_wrap(word, width);
            if let Some(last) = pieces.pop() {
                lines.extend(pieces);
                current_width = measure_text_width(&last);
                current = last;
            }
            continue;
        }

        let needed = if current.is_empty() {
            word_width
        } else {
            current_width + 1 + word_width
        };

        if needed > width {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
            current_width = word_width;
        } else {
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(word);
            current_width = needed;
        }
    }

    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}

/// Break a string into chunks no wider than `width` display columns.
fn hard_wrap(text: &str, width: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_width = 0;

    for ch in text.chars() {
        let mut buf = [0u8; 4];
        let ch_width = measure_text_width(ch.encode_utf8(&mut buf));

        if current_width + ch_width > width && !current.is_empty() {
            chunks.push(std::mem::take(&mut current));
            current_width = 0;
        }
        current.push(ch);
        current_width += ch_width;
    }

    if !current.is_empty() {
        chunks.push(current);
    }
    chunks
}

/// Print the built-in server table for `--list-servers`.
pub fn print_servers(servers: &[(&str, &str)]) {
    let heading = Style::new().yellow().bold();
    let suffix_style = Style::new().green().bold();

    println!();
    println!("{}", heading.apply_to("Known WHOIS Servers:"));
    println!();

    for (suffix, server) in servers {
        println!(
            "  {} {}",
            suffix_style.apply_to(format!("{:<10}", format!(".{}", suffix))),
            server
        );
    }

    println!();
    println!("Other suffixes are sent to whois.iana.org");
}

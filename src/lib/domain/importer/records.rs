use crate::domain::errors::ParseError;
use csv::ReaderBuilder;

/// Splits delimited text into rows of fields.
///
/// Rows may have different widths. When `has_header` is set the first row is
/// dropped. Any syntax error aborts the whole parse.
pub fn parse_records(content: &str, has_header: bool) -> Result<Vec<Vec<String>>, ParseError> {
    if content.is_empty() {
        return Ok(Vec::new());
    }
    validate_quoting(content)?;

    let rdr = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(content.as_bytes());
    let mut records = rdr.into_records();
    if has_header {
        if let Some(header) = records.next() {
            header?;
        }
    }

    let mut rows = Vec::new();
    for result in records {
        let record = result?;
        rows.push(record.iter().map(str::to_string).collect());
    }
    Ok(rows)
}

// The csv crate accepts malformed quoting silently, so reject it up front:
// a quote may only open a field, and inside a quoted field it must be doubled
// or close the field.
fn validate_quoting(content: &str) -> Result<(), ParseError> {
    let mut chars = content.chars().peekable();
    let mut line = 1;
    let mut column = 0;
    let mut at_field_start = true;
    let mut quoted_since: Option<usize> = None;

    while let Some(c) = chars.next() {
        column += 1;
        if quoted_since.is_some() {
            match c {
                '"' => match chars.peek() {
                    Some('"') => {
                        chars.next();
                        column += 1;
                    }
                    None | Some(',') | Some('\n') | Some('\r') => quoted_since = None,
                    Some(_) => return Err(ParseError::ExtraneousQuote { line, column }),
                },
                '\n' => {
                    line += 1;
                    column = 0;
                }
                _ => {}
            }
            continue;
        }
        match c {
            '"' if at_field_start => {
                quoted_since = Some(line);
                at_field_start = false;
            }
            '"' => return Err(ParseError::BareQuote { line, column }),
            ',' => at_field_start = true,
            '\n' => {
                line += 1;
                column = 0;
                at_field_start = true;
            }
            _ => at_field_start = false,
        }
    }

    match quoted_since {
        Some(line) => Err(ParseError::UnterminatedQuote { line }),
        None => Ok(()),
    }
}

// CSV import: each file becomes a Lua module of records keyed by the
// header row.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use defold_gen::{OutputDir, rows_lua};
use log::info;

use crate::stem;

pub fn import(out: &OutputDir, files: &[PathBuf]) -> Result<()> {
    for file in files {
        import_one(out, file).with_context(|| format!("Failed to import {}", file.display()))?;
    }
    Ok(())
}

fn import_one(out: &OutputDir, file: &Path) -> Result<()> {
    let text = fs::read_to_string(file)?;
    let records = parse(&text)?;
    let Some((headers, rows)) = records.split_first() else {
        bail!("No header row");
    };
    for (i, row) in rows.iter().enumerate() {
        if row.len() != headers.len() {
            bail!(
                "Row {} has {} fields, the header row has {}",
                i + 2,
                row.len(),
                headers.len()
            );
        }
    }
    let name = stem(file)?;
    out.write(&format!("{name}.lua"), rows_lua(headers, rows))?;
    info!("imported table {name}");
    Ok(())
}

/// Minimal CSV reader. Fields are comma separated; double-quoted fields
/// may carry commas, record breaks and doubled quotes. Blank lines are
/// skipped, CRLF and LF records both accepted. A bare quote inside an
/// unquoted field is an error.
fn parse(text: &str) -> Result<Vec<Vec<String>>> {
    let mut records: Vec<Vec<String>> = Vec::new();
    let mut record: Vec<String> = Vec::new();
    let mut field = String::new();
    let mut field_started = false;
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if !field_started => {
                loop {
                    match chars.next() {
                        Some('"') if chars.peek() == Some(&'"') => {
                            chars.next();
                            field.push('"');
                        }
                        Some('"') => break,
                        Some(inner) => field.push(inner),
                        None => bail!("Unterminated quoted field"),
                    }
                }
                if !matches!(chars.peek(), None | Some(',' | '\r' | '\n')) {
                    bail!("Unexpected character after closing quote");
                }
                field_started = true;
            }
            '"' => bail!("Bare quote in unquoted field"),
            ',' => {
                record.push(std::mem::take(&mut field));
                field_started = false;
            }
            '\r' | '\n' => {
                if c == '\r' && chars.peek() == Some(&'\n') {
                    chars.next();
                }
                if field_started || !field.is_empty() || !record.is_empty() {
                    record.push(std::mem::take(&mut field));
                    records.push(std::mem::take(&mut record));
                }
                field_started = false;
            }
            _ => {
                field.push(c);
                field_started = true;
            }
        }
    }
    if field_started || !field.is_empty() || !record.is_empty() {
        record.push(field);
        records.push(record);
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(row: &[&str]) -> Vec<String> {
        row.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_simple_records() {
        let records = parse("a,b\nc,d\n").unwrap();
        assert_eq!(records, vec![fields(&["a", "b"]), fields(&["c", "d"])]);
    }

    #[test]
    fn test_parse_quoted_comma_and_break() {
        let records = parse("name,desc\n\"goblin, small\",\"line1\nline2\"\n").unwrap();
        assert_eq!(
            records[1],
            fields(&["goblin, small", "line1\nline2"])
        );
    }

    #[test]
    fn test_parse_doubled_quotes() {
        let records = parse("say\n\"he said \"\"hi\"\"\"\n").unwrap();
        assert_eq!(records[1], fields(&["he said \"hi\""]));
    }

    #[test]
    fn test_parse_crlf_records() {
        let records = parse("a,b\r\nc,d\r\n").unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1], fields(&["c", "d"]));
    }

    #[test]
    fn test_parse_skips_blank_lines() {
        let records = parse("a\n\nb\n").unwrap();
        assert_eq!(records, vec![fields(&["a"]), fields(&["b"])]);
    }

    #[test]
    fn test_parse_keeps_trailing_empty_field() {
        let records = parse("a,\n").unwrap();
        assert_eq!(records, vec![fields(&["a", ""])]);
    }

    #[test]
    fn test_parse_quoted_empty_field_is_a_record() {
        let records = parse("\"\"\n").unwrap();
        assert_eq!(records, vec![fields(&[""])]);
    }

    #[test]
    fn test_parse_record_without_final_break() {
        let records = parse("a,b\nc,d").unwrap();
        assert_eq!(records[1], fields(&["c", "d"]));
    }

    #[test]
    fn test_parse_unterminated_quote_fails() {
        assert!(parse("\"open\n").is_err());
    }

    #[test]
    fn test_parse_garbage_after_closing_quote_fails() {
        assert!(parse("\"a\"x,b\n").is_err());
    }

    #[test]
    fn test_parse_bare_quote_in_unquoted_field_fails() {
        assert!(parse("a\"b,c\n").is_err());
    }

    #[test]
    fn test_import_writes_keyed_lua_rows() {
        let dir = tempfile::tempdir().unwrap();
        let table = dir.path().join("enemies.csv");
        fs::write(&table, "name,hp\ngoblin,12\ntroll,40\n").unwrap();
        let out = OutputDir::new(dir.path().join("import"));

        import(&out, &[table]).unwrap();

        let lua = fs::read_to_string(out.path("enemies.lua")).unwrap();
        let expected = "local M = {}\n\
                        table.insert(M, { name = \"goblin\",hp = \"12\" })\n\
                        table.insert(M, { name = \"troll\",hp = \"40\" })\n\
                        return M\n";
        assert_eq!(lua, expected);
    }

    #[test]
    fn test_import_rejects_ragged_rows() {
        let dir = tempfile::tempdir().unwrap();
        let table = dir.path().join("bad.csv");
        fs::write(&table, "a,b\nonly-one\n").unwrap();
        let out = OutputDir::new(dir.path().join("import"));

        let err = import(&out, &[table]).unwrap_err();
        assert!(format!("{err:#}").contains("Row 2 has 1 fields"));
    }

    #[test]
    fn test_import_rejects_empty_file() {
        let dir = tempfile::tempdir().unwrap();
        let table = dir.path().join("empty.csv");
        fs::write(&table, "").unwrap();
        let out = OutputDir::new(dir.path().join("import"));

        assert!(import(&out, &[table]).is_err());
    }
}

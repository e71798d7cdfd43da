// Lua modules: the data-table registry, CSV row tables and ink stories.

use import_core::DataTable;

/// Script providing the `data` property trigger instances override with
/// their table index.
pub const DATA_SCRIPT: &str = "go.property(\"data\", 1)";

const DATA_ATTACHED: &str = r#"data.attached = function (id)
	local script = msg.url(nil, id, "data")
	local index = go.get(script, "data")
	return data[index]
end
return data
"#;

/// Lua module over the run's data table. Entries keep their 1-based
/// indices so a `data` property value looks its own name up directly
/// through `data.attached`.
pub fn data_lua(data: &DataTable) -> String {
    let mut out = String::from("local data = {}\n");
    for (i, name) in data.names().iter().enumerate() {
        out.push_str(&format!("data[{}] = {}\n", i + 1, lua_quote(name)));
    }
    out.push_str(DATA_ATTACHED);
    out
}

/// Lua module over parsed CSV records: one `table.insert` per row, with
/// every field keyed by its column header.
pub fn rows_lua(headers: &[String], rows: &[Vec<String>]) -> String {
    let mut out = String::from("local M = {}\n");
    for row in rows {
        let fields: Vec<String> = headers
            .iter()
            .zip(row)
            .map(|(header, value)| format!("{header} = {}", lua_quote(value)))
            .collect();
        out.push_str(&format!("table.insert(M, {{ {} }})\n", fields.join(",")));
    }
    out.push_str("return M\n");
    out
}

/// Lua module wrapping an ink script in a parsed narrator story.
pub fn ink_lua(source: &str) -> String {
    format!(
        "local narrator = require('narrator.narrator')\nlocal book = narrator.parse_content([[\n{source}\n]])\nlocal story = narrator.init_story(book)\nreturn story\n"
    )
}

/// Quote a string as a Lua double-quoted literal. Control characters use
/// decimal escapes, which Lua accepts and Rust's `{:?}` would not emit.
pub fn lua_quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if (c as u32) < 0x20 => out.push_str(&format!("\\{}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_lua_keeps_one_based_indices() {
        let mut data = DataTable::new();
        data.push("spawn");
        data.push("exit");
        let expected = "local data = {}\n\
                        data[1] = \"spawn\"\n\
                        data[2] = \"exit\"\n\
                        data.attached = function (id)\n\
                        \tlocal script = msg.url(nil, id, \"data\")\n\
                        \tlocal index = go.get(script, \"data\")\n\
                        \treturn data[index]\n\
                        end\n\
                        return data\n";
        assert_eq!(data_lua(&data), expected);
    }

    #[test]
    fn test_empty_data_lua_still_returns_table() {
        let out = data_lua(&DataTable::new());
        assert!(out.starts_with("local data = {}\ndata.attached"));
        assert!(out.ends_with("return data\n"));
    }

    #[test]
    fn test_rows_lua_keys_fields_by_header() {
        let headers = vec!["name".to_string(), "hp".to_string()];
        let rows = vec![
            vec!["goblin".to_string(), "12".to_string()],
            vec!["troll".to_string(), "40".to_string()],
        ];
        let expected = "local M = {}\n\
                        table.insert(M, { name = \"goblin\",hp = \"12\" })\n\
                        table.insert(M, { name = \"troll\",hp = \"40\" })\n\
                        return M\n";
        assert_eq!(rows_lua(&headers, &rows), expected);
    }

    #[test]
    fn test_ink_lua_wraps_source() {
        let expected = "local narrator = require('narrator.narrator')\n\
                        local book = narrator.parse_content([[\n\
                        Hello.\n\
                        -> END\n\
                        ]])\n\
                        local story = narrator.init_story(book)\n\
                        return story\n";
        assert_eq!(ink_lua("Hello.\n-> END"), expected);
    }

    #[test]
    fn test_lua_quote_escapes() {
        assert_eq!(lua_quote("plain"), "\"plain\"");
        assert_eq!(lua_quote("a \"b\""), "\"a \\\"b\\\"\"");
        assert_eq!(lua_quote("line\nbreak"), "\"line\\nbreak\"");
        assert_eq!(lua_quote("bell\x07"), "\"bell\\7\"");
    }

    #[test]
    fn test_data_script_declares_property() {
        assert_eq!(DATA_SCRIPT, "go.property(\"data\", 1)");
    }
}

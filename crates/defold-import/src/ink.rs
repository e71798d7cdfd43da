// Ink import: each story ships as a Lua module wrapping the raw script
// for the runtime narrator to parse.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use defold_gen::{OutputDir, ink_lua};
use log::info;

use crate::stem;

pub fn import(out: &OutputDir, files: &[PathBuf]) -> Result<()> {
    for file in files {
        let source = fs::read_to_string(file)
            .with_context(|| format!("Failed to read {}", file.display()))?;
        let name = stem(file)?;
        out.write(&format!("{name}.lua"), ink_lua(&source))?;
        info!("imported story {name}");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_import_wraps_story_source() {
        let dir = tempfile::tempdir().unwrap();
        let story = dir.path().join("intro.ink");
        fs::write(&story, "Hello there.\n-> END\n").unwrap();
        let out = OutputDir::new(dir.path().join("import"));

        import(&out, &[story]).unwrap();

        let lua = fs::read_to_string(out.path("intro.lua")).unwrap();
        let expected = "local narrator = require('narrator.narrator')\n\
                        local book = narrator.parse_content([[\n\
                        Hello there.\n\
                        -> END\n\
                        \n\
                        ]])\n\
                        local story = narrator.init_story(book)\n\
                        return story\n";
        assert_eq!(lua, expected);
    }
}
